pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, RunConfig};

pub use core::{etl::EtlEngine, pipeline::PreviousServicePipeline, transformer::RowTransformer};
pub use domain::model::{FilterConfig, InputRow, OutputRecord, RunSummary, TransformResult};
pub use utils::error::{EtlError, Result};
