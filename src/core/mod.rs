pub mod csv_io;
pub mod etl;
pub mod normalize;
pub mod pipeline;
pub mod transformer;

pub use crate::domain::model::{InputRow, OutputRecord, RunSummary, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
