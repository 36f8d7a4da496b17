pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::columns::ColumnMap;
use crate::domain::model::FilterConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_finite, validate_non_empty_string, validate_path, validate_range, Validate,
};

#[cfg(feature = "cli")]
use crate::domain::model::{DEFAULT_MAX_YEAR, DEFAULT_MIN_EQUITY};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub const DEFAULT_OUTPUT_PATH: &str = "Previous Service Customer.csv";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "previous-service")]
#[command(about = "Convert a quote export CSV into the Previous Service format")]
pub struct CliConfig {
    /// Path to the quote CSV export (source)
    #[arg(long)]
    pub input: String,

    /// Path for the transformed CSV [default: "Previous Service Customer.csv"]
    #[arg(long)]
    pub output: Option<String>,

    /// Keep vehicles with TradeYear <= this year [default: 2024]
    #[arg(long)]
    pub max_year: Option<i64>,

    /// Discard rows with TradeEquity below this value [default: -6000]
    #[arg(long, allow_negative_numbers = true)]
    pub min_equity: Option<f64>,

    /// Optional TOML file with filter, column and output settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// Read and filter the export, report counts, write nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub summary_json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges flags over the optional TOML file over built-in defaults.
    pub fn resolve(&self) -> Result<RunConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(RunConfig::merge(self, file))
    }
}

/// Settings for one run after every source has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input_path: String,
    pub output_path: String,
    pub filter: FilterConfig,
    pub columns: ColumnMap,
}

impl RunConfig {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            filter: FilterConfig::default(),
            columns: ColumnMap::default(),
        }
    }

    #[cfg(feature = "cli")]
    fn merge(cli: &CliConfig, file: TomlConfig) -> Self {
        let filter_file = file.filter.unwrap_or_default();
        let output_file = file.output.unwrap_or_default();

        Self {
            input_path: cli.input.clone(),
            output_path: cli
                .output
                .clone()
                .or(output_file.path)
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            filter: FilterConfig {
                max_year: cli
                    .max_year
                    .or(filter_file.max_year)
                    .unwrap_or(DEFAULT_MAX_YEAR),
                min_equity: cli
                    .min_equity
                    .or(filter_file.min_equity)
                    .unwrap_or(DEFAULT_MIN_EQUITY),
            },
            columns: file.columns.unwrap_or_default(),
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output", &self.output_path)?;
        validate_range("max_year", self.filter.max_year, 1000, 9999)?;
        validate_finite("min_equity", self.filter.min_equity)?;
        for (field, column) in self.columns.recognized() {
            validate_non_empty_string(&format!("columns.{}", field), column)?;
        }
        Ok(())
    }
}

impl ConfigProvider for RunConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn filter(&self) -> FilterConfig {
        self.filter
    }

    fn columns(&self) -> &ColumnMap {
        &self.columns
    }
}
