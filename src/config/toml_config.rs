use crate::domain::columns::ColumnMap;
use crate::utils::error::{EtlError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

/// Optional settings file; every table and key may be left out.
///
/// ```toml
/// [filter]
/// max_year = 2024
/// min_equity = -6000
///
/// [columns]
/// trade_year = "ModelYear"
///
/// [output]
/// path = "${EXPORT_DIR}/Previous Service Customer.csv"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub filter: Option<FilterSection>,
    pub columns: Option<ColumnMap>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    pub max_year: Option<i64>,
    pub min_equity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub path: Option<String>,
}

impl TomlConfig {
    /// Loads the config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Expands `${VAR}` placeholders; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.filter.is_none());
        assert!(config.columns.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_partial_column_overrides_keep_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[columns]
trade_year = "ModelYear"
customer_mobile_phone = "Cell"
"#,
        )
        .unwrap();

        let columns = config.columns.unwrap();
        assert_eq!(columns.trade_year, "ModelYear");
        assert_eq!(columns.customer_mobile_phone, "Cell");
        assert_eq!(columns.customer_first_name, "CustomerFirstName");
        assert_eq!(columns.phone_priority()[2], "Cell");
    }

    #[test]
    fn test_filter_section() {
        let config = TomlConfig::from_toml_str(
            r#"
[filter]
max_year = 2023
min_equity = -2500.5
"#,
        )
        .unwrap();

        let filter = config.filter.unwrap();
        assert_eq!(filter.max_year, Some(2023));
        assert_eq!(filter.min_equity, Some(-2500.5));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PREVIOUS_SERVICE_TEST_DIR", "/tmp/exports");
        let config = TomlConfig::from_toml_str(
            r#"
[output]
path = "${PREVIOUS_SERVICE_TEST_DIR}/out.csv"
"#,
        )
        .unwrap();
        assert_eq!(config.output.unwrap().path.as_deref(), Some("/tmp/exports/out.csv"));

        let config = TomlConfig::from_toml_str(
            r#"
[output]
path = "${PREVIOUS_SERVICE_UNSET_VAR}/out.csv"
"#,
        )
        .unwrap();
        assert_eq!(
            config.output.unwrap().path.as_deref(),
            Some("${PREVIOUS_SERVICE_UNSET_VAR}/out.csv")
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[filter]\nmax_year = \"soon\"\n").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));

        let err = TomlConfig::from_toml_str("[filter]\nmax_yr = 2024\n").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
    }
}
