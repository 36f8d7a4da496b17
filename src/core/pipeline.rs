use crate::core::csv_io::{parse_export, write_records};
use crate::core::transformer::RowTransformer;
use crate::core::{ConfigProvider, InputRow, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;

/// Quote export in, Previous Service CSV out.
pub struct PreviousServicePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    transformer: RowTransformer,
}

impl<S: Storage, C: ConfigProvider> PreviousServicePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let transformer = RowTransformer::with_columns(config.filter(), config.columns().clone());
        Self {
            storage,
            config,
            transformer,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PreviousServicePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputRow>> {
        tracing::debug!("Reading quote export from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        let export = parse_export(&bytes)?;

        let missing = self.config.columns().missing_from(&export.headers);
        if !export.headers.is_empty() && !missing.is_empty() {
            tracing::warn!(
                "Input is missing {} recognised column(s): {}",
                missing.len(),
                missing.join(", ")
            );
        }

        Ok(export.rows)
    }

    async fn transform(&self, rows: Vec<InputRow>) -> Result<TransformResult> {
        let result = self.transformer.run(&rows);

        for (reason, count) in &result.drop_reasons {
            tracing::debug!("Dropped {} row(s): {}", count, reason);
        }

        Ok(result)
    }

    async fn load(&self, result: &TransformResult) -> Result<String> {
        let data = write_records(&result.records)?;

        tracing::debug!(
            "Writing {} rows ({} bytes) to storage",
            result.records.len(),
            data.len()
        );
        self.storage
            .write_file(self.config.output_path(), &data)
            .await?;

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::columns::ColumnMap;
    use crate::domain::model::{DropReason, FilterConfig};
    use crate::utils::error::EtlError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        filter: FilterConfig,
        columns: ColumnMap,
    }

    impl MockConfig {
        fn new(filter: FilterConfig) -> Self {
            Self {
                filter,
                columns: ColumnMap::default(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "quotes.csv"
        }

        fn output_path(&self) -> &str {
            "previous.csv"
        }

        fn filter(&self) -> FilterConfig {
            self.filter
        }

        fn columns(&self) -> &ColumnMap {
            &self.columns
        }
    }

    const EXPORT: &str = "CustomerFirstName,CustomerLastName,CustomerName,CustomerMobilePhone,TradeYear,TradeEquity,TradePurchaseDate,TradeModel\n\
        john,SMITH,,(850) 508-6625,2023,-500,5/14/2022,F-150\n\
        ,,,(850) 555-0101,2020,0,,Civic\n\
        ,lee,ANN LEE,850.555.0102,2025,0,2022-01-09,Model 3\n\
        max,power,,8505550103,2019,\"-$7,500.00\",,Camry\n";

    #[tokio::test]
    async fn test_extract_parses_rows() {
        let storage = MockStorage::with_file("quotes.csv", EXPORT);
        let pipeline = PreviousServicePipeline::new(storage, MockConfig::new(FilterConfig::default()));

        let rows = pipeline.extract().await.unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].get("CustomerFirstName"), Some("john"));
        assert_eq!(rows[3].get("TradeEquity"), Some("-$7,500.00"));
    }

    #[tokio::test]
    async fn test_extract_missing_input_fails() {
        let storage = MockStorage::with_file("other.csv", EXPORT);
        let pipeline = PreviousServicePipeline::new(storage, MockConfig::new(FilterConfig::default()));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_applies_filter() {
        let storage = MockStorage::with_file("quotes.csv", EXPORT);
        let pipeline = PreviousServicePipeline::new(storage, MockConfig::new(FilterConfig::default()));

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();

        assert_eq!(result.kept_count, 1);
        assert_eq!(result.dropped_count, 3);
        assert_eq!(result.records[0].customer, "John");
        assert_eq!(result.drop_reasons.get(&DropReason::MissingFirstName), Some(&1));
        assert_eq!(result.drop_reasons.get(&DropReason::TradeYearTooNew), Some(&1));
        assert_eq!(result.drop_reasons.get(&DropReason::EquityTooNegative), Some(&1));
    }

    #[tokio::test]
    async fn test_transform_with_relaxed_filter() {
        let storage = MockStorage::with_file("quotes.csv", EXPORT);
        let filter = FilterConfig {
            max_year: 2025,
            min_equity: -10_000.0,
        };
        let pipeline = PreviousServicePipeline::new(storage, MockConfig::new(filter));

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();

        assert_eq!(result.kept_count, 3);
        let names: Vec<&str> = result.records.iter().map(|r| r.customer.as_str()).collect();
        assert_eq!(names, vec!["John", "Ann", "Max"]);
        assert_eq!(result.records[1].purchase_date, "1/9/22");
        assert_eq!(result.records[1].phone_number, "18505550102");
    }

    #[tokio::test]
    async fn test_load_writes_csv() {
        let storage = MockStorage::with_file("quotes.csv", EXPORT);
        let pipeline =
            PreviousServicePipeline::new(storage.clone(), MockConfig::new(FilterConfig::default()));

        let rows = pipeline.extract().await.unwrap();
        let result = pipeline.transform(rows).await.unwrap();
        let output_path = pipeline.load(&result).await.unwrap();

        assert_eq!(output_path, "previous.csv");
        let written = String::from_utf8(storage.get_file("previous.csv").await.unwrap()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                "phone_number,Customer,Last Name,Purchase Date,Year,Model,VIN,Miles,Payoff,Payment",
                "18505086625,John,Smith,5/14/22,23,F-150,,,,",
            ]
        );
    }
}
