use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load. Nothing is written if an earlier phase fails.
    pub async fn run(&self) -> Result<RunSummary> {
        self.execute(true).await
    }

    /// Extract and transform only; reports what a real run would keep.
    pub async fn dry_run(&self) -> Result<RunSummary> {
        self.execute(false).await
    }

    async fn execute(&self, write_output: bool) -> Result<RunSummary> {
        tracing::info!("Reading quote export...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Read {} data rows", rows.len());

        let result = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Kept {} rows, dropped {} rows",
            result.kept_count,
            result.dropped_count
        );

        let output_path = if write_output {
            let path = self.pipeline.load(&result).await?;
            tracing::info!("Wrote {} rows to {}", result.records.len(), path);
            Some(path)
        } else {
            None
        };

        Ok(RunSummary {
            kept_count: result.kept_count,
            dropped_count: result.dropped_count,
            drop_reasons: result.drop_reasons,
            output_path,
        })
    }
}
