use clap::Parser;
use previous_service::utils::{logger, validation::Validate};
use previous_service::{CliConfig, EtlEngine, LocalStorage, PreviousServicePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting previous-service");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    tracing::info!(
        "Filter: TradeYear <= {}, TradeEquity >= {}",
        config.filter.max_year,
        config.filter.min_equity
    );

    let storage = LocalStorage::new(".");
    let pipeline = PreviousServicePipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let outcome = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no output will be written");
        engine.dry_run().await
    } else {
        engine.run().await
    };

    match outcome {
        Ok(summary) => {
            if cli.summary_json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                if let Some(path) = &summary.output_path {
                    println!("Wrote {} rows to {}", summary.kept_count, path);
                }
                println!(
                    "Kept: {}, Dropped: {}",
                    summary.kept_count, summary.dropped_count
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
