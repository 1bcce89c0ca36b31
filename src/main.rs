use clap::Parser;
use payout_flow::utils::{logger, validation::Validate};
use payout_flow::{CliConfig, SandboxClient, Workflow};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting payout-flow");
    if config.verbose {
        // token stays out of the logs
        tracing::debug!(
            "base_url={}, {} {} -> {}",
            config.base_url,
            config.amount,
            config.source_currency,
            config.target_currency
        );
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let recipient = match config.recipient_details() {
        Ok(recipient) => recipient,
        Err(e) => {
            tracing::error!("Failed to load recipient details: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let client = SandboxClient::new(&config.base_url, &config.api_token);
    let workflow = Workflow::new(client, config.quote_request(), recipient);

    let run = workflow.run().await;
    match run.outcome {
        Ok(receipt) => {
            tracing::info!(
                "Transfer {} created with status {}",
                receipt.transfer_id,
                receipt.status
            );
            println!("All tasks completed successfully.");
        }
        Err(failure) => {
            tracing::error!("Workflow failed during {}: {}", failure.stage, failure.source);
            eprintln!("Workflow failed during {}: {}", failure.stage, failure.source);
            std::process::exit(1);
        }
    }

    Ok(())
}
