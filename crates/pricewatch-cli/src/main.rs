mod report;

use clap::{Parser, Subcommand};
use pricewatch_scraper::PriceService;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch-cli")]
#[command(about = "Compare a product's price across Amazon EU storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the configured storefronts.
    Stores {
        #[arg(long)]
        json: bool,
    },
    /// Fetch a product from every store, cheapest first.
    Prices {
        asin: String,
        #[arg(long)]
        json: bool,
    },
    /// Fetch a product from a single store.
    Price {
        asin: String,
        store: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pricewatch_core::load_app_config()?;
    // Logs go to stderr so `--json` output stays machine-readable.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("pricewatch-cli: run with --help for usage");
        return Ok(());
    };

    let service = PriceService::from_app_config(&config)?;

    match command {
        Commands::Stores { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(service.stores())?);
            } else {
                report::print_stores(service.stores());
            }
        }
        Commands::Prices { asin, json } => {
            let result = service.quote_all(&asin).await?;
            tracing::info!(
                asin = %result.asin,
                stores = result.results.len(),
                priced = result.priced_count(),
                "price comparison complete"
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                report::print_aggregate(&result);
            }
        }
        Commands::Price { asin, store, json } => {
            let quote = service.quote_one(&asin, &store).await?;
            if let Some(error) = &quote.error {
                tracing::warn!(store = %quote.store_id, error = %error, "store quote failed");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                report::print_quote(&quote);
            }
        }
    }

    Ok(())
}
