//! Fetch products and print a nutrition report
//! Usage: cargo run --bin nutrition_report -- <pages> <limit> "<products>" "<quantities>"
//! Example: nutrition_report 2 100 "Nutella, Coca-Cola" "50g, 330ml"

use foodcalc::config::Config;
use foodcalc::source::OpenFoodFactsClient;
use foodcalc::tools::{fetch_and_calculate, format_report, FetchArgs};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("foodcalc=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
        eprintln!("Usage: {} <pages> <limit> \"<products>\" \"<quantities>\"", args[0]);
        std::process::exit(2);
    }

    let fetch = FetchArgs {
        pages: Some(args[1].trim().parse()?),
        limit: Some(args[2].trim().parse()?),
        ..Default::default()
    };

    let config = Config::from_env()?;
    let client = OpenFoodFactsClient::new(config.search_url, &config.user_agent)?;

    let result = fetch_and_calculate(&client, &fetch, &args[3], &args[4]).await?;
    print!("{}", format_report(&result));

    Ok(())
}
