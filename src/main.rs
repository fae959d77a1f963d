//! FoodCalc
//!
//! Serves the nutrition lookup over HTTP, or as an MCP server on stdio.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use foodcalc::build_info;
use foodcalc::config::{Config, Transport};
use foodcalc::mcp::FoodCalcService;
use foodcalc::server::{self, AppState};
use foodcalc::source::{OpenFoodFactsClient, ProductSource};
use foodcalc::tools::StatusTracker;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so the MCP stdio transport stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("foodcalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    build_info::print_startup_banner(config.transport.as_str());
    eprintln!("Search endpoint: {}", config.search_url);

    let client = OpenFoodFactsClient::new(config.search_url.clone(), &config.user_agent)?;
    let source: Arc<dyn ProductSource> = Arc::new(client);
    let status = StatusTracker::new(config.search_url.clone());

    match config.transport {
        Transport::Http => {
            eprintln!("Starting HTTP API on {}...", config.bind_addr);
            let state = AppState::new(source, status).with_calculate_body_limit(config.max_body_bytes);
            server::serve(config.bind_addr, state).await?;
        }
        Transport::Stdio => {
            eprintln!("Starting MCP server on stdio...");
            let service = FoodCalcService::new(source, status);
            let server = service.serve((stdin(), stdout())).await?;
            server.waiting().await?;
        }
    }

    Ok(())
}
