mod analyzer;
mod api;
mod chains;
mod error;
mod models;
mod risk;
mod util;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use analyzer::RiskAnalyzer;
use api::{AppState, ChainEndpoint};
use chains::{bitcoin, ethereum, tron, BitcoinClient, EthereumClient, TronClient};

#[derive(Debug, Parser)]
#[command(
    name = "aml-checker",
    about = "Heuristic AML risk scoring for BTC, ETH and USDT-TRC20 addresses"
)]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Timeout applied to every upstream chain API call, in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.request_timeout_secs))
        .build()?;

    let etherscan_api_key = std::env::var("ETHERSCAN_API_KEY").unwrap_or_default();
    let trongrid_api_key = std::env::var("TRONGRID_API_KEY").ok();

    let btc_base = std::env::var("BLOCKCHAIN_INFO_URL")
        .unwrap_or_else(|_| bitcoin::DEFAULT_BASE_URL.to_string());
    let eth_base = std::env::var("ETHERSCAN_URL")
        .unwrap_or_else(|_| ethereum::DEFAULT_BASE_URL.to_string());
    let tron_base =
        std::env::var("TRONGRID_URL").unwrap_or_else(|_| tron::DEFAULT_BASE_URL.to_string());

    let state = Arc::new(AppState {
        bitcoin: ChainEndpoint::new(
            Arc::new(BitcoinClient::new(http.clone(), btc_base)),
            RiskAnalyzer::new(bitcoin::chain_spec()),
        ),
        ethereum: ChainEndpoint::new(
            Arc::new(EthereumClient::new(http.clone(), eth_base, etherscan_api_key)),
            RiskAnalyzer::new(ethereum::chain_spec()),
        ),
        tron: ChainEndpoint::new(
            Arc::new(TronClient::new(http, tron_base, trongrid_api_key)),
            RiskAnalyzer::new(tron::chain_spec()),
        ),
    });

    let app = api::router(state);

    info!("aml-checker listening on {}", args.bind);
    axum::Server::bind(&args.bind)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
