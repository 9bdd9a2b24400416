// Copyright (c) 2025 AML Checker
// HTTP facade: one read-only screening endpoint per supported chain

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::analyzer::RiskAnalyzer;
use crate::chains::TransactionSource;
use crate::error::AmlError;
use crate::util::snake_case_keys;

/// One screening pipeline: a fetcher plus the analyzer configured for the
/// same chain.
pub struct ChainEndpoint {
    source: Arc<dyn TransactionSource>,
    analyzer: RiskAnalyzer,
}

impl ChainEndpoint {
    pub fn new(source: Arc<dyn TransactionSource>, analyzer: RiskAnalyzer) -> Self {
        Self { source, analyzer }
    }

    async fn check(&self, address: &str) -> Result<Value, AmlError> {
        let transactions = self.source.fetch(address).await?;
        info!(%address, count = transactions.len(), "fetched transaction history");

        let result = self.analyzer.analyze(address, &transactions, Utc::now())?;
        let serialized = serde_json::to_value(&result)?;
        Ok(snake_case_keys(serialized))
    }
}

pub struct AppState {
    pub bitcoin: ChainEndpoint,
    pub ethereum: ChainEndpoint,
    pub tron: ChainEndpoint,
}

#[derive(Debug, Serialize)]
struct ApiErrorResponse {
    error: String,
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<ApiErrorResponse>)>;

fn error_response(err: AmlError) -> (StatusCode, Json<ApiErrorResponse>) {
    let status = match err {
        AmlError::MissingData { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    warn!(error = %err, "aml check failed");
    (status, Json(ApiErrorResponse { error: err.to_string() }))
}

async fn btc_check(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult {
    state
        .bitcoin
        .check(&address)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn eth_check(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult {
    state
        .ethereum
        .check(&address)
        .await
        .map(Json)
        .map_err(error_response)
}

async fn usdt_trc20_check(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> ApiResult {
    state
        .tron
        .check(&address)
        .await
        .map(Json)
        .map_err(error_response)
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/aml_check/btc/:address", get(btc_check))
        .route("/aml_check/eth/:address", get(eth_check))
        .route("/aml_check/usdt_trc20/:address", get(usdt_trc20_check))
        .with_state(state)
}
