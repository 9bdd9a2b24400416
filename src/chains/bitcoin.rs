// Copyright (c) 2025 AML Checker
// Bitcoin adapter: blockchain.info wire types, fetcher and normalization

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::chains::{timestamp_from_secs, TransactionSource};
use crate::error::AmlError;
use crate::models::{Transaction, TxOutput};
use crate::risk::{ChainModel, ChainSpec};

pub const DEFAULT_BASE_URL: &str = "https://blockchain.info";

pub fn chain_spec() -> ChainSpec {
    ChainSpec {
        ticker: Some("BTC"),
        // Satoshi. 1e9 satoshi = 10 BTC per transfer, 5e10 aggregate.
        large_tx_threshold: 1_000_000_000.0,
        total_volume_threshold: 50_000_000_000.0,
        model: ChainModel::Utxo,
    }
}

/// `rawaddr` response; everything but the transaction list is ignored.
#[derive(Debug, Deserialize)]
struct RawAddress {
    txs: Vec<RawTx>,
}

#[derive(Debug, Deserialize)]
struct RawTx {
    hash: String,
    time: i64,
    #[serde(default)]
    inputs: Vec<RawInput>,
    #[serde(default)]
    out: Vec<RawOutput>,
}

#[derive(Debug, Deserialize)]
struct RawInput {
    prev_out: Option<RawOutput>,
}

/// Output of a transaction, also embedded as an input's `prev_out`.
/// `addr` is absent for non-standard scripts.
#[derive(Debug, Deserialize)]
struct RawOutput {
    addr: Option<String>,
    value: u64,
}

pub struct BitcoinClient {
    http: reqwest::Client,
    base_url: String,
}

impl BitcoinClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TransactionSource for BitcoinClient {
    async fn fetch(&self, address: &str) -> Result<Vec<Transaction>, AmlError> {
        let url = format!("{}/rawaddr/{}", self.base_url, address);
        debug!(%address, "fetching bitcoin transaction history");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AmlError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        let raw: RawAddress = response.json().await?;
        normalize(raw.txs)
    }
}

/// Map raw transactions to the normalized shape. The transaction value is
/// the sum over all outputs; outputs without an address still contribute
/// value but are skipped for address accounting.
fn normalize(txs: Vec<RawTx>) -> Result<Vec<Transaction>, AmlError> {
    txs.into_iter()
        .map(|tx| {
            let timestamp = timestamp_from_secs(tx.time, "time")?;
            let value: f64 = tx.out.iter().map(|out| out.value as f64).sum();
            let senders = tx
                .inputs
                .into_iter()
                .filter_map(|input| input.prev_out.and_then(|prev| prev.addr))
                .collect();
            let receivers = tx
                .out
                .into_iter()
                .filter_map(|out| {
                    out.addr.map(|address| TxOutput {
                        address,
                        value: out.value as f64,
                    })
                })
                .collect();

            Ok(Transaction {
                id: tx.hash,
                timestamp,
                value,
                senders,
                receivers,
                token_symbol: None,
            })
        })
        .collect()
}
