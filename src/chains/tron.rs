// Copyright (c) 2025 AML Checker
// TRON adapter: TronGrid TRC20 wire types, paginated fetcher and normalization

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::chains::{timestamp_from_millis, TransactionSource};
use crate::error::AmlError;
use crate::models::{Transaction, TxOutput};
use crate::risk::{ChainModel, ChainSpec};

pub const DEFAULT_BASE_URL: &str = "https://api.trongrid.io";

const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";

pub fn chain_spec() -> ChainSpec {
    ChainSpec {
        // The currency type comes from the token metadata of the first
        // transaction, so an empty history cannot be analyzed.
        ticker: None,
        // Token base units.
        large_tx_threshold: 1_000_000_000.0,
        total_volume_threshold: 50_000_000_000.0,
        model: ChainModel::Account,
    }
}

/// One page of TRC20 transfers. The continuation link lives in
/// `meta.links.next` and is absent on the last page.
#[derive(Debug, Deserialize)]
struct Trc20Page {
    #[serde(default)]
    data: Vec<RawTx>,
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    links: Option<PageLinks>,
}

#[derive(Debug, Deserialize)]
struct PageLinks {
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTx {
    transaction_id: String,
    block_timestamp: i64,
    from: String,
    to: String,
    value: String,
    token_info: TokenInfo,
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    symbol: String,
}

pub struct TronClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TronClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl TransactionSource for TronClient {
    async fn fetch(&self, address: &str) -> Result<Vec<Transaction>, AmlError> {
        let mut url = format!(
            "{}/v1/accounts/{}/transactions/trc20",
            self.base_url, address
        );
        let mut all_transactions = Vec::new();
        let mut page = 0_u32;

        // Pages are walked iteratively through the continuation link and
        // concatenated before normalization.
        loop {
            debug!(%address, page, "fetching trc20 transaction page");

            let mut request = self.http.get(&url);
            if let Some(key) = &self.api_key {
                request = request.header(API_KEY_HEADER, key);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AmlError::Fetch {
                    status: status.as_u16(),
                    body,
                });
            }

            let parsed: Trc20Page = response.json().await?;
            all_transactions.extend(parsed.data);

            match parsed.meta.and_then(|meta| meta.links).and_then(|l| l.next) {
                Some(next) => {
                    url = next;
                    page += 1;
                }
                None => break,
            }
        }

        normalize(all_transactions)
    }
}

fn normalize(txs: Vec<RawTx>) -> Result<Vec<Transaction>, AmlError> {
    txs.into_iter()
        .map(|tx| {
            let timestamp = timestamp_from_millis(tx.block_timestamp, "block_timestamp")?;
            let value = tx
                .value
                .parse::<u128>()
                .map_err(|_| AmlError::MalformedData { field: "value" })? as f64;

            Ok(Transaction {
                id: tx.transaction_id,
                timestamp,
                value,
                senders: vec![tx.from],
                receivers: vec![TxOutput {
                    address: tx.to,
                    value,
                }],
                token_symbol: Some(tx.token_info.symbol),
            })
        })
        .collect()
}
