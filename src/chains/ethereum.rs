// Copyright (c) 2025 AML Checker
// Ethereum adapter: Etherscan wire types, fetcher and normalization

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::chains::{timestamp_from_secs, TransactionSource};
use crate::error::AmlError;
use crate::models::{Transaction, TxOutput};
use crate::risk::{ChainModel, ChainSpec};

pub const DEFAULT_BASE_URL: &str = "https://api.etherscan.io";

const WEI_PER_ETH: f64 = 1e18;

pub fn chain_spec() -> ChainSpec {
    ChainSpec {
        ticker: Some("ETH"),
        // Ether.
        large_tx_threshold: 10.0,
        total_volume_threshold: 50_000_000_000.0,
        model: ChainModel::Account,
    }
}

/// One entry of an Etherscan `txlist` result. Etherscan encodes every
/// numeric field as a decimal string.
#[derive(Debug, Deserialize)]
struct RawTx {
    hash: String,
    #[serde(rename = "timeStamp")]
    time_stamp: String,
    from: String,
    /// Empty for contract-creation transactions.
    to: String,
    value: String,
}

pub struct EthereumClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EthereumClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: String) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl TransactionSource for EthereumClient {
    async fn fetch(&self, address: &str) -> Result<Vec<Transaction>, AmlError> {
        let url = format!("{}/api", self.base_url);
        debug!(%address, "fetching ethereum transaction history");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("sort", "asc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AmlError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        // On failure Etherscan reports status "0" and puts a message (or a
        // bare string) in `result`, so check before decoding the list.
        let mut envelope: Value = response.json().await?;
        let api_status = envelope["status"].as_str().unwrap_or_default();
        if api_status != "1" {
            let message = envelope["message"]
                .as_str()
                .unwrap_or("unknown Etherscan failure")
                .to_string();
            return Err(AmlError::BadResponse(message));
        }

        let raw: Vec<RawTx> = serde_json::from_value(envelope["result"].take())?;
        normalize(raw)
    }
}

fn normalize(txs: Vec<RawTx>) -> Result<Vec<Transaction>, AmlError> {
    txs.into_iter()
        .map(|tx| {
            let secs = tx
                .time_stamp
                .parse::<i64>()
                .map_err(|_| AmlError::MalformedData { field: "timeStamp" })?;
            let timestamp = timestamp_from_secs(secs, "timeStamp")?;
            let wei = tx
                .value
                .parse::<u128>()
                .map_err(|_| AmlError::MalformedData { field: "value" })?;
            let value = wei as f64 / WEI_PER_ETH;

            Ok(Transaction {
                id: tx.hash,
                timestamp,
                value,
                senders: vec![tx.from],
                receivers: vec![TxOutput {
                    address: tx.to,
                    value,
                }],
                token_symbol: None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_converts_wei_strings_to_ether() {
        let raw: Vec<RawTx> = serde_json::from_value(serde_json::json!([
            {
                "hash": "0xabc",
                "timeStamp": "1700000000",
                "from": "0xsender",
                "to": "0xdest",
                "value": "2500000000000000000"
            }
        ]))
        .unwrap();

        let txs = normalize(raw).unwrap();
        let tx = &txs[0];
        assert_eq!(tx.id, "0xabc");
        assert_eq!(tx.value, 2.5);
        assert_eq!(tx.senders, vec!["0xsender"]);
        assert_eq!(tx.receivers[0].address, "0xdest");
        assert_eq!(tx.receivers[0].value, 2.5);
        assert_eq!(tx.timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_normalize_rejects_unparseable_value() {
        let raw: Vec<RawTx> = serde_json::from_value(serde_json::json!([
            {
                "hash": "0xabc",
                "timeStamp": "1700000000",
                "from": "0xsender",
                "to": "0xdest",
                "value": "not-a-number"
            }
        ]))
        .unwrap();

        let err = normalize(raw).unwrap_err();
        assert!(matches!(
            err,
            AmlError::MalformedData { field: "value" }
        ));
    }

    #[test]
    fn test_normalize_rejects_unparseable_timestamp() {
        let raw: Vec<RawTx> = serde_json::from_value(serde_json::json!([
            {
                "hash": "0xabc",
                "timeStamp": "yesterday",
                "from": "0xsender",
                "to": "0xdest",
                "value": "0"
            }
        ]))
        .unwrap();

        let err = normalize(raw).unwrap_err();
        assert!(matches!(
            err,
            AmlError::MalformedData { field: "timeStamp" }
        ));
    }
}
