use chrono::{DateTime, Utc};

/// Single destination of a transfer with the amount credited to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TxOutput {
    pub address: String,
    pub value: f64,
}

/// Chain-normalized transaction consumed by the risk engine.
///
/// UTXO chains map their inputs and outputs onto `senders`/`receivers`;
/// account-model chains carry exactly one sender and one receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Amount in the chain's native unit (sum of outputs for UTXO chains).
    pub value: f64,
    pub senders: Vec<String>,
    pub receivers: Vec<TxOutput>,
    /// TRC20 token symbol; `None` for chains with a fixed ticker.
    pub token_symbol: Option<String>,
}

impl Transaction {
    pub fn first_sender(&self) -> Option<&str> {
        self.senders.first().map(|s| s.as_str())
    }

    pub fn first_receiver(&self) -> Option<&str> {
        self.receivers.first().map(|o| o.address.as_str())
    }
}
