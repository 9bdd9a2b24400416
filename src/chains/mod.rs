pub mod bitcoin;
pub mod ethereum;
mod source;
pub mod tron;

pub use bitcoin::BitcoinClient;
pub use ethereum::EthereumClient;
pub use source::TransactionSource;
pub use tron::TronClient;

use chrono::{DateTime, Utc};

use crate::error::AmlError;

pub(crate) fn timestamp_from_secs(
    secs: i64,
    field: &'static str,
) -> Result<DateTime<Utc>, AmlError> {
    DateTime::from_timestamp(secs, 0).ok_or(AmlError::MalformedData { field })
}

pub(crate) fn timestamp_from_millis(
    millis: i64,
    field: &'static str,
) -> Result<DateTime<Utc>, AmlError> {
    DateTime::from_timestamp_millis(millis).ok_or(AmlError::MalformedData { field })
}
