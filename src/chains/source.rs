use async_trait::async_trait;

use crate::error::AmlError;
use crate::models::Transaction;

/// Seam between the HTTP facade and the per-chain fetchers.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Full transaction history for `address`, normalized and in upstream
    /// (chronologically ascending) order.
    async fn fetch(&self, address: &str) -> Result<Vec<Transaction>, AmlError>;
}
