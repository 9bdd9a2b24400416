use serde::{Deserialize, Serialize};

/// Categorical risk bucket derived from the normalized risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "LOW")]
    Low,
    #[serde(rename = "MID")]
    Mid,
    #[serde(rename = "HIGH")]
    High,
}

impl RiskTier {
    /// Fixed tier thresholds: score above 0.7 is HIGH, above 0.4 is MID.
    pub fn from_score(score: f64) -> Self {
        if score > 0.7 {
            RiskTier::High
        } else if score > 0.4 {
            RiskTier::Mid
        } else {
            RiskTier::Low
        }
    }
}

/// Transaction model a chain follows. Selects how participants are counted
/// and which cycle predicate the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainModel {
    /// Inputs consume prior outputs (Bitcoin).
    Utxo,
    /// One sender, one receiver per transaction (Ethereum, TRON).
    Account,
}

/// Per-chain parameters for the scoring engine.
#[derive(Debug, Clone)]
pub struct ChainSpec {
    /// Fixed ticker, or `None` to take the symbol from transaction metadata.
    pub ticker: Option<&'static str>,
    /// Single-transfer value above which the transfer is flagged as large,
    /// in the chain's native unit.
    pub large_tx_threshold: f64,
    /// Aggregate volume above which the whole history is flagged.
    pub total_volume_threshold: f64,
    pub model: ChainModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTransaction {
    pub id: String,
    pub value: f64,
}

/// Aggregate statistics reported alongside the score. Presentation data,
/// not an input to scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalInfo {
    pub transactions_count: usize,
    pub unique_addresses: usize,
    pub total_transaction_volume: f64,
    pub transactions_today: usize,
    /// Top-5 most frequent addresses as `"<address>: <count>"`.
    pub frequent_addresses: Vec<String>,
    pub average_transaction_value: f64,
    /// Top-3 transactions by value, descending.
    pub top_transactions: Vec<TopTransaction>,
}

/// Full outcome of screening one address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub cryptocurrency_type: String,
    pub address: String,
    pub risk_score: f64,
    pub risk_assessment: RiskTier,
    pub additional_info: AdditionalInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_thresholds_are_strict() {
        assert_eq!(RiskTier::from_score(0.0), RiskTier::Low);
        assert_eq!(RiskTier::from_score(0.4), RiskTier::Low);
        assert_eq!(RiskTier::from_score(0.41), RiskTier::Mid);
        assert_eq!(RiskTier::from_score(0.7), RiskTier::Mid);
        assert_eq!(RiskTier::from_score(0.71), RiskTier::High);
        assert_eq!(RiskTier::from_score(3.0), RiskTier::High);
    }

    #[test]
    fn test_tier_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&RiskTier::High).unwrap(),
            "\"HIGH\""
        );
        assert_eq!(serde_json::to_string(&RiskTier::Mid).unwrap(), "\"MID\"");
        assert_eq!(serde_json::to_string(&RiskTier::Low).unwrap(), "\"LOW\"");
    }
}
