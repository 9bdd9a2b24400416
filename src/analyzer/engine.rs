// Copyright (c) 2025 AML Checker
// Chain-agnostic heuristic risk scoring over normalized transaction histories

use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::analyzer::counter::OrderedCounter;
use crate::error::AmlError;
use crate::models::Transaction;
use crate::risk::{
    AdditionalInfo, AnalysisResult, ChainModel, ChainSpec, RiskTier, TopTransaction,
};

// Post-pass thresholds shared by every chain. Each check that trips adds
// exactly one point to the raw score; all checks are evaluated.
const UNIQUE_ADDRESS_LIMIT: usize = 10;
const DISTINCT_COUNTERPARTY_LIMIT: usize = 20;
const LARGE_TX_COUNT_LIMIT: usize = 5;
const CYCLIC_PAIR_LIMIT: usize = 3;
const SHORT_INTERVAL_SECS: f64 = 60.0;
const SHORT_INTERVAL_COUNT_LIMIT: usize = 10;

const TOP_FREQUENT: usize = 5;
const TOP_TRANSACTIONS: usize = 3;

/// Heuristic risk scorer, parameterized per chain by a [`ChainSpec`].
///
/// Pure function of its inputs: the caller supplies "now", so repeated calls
/// with identical arguments produce identical results.
pub struct RiskAnalyzer {
    spec: ChainSpec,
}

impl RiskAnalyzer {
    pub fn new(spec: ChainSpec) -> Self {
        Self { spec }
    }

    /// Score `transactions` for `address`.
    ///
    /// Single pass accumulating volume, participants, per-address frequency,
    /// large transfers, inter-transaction intervals and cycle pairs, followed
    /// by fixed threshold checks. Large transfers score one point each during
    /// the pass; each post-pass check adds one more point when it trips. The
    /// raw score is then divided by the transaction count.
    ///
    /// An empty history yields a zeroed LOW result, unless the chain derives
    /// its currency type from transaction metadata, in which case it is a
    /// [`AmlError::MissingData`] failure.
    pub fn analyze(
        &self,
        address: &str,
        transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> Result<AnalysisResult, AmlError> {
        let cryptocurrency_type = match self.spec.ticker {
            Some(ticker) => ticker.to_string(),
            None => transactions
                .first()
                .and_then(|tx| tx.token_symbol.clone())
                .ok_or_else(|| AmlError::MissingData {
                    address: address.to_string(),
                })?,
        };

        let mut risk_score = 0.0_f64;
        let mut total_value = 0.0_f64;
        let mut unique_addresses: HashSet<&str> = HashSet::new();
        let mut frequency = OrderedCounter::new();
        let mut threshold_hits = 0_usize;
        let mut cyclic_patterns: HashMap<(String, String), u64> = HashMap::new();
        let mut intervals: Vec<f64> = Vec::new();
        let mut today_count = 0_usize;

        let today = now.date_naive();

        for (i, tx) in transactions.iter().enumerate() {
            total_value += tx.value;

            for sender in &tx.senders {
                unique_addresses.insert(sender);
            }
            for out in &tx.receivers {
                unique_addresses.insert(&out.address);
            }

            // UTXO chains count destinations only; account chains count both
            // ends of the transfer.
            match self.spec.model {
                ChainModel::Utxo => {
                    for out in &tx.receivers {
                        frequency.increment(&out.address);
                    }
                }
                ChainModel::Account => {
                    for sender in &tx.senders {
                        frequency.increment(sender);
                    }
                    for out in &tx.receivers {
                        frequency.increment(&out.address);
                    }
                }
            }

            if tx.timestamp.date_naive() == today {
                today_count += 1;
            }

            if tx.value > self.spec.large_tx_threshold {
                risk_score += 1.0;
                threshold_hits += 1;
            }

            if i > 0 {
                let prev = &transactions[i - 1];
                let delta = tx.timestamp.signed_duration_since(prev.timestamp);
                intervals.push(delta.num_milliseconds() as f64 / 1000.0);
                self.record_cycles(prev, tx, &mut cyclic_patterns);
            }
        }

        if total_value > self.spec.total_volume_threshold {
            risk_score += 1.0;
        }
        if unique_addresses.len() > UNIQUE_ADDRESS_LIMIT {
            risk_score += 1.0;
        }
        if frequency.len() > DISTINCT_COUNTERPARTY_LIMIT {
            risk_score += 1.0;
        }
        if threshold_hits > LARGE_TX_COUNT_LIMIT {
            risk_score += 1.0;
        }
        if cyclic_patterns.len() > CYCLIC_PAIR_LIMIT {
            risk_score += 1.0;
        }
        let short_intervals = intervals
            .iter()
            .filter(|secs| **secs < SHORT_INTERVAL_SECS)
            .count();
        if short_intervals > SHORT_INTERVAL_COUNT_LIMIT {
            risk_score += 1.0;
        }

        if !transactions.is_empty() {
            risk_score /= transactions.len() as f64;
        }

        let average_transaction_value = if transactions.is_empty() {
            0.0
        } else {
            total_value / transactions.len() as f64
        };

        let frequent_addresses = frequency
            .most_common(TOP_FREQUENT)
            .into_iter()
            .map(|(address, count)| format!("{}: {}", address, count))
            .collect();

        let additional_info = AdditionalInfo {
            transactions_count: transactions.len(),
            unique_addresses: unique_addresses.len(),
            total_transaction_volume: total_value,
            transactions_today: today_count,
            frequent_addresses,
            average_transaction_value,
            top_transactions: top_by_value(transactions),
        };

        Ok(AnalysisResult {
            cryptocurrency_type,
            address: address.to_string(),
            risk_score: round2(risk_score),
            risk_assessment: RiskTier::from_score(risk_score),
            additional_info,
        })
    }

    /// Cycle detection between a transaction and its predecessor in sequence
    /// order. Account chains match the previous receiver against the current
    /// sender; UTXO chains match input addresses against the previous
    /// transaction id.
    fn record_cycles(
        &self,
        prev: &Transaction,
        cur: &Transaction,
        cyclic_patterns: &mut HashMap<(String, String), u64>,
    ) {
        match self.spec.model {
            ChainModel::Account => {
                if let (Some(prev_to), Some(cur_from)) =
                    (prev.first_receiver(), cur.first_sender())
                {
                    if prev_to == cur_from {
                        let pair = (
                            prev.first_sender().unwrap_or("").to_string(),
                            cur.first_receiver().unwrap_or("").to_string(),
                        );
                        *cyclic_patterns.entry(pair).or_insert(0) += 1;
                    }
                }
            }
            ChainModel::Utxo => {
                for sender in &cur.senders {
                    if *sender == prev.id {
                        let pair = (prev.id.clone(), cur.id.clone());
                        *cyclic_patterns.entry(pair).or_insert(0) += 1;
                    }
                }
            }
        }
    }
}

/// Top transactions by value, descending. The sort is stable so equal values
/// keep their original sequence order.
fn top_by_value(transactions: &[Transaction]) -> Vec<TopTransaction> {
    let mut ranked: Vec<&Transaction> = transactions.iter().collect();
    ranked.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
        .into_iter()
        .take(TOP_TRANSACTIONS)
        .map(|tx| TopTransaction {
            id: tx.id.clone(),
            value: tx.value,
        })
        .collect()
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
