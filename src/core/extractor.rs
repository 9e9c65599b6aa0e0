//! Feature Extractor
//!
//! Aggregates a wallet's transaction records into the fixed feature
//! vector consumed by the risk scorer. Pure function of its input: no
//! side effects, and every aggregate (counts, sums, max, distinct sets,
//! standard deviation) is order-independent, so unsorted or
//! cross-network-interleaved input produces the same vector.

use crate::config::ExtractorConfig;
use crate::core::normalize::{coefficient_of_variation, population_std_dev};
use crate::models::{FeatureVector, TransactionRecord};
use std::collections::HashSet;

const SECONDS_PER_DAY: f64 = 86_400.0;

pub struct FeatureExtractor {
    config: ExtractorConfig,
    /// Floor for days_active when all records share one timestamp
    days_epsilon: f64,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default(), 1e-6)
    }
}

impl FeatureExtractor {
    pub fn new(config: ExtractorConfig, days_epsilon: f64) -> Self {
        Self {
            config,
            days_epsilon: days_epsilon.max(f64::MIN_POSITIVE),
        }
    }

    /// Build the feature vector for one wallet. An empty record list is
    /// not an error: it yields the neutral all-zero vector.
    pub fn extract(&self, transactions: &[TransactionRecord]) -> FeatureVector {
        if transactions.is_empty() {
            return FeatureVector::default();
        }

        let mut features = FeatureVector {
            total_transactions: transactions.len(),
            ..FeatureVector::default()
        };

        self.extract_function_features(transactions, &mut features);
        self.extract_value_features(transactions, &mut features);
        self.extract_temporal_features(transactions, &mut features);
        self.extract_gas_features(transactions, &mut features);

        features
    }

    /// Function classification: exact, case-sensitive membership against
    /// the configured risky/safe sets. Upstream decoders deliver full
    /// signatures like `borrow(uint256)`, so names are truncated at the
    /// first parenthesis before lookup.
    fn extract_function_features(&self, txs: &[TransactionRecord], out: &mut FeatureVector) {
        let total = txs.len() as f64;
        let mut risky = 0u32;
        let mut safe = 0u32;
        let mut liquidations = 0u32;
        let mut names: HashSet<&str> = HashSet::new();
        let mut contracts: HashSet<&str> = HashSet::new();

        for tx in txs {
            contracts.insert(tx.to_address.as_str());

            let name = canonical_function_name(&tx.function_name);
            if name.is_empty() {
                continue;
            }
            names.insert(name);

            if self.config.functions.is_risky(name) {
                risky += 1;
            }
            if self.config.functions.is_safe(name) {
                safe += 1;
            }
            if self.config.functions.is_liquidation(name) {
                liquidations += 1;
            }
        }

        out.liquidation_count = liquidations;
        out.risky_function_ratio = f64::from(risky) / total;
        out.safe_function_ratio = f64::from(safe) / total;
        out.function_diversity = names.len() as u32;
        out.contract_diversity = contracts.len() as u32;
    }

    /// Value statistics over the positive transaction values. Wallets
    /// that only emit zero-value calls (every transfer wrapped in a
    /// contract call) fall back to per-record gas cost as the
    /// value-equivalent series for concentration and volatility, while
    /// max_value itself stays 0 so the scorer takes its gas-based branch
    /// for position size.
    fn extract_value_features(&self, txs: &[TransactionRecord], out: &mut FeatureVector) {
        let positive: Vec<f64> = txs
            .iter()
            .map(|tx| tx.value)
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();

        let effective: Vec<f64> = if positive.is_empty() {
            txs.iter()
                .map(TransactionRecord::gas_cost)
                .filter(|v| *v > 0.0)
                .collect()
        } else {
            positive.clone()
        };

        out.max_value = positive.iter().copied().fold(0.0, f64::max);

        let eff_max = effective.iter().copied().fold(0.0, f64::max);
        let eff_sum: f64 = effective.iter().sum();
        if eff_sum > 0.0 {
            out.value_concentration = eff_max / eff_sum;
        }
        if eff_max > 0.0 {
            out.value_volatility = population_std_dev(&effective) / eff_max;
        }
    }

    fn extract_temporal_features(&self, txs: &[TransactionRecord], out: &mut FeatureVector) {
        let mut timestamps: Vec<u64> = txs.iter().map(|tx| tx.timestamp).collect();
        timestamps.sort_unstable();

        let first = timestamps[0];
        let last = timestamps[timestamps.len() - 1];
        let span_days = (last - first) as f64 / SECONDS_PER_DAY;

        out.days_active = span_days.max(self.days_epsilon);
        out.tx_frequency = txs.len() as f64 / out.days_active;

        if timestamps.len() < 2 {
            out.time_regularity = 1.0;
            return;
        }
        let gaps: Vec<f64> = timestamps
            .windows(2)
            .map(|w| (w[1] - w[0]) as f64)
            .collect();
        // All gaps zero (burst wallet) means perfectly regular
        out.time_regularity = (1.0 - coefficient_of_variation(&gaps)).clamp(0.0, 1.0);
    }

    fn extract_gas_features(&self, txs: &[TransactionRecord], out: &mut FeatureVector) {
        let total_gas_used: u64 = txs.iter().map(|tx| tx.gas_used).sum();
        if total_gas_used > 0 {
            out.gas_efficiency = txs.len() as f64 * 1e6 / total_gas_used as f64;
        }
        out.total_gas_cost = txs.iter().map(TransactionRecord::gas_cost).sum();
    }
}

/// Truncate a decoded signature at the first parenthesis.
fn canonical_function_name(raw: &str) -> &str {
    raw.split('(').next().unwrap_or("").trim()
}
