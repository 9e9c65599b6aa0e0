//! Type definitions for the wallet risk scorer
//! All core data structures flowing through the extract -> score pipeline

use serde::{Deserialize, Serialize};

/// One normalized, chain-agnostic transaction observation involving a wallet.
///
/// Records may arrive unsorted, duplicated, or interleaved across networks;
/// the extractor treats them as an unordered bag. Numeric fields that arrive
/// malformed in source data deserialize leniently to zero instead of failing
/// the whole wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash (opaque identifier, uniqueness not enforced)
    pub hash: String,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub block_number: u64,
    /// Unix seconds
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub timestamp: u64,
    pub from_address: String,
    /// Lowercase hex contract address
    pub to_address: String,
    /// Native-currency units, non-negative
    #[serde(deserialize_with = "lenient::f64_or_zero", default)]
    pub value: f64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub gas_used: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub gas_price: u64,
    /// Decoded function name or full signature; empty when unknown
    #[serde(default)]
    pub function_name: String,
    /// Source chain identifier
    #[serde(default)]
    pub network: String,
}

impl TransactionRecord {
    /// Gas spend of this record in native units (gas_used * gas_price / 1e18).
    /// Used as a value-equivalent signal for wallets that only emit
    /// zero-value calls.
    pub fn gas_cost(&self) -> f64 {
        (self.gas_used as f64) * (self.gas_price as f64) / 1e18
    }
}

/// Lenient numeric deserialization: accepts numbers or numeric strings,
/// maps anything unparseable (or negative) to zero. Explorer APIs return
/// all numerics as strings and occasionally emit garbage for failed
/// decodings; a single bad field must not abort the wallet.
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrString {
        F(f64),
        S(String),
    }

    pub fn f64_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        let v = match Option::<NumOrString>::deserialize(de)? {
            Some(NumOrString::F(f)) => f,
            Some(NumOrString::S(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            None => 0.0,
        };
        Ok(if v.is_finite() && v > 0.0 { v } else { 0.0 })
    }

    pub fn u64_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
        let v = match Option::<NumOrString>::deserialize(de)? {
            Some(NumOrString::F(f)) if f.is_finite() && f >= 0.0 => f as u64,
            Some(NumOrString::S(s)) => s.trim().parse::<u64>().unwrap_or(0),
            _ => 0,
        };
        Ok(v)
    }
}

/// Aggregated per-wallet feature vector, immutable once built.
///
/// One instance per wallet, derived purely from its transaction records.
/// `Default` is the neutral all-zero vector returned for wallets with no
/// observed activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Number of records observed (0 = neutral vector)
    pub total_transactions: usize,
    /// Exact-match count of the liquidation function
    pub liquidation_count: u32,
    /// Share of records calling a risky function, [0,1]
    pub risky_function_ratio: f64,
    /// Share of records calling a safe function, [0,1]
    pub safe_function_ratio: f64,
    /// Largest single transaction value in native units
    pub max_value: f64,
    /// max_value / sum of values, [0,1]
    pub value_concentration: f64,
    /// Population std dev of values relative to their maximum
    pub value_volatility: f64,
    /// Transactions per day over the active span
    pub tx_frequency: f64,
    /// Timestamp span in days (epsilon-floored for non-empty wallets)
    pub days_active: f64,
    /// 1 - coefficient of variation of inter-tx gaps, clamped to [0,1]
    pub time_regularity: f64,
    /// Distinct non-empty function names (raw count)
    pub function_diversity: u32,
    /// Distinct to_address values
    pub contract_diversity: u32,
    /// Transactions per million gas units (higher = more efficient)
    pub gas_efficiency: f64,
    /// Total gas spend in native units; value proxy for zero-value wallets
    pub total_gas_cost: f64,
}

impl FeatureVector {
    /// A wallet with zero observed records scores on entropy alone.
    pub fn is_neutral(&self) -> bool {
        self.total_transactions == 0
    }
}

/// The four category sub-scores, each in [0,1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SubScores {
    pub liquidation: f64,
    pub leverage: f64,
    pub activity: f64,
    pub behavioral: f64,
}

impl SubScores {
    /// True for the neutral vector's sub-scores (zero observed activity).
    pub fn is_zero(&self) -> bool {
        self.liquidation == 0.0
            && self.leverage == 0.0
            && self.activity == 0.0
            && self.behavioral == 0.0
    }
}

/// Risk band classification for a final 0-1000 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    /// 0-300: conservative or dormant wallet
    Low,
    /// 301-500: mixed signals
    Medium,
    /// 501-700: likely risky borrowing behavior
    High,
    /// 701-1000: liquidation-prone leverage profile
    Critical,
}

impl RiskBand {
    pub fn from_score(score: u16) -> Self {
        match score {
            0..=300 => RiskBand::Low,
            301..=500 => RiskBand::Medium,
            501..=700 => RiskBand::High,
            _ => RiskBand::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Medium => "MEDIUM",
            RiskBand::High => "HIGH",
            RiskBand::Critical => "CRITICAL",
        }
    }
}

/// Final exported row: wallet id plus bounded integer score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletRiskScore {
    pub wallet_id: String,
    pub score: u16,
}

/// Full scoring result for one wallet, kept for logging and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredWallet {
    pub wallet_id: String,
    /// Final score in [0,1000]
    pub score: u16,
    pub band: RiskBand,
    pub components: SubScores,
    /// Deterministic tie-breaker that was applied, [0, 0.1)
    pub entropy: f64,
}

impl ScoredWallet {
    pub fn into_export_row(self) -> WalletRiskScore {
        WalletRiskScore {
            wallet_id: self.wallet_id,
            score: self.score,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} score={} band={} [liq={:.3} lev={:.3} act={:.3} beh={:.3}]",
            self.wallet_id,
            self.score,
            self.band.as_str(),
            self.components.liquidation,
            self.components.leverage,
            self.components.activity,
            self.components.behavioral,
        )
    }
}

/// Batch run statistics for the end-of-run summary.
#[derive(Debug, Default, Clone)]
pub struct BatchStats {
    pub total_wallets: u64,
    pub total_scored: u64,
    pub total_failed: u64,
    pub total_empty: u64,
    pub band_low: u64,
    pub band_medium: u64,
    pub band_high: u64,
    pub band_critical: u64,
}

impl BatchStats {
    pub fn record_band(&mut self, band: RiskBand) {
        match band {
            RiskBand::Low => self.band_low += 1,
            RiskBand::Medium => self.band_medium += 1,
            RiskBand::High => self.band_high += 1,
            RiskBand::Critical => self.band_critical += 1,
        }
    }
}
