//! Risk Scorer
//!
//! Maps a wallet's feature vector to four category sub-scores
//! (liquidation, leverage, activity, behavioral), combines them via the
//! configured weighting policy, applies the deterministic entropy nudge
//! and emits a bounded integer score in [0,1000].
//!
//! The scorer never aborts on malformed input: NaN or negative features
//! from upstream are clamped to zero before use, ratios are clamped into
//! [0,1], and the final score is always clamped into range.

use crate::config::{ScorerConfig, ScoringWeights};
use crate::core::normalize::{normalize_log, wallet_entropy};
use crate::models::{FeatureVector, RiskBand, ScoredWallet, SubScores};

/// Scale applied to the wallet entropy before it is added to the raw
/// weighted score. With entropy in [0, 0.1) the nudge is bounded by
/// 0.005, i.e. at most +5 points on the 0-1000 scale.
const ENTROPY_NUDGE_WEIGHT: f64 = 0.05;

pub struct RiskScorer {
    config: ScorerConfig,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(ScorerConfig::default())
    }
}

impl RiskScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.config.weights
    }

    /// Score one wallet. Pure and idempotent: the same feature vector and
    /// wallet id always produce the identical score.
    pub fn score(&self, features: &FeatureVector, wallet_id: &str) -> ScoredWallet {
        let components = if features.is_neutral() {
            // Zero observed activity carries no risk signal; only the
            // tie-breaker separates such wallets.
            SubScores::default()
        } else {
            let f = Sanitized::from(features);
            SubScores {
                liquidation: self.liquidation_risk(&f),
                leverage: self.leverage_risk(&f),
                activity: self.activity_risk(&f),
                behavioral: self.behavioral_risk(&f),
            }
        };

        let w = &self.config.weights;
        let raw = components.liquidation * w.liquidation
            + components.leverage * w.leverage
            + components.activity * w.activity
            + components.behavioral * w.behavioral;

        let entropy = wallet_entropy(wallet_id);
        let adjusted = raw + entropy * ENTROPY_NUDGE_WEIGHT;

        let score = (adjusted * 1000.0).round().clamp(0.0, 1000.0) as u16;

        ScoredWallet {
            wallet_id: wallet_id.to_string(),
            score,
            band: RiskBand::from_score(score),
            components,
            entropy,
        }
    }

    /// Rises sharply with liquidation count: the exponential term puts a
    /// single liquidation at ~0.70 already and saturates smoothly, so
    /// nearly-equal feature vectors never jump discontinuously.
    fn liquidation_risk(&self, f: &Sanitized) -> f64 {
        let count_term = 1.0 - (-1.2 * f.liquidation_count).exp();
        let function_term = (f.risky_function_ratio * 1.2).min(0.9);
        count_term * 0.7 + function_term * 0.3
    }

    /// Position size (log-compressed), concentration and volatility.
    /// Wallets with no positive-value transactions fall back to their
    /// total gas spend as the size signal, capped well below the cap for
    /// real value since gas is only a proxy.
    fn leverage_risk(&self, f: &Sanitized) -> f64 {
        let size_risk = if f.max_value <= 0.0 {
            (f.total_gas_cost / 0.02).min(0.6)
        } else {
            let b = self.config.bounds;
            (normalize_log(f.max_value, b.min_val, b.max_val) * 1.2).min(0.95)
        };
        let concentration_risk = (f.value_concentration * 1.5).min(0.95);
        let volatility_risk = f.value_volatility.min(1.0);

        size_risk * 0.4 + concentration_risk * 0.4 + volatility_risk * 0.2
    }

    /// U-shaped in frequency: dormant (<0.1 tx/day) and bot-like (>3
    /// tx/day) cadences both raise risk. Longer tenure and more regular
    /// timing lower it.
    fn activity_risk(&self, f: &Sanitized) -> f64 {
        let frequency_risk = if f.tx_frequency < 0.1 {
            0.3 + (0.1 - f.tx_frequency) * 2.0
        } else if f.tx_frequency > 3.0 {
            (0.4 + (f.tx_frequency - 3.0) * 0.1).min(0.9)
        } else {
            0.1 + f.tx_frequency * 0.1
        };

        let tenure_risk = (1.0 / (f.days_active + 1.0).sqrt()).clamp(0.1, 0.8);

        let irregularity = 1.0 - f.time_regularity;
        let irregularity_risk = (irregularity * 0.8).min(0.7);

        frequency_risk * 0.4 + tenure_risk * 0.4 + irregularity_risk * 0.2
    }

    /// Complement of a sophistication measure: diverse function usage, a
    /// high share of conservative calls, broad contract exposure and
    /// efficient gas usage all lower the sub-score.
    fn behavioral_risk(&self, f: &Sanitized) -> f64 {
        let diversity_risk = (1.0 / (f.function_diversity + 0.5)).clamp(0.1, 0.8);
        let safety_risk = (1.0 - f.safe_function_ratio).powf(1.5);
        let contract_risk = (0.8 / (f.contract_diversity + 0.5).sqrt()).clamp(0.1, 0.7);
        let gas_risk = if f.gas_efficiency > 0.0 {
            (2.0 / f.gas_efficiency).min(0.3)
        } else {
            0.1
        };

        diversity_risk * 0.3 + safety_risk * 0.3 + contract_risk * 0.3 + gas_risk * 0.1
    }
}

/// Feature vector with out-of-contract inputs clamped: NaN/negative
/// become 0, ratios are confined to [0,1].
struct Sanitized {
    liquidation_count: f64,
    risky_function_ratio: f64,
    safe_function_ratio: f64,
    max_value: f64,
    value_concentration: f64,
    value_volatility: f64,
    tx_frequency: f64,
    days_active: f64,
    time_regularity: f64,
    function_diversity: f64,
    contract_diversity: f64,
    gas_efficiency: f64,
    total_gas_cost: f64,
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

fn ratio(v: f64) -> f64 {
    non_negative(v).min(1.0)
}

impl From<&FeatureVector> for Sanitized {
    fn from(fv: &FeatureVector) -> Self {
        Self {
            liquidation_count: f64::from(fv.liquidation_count),
            risky_function_ratio: ratio(fv.risky_function_ratio),
            safe_function_ratio: ratio(fv.safe_function_ratio),
            max_value: non_negative(fv.max_value),
            value_concentration: ratio(fv.value_concentration),
            value_volatility: non_negative(fv.value_volatility),
            tx_frequency: non_negative(fv.tx_frequency),
            days_active: non_negative(fv.days_active),
            time_regularity: ratio(fv.time_regularity),
            function_diversity: f64::from(fv.function_diversity),
            contract_diversity: f64::from(fv.contract_diversity),
            gas_efficiency: non_negative(fv.gas_efficiency),
            total_gas_cost: non_negative(fv.total_gas_cost),
        }
    }
}
