//! Configuration module for the wallet risk scorer
//! All tunable policy lives here: category weights, function
//! classification sets, normalization bounds, and runtime paths.

use crate::models::{AppError, AppResult, ErrorCode};
use std::collections::HashSet;

/// Fixed category weighting policy. Modeled as an explicit structure
/// passed into the scorer so the weights stay testable and swappable.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub liquidation: f64,
    pub leverage: f64,
    pub activity: f64,
    pub behavioral: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            liquidation: 0.35,
            leverage: 0.25,
            activity: 0.20,
            behavioral: 0.20,
        }
    }
}

impl ScoringWeights {
    /// The four weights must form a convex combination.
    pub fn validate(&self) -> AppResult<()> {
        let sum = self.liquidation + self.leverage + self.activity + self.behavioral;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(AppError::new(
                ErrorCode::ConfigBadWeights,
                format!("scoring weights sum to {sum}, expected 1.0"),
            ));
        }
        if [self.liquidation, self.leverage, self.activity, self.behavioral]
            .iter()
            .any(|w| *w < 0.0)
        {
            return Err(AppError::new(
                ErrorCode::ConfigBadWeights,
                "scoring weights must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Protocol function classification sets.
///
/// Membership is exact and case-sensitive over the function name
/// (signatures are truncated at the first parenthesis before lookup).
/// Kept as configuration rather than hardcoded literals so new protocol
/// functions can be classified without touching scoring logic.
#[derive(Debug, Clone)]
pub struct FunctionSets {
    /// Exposure-increasing calls
    pub risky: HashSet<String>,
    /// Conservative calls
    pub safe: HashSet<String>,
    /// The forced-closure call counted separately as liquidation_count
    pub liquidation: String,
}

impl Default for FunctionSets {
    fn default() -> Self {
        let risky = [
            "liquidateBorrow",
            "repayBorrow",
            "borrow",
            "absorb",
            "buyCollateral",
        ]
        .into_iter()
        .map(str::to_owned)
        .collect();

        let safe = ["mint", "redeem", "transfer"]
            .into_iter()
            .map(str::to_owned)
            .collect();

        Self {
            risky,
            safe,
            liquidation: "liquidateBorrow".to_string(),
        }
    }
}

impl FunctionSets {
    pub fn is_risky(&self, name: &str) -> bool {
        self.risky.contains(name)
    }

    pub fn is_safe(&self, name: &str) -> bool {
        self.safe.contains(name)
    }

    pub fn is_liquidation(&self, name: &str) -> bool {
        name == self.liquidation
    }
}

/// Bounds for logarithmic value normalization. Position sizes span many
/// orders of magnitude, so the scorer compresses them against these
/// bounds instead of scaling linearly.
#[derive(Debug, Clone, Copy)]
pub struct NormalizationBounds {
    pub min_val: f64,
    pub max_val: f64,
}

impl Default for NormalizationBounds {
    fn default() -> Self {
        Self {
            min_val: 0.001,
            max_val: 1000.0,
        }
    }
}

/// Everything the extractor needs beyond the raw records.
#[derive(Debug, Clone, Default)]
pub struct ExtractorConfig {
    pub functions: FunctionSets,
}

/// Everything the scorer needs beyond the feature vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScorerConfig {
    pub weights: ScoringWeights,
    pub bounds: NormalizationBounds,
}

/// Runtime configuration for a batch run.
pub struct AnalyzerConfig {
    /// CSV file with a wallet_id column
    pub input_file: String,
    /// Destination CSV (wallet_id,score)
    pub output_file: String,
    /// Directory holding <wallet>.json transaction files
    pub data_dir: String,
    /// Score recorded for wallets whose processing failed outright
    pub fallback_score: u16,
    /// Floor for days_active when all records share one timestamp
    pub days_active_epsilon: f64,
    pub extractor: ExtractorConfig,
    pub scorer: ScorerConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            input_file: std::env::var("WALLET_INPUT_FILE")
                .unwrap_or_else(|_| "wallets.csv".to_string()),
            output_file: std::env::var("SCORES_OUTPUT_FILE")
                .unwrap_or_else(|_| "wallet_risk_scores.csv".to_string()),
            data_dir: std::env::var("TX_DATA_DIR").unwrap_or_else(|_| "transactions".to_string()),
            fallback_score: 500,
            days_active_epsilon: 1e-6,
            extractor: ExtractorConfig::default(),
            scorer: ScorerConfig::default(),
        }
    }
}
