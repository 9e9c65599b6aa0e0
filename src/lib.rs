//! Wallet Risk Library
//!
//! Deterministic risk scoring for DeFi lending wallets: a wallet's
//! on-chain transaction history is reduced to a fixed feature vector,
//! mapped to four weighted category sub-scores and combined into a
//! single bounded score in [0,1000]. Same input, same score, every run:
//! - Feature extraction is a pure, order-insensitive aggregation
//! - Score combination uses a fixed, explicit weighting policy
//! - Ties break via address-derived entropy, never wall-clock randomness

pub mod config;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::config::{
    AnalyzerConfig, ExtractorConfig, FunctionSets, NormalizationBounds, ScorerConfig,
    ScoringWeights,
};
pub use crate::core::{
    normalize_log, wallet_entropy, FeatureExtractor, RiskScorer, WalletRiskAnalyzer,
};
pub use crate::models::{
    AppError, AppResult, BatchStats, ErrorCode, FeatureVector, RiskBand, ScoredWallet, SubScores,
    TransactionRecord, WalletRiskScore,
};
pub use crate::providers::{JsonTransactionStore, TransactionProvider};
pub use crate::utils::{export_scores, load_wallet_ids};
