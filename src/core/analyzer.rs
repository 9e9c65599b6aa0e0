//! Wallet Risk Analyzer
//!
//! Orchestrates the pipeline for a batch of wallets: provider ->
//! extractor -> scorer. Each wallet is an independent pure computation
//! with no shared mutable state, so the batch maps in parallel with
//! rayon. A failed wallet records the configured sentinel score instead
//! of halting the run.

use crate::config::AnalyzerConfig;
use crate::core::extractor::FeatureExtractor;
use crate::core::scorer::RiskScorer;
use crate::models::{AppResult, BatchStats, RiskBand, ScoredWallet, SubScores};
use crate::providers::TransactionProvider;
use chrono::DateTime;
use rayon::prelude::*;
use tracing::{debug, warn};

pub struct WalletRiskAnalyzer<P> {
    provider: P,
    extractor: FeatureExtractor,
    scorer: RiskScorer,
    fallback_score: u16,
}

impl<P: TransactionProvider + Sync> WalletRiskAnalyzer<P> {
    pub fn new(provider: P, config: &AnalyzerConfig) -> Self {
        Self {
            provider,
            extractor: FeatureExtractor::new(
                config.extractor.clone(),
                config.days_active_epsilon,
            ),
            scorer: RiskScorer::new(config.scorer),
            fallback_score: config.fallback_score,
        }
    }

    /// Score a single wallet end to end.
    pub fn analyze_wallet(&self, wallet_id: &str) -> AppResult<ScoredWallet> {
        let transactions = self.provider.wallet_transactions(wallet_id)?;

        if let (Some(first), Some(last)) = (
            transactions.iter().map(|tx| tx.timestamp).min(),
            transactions.iter().map(|tx| tx.timestamp).max(),
        ) {
            debug!(
                wallet = wallet_id,
                records = transactions.len(),
                first_seen = %format_ts(first),
                last_seen = %format_ts(last),
                "fetched transaction history"
            );
        }

        let features = self.extractor.extract(&transactions);
        Ok(self.scorer.score(&features, wallet_id))
    }

    /// Score a batch of wallets in parallel. Output order matches input
    /// order; per-wallet failures are isolated into sentinel rows.
    pub fn analyze_wallets(&self, wallet_ids: &[String]) -> (Vec<ScoredWallet>, BatchStats) {
        let results: Vec<(ScoredWallet, bool)> = wallet_ids
            .par_iter()
            .map(|wallet| match self.analyze_wallet(wallet) {
                Ok(scored) => (scored, false),
                Err(e) => {
                    warn!(wallet = %wallet, code = e.code_str(), error = %e,
                        "wallet processing failed, recording sentinel score");
                    (self.sentinel(wallet), true)
                }
            })
            .collect();

        let mut stats = BatchStats {
            total_wallets: wallet_ids.len() as u64,
            ..BatchStats::default()
        };
        let mut scored_wallets = Vec::with_capacity(results.len());
        for (scored, failed) in results {
            if failed {
                stats.total_failed += 1;
            } else {
                stats.total_scored += 1;
                if scored.components.is_zero() {
                    stats.total_empty += 1;
                }
            }
            stats.record_band(scored.band);
            scored_wallets.push(scored);
        }
        (scored_wallets, stats)
    }

    /// Neutral row recorded when a wallet cannot be processed at all.
    fn sentinel(&self, wallet_id: &str) -> ScoredWallet {
        ScoredWallet {
            wallet_id: wallet_id.to_string(),
            score: self.fallback_score,
            band: RiskBand::from_score(self.fallback_score),
            components: SubScores::default(),
            entropy: 0.0,
        }
    }
}

fn format_ts(ts: u64) -> String {
    DateTime::from_timestamp(ts as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppError, ErrorCode, TransactionRecord};
    use std::collections::HashMap;

    /// In-memory provider for analyzer tests
    struct FixtureProvider {
        wallets: HashMap<String, Vec<TransactionRecord>>,
        failing: Vec<String>,
    }

    impl TransactionProvider for FixtureProvider {
        fn wallet_transactions(&self, wallet: &str) -> AppResult<Vec<TransactionRecord>> {
            if self.failing.iter().any(|w| w == wallet) {
                return Err(AppError::new(ErrorCode::DataReadFailed, "fixture failure"));
            }
            Ok(self.wallets.get(wallet).cloned().unwrap_or_default())
        }
    }

    fn record(timestamp: u64, value: f64, function: &str) -> TransactionRecord {
        TransactionRecord {
            hash: format!("0x{timestamp:x}"),
            block_number: 1,
            timestamp,
            from_address: "0xwallet".to_string(),
            to_address: "0xc0mp0und".to_string(),
            value,
            gas_used: 150_000,
            gas_price: 20_000_000_000,
            function_name: function.to_string(),
            network: "ethereum".to_string(),
        }
    }

    const W_ACTIVE: &str = "0x0039f22efb07a647557c7c5d17854cfd6d489ef3";
    const W_EMPTY: &str = "0x06b51c6882b27cb05e712185531c1f74996dd988";
    const W_BROKEN: &str = "0x8be38ea2b22b706aef313c2de81f7d179024dd30";

    fn analyzer() -> WalletRiskAnalyzer<FixtureProvider> {
        let mut wallets = HashMap::new();
        wallets.insert(
            W_ACTIVE.to_string(),
            vec![
                record(1_700_000_000, 10.0, "borrow(uint256)"),
                record(1_700_086_400, 5.0, "repayBorrow(uint256)"),
                record(1_700_172_800, 1.0, "mint(uint256)"),
            ],
        );
        let provider = FixtureProvider {
            wallets,
            failing: vec![W_BROKEN.to_string()],
        };
        WalletRiskAnalyzer::new(provider, &AnalyzerConfig::default())
    }

    #[test]
    fn test_empty_wallet_scores_low_not_omitted() {
        let result = analyzer().analyze_wallet(W_EMPTY).unwrap();
        assert!(result.score <= 50);
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let wallets = vec![
            W_ACTIVE.to_string(),
            W_BROKEN.to_string(),
            W_EMPTY.to_string(),
        ];
        let (results, stats) = analyzer().analyze_wallets(&wallets);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].wallet_id, W_ACTIVE);
        assert_eq!(results[1].wallet_id, W_BROKEN);
        assert_eq!(results[2].wallet_id, W_EMPTY);

        // Broken wallet gets the sentinel, others are scored normally
        assert_eq!(results[1].score, 500);
        assert_eq!(stats.total_wallets, 3);
        assert_eq!(stats.total_failed, 1);
        assert_eq!(stats.total_scored, 2);
        assert_eq!(stats.total_empty, 1);
    }

    #[test]
    fn test_batch_is_deterministic() {
        let wallets = vec![W_ACTIVE.to_string(), W_EMPTY.to_string()];
        let (a, _) = analyzer().analyze_wallets(&wallets);
        let (b, _) = analyzer().analyze_wallets(&wallets);
        let scores_a: Vec<u16> = a.iter().map(|s| s.score).collect();
        let scores_b: Vec<u16> = b.iter().map(|s| s.score).collect();
        assert_eq!(scores_a, scores_b);
    }
}
