//! Wallet Risk - batch CLI
//!
//! Reads a wallet list CSV, scores every wallet from its pre-fetched
//! transaction history and writes the wallet_id,score table.

use eyre::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use wallet_risk::{
    AnalyzerConfig, JsonTransactionStore, ScoredWallet, WalletRiskAnalyzer,
};

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let config = AnalyzerConfig::default();
    config.scorer.weights.validate()?;

    info!(
        input = %config.input_file,
        output = %config.output_file,
        data_dir = %config.data_dir,
        "starting wallet risk scoring run"
    );

    let wallets = wallet_risk::load_wallet_ids(&config.input_file)?;
    if wallets.is_empty() {
        info!("wallet list is empty, nothing to score");
        return Ok(());
    }

    let provider = JsonTransactionStore::new(&config.data_dir);
    let analyzer = WalletRiskAnalyzer::new(provider, &config);

    let (results, stats) = analyzer.analyze_wallets(&wallets);
    for scored in &results {
        info!("{}", scored.summary());
    }

    let rows: Vec<_> = results.into_iter().map(ScoredWallet::into_export_row).collect();
    wallet_risk::export_scores(&rows, &config.output_file)?;

    info!(
        wallets = stats.total_wallets,
        scored = stats.total_scored,
        failed = stats.total_failed,
        empty = stats.total_empty,
        "run complete"
    );
    info!(
        low = stats.band_low,
        medium = stats.band_medium,
        high = stats.band_high,
        critical = stats.band_critical,
        "risk band distribution"
    );

    Ok(())
}
