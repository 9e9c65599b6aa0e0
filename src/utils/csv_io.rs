//! CSV boundary: wallet list in, score table out
//!
//! Input is a CSV with a `wallet_id` column; output is the
//! `wallet_id,score` table with one row per input wallet, including
//! wallets with zero observed transactions.

use crate::models::{AppError, AppResult, ErrorCode, WalletRiskScore};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct WalletRow {
    wallet_id: String,
}

/// Load the wallet address list from a CSV file. Blank ids are skipped;
/// a missing `wallet_id` column is a hard error.
pub fn load_wallet_ids(path: impl AsRef<Path>) -> AppResult<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        AppError::with_source(
            ErrorCode::CsvReadFailed,
            format!("cannot open wallet list {}", path.display()),
            e,
        )
    })?;

    let mut reader = csv::Reader::from_reader(file);
    if !reader
        .headers()
        .map_err(|e| AppError::with_source(ErrorCode::CsvReadFailed, "unreadable CSV header", e))?
        .iter()
        .any(|h| h == "wallet_id")
    {
        return Err(AppError::new(
            ErrorCode::CsvMissingColumn,
            format!("{} has no wallet_id column", path.display()),
        ));
    }

    let mut wallets = Vec::new();
    for row in reader.deserialize() {
        let row: WalletRow = row.map_err(|e| {
            AppError::with_source(ErrorCode::CsvReadFailed, "malformed wallet row", e)
        })?;
        let id = row.wallet_id.trim().to_string();
        if !id.is_empty() {
            wallets.push(id);
        }
    }

    info!(wallets = wallets.len(), path = %path.display(), "loaded wallet list");
    Ok(wallets)
}

/// Write the `wallet_id,score` table. One row per scored wallet, in the
/// order given.
pub fn export_scores(scores: &[WalletRiskScore], path: impl AsRef<Path>) -> AppResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        AppError::with_source(
            ErrorCode::CsvWriteFailed,
            format!("cannot create {}", path.display()),
            e,
        )
    })?;

    let mut writer = csv::Writer::from_writer(file);
    for score in scores {
        writer.serialize(score).map_err(|e| {
            AppError::with_source(ErrorCode::CsvWriteFailed, "failed to write score row", e)
        })?;
    }
    writer
        .flush()
        .map_err(|e| AppError::with_source(ErrorCode::CsvWriteFailed, "flush failed", e))?;

    info!(rows = scores.len(), path = %path.display(), "exported risk scores");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_round_trip_through_filesystem() {
        let dir = tempfile::tempdir().unwrap();

        let input = dir.path().join("wallets.csv");
        let mut f = File::create(&input).unwrap();
        writeln!(f, "wallet_id").unwrap();
        writeln!(f, "0xaaa").unwrap();
        writeln!(f, "  ").unwrap();
        writeln!(f, "0xbbb").unwrap();
        drop(f);

        let wallets = load_wallet_ids(&input).unwrap();
        assert_eq!(wallets, vec!["0xaaa".to_string(), "0xbbb".to_string()]);

        let output = dir.path().join("scores.csv");
        let scores = vec![
            WalletRiskScore {
                wallet_id: "0xaaa".to_string(),
                score: 231,
            },
            WalletRiskScore {
                wallet_id: "0xbbb".to_string(),
                score: 4,
            },
        ];
        export_scores(&scores, &output).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("wallet_id,score"));
        assert_eq!(lines.next(), Some("0xaaa,231"));
        assert_eq!(lines.next(), Some("0xbbb,4"));
    }

    #[test]
    fn test_missing_wallet_id_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        let mut f = File::create(&input).unwrap();
        writeln!(f, "address").unwrap();
        writeln!(f, "0xaaa").unwrap();
        drop(f);

        let err = load_wallet_ids(&input).unwrap_err();
        assert_eq!(err.code, ErrorCode::CsvMissingColumn);
    }

    #[test]
    fn test_missing_file_reports_code() {
        let err = load_wallet_ids("/definitely/not/here.csv").unwrap_err();
        assert_eq!(err.code, ErrorCode::CsvReadFailed);
    }

    #[test]
    fn test_extra_columns_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("wallets.csv");
        let mut f = File::create(&input).unwrap();
        writeln!(f, "rank,wallet_id,label").unwrap();
        writeln!(f, "1,0xccc,whale").unwrap();
        drop(f);

        let wallets = load_wallet_ids(&input).unwrap();
        assert_eq!(wallets, vec!["0xccc".to_string()]);
    }
}
