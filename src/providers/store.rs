//! File-backed transaction store
//!
//! The core treats transaction collection as a synchronous collaborator
//! behind the `TransactionProvider` trait. This implementation reads
//! pre-fetched per-wallet JSON dumps from a directory; the multi-network
//! polling provider of the production system sits behind the same trait.

use crate::models::{AppError, AppResult, ErrorCode, TransactionRecord};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Seam between the scoring core and whatever supplies transaction
/// histories. Implementations must be `Sync`: the batch analyzer calls
/// this from parallel workers.
pub trait TransactionProvider {
    fn wallet_transactions(&self, wallet: &str) -> AppResult<Vec<TransactionRecord>>;
}

/// Reads `<data_dir>/<wallet>.json`, each file a JSON array of
/// transaction records. A missing file is a wallet with zero observed
/// activity, not an error.
pub struct JsonTransactionStore {
    data_dir: PathBuf,
}

impl JsonTransactionStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    fn wallet_path(&self, wallet: &str) -> PathBuf {
        self.data_dir.join(format!("{wallet}.json"))
    }
}

impl TransactionProvider for JsonTransactionStore {
    fn wallet_transactions(&self, wallet: &str) -> AppResult<Vec<TransactionRecord>> {
        let path = self.wallet_path(wallet);
        if !path.exists() {
            debug!(wallet, "no transaction file, treating as empty history");
            return Ok(Vec::new());
        }

        let file = File::open(&path).map_err(|e| {
            AppError::with_source(
                ErrorCode::DataReadFailed,
                format!("cannot open {}", path.display()),
                e,
            )
        })?;

        let records: Vec<TransactionRecord> =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| {
                AppError::with_source(
                    ErrorCode::DataInvalidJson,
                    format!("invalid transaction JSON in {}", path.display()),
                    e,
                )
            })?;

        debug!(wallet, records = records.len(), "loaded transaction history");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonTransactionStore::new(dir.path());
        let txs = store.wallet_transactions("0xdeadbeef").unwrap();
        assert!(txs.is_empty());
    }

    #[test]
    fn test_reads_wallet_file() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = "0x0039f22efb07a647557c7c5d17854cfd6d489ef3";
        let json = r#"[{
            "hash": "0xh1", "block_number": 100, "timestamp": 1700000000,
            "from_address": "0xw", "to_address": "0xc",
            "value": 2.5, "gas_used": 150000, "gas_price": 20000000000,
            "function_name": "borrow(uint256)", "network": "ethereum"
        }]"#;
        let mut f = File::create(dir.path().join(format!("{wallet}.json"))).unwrap();
        f.write_all(json.as_bytes()).unwrap();

        let store = JsonTransactionStore::new(dir.path());
        let txs = store.wallet_transactions(wallet).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].value, 2.5);
        assert_eq!(txs[0].function_name, "borrow(uint256)");
    }

    #[test]
    fn test_corrupt_json_reports_code() {
        let dir = tempfile::tempdir().unwrap();
        let wallet = "0xbad";
        let mut f = File::create(dir.path().join(format!("{wallet}.json"))).unwrap();
        f.write_all(b"{ not json").unwrap();

        let store = JsonTransactionStore::new(dir.path());
        let err = store.wallet_transactions(wallet).unwrap_err();
        assert_eq!(err.code, ErrorCode::DataInvalidJson);
    }
}
