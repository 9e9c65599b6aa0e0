//! Providers Module - Transaction Data Sources
//!
//! The scoring core consumes transaction histories through the
//! `TransactionProvider` seam; network fetching lives outside this crate.

pub mod store;

pub use store::*;
