//! Core Module - Feature Extraction & Risk Scoring
//!
//! The algorithmic heart of the crate: transaction records in, bounded
//! deterministic risk scores out.

pub mod analyzer;
pub mod extractor;
pub mod normalize;
pub mod scorer;

pub use analyzer::*;
pub use extractor::*;
pub use normalize::*;
pub use scorer::*;
