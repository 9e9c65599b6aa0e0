//! Utils Module - Shared Helpers
//!
//! The CSV boundary between the scoring core and its collaborators.

pub mod csv_io;

pub use csv_io::*;
