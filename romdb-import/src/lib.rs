//! Load game database files into SQLite, and reconcile product identifiers
//! against an authoritative code list.
//!
//! This crate owns the ETL logic: routing parsed records and settings from
//! each source file into the store, and matching, validating and applying
//! product identifier corrections to a database file.

pub mod convert;
pub mod progress;
pub mod reconcile;

pub use convert::{
    ConvertReport, ConvertSources, GameSource, ImportError, ImportStats, convert,
    import_descriptions, import_games, import_metadata,
};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use reconcile::{
    MatchClass, ReconcileMatch, Reconciliation, SkippedUpdate, UpdateApplied, apply_updates,
    classify, primary_records, reconcile,
};
