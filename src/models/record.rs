//! Common read-only view over expense and income records
//!
//! The derivation engine is generic over this trait, so the same filter,
//! aggregation and search code runs over both streams.

use super::amount::RawAmount;

/// A dated money movement (expense or income)
pub trait FinancialRecord {
    /// Human-readable record kind, used in diagnostics
    const KIND: &'static str;

    /// Backend id as a plain number
    fn record_id(&self) -> i64;

    /// The amount exactly as received
    fn raw_amount(&self) -> Option<&RawAmount>;

    /// The raw timestamp that places the record in a period
    fn timestamp(&self) -> Option<&str>;

    /// Category name, if any
    fn category(&self) -> Option<&str>;
}

/// A record that takes part in free-text search
pub trait Searchable {
    /// The fields a search term is matched against, in display order
    fn search_fields(&self) -> Vec<&str>;
}
