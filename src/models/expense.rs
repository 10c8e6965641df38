//! Expense ("gasto") model
//!
//! Mirrors the body of `GET /api/gastos`. Field names on the wire are the
//! backend's; every field except the id is optional so malformed rows load
//! and are skipped later by the engine.

use serde::{Deserialize, Serialize};

use super::amount::RawAmount;
use super::ids::ExpenseId;
use super::lenient;
use super::record::{FinancialRecord, Searchable};

/// A single expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    /// Non-negative currency value
    #[serde(rename = "valor", default)]
    pub amount: Option<RawAmount>,

    /// When the expense happened (backend `LocalDateTime`)
    #[serde(rename = "dataHora", default, deserialize_with = "lenient::text")]
    pub timestamp: Option<String>,

    #[serde(rename = "estabelecimento", default, deserialize_with = "lenient::text")]
    pub establishment: Option<String>,

    #[serde(rename = "categoria", default, deserialize_with = "lenient::text")]
    pub category: Option<String>,

    #[serde(
        rename = "descricao",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Original bank SMS the expense was parsed from
    #[serde(
        rename = "smsOriginal",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_source: Option<String>,
}

impl Expense {
    /// Create an expense with the fields the engine reads
    pub fn new(
        id: i64,
        amount: impl Into<RawAmount>,
        timestamp: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            id: ExpenseId::new(id),
            amount: Some(amount.into()),
            timestamp: Some(timestamp.into()),
            establishment: None,
            category: category.map(str::to_string),
            description: None,
            raw_source: None,
        }
    }

    /// Set the establishment
    pub fn with_establishment(mut self, establishment: impl Into<String>) -> Self {
        self.establishment = Some(establishment.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl FinancialRecord for Expense {
    const KIND: &'static str = "expense";

    fn record_id(&self) -> i64 {
        self.id.value()
    }

    fn raw_amount(&self) -> Option<&RawAmount> {
        self.amount.as_ref()
    }

    fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Searchable for Expense {
    fn search_fields(&self) -> Vec<&str> {
        [
            &self.establishment,
            &self.category,
            &self.description,
            &self.raw_source,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .collect()
    }
}
