//! Income ("receita") model
//!
//! Mirrors the body of `GET /api/receitas`.

use serde::{Deserialize, Serialize};

use super::amount::RawAmount;
use super::ids::IncomeId;
use super::lenient;
use super::record::{FinancialRecord, Searchable};

/// A single income entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,

    #[serde(rename = "valor", default)]
    pub amount: Option<RawAmount>,

    #[serde(rename = "dataRecebimento", default, deserialize_with = "lenient::text")]
    pub received_at: Option<String>,

    /// Who paid (employer, client, ...)
    #[serde(rename = "fonte", default, deserialize_with = "lenient::text")]
    pub source: Option<String>,

    #[serde(rename = "categoria", default, deserialize_with = "lenient::text")]
    pub category: Option<String>,

    #[serde(
        rename = "descricao",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Original push notification the income was parsed from
    #[serde(
        rename = "notificacao",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_source: Option<String>,
}

impl Income {
    /// Create an income with the fields the engine reads
    pub fn new(
        id: i64,
        amount: impl Into<RawAmount>,
        received_at: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            id: IncomeId::new(id),
            amount: Some(amount.into()),
            received_at: Some(received_at.into()),
            source: None,
            category: category.map(str::to_string),
            description: None,
            raw_source: None,
        }
    }

    /// Set the source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl FinancialRecord for Income {
    const KIND: &'static str = "income";

    fn record_id(&self) -> i64 {
        self.id.value()
    }

    fn raw_amount(&self) -> Option<&RawAmount> {
        self.amount.as_ref()
    }

    fn timestamp(&self) -> Option<&str> {
        self.received_at.as_deref()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

impl Searchable for Income {
    fn search_fields(&self) -> Vec<&str> {
        [
            &self.source,
            &self.category,
            &self.description,
            &self.raw_source,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .collect()
    }
}
