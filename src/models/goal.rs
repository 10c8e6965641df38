//! Savings goal ("meta financeira") model
//!
//! Mirrors the body of `GET /api/metas`. Goals are not period-filtered; their
//! progress is projected by `services::goal`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::{self, RawAmount};
use super::ids::GoalId;
use super::lenient;
use super::record::Searchable;

/// Lifecycle state of a goal
///
/// The backend stores the Portuguese label; English names are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GoalStatus {
    #[default]
    #[serde(rename = "Em Andamento", alias = "InProgress")]
    InProgress,
    #[serde(rename = "Concluída", alias = "Concluida", alias = "Completed")]
    Completed,
    #[serde(rename = "Pausada", alias = "Paused")]
    Paused,
    #[serde(rename = "Cancelada", alias = "Cancelled")]
    Cancelled,
    /// A label this version does not know
    #[serde(other)]
    Unknown,
}

impl GoalStatus {
    /// The label shown to users (and stored by the backend)
    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "Em Andamento",
            Self::Completed => "Concluída",
            Self::Paused => "Pausada",
            Self::Cancelled => "Cancelada",
            Self::Unknown => "Desconhecido",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,

    #[serde(rename = "nome", default, deserialize_with = "lenient::or_default")]
    pub name: String,

    /// Amount to reach; expected to be positive
    #[serde(rename = "valorAlvo", default)]
    pub target_amount: Option<RawAmount>,

    /// Amount saved so far
    #[serde(rename = "valorAtual", default)]
    pub current_amount: Option<RawAmount>,

    /// Pacing start; nullable in the backend
    #[serde(rename = "dataCriacao", default, deserialize_with = "lenient::date")]
    pub created_at: Option<NaiveDate>,

    #[serde(rename = "dataAlvo", default, deserialize_with = "lenient::date")]
    pub target_date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: GoalStatus,

    #[serde(
        rename = "descricao",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl Goal {
    /// Create an in-progress goal
    pub fn new(
        id: i64,
        name: impl Into<String>,
        target_amount: f64,
        current_amount: f64,
        created_at: NaiveDate,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            id: GoalId::new(id),
            name: name.into(),
            target_amount: Some(RawAmount::Number(target_amount)),
            current_amount: Some(RawAmount::Number(current_amount)),
            created_at: Some(created_at),
            target_date: Some(target_date),
            status: GoalStatus::InProgress,
            description: None,
        }
    }

    /// Target amount, if it coerces to a number
    pub fn target(&self) -> Option<f64> {
        amount::coerce(self.target_amount.as_ref())
    }

    /// Current amount; missing or malformed counts as nothing saved
    pub fn current(&self) -> f64 {
        amount::coerce(self.current_amount.as_ref()).unwrap_or(0.0)
    }
}

impl Searchable for Goal {
    fn search_fields(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.description.as_deref())
            .collect()
    }
}
