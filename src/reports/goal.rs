//! Goal Detail Report
//!
//! One goal's figures, a progress bar, and a pace analysis.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Settings;
use crate::display::list::format_date;
use crate::display::money::{format_currency, format_optional};
use crate::display::report::format_bar;
use crate::models::Goal;
use crate::services::goal::{compute_progress_on, GoalProgress};

const BAR_WIDTH: usize = 30;

pub const ON_PACE_MESSAGE: &str = "Você está no caminho certo!";
pub const BEHIND_PACE_MESSAGE: &str = "Você precisa aumentar seus aportes.";

/// A goal and its progress as of a date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalReport {
    pub goal: Goal,
    pub as_of: NaiveDate,
    pub progress: GoalProgress,
}

impl GoalReport {
    /// Project `goal` as of the start of `as_of`
    pub fn generate(goal: &Goal, as_of: NaiveDate) -> Self {
        Self {
            goal: goal.clone(),
            as_of,
            progress: compute_progress_on(goal, as_of),
        }
    }

    /// Pace analysis lines
    pub fn pace_message(&self, currency_symbol: &str) -> Vec<String> {
        if self.progress.is_on_pace {
            return vec![ON_PACE_MESSAGE.to_string()];
        }

        vec![
            BEHIND_PACE_MESSAGE.to_string(),
            format!(
                "Progresso esperado: {}. Você está {} abaixo do esperado.",
                format_currency(self.progress.expected_amount, currency_symbol),
                format_currency(self.progress.deficit, currency_symbol)
            ),
        ]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency_symbol.as_str();
        let goal = &self.goal;
        let mut output = String::new();

        output.push_str(&format!("Detalhes da Meta: {} ({})\n", goal.name, goal.id));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if let Some(description) = goal.description.as_deref().filter(|d| !d.is_empty()) {
            output.push_str(&format!("Descrição:   {}\n", description));
        }
        output.push_str(&format!(
            "Valor Alvo:  {}\n",
            format_optional(goal.target(), symbol)
        ));
        output.push_str(&format!(
            "Valor Atual: {}\n",
            format_currency(goal.current(), symbol)
        ));
        if let Some(created) = goal.created_at {
            output.push_str(&format!(
                "Criada em:   {}\n",
                format_date(created, settings)
            ));
        }
        if let Some(due) = goal.target_date {
            output.push_str(&format!(
                "Data Alvo:   {}\n",
                format_date(due, settings)
            ));
        }
        output.push_str(&format!("Status:      {}\n", goal.status));

        output.push_str(&format!(
            "\nProgresso em {}:\n",
            format_date(self.as_of, settings)
        ));
        output.push_str(&format!(
            "[{}] {:.2}%\n",
            format_bar(self.progress.percent_complete, 100.0, BAR_WIDTH),
            self.progress.raw_percent_complete
        ));

        output.push_str("\nAnálise de Andamento:\n");
        for line in self.pace_message(symbol) {
            output.push_str(&line);
            output.push('\n');
        }

        output
    }
}
