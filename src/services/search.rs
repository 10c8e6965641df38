//! Free-text search over record lists
//!
//! A term matches a record when any of its searchable fields contains the
//! term, ignoring case. The term is used as typed: surrounding whitespace is
//! part of what must match.

use crate::models::Searchable;

/// Check whether `record` matches `term`; an empty term matches everything
pub fn matches_search<T: Searchable>(record: &T, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }
    contains_folded(record, &term)
}

fn contains_folded<T: Searchable>(record: &T, folded_term: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(folded_term))
}

/// Keep the records matching `term`, in input order
pub fn search<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    let term = term.to_lowercase();
    records
        .iter()
        .filter(|record| term.is_empty() || contains_folded(*record, &term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Goal, Income};
    use chrono::NaiveDate;

    #[test]
    fn test_case_insensitive_substring() {
        let expense = Expense::new(1, 10.0, "2024-01-01", Some("Alimentação"))
            .with_establishment("Padaria Pão Quente");

        assert!(matches_search(&expense, "padaria"));
        assert!(matches_search(&expense, "PÃO"));
        assert!(matches_search(&expense, "alimenta"));
        assert!(!matches_search(&expense, "farmácia"));
    }

    #[test]
    fn test_empty_term_matches_all() {
        let expense = Expense::new(1, 10.0, "2024-01-01", None);
        assert!(matches_search(&expense, ""));
    }

    #[test]
    fn test_whitespace_term_is_not_trimmed() {
        let spaced =
            Expense::new(1, 10.0, "2024-01-01", Some("Mercado")).with_establishment("Pão Quente");
        let single =
            Expense::new(2, 10.0, "2024-01-01", Some("Lazer")).with_establishment("Cinema");

        assert!(matches_search(&spaced, " "));
        assert!(!matches_search(&single, " "));
        assert!(!matches_search(&spaced, " mercado"));

        let list = vec![spaced, single];
        let found: Vec<i64> = search(&list, " ").iter().map(|e| e.id.value()).collect();
        assert_eq!(found, vec![1]);
    }

    #[test]
    fn test_searches_raw_source() {
        let mut income = Income::new(1, 10.0, "2024-01-01", None);
        income.raw_source = Some("PIX RECEBIDO de Maria".into());
        assert!(matches_search(&income, "maria"));
    }

    #[test]
    fn test_amount_and_date_not_searchable() {
        let expense = Expense::new(1, 42.0, "2024-01-01", None);
        assert!(!matches_search(&expense, "42"));
        assert!(!matches_search(&expense, "2024"));
    }

    #[test]
    fn test_search_goals_keeps_order() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut viagem = Goal::new(1, "Viagem", 1.0, 0.0, d, d);
        viagem.description = Some("Praia".into());
        let goals = vec![
            viagem,
            Goal::new(2, "Carro", 1.0, 0.0, d, d),
            Goal::new(3, "Viagem Europa", 1.0, 0.0, d, d),
        ];

        let found: Vec<i64> = search(&goals, "viagem").iter().map(|g| g.id.value()).collect();
        assert_eq!(found, vec![1, 3]);
        assert_eq!(search(&goals, "praia").len(), 1);
        assert_eq!(search(&goals, "").len(), 3);
    }
}
