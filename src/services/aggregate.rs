//! Aggregator
//!
//! Sums record amounts, optionally grouped by a key such as the category.
//! Amounts that do not coerce to a number are skipped: they add nothing and
//! never create a bucket. Summation runs in input order so the same input
//! always rounds the same way.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::warn;

use crate::models::{FinancialRecord, RawAmount};

/// One category's running total
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub category_name: String,
    pub total_amount: f64,
}

/// Totals keyed by category, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    buckets: Vec<CategoryBucket>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the bucket for `key`, creating it if needed
    pub fn add(&mut self, key: &str, amount: f64) {
        match self.index.get(key) {
            Some(&i) => self.buckets[i].total_amount += amount,
            None => {
                self.index.insert(key.to_string(), self.buckets.len());
                self.buckets.push(CategoryBucket {
                    category_name: key.to_string(),
                    total_amount: amount,
                });
            }
        }
    }

    /// Total for one key
    pub fn get(&self, key: &str) -> Option<f64> {
        self.index.get(key).map(|&i| self.buckets[i].total_amount)
    }

    pub fn buckets(&self) -> &[CategoryBucket] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<CategoryBucket> {
        self.buckets
    }

    /// Bucket totals in first-seen order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.buckets.iter().map(|b| b.total_amount)
    }

    /// Sum of all bucket totals
    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.buckets.serialize(serializer)
    }
}

/// Coerce one record's amount, logging the ones that get skipped
fn coerce_logged<T: FinancialRecord>(record: &T, amount: Option<&RawAmount>) -> Option<f64> {
    match amount {
        Some(raw) => {
            let value = raw.value();
            if value.is_none() {
                warn!(
                    kind = T::KIND,
                    id = record.record_id(),
                    amount = %raw,
                    "skipping record with non-numeric amount"
                );
            }
            value
        }
        None => {
            warn!(kind = T::KIND, id = record.record_id(), "skipping record without an amount");
            None
        }
    }
}

/// Sum the amounts of `records`, skipping the ones that don't coerce
pub fn sum<'a, T, I, F>(records: I, amount_field: F) -> f64
where
    T: FinancialRecord + 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Option<&RawAmount>,
{
    records
        .into_iter()
        .filter_map(|record| coerce_logged(record, amount_field(record)))
        .fold(0.0, |acc, amount| acc + amount)
}

/// Sum amounts per key; records without a key land in `default_key`
///
/// An empty key counts as missing.
pub fn group_sum<'a, T, I, F, K>(
    records: I,
    amount_field: F,
    key_field: K,
    default_key: &str,
) -> CategoryTotals
where
    T: FinancialRecord + 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Option<&RawAmount>,
    K: Fn(&T) -> Option<&str>,
{
    let mut totals = CategoryTotals::new();

    for record in records {
        let Some(amount) = coerce_logged(record, amount_field(record)) else {
            continue;
        };
        let key = key_field(record)
            .filter(|k| !k.is_empty())
            .unwrap_or(default_key);
        totals.add(key, amount);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, FinancialRecord};

    fn expenses() -> Vec<Expense> {
        vec![
            Expense::new(1, 50.0, "2024-01-10", Some("Mercado")),
            Expense::new(2, 30.0, "2024-01-11", Some("Lazer")),
            Expense::new(3, 20.0, "2024-01-12", Some("Mercado")),
            Expense::new(4, 15.0, "2024-01-13", None),
        ]
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&expenses(), Expense::raw_amount), 115.0);
    }

    #[test]
    fn test_sum_empty() {
        let none: Vec<Expense> = Vec::new();
        assert_eq!(sum(&none, Expense::raw_amount), 0.0);
    }

    #[test]
    fn test_sum_skips_invalid() {
        let mut list = expenses();
        list.push(Expense::new(5, "abc", "2024-01-14", Some("Mercado")));
        let mut missing = Expense::new(6, 1.0, "2024-01-14", None);
        missing.amount = None;
        list.push(missing);

        assert_eq!(sum(&list, Expense::raw_amount), 115.0);
    }

    #[test]
    fn test_sum_over_incomes_skips_invalid() {
        use crate::models::Income;

        let incomes = vec![
            Income::new(1, 1500.0, "2024-01-05", None),
            Income::new(2, "salário", "2024-01-06", None),
        ];
        assert_eq!(Income::KIND, "income");
        assert_eq!(sum(&incomes, Income::raw_amount), 1500.0);
    }

    #[test]
    fn test_sum_over_references() {
        let list = expenses();
        let refs: Vec<&Expense> = list.iter().filter(|e| e.record_id() > 2).collect();
        assert_eq!(sum(refs, Expense::raw_amount), 35.0);
    }

    #[test]
    fn test_group_sum_first_seen_order() {
        let totals = group_sum(
            &expenses(),
            Expense::raw_amount,
            Expense::category,
            "Sem Categoria",
        );

        let names: Vec<&str> = totals
            .buckets()
            .iter()
            .map(|b| b.category_name.as_str())
            .collect();
        assert_eq!(names, vec!["Mercado", "Lazer", "Sem Categoria"]);
        assert_eq!(totals.get("Mercado"), Some(70.0));
        assert_eq!(totals.get("Sem Categoria"), Some(15.0));
    }

    #[test]
    fn test_group_sum_empty_key_is_default() {
        let list = vec![Expense::new(1, 5.0, "2024-01-01", Some(""))];
        let totals = group_sum(&list, Expense::raw_amount, Expense::category, "Outros");
        assert_eq!(totals.get("Outros"), Some(5.0));
        assert_eq!(totals.get(""), None);
    }

    #[test]
    fn test_invalid_amount_creates_no_bucket() {
        let list = vec![
            Expense::new(1, 5.0, "2024-01-01", Some("Mercado")),
            Expense::new(2, "abc", "2024-01-01", Some("Farmácia")),
        ];
        let totals = group_sum(&list, Expense::raw_amount, Expense::category, "Outros");
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Farmácia"), None);
    }

    #[test]
    fn test_group_total_matches_sum() {
        let list = expenses();
        let totals = group_sum(&list, Expense::raw_amount, Expense::category, "Outros");
        assert_eq!(totals.total(), sum(&list, Expense::raw_amount));
    }

    #[test]
    fn test_serializes_as_bucket_list() {
        let mut totals = CategoryTotals::new();
        totals.add("Mercado", 12.5);
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "categoryName": "Mercado", "totalAmount": 12.5 }])
        );
    }
}
