//! Raw currency amounts as they arrive from the backend
//!
//! The backend serializes amounts as JSON numbers, but records edited by hand
//! or relayed through other clients may carry numeric strings or garbage.
//! `RawAmount` keeps whatever arrived and coerces it on read, so one malformed
//! record never rejects a whole snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount exactly as it was received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A JSON number
    Number(f64),
    /// A JSON string, possibly numeric ("150.75")
    Text(String),
    /// Any other JSON value (bool, array, object); never a valid amount
    Other(serde_json::Value),
}

impl RawAmount {
    /// Coerce to a finite floating-point amount
    ///
    /// Text is read with leading-prefix semantics: leading whitespace is
    /// skipped and the longest numeric prefix is used, so `"12.5 BRL"` is
    /// `12.5` while `"abc"` has no value.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) => None,
            Self::Text(s) => parse_leading_float(s),
            Self::Other(_) => None,
        }
    }

    /// Check whether the amount coerces to a number
    pub fn is_valid(&self) -> bool {
        self.value().is_some()
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{:?}", s),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Coerce an optional raw amount, treating absence as invalid
pub fn coerce(amount: Option<&RawAmount>) -> Option<f64> {
    amount.and_then(RawAmount::value)
}

/// Parse the longest leading decimal number in `s`
fn parse_leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digit_run = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digit_run(end);
    end += int_digits;

    let mut digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digit_run(end + 1);
        if digits + frac_digits > 0 {
            end += 1 + frac_digits;
            digits += frac_digits;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digit_run(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_is_valid() {
        assert_eq!(RawAmount::Number(150.75).value(), Some(150.75));
        assert_eq!(RawAmount::Number(f64::NAN).value(), None);
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(RawAmount::from("100").value(), Some(100.0));
        assert_eq!(RawAmount::from("  -3.25").value(), Some(-3.25));
        assert_eq!(RawAmount::from(".5").value(), Some(0.5));
        assert_eq!(RawAmount::from("1e3").value(), Some(1000.0));
    }

    #[test]
    fn test_leading_prefix_wins() {
        assert_eq!(RawAmount::from("12.5abc").value(), Some(12.5));
        assert_eq!(RawAmount::from("12,50").value(), Some(12.0));
        assert_eq!(RawAmount::from("7e").value(), Some(7.0));
        assert_eq!(RawAmount::from("3.").value(), Some(3.0));
    }

    #[test]
    fn test_invalid_text() {
        assert_eq!(RawAmount::from("abc").value(), None);
        assert_eq!(RawAmount::from("").value(), None);
        assert_eq!(RawAmount::from("-").value(), None);
        assert_eq!(RawAmount::from(".").value(), None);
        assert_eq!(RawAmount::from("R$ 10").value(), None);
    }

    #[test]
    fn test_deserialize_variants() {
        let n: RawAmount = serde_json::from_str("42").unwrap();
        assert_eq!(n, RawAmount::Number(42.0));

        let t: RawAmount = serde_json::from_str(r#""42.10""#).unwrap();
        assert_eq!(t.value(), Some(42.1));

        let o: RawAmount = serde_json::from_str("true").unwrap();
        assert!(!o.is_valid());
    }

    #[test]
    fn test_coerce_missing() {
        assert_eq!(coerce(None), None);
        assert_eq!(coerce(Some(&RawAmount::Number(1.0))), Some(1.0));
    }
}
