//! Strongly-typed ID wrappers for all record types
//!
//! The backend assigns sequential integer ids per table. Newtype wrappers keep
//! an expense id from being used where a goal id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Get the backend's numeric id
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            /// Accepts both "7" and the display form "meta-7"
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(s.parse()?))
            }
        }
    };
}

define_id!(ExpenseId, "gasto-");
define_id!(IncomeId, "receita-");
define_id!(GoalId, "meta-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ExpenseId::new(12).to_string(), "gasto-12");
        assert_eq!(GoalId::new(3).to_string(), "meta-3");
    }

    #[test]
    fn test_id_parse_accepts_prefix() {
        assert_eq!("meta-7".parse::<GoalId>().unwrap(), GoalId::new(7));
        assert_eq!("7".parse::<GoalId>().unwrap(), GoalId::new(7));
        assert!("meta-x".parse::<GoalId>().is_err());
    }

    #[test]
    fn test_id_is_plain_number_on_the_wire() {
        let id: IncomeId = serde_json::from_str("41").unwrap();
        assert_eq!(id.value(), 41);
        assert_eq!(serde_json::to_string(&id).unwrap(), "41");
    }
}
