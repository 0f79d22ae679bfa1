use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::category::EXCLUDE_CATEGORY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bank {
    #[serde(rename = "ANZ")]
    Anz,
    Natwest,
}

impl Bank {
    /// Currency tag stamped onto transactions read from this bank's exports.
    pub fn currency(self) -> &'static str {
        match self {
            Bank::Anz => "AUD",
            Bank::Natwest => "GBP",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bank::Anz => write!(f, "ANZ"),
            Bank::Natwest => write!(f, "Natwest"),
        }
    }
}

#[derive(Error, Debug)]
#[error("Unsupported bank '{0}'")]
pub struct UnknownBank(String);

impl FromStr for Bank {
    type Err = UnknownBank;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anz" => Ok(Bank::Anz),
            "natwest" => Ok(Bank::Natwest),
            other => Err(UnknownBank(other.to_string())),
        }
    }
}

/// A fully classified statement row, ready for export. The category is
/// assigned once during conversion and rewritten only by amendments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub bank: Bank,
    pub currency: String,
    pub amount: Decimal,
    pub kind: String,
    pub counter_party: String,
    pub category: String,
    pub exclude: bool,
}

impl Transaction {
    /// True when the category is the reserved exclusion bucket or the
    /// absolute amount exceeds `ceiling`.
    pub fn excluded(category: &str, amount: Decimal, ceiling: Decimal) -> bool {
        category == EXCLUDE_CATEGORY || amount.abs() > ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn bank_from_str_is_case_insensitive() {
        assert_eq!("anz".parse::<Bank>().unwrap(), Bank::Anz);
        assert_eq!("ANZ".parse::<Bank>().unwrap(), Bank::Anz);
        assert_eq!("Natwest".parse::<Bank>().unwrap(), Bank::Natwest);
    }

    #[test]
    fn unknown_bank_is_an_error() {
        assert!("monzo".parse::<Bank>().is_err());
    }

    #[test]
    fn bank_currency_tags() {
        assert_eq!(Bank::Anz.currency(), "AUD");
        assert_eq!(Bank::Natwest.currency(), "GBP");
    }

    #[test]
    fn excluded_by_category() {
        assert!(Transaction::excluded(
            EXCLUDE_CATEGORY,
            Decimal::new(100, 2),
            Decimal::from(20000)
        ));
    }

    #[test]
    fn excluded_by_ceiling_regardless_of_category() {
        assert!(Transaction::excluded(
            "Groceries",
            Decimal::from(25000),
            Decimal::from(20000)
        ));
        assert!(Transaction::excluded(
            "Groceries",
            Decimal::from(-25000),
            Decimal::from(20000)
        ));
    }

    #[test]
    fn not_excluded_at_the_ceiling() {
        assert!(!Transaction::excluded(
            "Groceries",
            Decimal::from(20000),
            Decimal::from(20000)
        ));
    }
}
