use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::transaction::Transaction;
use crate::util::section_header;

/// One correction target: a historical transaction identified by kind,
/// counter-party, date and integer-truncated amount.
#[derive(Debug, Clone, PartialEq)]
struct AmendmentKey {
    kind: String,
    counter_party: String,
    date: NaiveDate,
    amount: i64,
}

/// Post-hoc category corrections, keyed by target category. Same block file
/// shape as the category store, but entries carry four `#`-separated fields:
/// `kind#counterparty#YYYY-MM-DD#amount`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Amendments {
    blocks: Vec<(String, Vec<AmendmentKey>)>,
}

impl Amendments {
    /// Lenient line parse: malformed entries, unparseable dates or amounts,
    /// and entries before any header are skipped.
    pub fn parse(text: &str) -> Self {
        let mut amendments = Amendments::default();
        let mut current = None;
        for line in text.lines() {
            let line = line.trim();
            if let Some(name) = section_header(line) {
                current = Some(amendments.ensure_block(name));
                continue;
            }
            let fields: Vec<&str> = line.split('#').collect();
            let ix = match current {
                Some(ix) if fields.len() == 4 => ix,
                _ => continue,
            };
            let date = match NaiveDate::parse_from_str(fields[2], "%Y-%m-%d") {
                Ok(date) => date,
                Err(_) => continue,
            };
            let amount = match Decimal::from_str(fields[3]) {
                Ok(amount) => match amount.trunc().to_i64() {
                    Some(amount) => amount,
                    None => continue,
                },
                Err(_) => continue,
            };
            amendments.blocks[ix].1.push(AmendmentKey {
                kind: fields[0].to_string(),
                counter_party: fields[1].to_string(),
                date,
                amount,
            });
        }
        amendments
    }

    /// Loads from `path`; a missing file yields no amendments.
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(Amendments::default());
        }
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Rewrites the category of every transaction whose (date, kind,
    /// truncated amount, counter-party) equals an amendment key. Amounts
    /// compare on the integer part only, so sub-unit differences are
    /// ignored. A key matching nothing is logged and skipped.
    pub fn apply(&self, transactions: &mut [Transaction]) {
        for (category, keys) in &self.blocks {
            for key in keys {
                let mut matched = false;
                for txn in transactions.iter_mut() {
                    if txn.date == key.date
                        && txn.kind == key.kind
                        && txn.amount.trunc().to_i64() == Some(key.amount)
                        && txn.counter_party == key.counter_party
                    {
                        info!(
                            "Amending {} {} on {} to [{category}]",
                            txn.kind, txn.counter_party, txn.date
                        );
                        txn.category = category.clone();
                        matched = true;
                    }
                }
                if !matched {
                    warn!(
                        "Amendment for {} {} on {} matched no transaction",
                        key.kind, key.counter_party, key.date
                    );
                }
            }
        }
    }

    fn ensure_block(&mut self, name: &str) -> usize {
        if let Some(ix) = self.blocks.iter().position(|(n, _)| n == name) {
            return ix;
        }
        self.blocks.push((name.to_string(), Vec::new()));
        self.blocks.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::Bank;

    fn txn(date: (i32, u32, u32), kind: &str, amount: &str, counter_party: &str) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            bank: Bank::Natwest,
            currency: "GBP".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            kind: kind.to_string(),
            counter_party: counter_party.to_string(),
            category: "Misc".to_string(),
            exclude: false,
        }
    }

    #[test]
    fn parse_reads_four_field_entries() {
        let amendments =
            Amendments::parse("[Groceries]\nCARD_PAYMENT#Shop#2023-01-01#42.99\n");
        assert!(!amendments.is_empty());
        assert_eq!(amendments.blocks[0].1[0].amount, 42);
    }

    #[test]
    fn parse_skips_malformed_entries() {
        let text = "\
[Groceries]
CARD_PAYMENT#Shop#2023-01-01
CARD_PAYMENT#Shop#01/01/2023#42.99
CARD_PAYMENT#Shop#2023-01-01#not-a-number
CARD_PAYMENT#Shop#2023-01-01#42.99
";
        let amendments = Amendments::parse(text);
        assert_eq!(amendments.blocks[0].1.len(), 1);
    }

    #[test]
    fn apply_overrides_category_with_truncated_amount_match() {
        let amendments =
            Amendments::parse("[Groceries]\nCARD_PAYMENT#Shop#2023-01-01#42\n");
        let mut transactions = vec![txn((2023, 1, 1), "CARD_PAYMENT", "42.99", "Shop")];
        amendments.apply(&mut transactions);
        assert_eq!(transactions[0].category, "Groceries");
    }

    #[test]
    fn apply_updates_every_matching_transaction() {
        let amendments =
            Amendments::parse("[Groceries]\nCARD_PAYMENT#Shop#2023-01-01#42.50\n");
        let mut transactions = vec![
            txn((2023, 1, 1), "CARD_PAYMENT", "42.10", "Shop"),
            txn((2023, 1, 1), "CARD_PAYMENT", "42.90", "Shop"),
        ];
        amendments.apply(&mut transactions);
        assert_eq!(transactions[0].category, "Groceries");
        assert_eq!(transactions[1].category, "Groceries");
    }

    #[test]
    fn apply_requires_all_key_fields_to_match() {
        let amendments =
            Amendments::parse("[Groceries]\nCARD_PAYMENT#Shop#2023-01-01#42\n");
        let mut transactions = vec![
            txn((2023, 1, 2), "CARD_PAYMENT", "42.99", "Shop"),
            txn((2023, 1, 1), "TRANSFER_TO", "42.99", "Shop"),
            txn((2023, 1, 1), "CARD_PAYMENT", "43.00", "Shop"),
            txn((2023, 1, 1), "CARD_PAYMENT", "42.99", "Other Shop"),
        ];
        amendments.apply(&mut transactions);
        assert!(transactions.iter().all(|t| t.category == "Misc"));
    }

    #[test]
    fn no_match_is_not_fatal() {
        let amendments =
            Amendments::parse("[Groceries]\nCARD_PAYMENT#Shop#2023-01-01#42\n");
        let mut transactions: Vec<Transaction> = Vec::new();
        amendments.apply(&mut transactions);
    }
}
