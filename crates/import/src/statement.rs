use chrono::NaiveDate;
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

use tabula_core::Bank;

/// Date format used by both banks' exports.
const DATE_FORMAT: &str = "%d/%m/%Y";

/// A raw statement row, normalized across source layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Error, Debug)]
pub enum StatementError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing field {0} in row")]
    MissingField(usize),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Dispatches to the reader for `bank`'s export layout.
pub fn read_statement<R: Read>(bank: Bank, data: R) -> Result<Vec<StatementRow>, StatementError> {
    match bank {
        Bank::Anz => read_anz(data),
        Bank::Natwest => read_natwest(data),
    }
}

/// ANZ export: headerless `date,amount,description` rows.
pub fn read_anz<R: Read>(data: R) -> Result<Vec<StatementRow>, StatementError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        rows.push(StatementRow {
            date: parse_date(required(&record, 0)?)?,
            amount: parse_amount(required(&record, 1)?)?,
            description: record.get(2).unwrap_or_default().trim().to_string(),
        });
    }
    Ok(rows)
}

/// Natwest export: headered rows where the narrative spans the type-code
/// column and the description column. The two are joined with a space;
/// commas become spaces and apostrophes are dropped so the codes in the
/// narrative stay tokenizable.
pub fn read_natwest<R: Read>(data: R) -> Result<Vec<StatementRow>, StatementError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        let description = format!(
            "{} {}",
            record.get(1).unwrap_or_default(),
            record.get(2).unwrap_or_default()
        )
        .replace(',', " ")
        .replace('\'', "");
        rows.push(StatementRow {
            date: parse_date(required(&record, 0)?)?,
            amount: parse_amount(required(&record, 3)?)?,
            description: description.split_whitespace().collect::<Vec<_>>().join(" "),
        });
    }
    Ok(rows)
}

fn required<'r>(record: &'r csv::StringRecord, ix: usize) -> Result<&'r str, StatementError> {
    record.get(ix).ok_or(StatementError::MissingField(ix))
}

fn parse_date(s: &str) -> Result<NaiveDate, StatementError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| StatementError::InvalidDate(s.to_string()))
}

fn parse_amount(s: &str) -> Result<Decimal, StatementError> {
    let cleaned = s.trim().replace([',', '$', ' '], "");
    Decimal::from_str(&cleaned).map_err(|_| StatementError::InvalidAmount(s.to_string()))
}
