use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

use tabula_core::{
    Amendments, Bank, CategoryBook, CategoryError, CategoryResolver, Transaction,
};
use tabula_import::{read_statement, Classifier, Cleaner, StatementRow};

use crate::prompt::ConsolePrompt;

/// Full conversion run: read the statement, classify and categorize every
/// row, persist the category store, apply amendments, write the export.
pub fn run(
    statement: &Path,
    bank: Bank,
    categories_path: &Path,
    amendments_path: &Path,
    out: &Path,
    ceiling: Decimal,
) -> Result<()> {
    info!("Running for {bank}");

    let mut book = CategoryBook::load(categories_path)
        .with_context(|| format!("Failed to load {}", categories_path.display()))?;
    let file = File::open(statement)
        .with_context(|| format!("Failed to open {}", statement.display()))?;
    let rows = read_statement(bank, file)?;

    let mut resolver = ConsolePrompt;
    let mut transactions = convert_rows(rows, bank, &mut book, &mut resolver, ceiling)?;

    // Saved even after an interrupted run so learned mappings survive.
    book.save(categories_path)
        .with_context(|| format!("Failed to save {}", categories_path.display()))?;

    let amendments = Amendments::load(amendments_path)
        .with_context(|| format!("Failed to load {}", amendments_path.display()))?;
    amendments.apply(&mut transactions);

    write_output(out, &transactions)?;
    info!("Wrote {} transactions to {}", transactions.len(), out.display());
    Ok(())
}

/// Classifies and categorizes statement rows. Interruption from the
/// resolver stops consumption; everything converted so far is returned.
fn convert_rows(
    rows: Vec<StatementRow>,
    bank: Bank,
    book: &mut CategoryBook,
    resolver: &mut dyn CategoryResolver,
    ceiling: Decimal,
) -> Result<Vec<Transaction>> {
    let classifier = Classifier::for_bank(bank)?;
    let cleaner = Cleaner::new()?;

    let mut transactions = Vec::with_capacity(rows.len());
    for row in rows {
        // An unparsed description is not fatal: the row is filed with empty
        // labels and the operator decides its category.
        let (kind, raw_counter_party) =
            classifier.classify(&row.description).unwrap_or_default();
        let counter_party = cleaner.clean(&raw_counter_party);

        let category = match book.select(kind, &counter_party, row.amount, resolver) {
            Ok(category) => category,
            Err(CategoryError::Interrupted) => {
                warn!(
                    "Interrupted; keeping {} already converted transactions",
                    transactions.len()
                );
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let exclude = Transaction::excluded(&category, row.amount, ceiling);
        transactions.push(Transaction {
            date: row.date,
            bank,
            currency: bank.currency().to_string(),
            amount: row.amount,
            kind: kind.to_string(),
            counter_party,
            category,
            exclude,
        });
    }
    Ok(transactions)
}

fn write_output(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for txn in transactions {
        writer.serialize(txn)?;
    }
    writer.flush()?;
    Ok(())
}
