use regex::Regex;
use rust_decimal::Decimal;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::util::section_header;

/// Reserved category name: transactions filed here are flagged excluded.
pub const EXCLUDE_CATEGORY: &str = "Exclude";

/// Prefix turning a stored counter-party into a full-match regex rule.
const RULE_MARKER: char = 'r';

#[derive(Error, Debug)]
pub enum CategoryError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Category resolution interrupted")]
    Interrupted,
}

/// Supplies a category for a (kind, counter-party) pair the book cannot
/// resolve on its own. Implementations may block on operator input; tests
/// script responses instead.
pub trait CategoryResolver {
    /// Returns the chosen category name (existing or brand new), or `None`
    /// to interrupt the run.
    fn resolve(
        &mut self,
        kind: &str,
        counter_party: &str,
        amount: Decimal,
        categories: &[String],
    ) -> io::Result<Option<String>>;
}

#[derive(Debug, Clone, PartialEq)]
struct CategoryBlock {
    name: String,
    entries: Vec<(String, String)>,
}

/// The persistent category mapping. Categories keep insertion order; entries
/// within a category are append-only during a run and sorted on save.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CategoryBook {
    blocks: Vec<CategoryBlock>,
}

impl CategoryBook {
    /// Parses the line-oriented store format. Malformed lines and entries
    /// appearing before any `[Category]` header are skipped.
    pub fn parse(text: &str) -> Self {
        let mut book = CategoryBook::default();
        let mut current = None;
        for line in text.lines() {
            let line = line.trim();
            if let Some(name) = section_header(line) {
                current = Some(book.ensure_category(name));
                continue;
            }
            let fields: Vec<&str> = line.split('#').collect();
            if let (Some(ix), [kind, counter_party]) = (current, fields.as_slice()) {
                book.blocks[ix]
                    .entries
                    .push((kind.to_string(), counter_party.to_string()));
            }
        }
        book
    }

    /// Loads from `path`; a missing file yields an empty book.
    pub fn load(path: &Path) -> io::Result<Self> {
        if !path.exists() {
            return Ok(CategoryBook::default());
        }
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Serializes in category insertion order, entries sorted within each
    /// block, one blank line after each block.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            out.push_str(&format!("[{}]\n", block.name));
            let mut entries = block.entries.clone();
            entries.sort();
            for (kind, counter_party) in &entries {
                out.push_str(&format!("{kind}#{counter_party}\n"));
            }
            out.push('\n');
        }
        out
    }

    /// Overwrites `path` with the rendered store.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }

    /// Resolves the category for a (kind, counter-party) pair: exact entry
    /// first, then regex rules, then the resolver. A resolver answer is
    /// recorded as an exact entry so the same query never prompts twice.
    pub fn select(
        &mut self,
        kind: &str,
        counter_party: &str,
        amount: Decimal,
        resolver: &mut dyn CategoryResolver,
    ) -> Result<String, CategoryError> {
        if let Some(name) = self.lookup(kind, counter_party) {
            return Ok(name);
        }
        info!("No category for {kind} c/p {counter_party} (amount {amount})");
        let names: Vec<String> = self.blocks.iter().map(|b| b.name.clone()).collect();
        let choice = match resolver.resolve(kind, counter_party, amount, &names)? {
            Some(choice) => choice,
            None => return Err(CategoryError::Interrupted),
        };
        let ix = self.ensure_category(&choice);
        self.blocks[ix]
            .entries
            .push((kind.to_string(), counter_party.to_string()));
        Ok(choice)
    }

    /// Category names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.name.clone()).collect()
    }

    /// The entries stored under `name`, if the category exists.
    pub fn entries(&self, name: &str) -> Option<&[(String, String)]> {
        self.blocks
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.entries.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Scans categories in insertion order; within each, an exact
    /// (kind, counter-party) entry or a matching regex rule claims the
    /// query. First hit wins across the whole book.
    fn lookup(&self, kind: &str, counter_party: &str) -> Option<String> {
        for block in &self.blocks {
            for (entry_kind, entry_cp) in &block.entries {
                if entry_kind != kind {
                    continue;
                }
                if entry_cp == counter_party {
                    return Some(block.name.clone());
                }
                if let Some(pattern) = entry_cp.strip_prefix(RULE_MARKER) {
                    if full_match(pattern, counter_party) {
                        debug!("Matched rule {entry_cp} in [{}]", block.name);
                        return Some(block.name.clone());
                    }
                }
            }
        }
        None
    }

    fn ensure_category(&mut self, name: &str) -> usize {
        if let Some(ix) = self.blocks.iter().position(|b| b.name == name) {
            return ix;
        }
        self.blocks.push(CategoryBlock {
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.blocks.len() - 1
    }
}

/// Rule patterns must cover the whole counter-party, not a substring.
/// Invalid patterns simply never match.
fn full_match(pattern: &str, text: &str) -> bool {
    Regex::new(&format!("^(?:{pattern})$"))
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}
