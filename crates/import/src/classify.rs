use regex::Regex;
use tabula_core::Bank;
use thiserror::Error;
use tracing::warn;

use crate::patterns::{self, Rule};

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern '{pattern}': {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A type label paired with its compiled patterns.
struct CompiledRule {
    label: &'static str,
    patterns: Vec<Regex>,
}

/// Matches raw statement descriptions against one bank's ordered rule table.
pub struct Classifier {
    rules: Vec<CompiledRule>,
}

impl Classifier {
    pub fn for_bank(bank: Bank) -> Result<Self, PatternError> {
        let table = match bank {
            Bank::Anz => patterns::ANZ_RULES,
            Bank::Natwest => patterns::NATWEST_RULES,
        };
        Self::from_table(table)
    }

    fn from_table(table: &[Rule]) -> Result<Self, PatternError> {
        let mut rules = Vec::with_capacity(table.len());
        for (label, raw_patterns) in table {
            let mut compiled = Vec::with_capacity(raw_patterns.len());
            for pattern in *raw_patterns {
                // Patterns match from the start of the description; the
                // table spells out any wildcard tails itself.
                let re = Regex::new(&format!("^(?:{pattern})")).map_err(|source| {
                    PatternError::Invalid {
                        pattern: (*pattern).to_string(),
                        source,
                    }
                })?;
                compiled.push(re);
            }
            rules.push(CompiledRule {
                label,
                patterns: compiled,
            });
        }
        Ok(Self { rules })
    }

    /// Returns the first rule whose pattern matches, with the captured
    /// counter-party text. `None` when nothing in the table applies —
    /// logged, not fatal; the caller proceeds with empty labels.
    pub fn classify(&self, description: &str) -> Option<(&'static str, String)> {
        for rule in &self.rules {
            for re in &rule.patterns {
                if let Some(caps) = re.captures(description) {
                    if let Some(group) = caps.get(1) {
                        return Some((rule.label, group.as_str().to_string()));
                    }
                }
            }
        }
        warn!("Unable to parse description: {description}");
        None
    }
}
