use regex::Regex;

use crate::classify::PatternError;
use crate::patterns::NOISE;

/// Strips noise tokens (dates, codes, currency markers, cities) from
/// captured counter-party text.
pub struct Cleaner {
    noise: Vec<Regex>,
}

impl Cleaner {
    pub fn new() -> Result<Self, PatternError> {
        let mut noise = Vec::with_capacity(NOISE.len());
        for pattern in NOISE {
            // Noise patterns must cover a whole token to discard it.
            let re = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                PatternError::Invalid {
                    pattern: (*pattern).to_string(),
                    source,
                }
            })?;
            noise.push(re);
        }
        Ok(Self { noise })
    }

    /// Replaces the `*` wildcard marker with a space, drops noise tokens,
    /// and rejoins the survivors. Falls back to the raw input unchanged
    /// when every token is noise, so the result is never empty.
    pub fn clean(&self, raw: &str) -> String {
        let spaced = raw.replace('*', " ");
        let kept: Vec<&str> = spaced
            .split_whitespace()
            .filter(|token| !self.noise.iter().any(|re| re.is_match(token)))
            .collect();
        if kept.is_empty() {
            return raw.to_string();
        }
        kept.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> Cleaner {
        Cleaner::new().unwrap()
    }

    #[test]
    fn drops_numbers_dates_and_cities() {
        assert_eq!(
            cleaner().clean("TESCO STORES 2341 14JAN23 LONDON GB"),
            "TESCO STORES"
        );
        assert_eq!(cleaner().clean("WOOLWORTHS 123/45 SYDNEY AU"), "WOOLWORTHS");
    }

    #[test]
    fn drops_reference_and_masked_card_tokens() {
        assert_eq!(cleaner().clean("ACME REF12345 XXXX1234"), "ACME");
    }

    #[test]
    fn drops_weekday_and_currency_tokens() {
        assert_eq!(cleaner().clean("CAFE NERO MON GBP"), "CAFE NERO");
    }

    #[test]
    fn wildcard_marker_splits_tokens() {
        assert_eq!(cleaner().clean("SQ*COFFEE CO"), "SQ COFFEE CO");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(cleaner().clean("  TESCO   STORES  "), "TESCO STORES");
    }

    #[test]
    fn falls_back_to_raw_when_all_tokens_are_noise() {
        // Every token is noise, so the raw text comes back verbatim rather
        // than an empty counter-party.
        assert_eq!(cleaner().clean("1234 14JAN23 GBP"), "1234 14JAN23 GBP");
        assert_eq!(cleaner().clean(""), "");
    }
}
