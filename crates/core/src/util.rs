/// Parses a `[Section Name]` block header from the flat store files.
/// Names may contain word characters and spaces; anything else is not a
/// header and the line falls through to entry parsing.
pub(crate) fn section_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == ' ');
    valid.then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_spaced_names() {
        assert_eq!(section_header("[Groceries]"), Some("Groceries"));
        assert_eq!(section_header("[Eating Out]"), Some("Eating Out"));
    }

    #[test]
    fn rejects_non_headers() {
        assert_eq!(section_header("CARD_PAYMENT#Tesco"), None);
        assert_eq!(section_header("[]"), None);
        assert_eq!(section_header("[Bad/Name]"), None);
        assert_eq!(section_header(""), None);
    }
}
