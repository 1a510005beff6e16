/// Separator the catalog data uses between cuisine tags (`•`)
///
/// Commas are not separators: names such as `"Creativa, de autor"` are a
/// single tag.
pub const CUISINE_DELIMITER: char = '\u{2022}';

/// Splits a delimiter-encoded tag string into trimmed, non-empty tags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagParser {
    delimiter: char,
}

impl TagParser {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Tags in source order. Empty input yields no tags.
    pub fn parse(&self, raw: &str) -> Vec<String> {
        raw.split(self.delimiter)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for TagParser {
    fn default() -> Self {
        Self::new(CUISINE_DELIMITER)
    }
}

/// Parse cuisine tags with the catalog's default delimiter
pub fn parse_tags(raw: &str) -> Vec<String> {
    TagParser::default().parse(raw)
}
