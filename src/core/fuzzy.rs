use crate::core::edit_distance::bounded_levenshtein_chars;
use crate::core::normalize::normalize;

/// Queries shorter than this only match by containment
pub const MIN_FUZZY_QUERY_LEN: usize = 4;

/// Haystack tokens shorter than this are never fuzzy-compared
pub const MIN_TOKEN_LEN: usize = 3;

/// Queries at least this long tolerate two edits instead of one
pub const LONG_QUERY_LEN: usize = 7;

/// Edit budget for a folded query of `query_len` characters
#[inline]
pub fn max_distance_for(query_len: usize) -> usize {
    if query_len >= LONG_QUERY_LEN {
        2
    } else {
        1
    }
}

/// Split folded text into alphanumeric tokens
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

/// A free-text query folded once and reused across every record of a pass
#[derive(Debug, Clone)]
pub struct FuzzyQuery {
    folded: String,
    chars: Vec<char>,
    max_dist: usize,
}

impl FuzzyQuery {
    pub fn new(query: &str) -> Self {
        let folded = normalize(query).trim().to_string();
        let chars: Vec<char> = folded.chars().collect();
        let max_dist = max_distance_for(chars.len());

        Self {
            folded,
            chars,
            max_dist,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Cheap path: folded substring containment
    #[inline]
    pub fn contained_in(&self, folded_haystack: &str) -> bool {
        folded_haystack.contains(self.folded.as_str())
    }

    /// Typo-tolerant path: some token lies within the edit budget
    pub fn near_token_in(&self, folded_haystack: &str) -> bool {
        if self.chars.len() < MIN_FUZZY_QUERY_LEN {
            return false;
        }

        let mut token_chars: Vec<char> = Vec::new();
        tokens(folded_haystack).any(|token| {
            token_chars.clear();
            token_chars.extend(token.chars());

            if token_chars.len() < MIN_TOKEN_LEN
                || token_chars.len().abs_diff(self.chars.len()) > self.max_dist
            {
                return false;
            }

            bounded_levenshtein_chars(&self.chars, &token_chars, self.max_dist) <= self.max_dist
        })
    }

    /// Full matching policy against an already folded haystack
    pub fn matches_folded(&self, folded_haystack: &str) -> bool {
        self.is_empty() || self.contained_in(folded_haystack) || self.near_token_in(folded_haystack)
    }
}

/// Whether `query` plausibly matches `haystack`
///
/// Empty queries match everything. Otherwise the folded query must be a
/// substring of the folded haystack, or, for queries of four or more
/// characters, lie within one edit (two for seven or more characters) of a
/// haystack token.
pub fn matches(query: &str, haystack: &str) -> bool {
    let query = FuzzyQuery::new(query);
    if query.is_empty() {
        return true;
    }
    query.matches_folded(&normalize(haystack))
}
