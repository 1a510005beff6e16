use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for accent- and case-insensitive comparison
///
/// Lower-cases, decomposes to NFD and drops combining marks, so `"José"` and
/// `"jose"` fold to the same string. Folding a folded string is a no-op.
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();

    // ASCII never carries combining marks
    if lower.is_ascii() {
        return lower;
    }

    lower.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// [`normalize`] for optional input; absent text folds to the empty string
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
