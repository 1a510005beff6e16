use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const COMBINING_TILDE: char = '\u{0303}';

/// Sort key under Spanish collation
///
/// Levels, compared in order: base letters (ñ is its own letter between n and
/// o), accents, case (lowercase first), then raw code points so the order is
/// total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
    raw: String,
}

#[inline]
fn primary_weight(c: char) -> u32 {
    (c as u32) * 2
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let mut primary = Vec::with_capacity(text.len());
        let mut secondary = Vec::with_capacity(text.len());
        let mut tertiary = Vec::with_capacity(text.len());
        let n_weight = primary_weight('n');

        for c in text.nfd() {
            if is_combining_mark(c) {
                let Some(last) = primary.last_mut() else {
                    continue;
                };
                if c == COMBINING_TILDE && *last == n_weight {
                    *last = n_weight + 1;
                } else if let Some(accent) = secondary.last_mut() {
                    if *accent == 0 {
                        *accent = c as u32;
                    }
                }
                continue;
            }

            for lower in c.to_lowercase() {
                primary.push(primary_weight(lower));
                secondary.push(0);
            }
            tertiary.push(u8::from(c.is_uppercase()));
        }

        Self {
            primary,
            secondary,
            tertiary,
            raw: text.to_string(),
        }
    }
}

/// Compare two strings the way a Spanish reader expects them ordered
///
/// `"Árbol"` sorts before `"Azul"` and `"ñoquis"` after `"nuez"`.
pub fn spanish_cmp(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}
