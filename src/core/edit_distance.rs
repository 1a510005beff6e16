/// Bounded Levenshtein distance
///
/// Returns the exact distance when it is `<= max_dist`, otherwise some value
/// strictly greater than `max_dist`. Unit costs, no transpositions.
pub fn bounded_levenshtein(a: &str, b: &str, max_dist: usize) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    bounded_levenshtein_chars(&a, &b, max_dist)
}

/// Whether `a` and `b` are within `max_dist` edits of each other
#[inline]
pub fn within_distance(a: &str, b: &str, max_dist: usize) -> bool {
    bounded_levenshtein(a, b, max_dist) <= max_dist
}

/// [`bounded_levenshtein`] over pre-split characters
pub fn bounded_levenshtein_chars(a: &[char], b: &[char], max_dist: usize) -> usize {
    let over = max_dist.saturating_add(1);

    // Rows are sized by the shorter input
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    // Length gap is a lower bound on the distance
    if long.len() - short.len() > max_dist {
        return over;
    }
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for (j, &sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
            row_min = row_min.min(curr[j + 1]);
        }

        // Row minima never decrease, so the final cell cannot come back under budget
        if row_min > max_dist {
            return over;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full_levenshtein(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
        for (i, row) in dp.iter_mut().enumerate() {
            row[0] = i;
        }
        for j in 0..=b.len() {
            dp[0][j] = j;
        }
        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let cost = usize::from(a[i - 1] != b[j - 1]);
                dp[i][j] = (dp[i - 1][j] + 1)
                    .min(dp[i][j - 1] + 1)
                    .min(dp[i - 1][j - 1] + cost);
            }
        }
        dp[a.len()][b.len()]
    }

    #[test]
    fn test_identical() {
        assert_eq!(bounded_levenshtein("sushi", "sushi", 0), 0);
    }

    #[test]
    fn test_single_edits() {
        assert_eq!(bounded_levenshtein("sushy", "sushi", 1), 1);
        assert_eq!(bounded_levenshtein("tasca", "tasc", 1), 1);
        assert_eq!(bounded_levenshtein("tasca", "ttasca", 1), 1);
    }

    #[test]
    fn test_length_gap_exits_early() {
        assert!(bounded_levenshtein("a", "abcdef", 2) > 2);
    }

    #[test]
    fn test_row_minimum_exits_early() {
        assert!(bounded_levenshtein("abcdef", "uvwxyz", 2) > 2);
    }

    #[test]
    fn test_no_transposition() {
        // A swap costs two substitutions
        assert_eq!(bounded_levenshtein("ab", "ba", 2), 2);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(bounded_levenshtein("", "", 0), 0);
        assert_eq!(bounded_levenshtein("", "ab", 2), 2);
        assert!(!within_distance("", "abc", 2));
    }

    #[test]
    fn test_unicode_chars_count_once() {
        assert_eq!(bounded_levenshtein("cafe", "café", 1), 1);
    }

    proptest! {
        #[test]
        fn bounded_agrees_with_full(a in "[abc]{0,8}", b in "[abc]{0,8}", max in 0usize..5) {
            let full = full_levenshtein(&a, &b);
            let bounded = bounded_levenshtein(&a, &b, max);

            prop_assert_eq!(bounded <= max, full <= max);
            if full <= max {
                prop_assert_eq!(bounded, full);
            }
        }
    }
}
