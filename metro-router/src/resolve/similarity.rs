//! Ratcliff/Obershelp string similarity.
//!
//! The score is `2 * M / T` where `T` is the combined length of both strings
//! and `M` the number of characters in matching blocks. Blocks are found by
//! taking the longest common substring and recursing on the pieces either
//! side of it.

/// Similarity of two strings in `[0, 1]`.
///
/// Two empty strings are identical (1.0). Comparison is by character and
/// case-sensitive.
///
/// # Examples
///
/// ```
/// use metro_router::resolve::similarity;
///
/// assert_eq!(similarity("abcd", "bcde"), 0.75);
/// assert_eq!(similarity("abc", "xyz"), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Total size of all matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;

        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest common run in `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Returns `(i, j, size)`. Among equally long runs the one starting earliest
/// in `a`, then earliest in `b`, wins.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    // run[j + 1] holds the length of the match ending at (i - 1, j).
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            curr[slot] = if a[i] == b[j] { prev[slot - 1] + 1 } else { 0 };

            let k = curr[slot];
            if k > best_size {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_size = k;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings() {
        assert_eq!(similarity("Majestic", "Majestic"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn partial_overlap() {
        assert_eq!(similarity("abcd", "bcde"), 0.75);
        // Matching blocks "a" and "c": 2 * 2 / 6.
        assert!((similarity("abc", "axc") - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn recursion_finds_blocks_either_side() {
        // "Indiranagar" vs "Indranagar": blocks "Ind" and "ranagar" (10 chars).
        let score = similarity("Indiranagar", "Indranagar");
        assert!((score - 20.0 / 21.0).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn longest_match_prefers_earliest() {
        let a: Vec<char> = "abab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(longest_match(&a, &b, 0, 4, 0, 2), (0, 0, 2));
    }

    #[test]
    fn case_sensitive() {
        assert!(similarity("MAJESTIC", "majestic") < 0.5);
    }

    #[test]
    fn typo_scores_above_half() {
        assert!(similarity("Majestik", "Majestic") > 0.8);
        assert!(similarity("Cubon Park", "Cubbon Park") > 0.9);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Score stays within [0, 1]
        #[test]
        fn bounded(a in "[a-e]{0,12}", b in "[a-e]{0,12}") {
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }

        /// A string is fully similar to itself
        #[test]
        fn reflexive(a in "[a-zA-Z ]{0,16}") {
            prop_assert_eq!(similarity(&a, &a), 1.0);
        }
    }
}
