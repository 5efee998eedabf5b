//! Levenshtein edit distance with suffix tolerance.
//!
//! Besides the classic distance, [`levenshtein`] reports how much of the
//! candidate text is worth aligning against the pattern at all. A title such
//! as "Named Episode" should match "Named Episode - Keyword" without paying
//! for " - Keyword"; the suffix figures say where the alignment stopped
//! improving and what it cost up to that point.

/// Result of [`levenshtein`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levenshtein {
    /// Full edit distance between the pattern and the candidate.
    pub distance: usize,
    /// Byte length of the candidate prefix past which further characters
    /// only made the alignment worse.
    pub length_without_suffix: usize,
    /// Edit distance between the pattern and that prefix.
    pub distance_without_suffix: usize,
}

/// Compute the edit distance between `pattern` and `candidate`.
///
/// Rows of the table follow `pattern`, columns follow `candidate`; only two
/// rows are kept. In the final row, the last column whose cost is strictly
/// lower than the column before it marks the end of the useful prefix of
/// `candidate`.
///
/// # Examples
///
/// ```
/// use tvsort_matcher::distance::{levenshtein, Levenshtein};
///
/// assert_eq!(
///     levenshtein("test", "testing"),
///     Levenshtein { distance: 3, length_without_suffix: 4, distance_without_suffix: 0 }
/// );
/// ```
pub fn levenshtein(pattern: &str, candidate: &str) -> Levenshtein {
    let a: Vec<char> = pattern.chars().collect();
    let b: Vec<(usize, char)> = candidate.char_indices().collect();
    let n = b.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            let cost = usize::from(ca != b[j - 1].1);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let last = &prev;
    let mut cut = 0;
    for j in 1..=n {
        if last[j] < last[j - 1] {
            cut = j;
        }
    }

    Levenshtein {
        distance: last[n],
        length_without_suffix: b.get(cut).map_or(candidate.len(), |&(offset, _)| offset),
        distance_without_suffix: last[cut],
    }
}

/// Plain edit distance. Shorthand for `levenshtein(a, b).distance`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b).distance
}
