//! "Did you mean …?" suggestions for mistyped city, month and day names.
//!
//! Similarity is the Ratcliff/Obershelp ratio `2·M / (|a| + |b|)`, where `M`
//! counts the characters in the matching blocks found by repeatedly taking
//! the longest common substring and recursing on both sides of it.

/// Minimum ratio for a candidate to be offered.
pub const CUTOFF: f64 = 0.6;

/// Return the candidate most similar to `value`, if any reaches [`CUTOFF`].
///
/// Equal scores keep the earlier candidate, so the result depends only on
/// `value` and the order of `candidates`.
pub fn suggest(value: &str, candidates: &[&str]) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let mut best: Option<(f64, &str)> = None;
    for &candidate in candidates {
        let score = ratio(value, candidate);
        if score < CUTOFF {
            continue;
        }
        match best {
            Some((best_score, _)) if score <= best_score => {}
            _ => best = Some((score, candidate)),
        }
    }

    log::debug!("suggest({value:?}) -> {best:?}");
    best.map(|(_, s)| s.to_string())
}

/// Similarity of two strings in `[0, 1]`; `1.0` means identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

/// Sum of the matching block sizes between `a` and `b`.
fn matched_chars(a: &[char], b: &[char]) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }
    total
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`, returned as
/// `(start_in_a, start_in_b, len)`.  The earliest match wins ties.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // run[j - blo + 1] = length of the common run ending at a[i], b[j]
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut curr = vec![0usize; width];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                curr[slot] = k;
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            } else {
                curr[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: [&str; 3] = ["chicago", "new york city", "washington"];
    const DAYS: [&str; 7] = [
        "sunday",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
    ];

    #[test]
    fn ratio_bounds() {
        assert_eq!(ratio("chicago", "chicago"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
        // "abcd" vs "bcde": one block "bcd" → 2*3/8
        assert!((ratio("abcd", "bcde") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn recurses_on_both_sides_of_the_longest_block() {
        // blocks "chic" and "go": 2*6/13
        assert!((ratio("chicgo", "chicago") - 12.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn typo_suggestions() {
        assert_eq!(suggest("chicgo", &CITIES), Some("chicago".into()));
        assert_eq!(suggest("new york", &CITIES), Some("new york city".into()));
        assert_eq!(suggest("washingon", &CITIES), Some("washington".into()));
        assert_eq!(suggest("mon", &DAYS), Some("monday".into()));
    }

    #[test]
    fn nothing_close_enough() {
        assert_eq!(suggest("boston", &CITIES), None);
        assert_eq!(suggest("", &CITIES), None);
        assert_eq!(suggest("chicago", &[]), None);
    }

    #[test]
    fn ties_keep_the_earlier_candidate() {
        assert_eq!(suggest("abc", &["abd", "abe"]), Some("abd".into()));
        assert_eq!(suggest("abc", &["abe", "abd"]), Some("abe".into()));
    }

    #[test]
    fn deterministic() {
        let first = suggest("thurday", &DAYS);
        for _ in 0..10 {
            assert_eq!(suggest("thurday", &DAYS), first);
        }
        assert_eq!(first, Some("thursday".into()));
    }
}
