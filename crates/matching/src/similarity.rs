//! Similarity scoring
//!
//! [`SequenceRatio`] implements the Ratcliff/Obershelp ratio: twice the
//! number of matching characters over the total length, where matches are
//! counted by recursively taking the longest common block and matching the
//! pieces on either side of it.

/// Pluggable similarity scorer over two strings
///
/// Implementations return a score in `[0.0, 1.0]`, where `1.0` means
/// identical.
pub trait Similarity {
    /// Score the similarity of `a` and `b`
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Ratcliff/Obershelp character-sequence ratio
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl Similarity for SequenceRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * matching_chars(&a, &b) as f64 / total as f64
    }
}

/// Count matching characters by recursive longest-common-block
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (start_a, start_b, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..start_a], &b[..start_b])
        + matching_chars(&a[start_a + len..], &b[start_b + len..])
}

/// Find the longest common contiguous block of `a` and `b`
///
/// Returns `(start_a, start_b, len)`; ties keep the first block found.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                row[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = row;
    }

    best
}
