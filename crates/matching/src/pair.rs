//! Best-match pairing across two listing lists

use crate::similarity::Similarity;

/// One primary item with its best secondary match, if any scored above the
/// threshold
#[derive(Debug)]
pub struct Pairing<'a, P, S> {
    /// The primary item; every primary appears in exactly one pairing
    pub primary: &'a P,

    /// Best-scoring secondary item, `None` when nothing cleared the
    /// threshold
    pub secondary: Option<&'a S>,

    /// Score of the best candidate, `0.0` when there were none
    pub score: f64,
}

/// Pair every primary item with its best-scoring secondary item
///
/// Keys are extracted once per item; candidates must score *strictly*
/// above `threshold` to pair. Ties keep the first candidate in list
/// order. Secondary items may pair with multiple primaries; primaries
/// with no qualifying candidate come back with `secondary: None` so the
/// caller never loses a listing to a failed match.
pub fn pair<'a, P, S>(
    primary: &'a [P],
    secondary: &'a [S],
    primary_key: impl Fn(&P) -> String,
    secondary_key: impl Fn(&S) -> String,
    scorer: &dyn Similarity,
    threshold: f64,
) -> Vec<Pairing<'a, P, S>> {
    let secondary_keys: Vec<String> = secondary.iter().map(|item| secondary_key(item)).collect();

    primary
        .iter()
        .map(|item| {
            let key = primary_key(item);

            let mut best: Option<(usize, f64)> = None;
            for (idx, candidate) in secondary_keys.iter().enumerate() {
                let score = scorer.score(&key, candidate);
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((idx, score));
                }
            }

            match best {
                Some((idx, score)) if score > threshold => Pairing {
                    primary: item,
                    secondary: Some(&secondary[idx]),
                    score,
                },
                Some((_, score)) => Pairing {
                    primary: item,
                    secondary: None,
                    score,
                },
                None => Pairing {
                    primary: item,
                    secondary: None,
                    score: 0.0,
                },
            }
        })
        .collect()
}
