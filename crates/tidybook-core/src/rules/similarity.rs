use crate::error::CoreError;
use serde::Serialize;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Ratio above which two full names count as similar. Raise it if too many
/// names are flagged, lower it if real near-duplicates slip through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimilarityThreshold(f64);

impl SimilarityThreshold {
    pub fn new(value: f64) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::InvalidSimilarityThreshold(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_exceeded_by(self, ratio: f64) -> bool {
        ratio > self.0
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        Self(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameComparison {
    pub exact: bool,
    pub ratio: f64,
}

impl NameComparison {
    pub fn is_fuzzy_match(&self, threshold: SimilarityThreshold) -> bool {
        !self.exact && threshold.is_exceeded_by(self.ratio)
    }
}

pub fn names_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Sequence-matching similarity of the lower-cased inputs: twice the number of
/// characters in the matching blocks, over the combined length. Blocks are
/// found by taking the longest common run and recursing on both sides of it.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    key_ratio(&a.to_lowercase(), &b.to_lowercase())
}

/// Same ratio as [`similarity_ratio`] over keys that are already lower-cased.
pub fn key_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

pub fn are_names_similar(a: &str, b: &str, threshold: SimilarityThreshold) -> bool {
    threshold.is_exceeded_by(similarity_ratio(a, b))
}

pub fn compare_names(a: &str, b: &str) -> NameComparison {
    compare_name_keys(&a.to_lowercase(), &b.to_lowercase())
}

/// Compares lower-cased name keys; the ratio is only computed when they differ.
pub fn compare_name_keys(a: &str, b: &str) -> NameComparison {
    if a == b {
        return NameComparison {
            exact: true,
            ratio: 1.0,
        };
    }
    NameComparison {
        exact: false,
        ratio: key_ratio(a, b),
    }
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            let len = curr[j + 1];
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}
