//! String similarity for compartment-name matching.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default similarity floor for a fuzzy match.
pub const DEFAULT_CUTOFF: f64 = 0.8;

/// Similarity metric used to match free-text compartment names against GO labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Ratcliff/Obershelp ratio over longest matching blocks: `2·M / (|a| + |b|)`.
    #[default]
    MatchingBlocks,
    /// Jaro-Winkler (prefix-weighted). Scores shared stems like `cyto-` highly,
    /// so short names can match longer unrelated terms.
    JaroWinkler,
}

impl SimilarityMetric {
    /// Similarity in `[0, 1]`.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        match self {
            SimilarityMetric::JaroWinkler    => strsim::jaro_winkler(a, b),
            SimilarityMetric::MatchingBlocks => matching_blocks_ratio(a, b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::JaroWinkler    => "jaro_winkler",
            SimilarityMetric::MatchingBlocks => "matching_blocks",
        }
    }
}

impl FromStr for SimilarityMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jaro_winkler" | "jaro-winkler"       => Ok(SimilarityMetric::JaroWinkler),
            "matching_blocks" | "ratcliff_obershelp" => Ok(SimilarityMetric::MatchingBlocks),
            other => Err(format!("unknown similarity metric '{}'", other)),
        }
    }
}

/// Best candidate scoring at least `cutoff`, or `None`.
/// Ties go to the lexicographically larger candidate.
pub fn closest_match<'a, I>(word: &str, candidates: I, metric: SimilarityMetric, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut best: Option<(f64, &'a str)> = None;
    for candidate in candidates {
        let score = metric.score(word, candidate);
        if score < cutoff {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_score, best_name)) => {
                score > best_score || (score == best_score && candidate.as_str() > best_name)
            }
        };
        if better {
            best = Some((score, candidate.as_str()));
        }
    }
    best.map(|(_, name)| name)
}

/// Ratcliff/Obershelp similarity: find the longest common block, recurse on
/// the unmatched pieces either side, and score `2·matched / total length`.
pub fn matching_blocks_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

fn matched_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, k) = longest_block(a, b);
    if k == 0 {
        return 0;
    }
    k + matched_chars(&a[..i], &b[..j]) + matched_chars(&a[i + k..], &b[j + k..])
}

/// `(start_a, start_b, len)` of the longest common substring; earliest in `a`,
/// then earliest in `b`, on ties.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let mut cur = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                let k = prev[j] + 1;
                cur[j + 1] = k;
                if k > best.2 {
                    best = (i + 1 - k, j + 1 - k, k);
                }
            }
        }
        prev = cur;
    }
    best
}
