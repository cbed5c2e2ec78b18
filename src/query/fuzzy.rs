//! Fuzzy query implementation for approximate string matching.

use serde::Serialize;

use crate::query::Boost;

/// Terms within `fuzziness` edits of `term`.
///
/// The first `prefix_length` characters must match exactly. Edits are
/// counted Damerau-Levenshtein style: a transposition is one edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyQuery {
    field: String,
    term: String,
    /// Maximum edit distance
    fuzziness: u32,
    /// Minimum prefix length that must match exactly
    prefix_length: u32,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl FuzzyQuery {
    /// A fuzzy query with the engine's default edit distance of 2.
    pub fn new<F: Into<String>, T: Into<String>>(field: F, term: T) -> Self {
        FuzzyQuery {
            field: field.into(),
            term: term.into(),
            fuzziness: 2,
            prefix_length: 0,
            boost: Boost::UNSET,
        }
    }

    /// Set the maximum edit distance.
    pub fn with_fuzziness(mut self, fuzziness: u32) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    /// Set the minimum prefix length that must match exactly.
    pub fn with_prefix_length(mut self, prefix_length: u32) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn fuzziness(&self) -> u32 {
        self.fuzziness
    }

    pub fn prefix_length(&self) -> u32 {
        self.prefix_length
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    /// Whether `candidate` is close enough to the query term.
    pub fn matches(&self, candidate: &str) -> bool {
        let prefix_length = self.prefix_length as usize;
        let term: Vec<char> = self.term.chars().collect();
        let candidate: Vec<char> = candidate.chars().collect();

        if term.len().min(prefix_length) > candidate.len()
            || term.iter().take(prefix_length).ne(candidate.iter().take(prefix_length))
        {
            return false;
        }
        let skip = prefix_length.min(term.len());
        edit_distance(&term[skip..], &candidate[skip.min(candidate.len())..]) <= self.fuzziness as usize
    }

    pub(crate) fn description(&self) -> String {
        format!("{}:{}~{}{}", self.field, self.term, self.fuzziness, self.boost.suffix())
    }
}

/// Optimal string alignment distance.
fn edit_distance(a: &[char], b: &[char]) -> usize {
    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        matrix[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(matrix[i - 2][j - 2] + 1);
            }
            matrix[i][j] = best;
        }
    }
    matrix[a.len()][b.len()]
}
