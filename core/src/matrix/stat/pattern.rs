//! Site pattern statistics.

use indexmap::IndexMap;

use crate::Bitset;

use super::{column, CharacterMatrix};

/// The multinomial profile likelihood of the site patterns.
///
/// The pattern of a site is the string of the states of the included taxa at the site. With `c`
/// the number of included characters sharing each pattern and `L` the number of included
/// characters, this is `Σ c ln c + L ln L`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ProfileLikelihood(pub f64);

impl ProfileLikelihood {
    /// Calculates the multinomial profile likelihood of the included characters of a matrix.
    pub fn from_matrix(matrix: &CharacterMatrix) -> Self {
        let counts = site_patterns(matrix);

        let sites = counts.values().sum::<usize>() as f64;
        let patterns = counts
            .values()
            .map(|&c| c as f64)
            .map(|c| c * c.ln())
            .sum::<f64>();

        if sites > 0.0 {
            Self(patterns + sites * sites.ln())
        } else {
            Self(0.0)
        }
    }
}

/// Returns the count of each distinct site pattern over the included characters of a matrix.
///
/// Patterns are in order of first occurrence.
pub fn site_patterns(matrix: &CharacterMatrix) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();

    for i in matrix.included_characters() {
        let pattern = column(matrix, i)
            .into_iter()
            .map(|s| s.string_value())
            .collect::<String>();

        *counts.entry(pattern).or_insert(0) += 1;
    }

    counts
}

/// The highest state index observed among included characters.
///
/// Missing states do not count as observed. If no state is observed, this is zero.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct MaxObservedStateIndex(pub usize);

impl MaxObservedStateIndex {
    /// Calculates the highest state index observed in the included part of a matrix.
    pub fn from_matrix(matrix: &CharacterMatrix) -> Self {
        let mut observed = Bitset::new(matrix.num_states());

        for row in matrix.included_rows() {
            for i in matrix.included_characters() {
                let state = &row[i];
                if !state.is_missing() {
                    observed.or_assign(state.bits());
                }
            }
        }

        Self(observed.last().unwrap_or(0))
    }
}
