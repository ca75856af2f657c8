//! State frequencies.

use crate::Error;

use super::CharacterMatrix;

/// Pseudocount added to every state count.
const PSEUDOCOUNT: f64 = 1e-3;

/// Number of pseudocounts added to the normalising constant.
const PSEUDOCOUNT_WEIGHT: f64 = 20.0;

/// Observed state frequencies of each taxon.
///
/// For each included taxon, every state starts with a small pseudocount. Each included character
/// that is not a gap then adds a total weight of one, divided uniformly over the possible states
/// for an ambiguous state, or over all states for a missing state. Counts are normalised by the
/// number of non-gap characters.
#[derive(Clone, Debug, PartialEq)]
pub struct StateFrequencies {
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl StateFrequencies {
    /// Calculates the state frequencies of each included taxon of a matrix.
    pub fn from_matrix(matrix: &CharacterMatrix) -> Self {
        let num_states = matrix.num_states();
        let characters = matrix.included_characters().collect::<Vec<_>>();

        let (names, values) = matrix
            .included_rows()
            .map(|row| {
                let mut counts = vec![PSEUDOCOUNT; num_states];
                let mut non_gap = 0.0;

                for state in characters.iter().map(|&i| &row[i]) {
                    if state.is_missing() {
                        non_gap += 1.0;
                        counts.iter_mut().for_each(|x| *x += 1.0 / num_states as f64);
                    } else if !state.is_gap() {
                        non_gap += 1.0;
                        let observed = state.num_observed_states() as f64;
                        state.iter_states().for_each(|k| counts[k] += 1.0 / observed);
                    }
                }

                let total = non_gap + PSEUDOCOUNT_WEIGHT * PSEUDOCOUNT;
                counts.iter_mut().for_each(|x| *x /= total);

                (row.name().to_string(), counts)
            })
            .unzip();

        Self { names, values }
    }

    /// Returns the taxon names, in the order of the rows.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the state frequencies of each taxon.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Returns the state frequencies of each taxon.
    pub fn into_values(self) -> Vec<Vec<f64>> {
        self.values
    }
}

/// Empirical state frequencies pooled over taxa.
///
/// Only states that are resolved, and neither missing nor a gap, are counted.
#[derive(Clone, Debug, PartialEq)]
pub struct EmpiricalFrequencies(pub Vec<f64>);

impl EmpiricalFrequencies {
    /// Calculates the empirical state frequencies over included taxa and characters of a matrix.
    pub fn from_matrix(matrix: &CharacterMatrix) -> Result<Self, Error> {
        let mut counts = vec![0usize; matrix.num_states()];

        for row in matrix.included_rows() {
            for i in matrix.included_characters() {
                let state = &row[i];
                if state.is_missing() || state.is_gap() {
                    continue;
                }
                if let Some(k) = state.state_index() {
                    counts[k] += 1;
                }
            }
        }

        let total = counts.iter().sum::<usize>();
        if total == 0 {
            return Err(Error::NoObservations);
        }

        Ok(Self(
            counts
                .into_iter()
                .map(|count| count as f64 / total as f64)
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        matrix::tests::{dna, matrix},
        DataType,
    };

    #[test]
    fn test_state_frequencies_resolved() {
        let m = dna(&[("a", "AACG")]);
        let freqs = StateFrequencies::from_matrix(&m);

        let total = 4.0 + 20.0 * 1e-3;
        let expected = vec![
            (2.0 + 1e-3) / total,
            (1.0 + 1e-3) / total,
            (1.0 + 1e-3) / total,
            1e-3 / total,
        ];

        assert_eq!(freqs.names(), &[String::from("a")]);
        assert_approx_eq!(freqs.values()[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_state_frequencies_ambiguous_missing_and_gaps() {
        let m = dna(&[("a", "R?-")]);
        let freqs = StateFrequencies::from_matrix(&m).into_values();

        let total = 2.0 + 20.0 * 1e-3;
        let expected = vec![
            (0.5 + 0.25 + 1e-3) / total,
            (0.25 + 1e-3) / total,
            (0.5 + 0.25 + 1e-3) / total,
            (0.25 + 1e-3) / total,
        ];

        assert_approx_eq!(freqs[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_state_frequencies_with_masks() {
        let mut m = dna(&[("a", "AC"), ("b", "GG")]);
        m.exclude_taxon(0).unwrap();
        m.exclude_character(1).unwrap();
        let freqs = StateFrequencies::from_matrix(&m);

        let total = 1.0 + 20.0 * 1e-3;
        let expected = vec![1e-3 / total, 1e-3 / total, 1.001 / total, 1e-3 / total];

        assert_eq!(freqs.names(), &[String::from("b")]);
        assert_approx_eq!(freqs.values()[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_empirical_frequencies() {
        let m = dna(&[("a", "AACR"), ("b", "A?-T")]);
        let freqs = EmpiricalFrequencies::from_matrix(&m).unwrap();

        assert_approx_eq!(freqs.0, vec![0.6, 0.2, 0.0, 0.2], epsilon = 1e-12);
    }

    #[test]
    fn test_empirical_frequencies_standard() {
        let m = matrix(DataType::Standard(3), &[("a", "0012"), ("b", "2?22")]);
        let freqs = m.empirical_base_frequencies().unwrap();

        assert_approx_eq!(freqs, vec![2. / 7., 1. / 7., 4. / 7.], epsilon = 1e-12);
    }

    #[test]
    fn test_empirical_frequencies_no_observations() {
        let m = dna(&[("a", "?-N")]);
        assert_eq!(
            EmpiricalFrequencies::from_matrix(&m),
            Err(Error::NoObservations)
        );
    }
}
