//! Pairwise sequence differences.

use std::fmt;

use crate::Error;

use super::{is_uncertain, CharacterMatrix};

/// Pairwise sequence differences between taxa.
///
/// The difference between two taxa is the number of included characters where their states differ.
/// When missing data is excluded, characters where either state is missing or ambiguous are not
/// counted. The matrix is symmetric with a zero diagonal.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    names: Vec<String>,
    values: Vec<usize>,
}

impl DistanceMatrix {
    /// Calculates pairwise sequence differences between the included taxa of a matrix.
    ///
    /// At least two included taxa are required.
    pub fn from_matrix(matrix: &CharacterMatrix, exclude_missing: bool) -> Result<Self, Error> {
        let n = matrix.num_included_taxa();
        if n < 2 {
            return Err(Error::TooFewTaxa {
                required: 2,
                found: n,
            });
        }

        Ok(Self::from_matrix_unchecked(matrix, exclude_missing))
    }

    fn from_matrix_unchecked(matrix: &CharacterMatrix, exclude_missing: bool) -> Self {
        let rows = matrix.included_rows().collect::<Vec<_>>();
        let characters = matrix.included_characters().collect::<Vec<_>>();

        let n = rows.len();
        let mut values = vec![0; n * n];

        for i in 0..n {
            for j in i + 1..n {
                let difference = characters
                    .iter()
                    .map(|&k| (&rows[i][k], &rows[j][k]))
                    .filter(|(a, b)| !(exclude_missing && (is_uncertain(a) || is_uncertain(b))))
                    .filter(|(a, b)| a != b)
                    .count();

                values[i * n + j] = difference;
                values[j * n + i] = difference;
            }
        }

        Self {
            names: rows.iter().map(|row| row.name().to_string()).collect(),
            values,
        }
    }

    /// Returns the number of taxa.
    pub fn dimension(&self) -> usize {
        self.names.len()
    }

    /// Returns the taxon names, in the order of the rows and columns of the matrix.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the difference between the taxa at the provided indices.
    pub fn get(&self, i: usize, j: usize) -> Option<usize> {
        let n = self.dimension();
        (i < n && j < n).then(|| self.values[i * n + j])
    }

    /// Returns an iterator over the differences of all unordered pairs of distinct taxa.
    pub fn iter_pairs(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.dimension();
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| self.values[i * n + j]))
    }

    /// Returns the mean difference over all unordered pairs of distinct taxa.
    pub fn mean(&self) -> f64 {
        let n = self.dimension() as f64;
        let sum = self.iter_pairs().sum::<usize>() as f64;

        sum * 2.0 / (n * (n - 1.0))
    }

    /// Returns the largest difference between any two distinct taxa.
    pub fn max(&self) -> usize {
        self.iter_pairs().max().unwrap_or(0)
    }

    /// Returns the smallest difference between any two distinct taxa.
    pub fn min(&self) -> usize {
        self.iter_pairs().min().unwrap_or(0)
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.dimension();

        for (i, name) in self.names.iter().enumerate() {
            write!(f, "{name}")?;
            for value in &self.values[i * n..(i + 1) * n] {
                write!(f, "\t{value}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::matrix::tests::dna;

    #[test]
    fn test_two_taxa() {
        let m = dna(&[("a", "ACGTA"), ("b", "ACCTT")]);
        let d = DistanceMatrix::from_matrix(&m, false).unwrap();

        assert_eq!(d.get(0, 1), Some(2));
        assert_eq!(d.mean(), 2.0);
        assert_eq!(d.max(), 2);
        assert_eq!(d.min(), 2);
    }

    #[test]
    fn test_symmetric_with_zero_diagonal() {
        let m = dna(&[("a", "ACGTA"), ("b", "ACCTT"), ("c", "TTTTT"), ("d", "A-G?A")]);
        let d = DistanceMatrix::from_matrix(&m, false).unwrap();

        for i in 0..4 {
            assert_eq!(d.get(i, i), Some(0));
            for j in 0..4 {
                assert_eq!(d.get(i, j), d.get(j, i));
            }
        }
        assert_eq!(d.get(4, 0), None);
    }

    #[test]
    fn test_mean_max_min() {
        let m = dna(&[("a", "AAAA"), ("b", "AAAC"), ("c", "CCCC")]);
        let d = DistanceMatrix::from_matrix(&m, false).unwrap();

        assert_eq!(d.iter_pairs().collect::<Vec<_>>(), vec![1, 4, 3]);
        assert_approx_eq!(d.mean(), 8. / 3., epsilon = 1e-12);
        assert_eq!(d.max(), 4);
        assert_eq!(d.min(), 1);
    }

    #[test]
    fn test_exclude_missing() {
        let m = dna(&[("a", "ACGT"), ("b", "A?RC")]);

        assert_eq!(DistanceMatrix::from_matrix(&m, false).unwrap().max(), 3);
        assert_eq!(DistanceMatrix::from_matrix(&m, true).unwrap().max(), 1);
    }

    #[test]
    fn test_masks() {
        let mut m = dna(&[("a", "ACGT"), ("b", "TTTT"), ("c", "ACGA")]);
        m.exclude_taxon(1).unwrap();
        m.exclude_character(3).unwrap();
        let d = DistanceMatrix::from_matrix(&m, false).unwrap();

        assert_eq!(d.names(), &[String::from("a"), String::from("c")]);
        assert_eq!(d.max(), 0);
    }

    #[test]
    fn test_too_few_taxa() {
        let mut m = dna(&[("a", "ACGT"), ("b", "TTTT")]);
        m.exclude_taxon(0).unwrap();

        assert_eq!(
            DistanceMatrix::from_matrix(&m, false),
            Err(Error::TooFewTaxa {
                required: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_display() {
        let m = dna(&[("a", "AC"), ("b", "GC")]);
        let d = DistanceMatrix::from_matrix(&m, false).unwrap();

        assert_eq!(d.to_string(), "a\t0\t1\nb\t1\t0\n");
    }
}
