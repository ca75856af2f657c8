//! GC content.

use crate::{CharacterState, DataType, Error};

use super::{is_uncertain, CharacterMatrix};

const C: usize = 1;
const G: usize = 2;

/// The proportion of G and C nucleotides of each taxon.
///
/// For each included taxon, the proportion is calculated over included characters that are
/// counted: by default all characters, including gaps, or only those that are neither missing nor
/// ambiguous when ambiguous characters are excluded. Taxa with no counted characters are skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct GcContent {
    values: Vec<f64>,
}

impl GcContent {
    /// Calculates the GC content of each included taxon of a nucleotide matrix.
    pub fn from_matrix(matrix: &CharacterMatrix, exclude_ambiguous: bool) -> Result<Self, Error> {
        Self::from_characters(matrix, matrix.included_characters(), exclude_ambiguous)
    }

    /// Calculates the GC content of each included taxon of a nucleotide matrix at a codon position.
    ///
    /// Only included characters at the codon position are counted, where the codon position
    /// `n` is one of 1, 2, or 3, and the first character of the matrix is at codon position 1.
    pub fn from_matrix_by_codon(
        matrix: &CharacterMatrix,
        position: usize,
        exclude_ambiguous: bool,
    ) -> Result<Self, Error> {
        if !(1..=3).contains(&position) {
            return Err(Error::InvalidCodonPosition(position));
        }

        Self::from_characters(
            matrix,
            matrix
                .included_characters()
                .filter(|i| i % 3 == position - 1),
            exclude_ambiguous,
        )
    }

    fn from_characters<I>(
        matrix: &CharacterMatrix,
        characters: I,
        exclude_ambiguous: bool,
    ) -> Result<Self, Error>
    where
        I: IntoIterator<Item = usize>,
    {
        if !matrix.data_type().is_nucleotide() {
            return Err(Error::TypeMismatch {
                expected: DataType::Dna,
                found: matrix.data_type(),
            });
        }

        let characters = characters.into_iter().collect::<Vec<_>>();

        let values = matrix
            .included_rows()
            .filter_map(|row| {
                let (counted, gc) = characters
                    .iter()
                    .map(|&i| &row[i])
                    .filter(|s| !(exclude_ambiguous && is_uncertain(s)))
                    .fold((0usize, 0usize), |(counted, gc), s| {
                        (counted + 1, gc + usize::from(is_gc(s)))
                    });

                (counted > 0).then(|| gc as f64 / counted as f64)
            })
            .collect::<Vec<_>>();

        if values.is_empty() {
            Err(Error::NoObservations)
        } else {
            Ok(Self { values })
        }
    }

    /// Returns the GC content of each taxon with counted characters.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the largest GC content.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Returns the smallest GC content.
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Returns the mean GC content.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Returns the population variance of the GC content.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();

        self.values
            .iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / self.values.len() as f64
    }
}

fn is_gc(state: &CharacterState) -> bool {
    !state.is_gap() && !state.is_missing() && matches!(state.state_index(), Some(C) | Some(G))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::matrix::tests::{dna, matrix};

    #[test]
    fn test_gc_content() {
        let m = dna(&[("a", "GCGC"), ("b", "ACGT"), ("c", "AATT")]);
        let gc = GcContent::from_matrix(&m, false).unwrap();

        assert_eq!(gc.values(), &[1.0, 0.5, 0.0]);
        assert_eq!(gc.max(), 1.0);
        assert_eq!(gc.min(), 0.0);
        assert_approx_eq!(gc.mean(), 0.5, epsilon = 1e-12);
        assert_approx_eq!(gc.variance(), 1. / 6., epsilon = 1e-12);
    }

    #[test]
    fn test_gc_content_ambiguous() {
        let m = dna(&[("a", "GS?-")]);

        let all = GcContent::from_matrix(&m, false).unwrap();
        assert_eq!(all.values(), &[0.25]);

        let resolved = GcContent::from_matrix(&m, true).unwrap();
        assert_eq!(resolved.values(), &[0.5]);
    }

    #[test]
    fn test_gc_content_rna() {
        let m = matrix(DataType::Rna, &[("a", "GCAU")]);
        assert_eq!(GcContent::from_matrix(&m, false).unwrap().mean(), 0.5);
    }

    #[test]
    fn test_gc_content_by_codon() {
        let m = dna(&[("a", "GAAGAT"), ("b", "ACGTCG")]);

        let first = GcContent::from_matrix_by_codon(&m, 1, false).unwrap();
        assert_eq!(first.values(), &[1.0, 0.0]);

        let third = GcContent::from_matrix_by_codon(&m, 3, false).unwrap();
        assert_eq!(third.values(), &[0.0, 1.0]);

        assert_eq!(
            GcContent::from_matrix_by_codon(&m, 0, false),
            Err(Error::InvalidCodonPosition(0))
        );
    }

    #[test]
    fn test_gc_content_by_codon_with_excluded_character() {
        let mut m = dna(&[("a", "GAAGAT"), ("b", "ACGTCG")]);
        m.exclude_character(0).unwrap();

        let first = GcContent::from_matrix_by_codon(&m, 1, false).unwrap();
        assert_eq!(first.values(), &[1.0, 0.0]);

        let second = GcContent::from_matrix_by_codon(&m, 2, false).unwrap();
        assert_eq!(second.values(), &[0.0, 0.5]);
    }

    #[test]
    fn test_gc_content_skips_taxa_without_counted_characters() {
        let m = dna(&[("a", "??"), ("b", "GA")]);
        assert_eq!(GcContent::from_matrix(&m, true).unwrap().values(), &[0.5]);

        let m = dna(&[("a", "??")]);
        assert_eq!(
            GcContent::from_matrix(&m, true),
            Err(Error::NoObservations)
        );
    }

    #[test]
    fn test_gc_content_type_mismatch() {
        let m = matrix(DataType::AminoAcid, &[("a", "GC")]);
        assert!(matches!(
            GcContent::from_matrix(&m, false),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_gc_content_delegating_methods() {
        let m = dna(&[("a", "GCGC"), ("b", "ACGT")]);

        assert_eq!(m.max_gc_content(false), Ok(1.0));
        assert_eq!(m.min_gc_content(false), Ok(0.5));
        assert_eq!(m.mean_gc_content(false), Ok(0.75));
        assert_approx_eq!(m.var_gc_content(false).unwrap(), 0.0625, epsilon = 1e-12);
        assert_eq!(m.mean_gc_content_by_codon(1, false), Ok(0.5));
    }
}
