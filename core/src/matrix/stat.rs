//! Summary statistics of character matrices.
//!
//! All statistics are calculated over included taxa and included characters only.

use crate::{CharacterState, Error};

use super::CharacterMatrix;

pub mod distance;
pub use distance::DistanceMatrix;

pub mod frequencies;
pub use frequencies::{EmpiricalFrequencies, StateFrequencies};

pub mod gc;
pub use gc::GcContent;

pub mod pattern;
pub use pattern::{MaxObservedStateIndex, ProfileLikelihood};

pub mod sites;
pub use sites::{InvariantSites, SegregatingSites, SiteBlocks};

/// Returns `true` if the state is missing or ambiguous.
fn is_uncertain(state: &CharacterState) -> bool {
    state.is_missing() || state.is_ambiguous()
}

/// Returns the states of the included taxa at a character.
fn column(matrix: &CharacterMatrix, character: usize) -> Vec<&CharacterState> {
    matrix.included_rows().map(|row| &row[character]).collect()
}

/// Returns `true` if all states are equal to a baseline state.
///
/// The baseline is the first state. If `exclude_missing` is set, the baseline is instead the first
/// state that is neither missing nor ambiguous, and missing or ambiguous states are not compared.
/// Characters with no states to compare are invariant.
fn is_invariant(states: &[&CharacterState], exclude_missing: bool) -> bool {
    let baseline = if exclude_missing {
        states.iter().find(|s| !is_uncertain(s))
    } else {
        states.first()
    };

    match baseline {
        Some(baseline) => states
            .iter()
            .all(|s| (exclude_missing && is_uncertain(s)) || s == baseline),
        None => true,
    }
}

/// Returns an iterator over whether each included character is invariant.
///
/// See [`is_invariant`].
fn iter_invariant(
    matrix: &CharacterMatrix,
    exclude_missing: bool,
) -> impl Iterator<Item = bool> + '_ {
    matrix
        .included_characters()
        .map(move |i| is_invariant(&column(matrix, i), exclude_missing))
}

impl CharacterMatrix {
    /// Returns the number of invariant sites.
    ///
    /// See [`InvariantSites`].
    pub fn num_invariant_sites(&self, exclude_missing: bool) -> usize {
        InvariantSites::from_matrix(self, exclude_missing).0
    }

    /// Returns the number of segregating sites.
    ///
    /// See [`SegregatingSites`].
    pub fn num_segregating_sites(&self, exclude_missing: bool) -> usize {
        SegregatingSites::from_matrix(self, exclude_missing).0
    }

    /// Returns the length of the longest run of invariant sites.
    pub fn max_invariable_block_length(&self, exclude_missing: bool) -> usize {
        SiteBlocks::from_matrix(self, exclude_missing).max_invariable
    }

    /// Returns the length of the longest run of variable sites.
    pub fn max_variable_block_length(&self, exclude_missing: bool) -> usize {
        SiteBlocks::from_matrix(self, exclude_missing).max_variable
    }

    /// Returns the number of runs of invariant sites.
    pub fn num_invariable_site_blocks(&self, exclude_missing: bool) -> usize {
        SiteBlocks::from_matrix(self, exclude_missing).num_invariable
    }

    /// Returns the matrix of pairwise sequence differences between included taxa.
    ///
    /// See [`DistanceMatrix`].
    pub fn pairwise_sequence_difference(
        &self,
        exclude_missing: bool,
    ) -> Result<DistanceMatrix, Error> {
        DistanceMatrix::from_matrix(self, exclude_missing)
    }

    /// Returns the average number of pairwise sequence differences.
    pub fn average_pairwise_sequence_difference(&self, exclude_missing: bool) -> Result<f64, Error> {
        Ok(self.pairwise_sequence_difference(exclude_missing)?.mean())
    }

    /// Returns the largest number of pairwise sequence differences.
    pub fn max_pairwise_sequence_difference(&self, exclude_missing: bool) -> Result<usize, Error> {
        Ok(self.pairwise_sequence_difference(exclude_missing)?.max())
    }

    /// Returns the smallest number of pairwise sequence differences.
    pub fn min_pairwise_sequence_difference(&self, exclude_missing: bool) -> Result<usize, Error> {
        Ok(self.pairwise_sequence_difference(exclude_missing)?.min())
    }

    /// Returns the GC content of each included taxon.
    ///
    /// See [`GcContent`].
    pub fn gc_content(&self, exclude_ambiguous: bool) -> Result<GcContent, Error> {
        GcContent::from_matrix(self, exclude_ambiguous)
    }

    /// Returns the GC content of each included taxon at a codon position.
    ///
    /// See [`GcContent::from_matrix_by_codon`].
    pub fn gc_content_by_codon(
        &self,
        position: usize,
        exclude_ambiguous: bool,
    ) -> Result<GcContent, Error> {
        GcContent::from_matrix_by_codon(self, position, exclude_ambiguous)
    }

    /// Returns the largest GC content of any included taxon.
    pub fn max_gc_content(&self, exclude_ambiguous: bool) -> Result<f64, Error> {
        Ok(self.gc_content(exclude_ambiguous)?.max())
    }

    /// Returns the smallest GC content of any included taxon.
    pub fn min_gc_content(&self, exclude_ambiguous: bool) -> Result<f64, Error> {
        Ok(self.gc_content(exclude_ambiguous)?.min())
    }

    /// Returns the mean GC content of included taxa.
    pub fn mean_gc_content(&self, exclude_ambiguous: bool) -> Result<f64, Error> {
        Ok(self.gc_content(exclude_ambiguous)?.mean())
    }

    /// Returns the variance of the GC content of included taxa.
    pub fn var_gc_content(&self, exclude_ambiguous: bool) -> Result<f64, Error> {
        Ok(self.gc_content(exclude_ambiguous)?.variance())
    }

    /// Returns the largest GC content of any included taxon at a codon position.
    pub fn max_gc_content_by_codon(
        &self,
        position: usize,
        exclude_ambiguous: bool,
    ) -> Result<f64, Error> {
        Ok(self.gc_content_by_codon(position, exclude_ambiguous)?.max())
    }

    /// Returns the smallest GC content of any included taxon at a codon position.
    pub fn min_gc_content_by_codon(
        &self,
        position: usize,
        exclude_ambiguous: bool,
    ) -> Result<f64, Error> {
        Ok(self.gc_content_by_codon(position, exclude_ambiguous)?.min())
    }

    /// Returns the mean GC content of included taxa at a codon position.
    pub fn mean_gc_content_by_codon(
        &self,
        position: usize,
        exclude_ambiguous: bool,
    ) -> Result<f64, Error> {
        Ok(self.gc_content_by_codon(position, exclude_ambiguous)?.mean())
    }

    /// Returns the variance of the GC content of included taxa at a codon position.
    pub fn var_gc_content_by_codon(
        &self,
        position: usize,
        exclude_ambiguous: bool,
    ) -> Result<f64, Error> {
        Ok(self
            .gc_content_by_codon(position, exclude_ambiguous)?
            .variance())
    }

    /// Returns the state frequencies of each included taxon.
    ///
    /// See [`StateFrequencies`].
    pub fn compute_state_frequencies(&self) -> StateFrequencies {
        StateFrequencies::from_matrix(self)
    }

    /// Returns the empirical state frequencies pooled over included taxa.
    ///
    /// See [`EmpiricalFrequencies`].
    pub fn empirical_base_frequencies(&self) -> Result<Vec<f64>, Error> {
        Ok(EmpiricalFrequencies::from_matrix(self)?.0)
    }

    /// Returns the multinomial profile likelihood of the site patterns.
    ///
    /// See [`ProfileLikelihood`].
    pub fn multinomial_profile_likelihood(&self) -> f64 {
        ProfileLikelihood::from_matrix(self).0
    }

    /// Returns the highest state index observed.
    ///
    /// See [`MaxObservedStateIndex`].
    pub fn max_observed_state_index(&self) -> usize {
        MaxObservedStateIndex::from_matrix(self).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{matrix::tests::dna, DataType};

    fn states(s: &str) -> Vec<CharacterState> {
        s.chars()
            .map(|c| CharacterState::from_symbol(DataType::Dna, &c.to_string()).unwrap())
            .collect()
    }

    fn invariant(s: &str, exclude_missing: bool) -> bool {
        let states = states(s);
        is_invariant(&states.iter().collect::<Vec<_>>(), exclude_missing)
    }

    #[test]
    fn test_is_invariant() {
        assert!(invariant("AAA", false));
        assert!(!invariant("AAC", false));
        assert!(invariant("", false));
        assert!(invariant("---", false));
        assert!(!invariant("A-A", true));
    }

    #[test]
    fn test_is_invariant_exclude_missing() {
        assert!(!invariant("ARA", false));
        assert!(invariant("ARA", true));
        assert!(invariant("?AA", true));
        assert!(!invariant("?AC", true));
        assert!(invariant("?N?", true));
    }

    #[test]
    fn test_delegating_methods() {
        let m = dna(&[("a", "ACGTA"), ("b", "ACCTT")]);

        assert_eq!(m.num_invariant_sites(false), 3);
        assert_eq!(m.num_segregating_sites(false), 2);
        assert_eq!(m.average_pairwise_sequence_difference(false), Ok(2.0));
        assert_eq!(m.max_pairwise_sequence_difference(false), Ok(2));
        assert_eq!(m.min_pairwise_sequence_difference(false), Ok(2));
        assert_eq!(m.max_observed_state_index(), 3);
    }
}
