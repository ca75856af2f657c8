//! Invariant and segregating sites.

use super::{iter_invariant, CharacterMatrix};

/// The number of invariant sites.
///
/// A site is invariant if all included taxa share the same state. When missing data is excluded,
/// missing and ambiguous states are ignored in the comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct InvariantSites(pub usize);

impl InvariantSites {
    /// Calculates the number of invariant sites over the included characters of a matrix.
    pub fn from_matrix(matrix: &CharacterMatrix, exclude_missing: bool) -> Self {
        Self(
            iter_invariant(matrix, exclude_missing)
                .filter(|&invariant| invariant)
                .count(),
        )
    }
}

/// The number of segregating sites.
///
/// This is the number of included characters that are not invariant, see [`InvariantSites`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct SegregatingSites(pub usize);

impl SegregatingSites {
    /// Calculates the number of segregating sites over the included characters of a matrix.
    pub fn from_matrix(matrix: &CharacterMatrix, exclude_missing: bool) -> Self {
        let InvariantSites(invariant) = InvariantSites::from_matrix(matrix, exclude_missing);
        Self(matrix.num_included_characters() - invariant)
    }
}

/// Runs of invariant and variable sites.
///
/// Included characters are scanned in order, where excluded characters do not break a run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SiteBlocks {
    /// Length of the longest run of invariant sites.
    pub max_invariable: usize,
    /// Length of the longest run of variable sites.
    pub max_variable: usize,
    /// Number of runs of invariant sites.
    pub num_invariable: usize,
}

impl SiteBlocks {
    /// Calculates the runs of invariant and variable sites over the included characters of a
    /// matrix.
    pub fn from_matrix(matrix: &CharacterMatrix, exclude_missing: bool) -> Self {
        let mut blocks = Self::default();
        let mut invariable_run = 0;
        let mut variable_run = 0;

        for invariant in iter_invariant(matrix, exclude_missing) {
            if invariant {
                if invariable_run == 0 {
                    blocks.num_invariable += 1;
                }
                invariable_run += 1;
                variable_run = 0;
            } else {
                variable_run += 1;
                invariable_run = 0;
            }

            blocks.max_invariable = blocks.max_invariable.max(invariable_run);
            blocks.max_variable = blocks.max_variable.max(variable_run);
        }

        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::matrix::tests::dna;

    #[test]
    fn test_invariant_and_segregating_sites() {
        let m = dna(&[("a", "ACGT"), ("b", "CAGA"), ("c", "GTGC")]);

        assert_eq!(InvariantSites::from_matrix(&m, false), InvariantSites(1));
        assert_eq!(SegregatingSites::from_matrix(&m, false), SegregatingSites(3));
    }

    #[test]
    fn test_invariant_sites_exclude_missing() {
        let m = dna(&[("a", "A?GT"), ("b", "ACRT"), ("c", "ACG-")]);

        assert_eq!(InvariantSites::from_matrix(&m, false).0, 1);
        assert_eq!(InvariantSites::from_matrix(&m, true).0, 3);
        assert_eq!(SegregatingSites::from_matrix(&m, true).0, 1);
    }

    #[test]
    fn test_invariant_sites_with_masks() {
        let mut m = dna(&[("a", "ACGT"), ("b", "CAGA"), ("c", "ACGT")]);
        m.exclude_taxon(1).unwrap();
        m.exclude_character(3).unwrap();

        assert_eq!(InvariantSites::from_matrix(&m, false).0, 3);
        assert_eq!(SegregatingSites::from_matrix(&m, false).0, 0);
    }

    #[test]
    fn test_invariant_sites_without_taxa() {
        let mut m = dna(&[("a", "ACGT")]);
        m.exclude_taxon(0).unwrap();

        assert_eq!(InvariantSites::from_matrix(&m, false).0, 4);
    }

    #[test]
    fn test_site_blocks() {
        // Invariant pattern: I I V I V V V I I I
        let m = dna(&[("a", "AAAAAAAAAA"), ("b", "AACACCCAAA")]);
        let blocks = SiteBlocks::from_matrix(&m, false);

        assert_eq!(blocks.max_invariable, 3);
        assert_eq!(blocks.max_variable, 3);
        assert_eq!(blocks.num_invariable, 3);
    }

    #[test]
    fn test_site_blocks_skip_excluded_characters() {
        let mut m = dna(&[("a", "AAAA"), ("b", "ACAA")]);
        m.exclude_character(1).unwrap();
        let blocks = SiteBlocks::from_matrix(&m, false);

        assert_eq!(blocks.max_invariable, 3);
        assert_eq!(blocks.max_variable, 0);
        assert_eq!(blocks.num_invariable, 1);
    }

    #[test]
    fn test_site_blocks_empty() {
        let m = dna(&[("a", "")]);
        assert_eq!(SiteBlocks::from_matrix(&m, false), SiteBlocks::default());
    }
}
