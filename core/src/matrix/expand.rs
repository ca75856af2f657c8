use std::num::NonZeroUsize;

use crate::{Bitset, CharacterState, DataType, Error, TaxonData};

use super::CharacterMatrix;

impl CharacterMatrix {
    /// Returns a new matrix of natural numbers with each state replicated `n` times.
    ///
    /// With `k` states in the current alphabet, the new alphabet has `k * n` states, where state
    /// `i` of the current alphabet maps to states `i`, `i + k`, ..., `i + (n - 1) * k`. An
    /// ambiguous state maps to the union of the replicates of its possible states. Missing and gap
    /// states stay missing and gap. All taxa and characters are expanded, and masks are not
    /// carried over.
    pub fn expand_characters(&self, n: NonZeroUsize) -> Result<CharacterMatrix, Error> {
        let num_states = self.num_states();
        let data_type = DataType::NaturalNumbers(num_states * n.get());

        let rows = self
            .rows()
            .map(|row| -> Result<TaxonData, Error> {
                let mut expanded = TaxonData::new(row.taxon().clone(), data_type);

                for (i, state) in row.iter().enumerate() {
                    let resolved = row.is_character_resolved(i)?;
                    expanded
                        .add_character_with_resolved(expand_state(state, data_type, n)?, resolved)?;
                }

                Ok(expanded)
            })
            .collect::<Result<Vec<_>, _>>()?;

        CharacterMatrix::from_rows(data_type, rows)
    }
}

fn expand_state(
    state: &CharacterState,
    data_type: DataType,
    n: NonZeroUsize,
) -> Result<CharacterState, Error> {
    if state.is_missing() {
        return Ok(CharacterState::missing(data_type));
    }
    if state.is_gap() {
        return Ok(CharacterState::gap(data_type));
    }

    let num_states = state.num_states();
    let bits = Bitset::from_indices(
        data_type.num_states(),
        state
            .iter_states()
            .flat_map(|k| (0..n.get()).map(move |l| k + num_states * l)),
    );

    CharacterState::from_bits(data_type, bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::matrix::tests::{dna, strings};

    fn nonzero(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_expand_resolved() {
        let m = dna(&[("a", "AT")]);
        let expanded = m.expand_characters(nonzero(2)).unwrap();

        assert_eq!(expanded.data_type(), DataType::NaturalNumbers(8));
        assert_eq!(strings(&expanded), vec!["(0 4)(3 7)"]);
    }

    #[test]
    fn test_expand_ambiguous_missing_and_gap() {
        let m = dna(&[("a", "R?-")]);
        let expanded = m.expand_characters(nonzero(3)).unwrap();
        let row = expanded.taxon_data(0).unwrap();

        assert_eq!(
            row[0].iter_states().collect::<Vec<_>>(),
            vec![0, 2, 4, 6, 8, 10]
        );
        assert!(row[1].is_missing());
        assert!(row[2].is_gap());
        assert!(!row.is_character_resolved(0).unwrap());
    }

    #[test]
    fn test_expand_once_keeps_indices() {
        let mut m = dna(&[("a", "ACGT"), ("b", "TGCA")]);
        m.exclude_taxon(1).unwrap();
        m.exclude_character(0).unwrap();
        let expanded = m.expand_characters(nonzero(1)).unwrap();

        assert_eq!(expanded.num_taxa(), 2);
        assert_eq!(expanded.num_included_taxa(), 2);
        assert_eq!(expanded.num_included_characters(), 4);
        assert_eq!(strings(&expanded), vec!["0123", "3210"]);
    }
}
