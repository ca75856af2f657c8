//! Character sequences of a single taxon.

use std::{collections::BTreeSet, ops::Index};

use crate::{
    error::{Error, IndexKind},
    CharacterState, DataType, Taxon,
};

/// The sequence of character states observed for a single taxon.
///
/// Alongside each state, a flag records whether the character is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct TaxonData {
    taxon: Taxon,
    data_type: DataType,
    sequence: Vec<CharacterState>,
    resolved: Vec<bool>,
}

impl TaxonData {
    /// Creates a new, empty sequence.
    pub fn new<T>(taxon: T, data_type: DataType) -> Self
    where
        T: Into<Taxon>,
    {
        Self {
            taxon: taxon.into(),
            data_type,
            sequence: Vec::new(),
            resolved: Vec::new(),
        }
    }

    /// Creates a new sequence from states.
    ///
    /// Characters are marked as resolved when they are not ambiguous.
    pub fn from_states<T, I>(taxon: T, data_type: DataType, states: I) -> Result<Self, Error>
    where
        T: Into<Taxon>,
        I: IntoIterator<Item = CharacterState>,
    {
        let mut data = Self::new(taxon, data_type);
        for state in states {
            let resolved = !state.is_ambiguous();
            data.add_character_with_resolved(state, resolved)?;
        }
        Ok(data)
    }

    /// Creates a new sequence by parsing each symbol as a state.
    pub fn from_symbols<T, I, S>(taxon: T, data_type: DataType, symbols: I) -> Result<Self, Error>
    where
        T: Into<Taxon>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let states = symbols
            .into_iter()
            .map(|s| CharacterState::from_symbol(data_type, s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_states(taxon, data_type, states)
    }

    /// Appends a resolved character.
    pub fn add_character(&mut self, state: CharacterState) -> Result<(), Error> {
        self.add_character_with_resolved(state, true)
    }

    /// Appends a character with the provided resolved flag.
    pub fn add_character_with_resolved(
        &mut self,
        state: CharacterState,
        resolved: bool,
    ) -> Result<(), Error> {
        Error::check_type(self.data_type, state.data_type())?;

        self.sequence.push(state);
        self.resolved.push(resolved);

        Ok(())
    }

    /// Appends all characters of another sequence of the same data type.
    pub fn concatenate(&mut self, other: &TaxonData) -> Result<(), Error> {
        Error::check_type(self.data_type, other.data_type)?;

        self.sequence.extend(other.sequence.iter().cloned());
        self.resolved.extend(other.resolved.iter().copied());

        Ok(())
    }

    /// Returns a new sequence without the characters at the provided indices.
    ///
    /// The relative order of the remaining characters is preserved. Indices beyond the end of the
    /// sequence are ignored.
    pub fn remove_characters(&self, indices: &BTreeSet<usize>) -> TaxonData {
        let (sequence, resolved) = self
            .sequence
            .iter()
            .zip(self.resolved.iter())
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, (state, &resolved))| (state.clone(), resolved))
            .unzip();

        Self {
            taxon: self.taxon.clone(),
            data_type: self.data_type,
            sequence,
            resolved,
        }
    }

    /// Returns a sequence of the same taxon, data type and length, where every character is
    /// missing.
    pub fn to_all_missing(&self) -> TaxonData {
        let mut data = self.clone();
        data.set_all_characters_missing();
        data
    }

    /// Sets every character to missing.
    pub fn set_all_characters_missing(&mut self) {
        self.sequence.iter_mut().for_each(|s| s.set_missing());
        self.resolved.iter_mut().for_each(|r| *r = false);
    }

    /// Returns the character at the provided index.
    pub fn character(&self, index: usize) -> Result<&CharacterState, Error> {
        self.sequence.get(index).ok_or(Error::IndexOutOfRange {
            kind: IndexKind::Character,
            index,
            len: self.len(),
        })
    }

    /// Replaces the character at the provided index.
    ///
    /// The character must have the data type of the sequence. It is resolved unless ambiguous.
    pub fn set_character(&mut self, index: usize, state: CharacterState) -> Result<(), Error> {
        Error::check_index(IndexKind::Character, index, self.len())?;
        Error::check_type(self.data_type, state.data_type())?;

        self.resolved[index] = !state.is_ambiguous();
        self.sequence[index] = state;

        Ok(())
    }

    /// Returns `true` if the character at the provided index is resolved.
    pub fn is_character_resolved(&self, index: usize) -> Result<bool, Error> {
        Error::check_index(IndexKind::Character, index, self.len())?;
        Ok(self.resolved[index])
    }

    /// Returns the fraction of characters that are missing or gaps.
    ///
    /// An empty sequence has no missing characters.
    pub fn percentage_missing(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }

        let missing = self
            .sequence
            .iter()
            .filter(|s| s.is_missing() || s.is_gap())
            .count();

        missing as f64 / self.len() as f64
    }

    /// Returns `true` if every character is missing or a gap.
    pub fn is_sequence_missing(&self) -> bool {
        self.sequence.iter().all(|s| s.is_missing() || s.is_gap())
    }

    /// Returns the data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the taxon.
    pub fn taxon(&self) -> &Taxon {
        &self.taxon
    }

    /// Returns the taxon name.
    pub fn name(&self) -> &str {
        self.taxon.name()
    }

    pub(crate) fn set_taxon(&mut self, taxon: Taxon) {
        self.taxon = taxon;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.taxon.set_name(name);
    }

    /// Returns the number of characters.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if there are no characters.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns an iterator over the characters.
    pub fn iter(&self) -> std::slice::Iter<'_, CharacterState> {
        self.sequence.iter()
    }

    /// Returns the characters as a slice.
    pub fn as_slice(&self) -> &[CharacterState] {
        &self.sequence
    }
}

impl Index<usize> for TaxonData {
    type Output = CharacterState;

    fn index(&self, index: usize) -> &Self::Output {
        &self.sequence[index]
    }
}

impl<'a> IntoIterator for &'a TaxonData {
    type Item = &'a CharacterState;
    type IntoIter = std::slice::Iter<'a, CharacterState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
