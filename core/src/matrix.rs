//! Homologous character matrices.
//!
//! A [`CharacterMatrix`] holds one [`TaxonData`] row per taxon, all of the same data type and
//! length. Sites and taxa may be excluded from the matrix. Exclusion is a mask over indices: the
//! data is kept, and may be included again, until [`CharacterMatrix::remove_excluded_characters`]
//! is called.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::{
    error::{Error, IndexKind},
    translate, CharacterState, DataType, Taxon, TaxonData,
};

mod concat;
pub use concat::Concatenation;

mod expand;

pub mod stat;

/// A homologous matrix of discrete characters.
#[derive(Clone, Debug)]
pub struct CharacterMatrix {
    data_type: DataType,
    rows: IndexMap<String, TaxonData>,
    excluded_characters: BTreeSet<usize>,
    excluded_taxa: BTreeSet<usize>,
    homeologs: IndexMap<String, String>,
}

impl CharacterMatrix {
    /// Creates a new, empty matrix.
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            rows: IndexMap::new(),
            excluded_characters: BTreeSet::new(),
            excluded_taxa: BTreeSet::new(),
            homeologs: IndexMap::new(),
        }
    }

    /// Creates a new matrix from rows.
    pub fn from_rows<I>(data_type: DataType, rows: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = TaxonData>,
    {
        let mut matrix = Self::new(data_type);
        for row in rows {
            matrix.add_taxon_data(row)?;
        }
        Ok(matrix)
    }

    /// Returns the data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the number of states of the data type.
    pub fn num_states(&self) -> usize {
        self.data_type.num_states()
    }

    /// Adds a row.
    ///
    /// The row must have the data type of the matrix, a taxon name not already in the matrix,
    /// and, unless the matrix is empty, the same number of characters as the matrix.
    pub fn add_taxon_data(&mut self, row: TaxonData) -> Result<(), Error> {
        Error::check_type(self.data_type, row.data_type())?;

        if self.rows.contains_key(row.name()) {
            return Err(Error::DuplicateTaxon {
                name: row.name().to_string(),
            });
        }

        if !self.rows.is_empty() && row.len() != self.num_characters() {
            return Err(Error::LengthMismatch {
                name: row.name().to_string(),
                expected: self.num_characters(),
                found: row.len(),
            });
        }

        self.rows.insert(row.name().to_string(), row);

        Ok(())
    }

    /// Adds a row for a taxon where every character is missing.
    pub fn add_missing_taxon<T>(&mut self, taxon: T) -> Result<(), Error>
    where
        T: Into<Taxon>,
    {
        let taxon = taxon.into();

        let row = match self.rows.first() {
            Some((_, first)) => {
                let mut row = first.to_all_missing();
                row.set_taxon(taxon);
                row
            }
            None => TaxonData::new(taxon, self.data_type),
        };

        self.add_taxon_data(row)
    }

    /// Adds an all-missing row for each taxon not already in the matrix.
    pub fn add_missing_taxa<I, T>(&mut self, taxa: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<Taxon>,
    {
        for taxon in taxa {
            let taxon = taxon.into();
            if !self.rows.contains_key(taxon.name()) {
                self.add_missing_taxon(taxon)?;
            }
        }

        Ok(())
    }

    /// Returns the number of taxa, included or not.
    pub fn num_taxa(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of included taxa.
    pub fn num_included_taxa(&self) -> usize {
        self.num_taxa() - self.excluded_taxa.len()
    }

    /// Returns an iterator over the taxa in row order.
    pub fn taxa(&self) -> impl Iterator<Item = &Taxon> {
        self.rows.values().map(TaxonData::taxon)
    }

    /// Returns an iterator over the taxon names in row order.
    pub fn taxon_names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Returns the row index of a taxon.
    pub fn taxon_index(&self, name: &str) -> Result<usize, Error> {
        self.rows
            .get_index_of(name)
            .ok_or_else(|| Error::TaxonNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the row at the provided index.
    pub fn taxon_data(&self, index: usize) -> Result<&TaxonData, Error> {
        self.rows
            .get_index(index)
            .map(|(_, row)| row)
            .ok_or(Error::IndexOutOfRange {
                kind: IndexKind::Taxon,
                index,
                len: self.num_taxa(),
            })
    }

    /// Returns the row of the named taxon.
    pub fn taxon_data_by_name(&self, name: &str) -> Result<&TaxonData, Error> {
        self.rows.get(name).ok_or_else(|| Error::TaxonNotFound {
            name: name.to_string(),
        })
    }

    /// Returns the character of a taxon at a site.
    pub fn character(&self, taxon: usize, character: usize) -> Result<&CharacterState, Error> {
        self.taxon_data(taxon)?.character(character)
    }

    /// Replaces the character of a taxon at a site.
    ///
    /// Rows can only be renamed through [`CharacterMatrix::set_taxon_name`].
    pub fn set_character(
        &mut self,
        taxon: usize,
        character: usize,
        state: CharacterState,
    ) -> Result<(), Error> {
        let len = self.num_taxa();
        self.rows
            .get_index_mut(taxon)
            .map(|(_, row)| row)
            .ok_or(Error::IndexOutOfRange {
                kind: IndexKind::Taxon,
                index: taxon,
                len,
            })?
            .set_character(character, state)
    }

    /// Returns an iterator over all rows, included or not.
    pub fn rows(&self) -> impl Iterator<Item = &TaxonData> {
        self.rows.values()
    }

    /// Returns an iterator over the included rows.
    pub fn included_rows(&self) -> impl Iterator<Item = &TaxonData> {
        self.rows
            .values()
            .enumerate()
            .filter(|(i, _)| !self.excluded_taxa.contains(i))
            .map(|(_, row)| row)
    }

    /// Returns an iterator over the indices of the included characters.
    pub fn included_characters(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_characters()).filter(|i| !self.excluded_characters.contains(i))
    }

    /// Removes the row at the provided index.
    ///
    /// Exclusion of later taxa is kept. Removing the last row also clears the character mask.
    pub fn delete_taxon(&mut self, index: usize) -> Result<TaxonData, Error> {
        Error::check_index(IndexKind::Taxon, index, self.num_taxa())?;

        self.excluded_taxa = self
            .excluded_taxa
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();

        let row = self
            .rows
            .shift_remove_index(index)
            .map(|(_, row)| row)
            .ok_or(Error::IndexOutOfRange {
                kind: IndexKind::Taxon,
                index,
                len: self.num_taxa(),
            })?;

        if self.rows.is_empty() {
            self.excluded_characters.clear();
        }

        Ok(row)
    }

    /// Removes the row of the named taxon.
    pub fn delete_taxon_by_name(&mut self, name: &str) -> Result<TaxonData, Error> {
        let index = self.taxon_index(name)?;
        self.delete_taxon(index)
    }

    /// Renames a taxon, keeping its row position.
    pub fn set_taxon_name(&mut self, current: &str, new: &str) -> Result<(), Error> {
        let index = self.taxon_index(current)?;

        if current != new && self.rows.contains_key(new) {
            return Err(Error::DuplicateTaxon {
                name: new.to_string(),
            });
        }

        if let Some((_, mut row)) = self.rows.shift_remove_index(index) {
            row.set_name(new.to_string());
            self.rows.shift_insert(index, new.to_string(), row);
        }

        Ok(())
    }

    /// Excludes the taxon at the provided index.
    pub fn exclude_taxon(&mut self, index: usize) -> Result<(), Error> {
        Error::check_index(IndexKind::Taxon, index, self.num_taxa())?;
        self.excluded_taxa.insert(index);
        Ok(())
    }

    /// Excludes the named taxon.
    pub fn exclude_taxon_by_name(&mut self, name: &str) -> Result<(), Error> {
        let index = self.taxon_index(name)?;
        self.exclude_taxon(index)
    }

    /// Includes the previously excluded taxon at the provided index.
    pub fn restore_taxon(&mut self, index: usize) -> Result<(), Error> {
        Error::check_index(IndexKind::Taxon, index, self.num_taxa())?;
        self.excluded_taxa.remove(&index);
        Ok(())
    }

    /// Includes the previously excluded named taxon.
    pub fn restore_taxon_by_name(&mut self, name: &str) -> Result<(), Error> {
        let index = self.taxon_index(name)?;
        self.restore_taxon(index)
    }

    /// Returns `true` if the taxon at the provided index is excluded.
    pub fn is_taxon_excluded(&self, index: usize) -> bool {
        self.excluded_taxa.contains(&index)
    }

    /// Returns the indices of excluded taxa.
    pub fn excluded_taxa(&self) -> &BTreeSet<usize> {
        &self.excluded_taxa
    }

    /// Returns the number of characters, included or not.
    pub fn num_characters(&self) -> usize {
        self.rows.first().map(|(_, row)| row.len()).unwrap_or(0)
    }

    /// Returns the number of included characters.
    pub fn num_included_characters(&self) -> usize {
        self.num_characters() - self.excluded_characters.len()
    }

    /// Excludes the character at the provided index.
    pub fn exclude_character(&mut self, index: usize) -> Result<(), Error> {
        Error::check_index(IndexKind::Character, index, self.num_characters())?;
        self.excluded_characters.insert(index);
        Ok(())
    }

    /// Includes the character at the provided index.
    pub fn include_character(&mut self, index: usize) -> Result<(), Error> {
        Error::check_index(IndexKind::Character, index, self.num_characters())?;
        self.excluded_characters.remove(&index);
        Ok(())
    }

    /// Includes the previously excluded character at the provided index.
    ///
    /// This is equivalent to [`CharacterMatrix::include_character`].
    pub fn restore_character(&mut self, index: usize) -> Result<(), Error> {
        self.include_character(index)
    }

    /// Excludes all characters.
    pub fn exclude_all_characters(&mut self) {
        self.excluded_characters = (0..self.num_characters()).collect();
    }

    /// Returns `true` if the character at the provided index is excluded.
    pub fn is_character_excluded(&self, index: usize) -> bool {
        self.excluded_characters.contains(&index)
    }

    /// Returns the indices of excluded characters.
    pub fn excluded_characters(&self) -> &BTreeSet<usize> {
        &self.excluded_characters
    }

    /// Returns `true` if the character of a taxon at a site is resolved.
    pub fn is_character_resolved(&self, taxon: usize, character: usize) -> Result<bool, Error> {
        self.taxon_data(taxon)?.is_character_resolved(character)
    }

    /// Physically removes all excluded characters from every row, and clears the exclusion mask.
    pub fn remove_excluded_characters(&mut self) {
        for row in self.rows.values_mut() {
            *row = row.remove_characters(&self.excluded_characters);
        }
        self.excluded_characters.clear();
    }

    /// Keeps only included characters at the provided codon positions.
    ///
    /// Included characters are counted in order, so that the `i`th included character is at
    /// codon position `i % 3 + 1`. Characters at other codon positions are excluded; previously
    /// excluded characters stay excluded.
    pub fn set_codon_partition(&mut self, positions: &[usize]) -> Result<(), Error> {
        if let Some(&position) = positions.iter().find(|p| !(1..=3).contains(*p)) {
            return Err(Error::InvalidCodonPosition(position));
        }

        let included = self.included_characters().collect::<Vec<_>>();
        for (i, character) in included.into_iter().enumerate() {
            if !positions.contains(&(i % 3 + 1)) {
                self.excluded_characters.insert(character);
            }
        }

        Ok(())
    }

    /// Includes exactly the characters where the highest observed state index plus one equals
    /// the provided number of states.
    ///
    /// Only taxa with a character that is neither missing nor a gap count towards the highest
    /// observed state. All other characters are excluded.
    pub fn set_num_states_partition(&mut self, num_states: usize) {
        for character in 0..self.num_characters() {
            let observed = self
                .rows
                .values()
                .map(|row| &row[character])
                .filter(|s| !s.is_missing() && !s.is_gap())
                .filter_map(|s| s.bits().last())
                .map(|i| i + 1)
                .max()
                .unwrap_or(0);

            if observed == num_states {
                self.excluded_characters.remove(&character);
            } else {
                self.excluded_characters.insert(character);
            }
        }
    }

    /// Returns the fraction of missing or gap characters of the named taxon.
    pub fn percentage_missing(&self, name: &str) -> Result<f64, Error> {
        Ok(self.taxon_data_by_name(name)?.percentage_missing())
    }

    /// Returns `true` if every character of the named taxon is missing or a gap.
    pub fn is_sequence_missing(&self, name: &str) -> Result<bool, Error> {
        Ok(self.taxon_data_by_name(name)?.is_sequence_missing())
    }

    /// Returns the number of taxa with a fraction of missing characters below the provided
    /// fraction.
    pub fn num_taxa_missing_sequence(&self, fraction: f64) -> usize {
        self.rows
            .values()
            .filter(|row| row.percentage_missing() < fraction)
            .count()
    }

    /// Returns `true` if all included taxa have the same state at the character.
    pub fn is_character_constant(&self, index: usize) -> Result<bool, Error> {
        Error::check_index(IndexKind::Character, index, self.num_characters())?;

        let mut states = self.included_rows().map(|row| &row[index]);
        Ok(match states.next() {
            Some(first) => states.all(|s| s == first),
            None => true,
        })
    }

    /// Returns `true` if any included taxon has a gap or an ambiguous state at the character.
    pub fn is_character_missing_or_ambiguous(&self, index: usize) -> Result<bool, Error> {
        Error::check_index(IndexKind::Character, index, self.num_characters())?;

        Ok(self
            .included_rows()
            .map(|row| &row[index])
            .any(|s| s.is_gap() || s.is_ambiguous()))
    }

    /// Returns the number of included characters that are constant.
    ///
    /// See [`CharacterMatrix::is_character_constant`].
    pub fn num_constant_patterns(&self) -> usize {
        self.included_characters()
            .filter(|&i| matches!(self.is_character_constant(i), Ok(true)))
            .count()
    }

    /// Returns the number of included characters with gaps or ambiguous states.
    ///
    /// See [`CharacterMatrix::is_character_missing_or_ambiguous`].
    pub fn num_missing_or_ambiguous(&self) -> usize {
        self.included_characters()
            .filter(|&i| matches!(self.is_character_missing_or_ambiguous(i), Ok(true)))
            .count()
    }

    /// Returns a new matrix with every row translated to the named data type.
    ///
    /// See [`translate::translate`] for supported translations. Masks are not carried over.
    pub fn translate_characters(&self, to: &str) -> Result<CharacterMatrix, Error> {
        let rows = self
            .rows
            .values()
            .map(|row| translate::translate(row, to))
            .collect::<Result<Vec<_>, _>>()?;

        let data_type = match rows.first() {
            Some(row) => row.data_type(),
            None => translate::target_type(self.data_type, to)?,
        };

        CharacterMatrix::from_rows(data_type, rows)
    }

    /// Sets the data name of a homeolog tip.
    pub fn set_homeolog(&mut self, tip: &str, data: &str) -> Result<(), Error> {
        self.taxon_index(data)?;
        self.homeologs.insert(tip.to_string(), data.to_string());
        Ok(())
    }

    /// Returns the data name of a homeolog tip, if set.
    pub fn homeolog(&self, tip: &str) -> Option<&str> {
        self.homeologs.get(tip).map(String::as_str)
    }
}
