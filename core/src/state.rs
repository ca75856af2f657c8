//! Discrete character states.
//!
//! A [`CharacterState`] is a set of possible states from the alphabet of some [`DataType`],
//! stored as a [`Bitset`]. A state with a single set bit is resolved; a state with more than one
//! set bit is ambiguous. Gap and missing states are marked by flags, and have their bits filled
//! according to the [`Convention`] of the data type.

use std::{cmp::Ordering, fmt, hash};

use crate::{
    error::{Error, IndexKind},
    Bitset,
};

pub mod alphabet;
pub use alphabet::{Convention, DataType, Fill};

pub(crate) mod codon;

/// A discrete character state.
///
/// Two states are equal if they have the same data type and the same set bits; gap and missing
/// flags are not considered.
#[derive(Clone, Debug)]
pub struct CharacterState {
    data_type: DataType,
    bits: Bitset,
    gap: bool,
    missing: bool,
}

impl CharacterState {
    fn with_fill(data_type: DataType, fill: Fill) -> Self {
        let n = data_type.num_states();
        let bits = match fill {
            Fill::Empty => Bitset::new(n),
            Fill::Full => Bitset::full(n),
        };

        Self {
            data_type,
            bits,
            gap: false,
            missing: false,
        }
    }

    /// Creates a new missing state.
    pub fn missing(data_type: DataType) -> Self {
        let mut state = Self::with_fill(data_type, data_type.convention().missing);
        state.missing = true;
        state
    }

    /// Creates a new gap state.
    pub fn gap(data_type: DataType) -> Self {
        let mut state = Self::with_fill(data_type, data_type.convention().gap);
        state.gap = true;
        state
    }

    /// Creates a new resolved state with the provided state index.
    pub fn from_index(data_type: DataType, index: usize) -> Result<Self, Error> {
        Error::check_index(IndexKind::State, index, data_type.num_states())?;

        let mut state = Self::with_fill(data_type, Fill::Empty);
        state.bits.set(index);
        Ok(state)
    }

    /// Creates a new state with the provided set of possible states.
    ///
    /// The length of the bitset must match the number of states of the data type. A bitset with
    /// no bits set gives a gap state.
    pub fn from_bits(data_type: DataType, bits: Bitset) -> Result<Self, Error> {
        if bits.len() != data_type.num_states() {
            return Err(Error::MalformedState {
                data_type,
                symbol: bits.to_string(),
            });
        }

        let gap = bits.none();
        Ok(Self {
            data_type,
            bits,
            gap,
            missing: false,
        })
    }

    /// Creates a new state from a symbol.
    ///
    /// The symbols `?` and `-` give missing and gap states, respectively, for all data types.
    /// Otherwise, the symbol is interpreted according to the data type:
    ///
    /// - DNA and RNA: IUPAC nucleotide codes, case-insensitive. `T` and `U` are interchangeable.
    /// - Amino acids: one-letter codes, case-insensitive, including the ambiguity codes `B`, `Z`,
    ///   `J`, and `X`.
    /// - Codons: three nucleotide symbols. Ambiguous nucleotides are expanded to all sense codons
    ///   they may stand for; a triplet that may only be a stop codon is malformed.
    /// - Standard: state labels `0`-`9`, then `A`-`Z`, then `a`-`z`.
    /// - Natural numbers and taxa: non-negative integers below the number of states.
    ///
    /// Several symbols may be given together, optionally in `(...)` or `{...}`, to give an
    /// ambiguous state containing each of them, e.g. `(AC)` for amino acids or `(2 4 5)` for
    /// natural numbers.
    ///
    /// For symbol alphabets, unrecognised symbols give a missing state. For natural numbers and
    /// taxa, symbols that are not integers below the number of states are malformed.
    pub fn from_symbol(data_type: DataType, symbol: &str) -> Result<Self, Error> {
        let trimmed = symbol.trim();

        match trimmed {
            "?" => return Ok(Self::missing(data_type)),
            "-" => return Ok(Self::gap(data_type)),
            _ => (),
        }

        let inner = strip_brackets(trimmed);
        let malformed = || Error::MalformedState {
            data_type,
            symbol: symbol.to_string(),
        };

        if inner.is_empty() {
            return Err(malformed());
        }

        match data_type {
            DataType::Codon => parse_codon(inner).ok_or_else(malformed),
            DataType::NaturalNumbers(n) | DataType::Taxa(n) => {
                let mut state = Self::with_fill(data_type, Fill::Empty);
                for token in inner.split(|c: char| c.is_whitespace() || c == ',') {
                    if token.is_empty() {
                        continue;
                    }
                    match token.parse::<usize>() {
                        Ok(i) if i < n => state.bits.set(i),
                        _ => return Err(malformed()),
                    }
                }
                if state.bits.none() {
                    return Err(malformed());
                }
                Ok(state)
            }
            _ => {
                let mut state = Self::with_fill(data_type, Fill::Empty);
                for c in inner.chars().filter(|c| !c.is_whitespace()) {
                    match symbol_indices(data_type, c) {
                        Some(indices) => indices.into_iter().for_each(|i| state.bits.set(i)),
                        None => return Ok(Self::missing(data_type)),
                    }
                }
                Ok(state)
            }
        }
    }

    /// Creates a codon state from three nucleotide states.
    ///
    /// Ambiguous nucleotides are expanded to all sense codons they may stand for. Three gaps give
    /// a gap state, three missing nucleotides a missing state, and any other triplet involving a
    /// gap a missing state. Returns `None` if the triplet may only be a stop codon.
    pub fn codon_from_nucleotides(nucleotides: [&CharacterState; 3]) -> Option<Self> {
        if nucleotides.iter().all(|n| n.is_gap()) {
            return Some(Self::gap(DataType::Codon));
        }
        if nucleotides.iter().all(|n| n.is_missing()) {
            return Some(Self::missing(DataType::Codon));
        }
        if nucleotides.iter().any(|n| n.is_gap() || n.bits.none()) {
            return Some(Self::missing(DataType::Codon));
        }

        let [first, second, third] = nucleotides.map(|n| n.bits.iter_ones().collect::<Vec<_>>());

        let mut state = Self::with_fill(DataType::Codon, Fill::Empty);
        for &x in first.iter() {
            for &y in second.iter() {
                for &z in third.iter() {
                    if let Some(i) = codon::sense_index(codon::triplet_index([x, y, z])) {
                        state.bits.set(i);
                    }
                }
            }
        }

        if state.bits.none() {
            None
        } else {
            Some(state)
        }
    }

    /// Adds a possible state by index, making the state ambiguous if it was resolved.
    ///
    /// A gap or missing state is first cleared.
    pub fn add_state(&mut self, index: usize) -> Result<(), Error> {
        Error::check_index(IndexKind::State, index, self.num_states())?;

        if self.gap || self.missing {
            self.bits.clear();
            self.gap = false;
            self.missing = false;
        }
        self.bits.set(index);

        Ok(())
    }

    /// Adds the possible states of a symbol.
    ///
    /// See [`CharacterState::from_symbol`] for the interpretation of the symbol.
    pub fn add_symbol(&mut self, symbol: &str) -> Result<(), Error> {
        let other = Self::from_symbol(self.data_type, symbol)?;

        if other.is_missing() {
            *self = other;
        } else if !other.is_gap() {
            if self.gap || self.missing {
                self.bits.clear();
                self.gap = false;
                self.missing = false;
            }
            self.bits.or_assign(&other.bits);
        }

        Ok(())
    }

    /// Sets the state to the resolved state with the provided index.
    pub fn set_state_by_index(&mut self, index: usize) -> Result<(), Error> {
        Error::check_index(IndexKind::State, index, self.num_states())?;

        self.bits.clear();
        self.bits.set(index);
        self.gap = false;
        self.missing = false;

        Ok(())
    }

    /// Sets the state to the first state of the alphabet.
    pub fn set_to_first_state(&mut self) {
        self.bits.clear();
        if !self.bits.is_empty() {
            self.bits.set(0);
        }
        self.gap = self.bits.none();
        self.missing = false;
    }

    /// Sets the state to missing.
    pub fn set_missing(&mut self) {
        *self = Self::missing(self.data_type);
    }

    /// Sets the state to a gap.
    pub fn set_gap(&mut self) {
        *self = Self::gap(self.data_type);
    }

    /// Advances the state by shifting all possible states one index up.
    ///
    /// A resolved state becomes the next state of the alphabet; the last state becomes a gap.
    pub fn increment(&mut self) {
        self.bits.shift_up();
        self.gap = self.bits.none();
        self.missing = false;
    }

    /// Retreats the state by shifting all possible states one index down.
    ///
    /// A resolved state becomes the previous state of the alphabet; the first state becomes a
    /// gap.
    pub fn decrement(&mut self) {
        self.bits.shift_down();
        self.gap = self.bits.none();
        self.missing = false;
    }

    /// Returns the data type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns the number of states in the alphabet.
    pub fn num_states(&self) -> usize {
        self.bits.len()
    }

    /// Returns the set of possible states.
    pub fn bits(&self) -> &Bitset {
        &self.bits
    }

    /// Returns the number of possible states.
    pub fn num_observed_states(&self) -> usize {
        self.bits.count()
    }

    /// Returns `true` if more than one state is possible.
    ///
    /// Missing states are ambiguous, gaps are not.
    pub fn is_ambiguous(&self) -> bool {
        self.num_observed_states() > 1
    }

    /// Returns `true` if exactly one state is possible.
    pub fn is_resolved(&self) -> bool {
        self.num_observed_states() == 1
    }

    /// Returns `true` if the state is a gap.
    pub fn is_gap(&self) -> bool {
        self.gap
    }

    /// Returns `true` if the state is missing.
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// Returns `true` if the state with the provided index is possible.
    pub fn is_state_set(&self, index: usize) -> bool {
        self.bits.is_set(index)
    }

    /// Returns the index of the state, if resolved.
    pub fn state_index(&self) -> Option<usize> {
        if self.is_resolved() {
            self.bits.first()
        } else {
            None
        }
    }

    /// Returns an iterator over the indices of possible states.
    pub fn iter_states(&self) -> crate::bitset::Ones<'_> {
        self.bits.iter_ones()
    }

    /// Returns the string representation of the state.
    ///
    /// Missing states are written `?` and gaps `-`, except for codons, which use `???` and `---`.
    /// Resolved states are written with their symbol. Ambiguous states are written with an
    /// ambiguity code where the alphabet has one, and otherwise as the symbols of the possible
    /// states in parentheses, separated by spaces for natural numbers and taxa.
    pub fn string_value(&self) -> String {
        if self.missing {
            return String::from(if self.data_type == DataType::Codon {
                "???"
            } else {
                "?"
            });
        }
        if self.gap || self.bits.none() {
            return String::from(if self.data_type == DataType::Codon {
                "---"
            } else {
                "-"
            });
        }

        let indices = self.bits.iter_ones().collect::<Vec<_>>();

        match self.data_type {
            DataType::Dna | DataType::Rna => {
                let pattern = indices.iter().fold(0u8, |acc, &i| acc | (1 << i));
                alphabet::nucleotide_symbol(pattern, self.data_type).to_string()
            }
            DataType::Codon => {
                let mut patterns = [0u8; 3];
                for &i in indices.iter() {
                    let nucleotides = codon::triplet_nucleotides(codon::sense_triplet(i));
                    for (pattern, nucleotide) in patterns.iter_mut().zip(nucleotides) {
                        *pattern |= 1 << nucleotide;
                    }
                }
                patterns
                    .iter()
                    .map(|&p| alphabet::nucleotide_symbol(p, DataType::Dna))
                    .collect()
            }
            DataType::AminoAcid if indices.len() > 1 => match alphabet::amino_acid_code(&indices)
            {
                Some(code) => code.to_string(),
                None => self.bracketed(&indices, ""),
            },
            DataType::NaturalNumbers(_) | DataType::Taxa(_) if indices.len() > 1 => {
                self.bracketed(&indices, " ")
            }
            _ if indices.len() > 1 => self.bracketed(&indices, ""),
            _ => self.data_type.label(indices[0]),
        }
    }

    fn bracketed(&self, indices: &[usize], sep: &str) -> String {
        let labels = indices
            .iter()
            .map(|&i| self.data_type.label(i))
            .collect::<Vec<_>>();
        format!("({})", labels.join(sep))
    }

    /// Translates a codon state to the amino acid it codes for under the standard genetic code.
    ///
    /// Ambiguous codons give the set of amino acids coded by any of the possible codons.
    pub fn to_amino_acid(&self) -> Result<Self, Error> {
        Error::check_type(DataType::Codon, self.data_type)?;

        if self.missing {
            return Ok(Self::missing(DataType::AminoAcid));
        }
        if self.gap || self.bits.none() {
            return Ok(Self::gap(DataType::AminoAcid));
        }

        let mut state = Self::with_fill(DataType::AminoAcid, Fill::Empty);
        for i in self.bits.iter_ones() {
            let amino_acid = codon::amino_acid(codon::sense_triplet(i));
            if let Some(indices) = alphabet::amino_acid_indices(amino_acid) {
                indices.into_iter().for_each(|j| state.bits.set(j));
            }
        }
        Ok(state)
    }

    /// Returns the complementary nucleotide state.
    ///
    /// Each possible nucleotide is replaced by its Watson-Crick complement.
    pub fn complement(&self) -> Result<Self, Error> {
        if !self.data_type.is_nucleotide() {
            return Err(Error::TypeMismatch {
                expected: DataType::Dna,
                found: self.data_type,
            });
        }

        let mut state = self.clone();
        if !self.gap && !self.missing {
            state.bits = Bitset::from_indices(4, self.bits.iter_ones().map(|i| 3 - i));
        }
        Ok(state)
    }

    /// Returns a copy of this state with the data type changed to another with the same number
    /// of states.
    pub(crate) fn relabel(&self, data_type: DataType) -> Self {
        debug_assert_eq!(self.num_states(), data_type.num_states());

        Self {
            data_type,
            ..self.clone()
        }
    }
}

fn strip_brackets(s: &str) -> &str {
    s.strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .or_else(|| s.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
        .unwrap_or(s)
        .trim()
}

fn symbol_indices(data_type: DataType, symbol: char) -> Option<Vec<usize>> {
    match data_type {
        DataType::Dna | DataType::Rna => alphabet::nucleotide_pattern(symbol)
            .map(|pattern| (0..4).filter(|i| pattern & (1 << i) != 0).collect()),
        DataType::AminoAcid => alphabet::amino_acid_indices(symbol),
        DataType::Standard(n) => alphabet::standard_index(symbol, n).map(|i| vec![i]),
        DataType::Codon | DataType::NaturalNumbers(_) | DataType::Taxa(_) => None,
    }
}

fn parse_codon(s: &str) -> Option<CharacterState> {
    let symbols = s.chars().collect::<Vec<_>>();

    match symbols.as_slice() {
        ['?', '?', '?'] => Some(CharacterState::missing(DataType::Codon)),
        ['-', '-', '-'] => Some(CharacterState::gap(DataType::Codon)),
        &[x, y, z] => {
            let nucleotides = [x, y, z].map(|c| {
                CharacterState::from_symbol(DataType::Dna, c.encode_utf8(&mut [0; 4]))
                    .unwrap_or_else(|_| CharacterState::missing(DataType::Dna))
            });
            CharacterState::codon_from_nucleotides([
                &nucleotides[0],
                &nucleotides[1],
                &nucleotides[2],
            ])
        }
        _ => None,
    }
}

impl PartialEq for CharacterState {
    fn eq(&self, other: &Self) -> bool {
        self.data_type == other.data_type && self.bits == other.bits
    }
}

impl Eq for CharacterState {}

impl hash::Hash for CharacterState {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.data_type.hash(state);
        self.bits.hash(state);
    }
}

impl PartialOrd for CharacterState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CharacterState {
    /// Orders states first by data type, then by the lowest differing possible state.
    ///
    /// See [`Bitset::cmp_lowest_differing`].
    fn cmp(&self, other: &Self) -> Ordering {
        self.data_type
            .cmp(&other.data_type)
            .then_with(|| self.bits.cmp_lowest_differing(&other.bits))
    }
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_value())
    }
}
