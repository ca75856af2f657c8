//! Data types and their symbol tables.

use std::{fmt, str::FromStr};

use super::codon;

/// Nucleotide symbols in state order for DNA.
pub(crate) const DNA_SYMBOLS: [char; 4] = ['A', 'C', 'G', 'T'];

/// Nucleotide symbols in state order for RNA.
pub(crate) const RNA_SYMBOLS: [char; 4] = ['A', 'C', 'G', 'U'];

/// IUPAC nucleotide codes indexed by the four-bit state pattern, with A as the lowest bit.
const DNA_IUPAC: [char; 16] = [
    '-', 'A', 'C', 'M', 'G', 'R', 'S', 'V', 'T', 'W', 'Y', 'H', 'K', 'D', 'B', 'N',
];

const RNA_IUPAC: [char; 16] = [
    '-', 'A', 'C', 'M', 'G', 'R', 'S', 'V', 'U', 'W', 'Y', 'H', 'K', 'D', 'B', 'N',
];

/// Amino acid symbols in state order.
pub(crate) const AMINO_ACID_SYMBOLS: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W', 'Y',
    'V',
];

/// Amino acid ambiguity codes and the symbols they stand for.
const AMINO_ACID_AMBIGUITY: [(char, [char; 2]); 3] =
    [('B', ['N', 'D']), ('Z', ['Q', 'E']), ('J', ['I', 'L'])];

/// Standard state labels, in state order.
const STANDARD_SYMBOLS: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// The maximum number of states of a standard data type.
///
/// Each standard state has a single-symbol label, so larger alphabets are capped at this size.
pub const MAX_STANDARD_STATES: usize = STANDARD_SYMBOLS.len();

/// A discrete data type, defining an alphabet of states.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum DataType {
    /// DNA nucleotides.
    Dna,
    /// RNA nucleotides.
    Rna,
    /// Amino acids.
    AminoAcid,
    /// Sense codons of the standard genetic code.
    Codon,
    /// Generic morphological states with the given number of states.
    Standard(usize),
    /// Non-negative integers below the given number of states.
    NaturalNumbers(usize),
    /// Sets of taxa among the given number of taxa.
    Taxa(usize),
}

impl DataType {
    /// Returns the number of states in the alphabet.
    pub fn num_states(&self) -> usize {
        match self {
            DataType::Dna | DataType::Rna => 4,
            DataType::AminoAcid => AMINO_ACID_SYMBOLS.len(),
            DataType::Codon => codon::NUM_SENSE_CODONS,
            DataType::Standard(n) => (*n).min(MAX_STANDARD_STATES),
            DataType::NaturalNumbers(n) | DataType::Taxa(n) => *n,
        }
    }

    /// Returns the name of the data type.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Dna => "DNA",
            DataType::Rna => "RNA",
            DataType::AminoAcid => "Protein",
            DataType::Codon => "Codon",
            DataType::Standard(_) => "Standard",
            DataType::NaturalNumbers(_) => "NaturalNumbers",
            DataType::Taxa(_) => "Taxa",
        }
    }

    /// Returns `true` for DNA and RNA.
    pub fn is_nucleotide(&self) -> bool {
        matches!(self, DataType::Dna | DataType::Rna)
    }

    /// Returns the bit conventions for gap and missing states.
    pub fn convention(&self) -> Convention {
        match self {
            DataType::Dna => Convention::new(Fill::Empty, Fill::Full),
            DataType::Rna => Convention::new(Fill::Empty, Fill::Full),
            DataType::AminoAcid => Convention::new(Fill::Empty, Fill::Full),
            DataType::Codon => Convention::new(Fill::Empty, Fill::Full),
            DataType::Standard(_) => Convention::new(Fill::Empty, Fill::Full),
            DataType::NaturalNumbers(_) => Convention::new(Fill::Empty, Fill::Full),
            DataType::Taxa(_) => Convention::new(Fill::Empty, Fill::Full),
        }
    }

    /// Returns the symbol labels of the states in state order.
    pub fn labels(&self) -> Vec<String> {
        (0..self.num_states()).map(|i| self.label(i)).collect()
    }

    /// Returns the symbol label of the state with the provided index.
    ///
    /// The index is assumed to be less than the number of states.
    pub(crate) fn label(&self, index: usize) -> String {
        match self {
            DataType::Dna => DNA_SYMBOLS[index].to_string(),
            DataType::Rna => RNA_SYMBOLS[index].to_string(),
            DataType::AminoAcid => AMINO_ACID_SYMBOLS[index].to_string(),
            DataType::Codon => codon::sense_codon(index).iter().collect(),
            DataType::Standard(_) => STANDARD_SYMBOLS[index..=index].to_string(),
            DataType::NaturalNumbers(_) | DataType::Taxa(_) => index.to_string(),
        }
    }

    /// Returns `true` if each state is written as a whitespace-separated integer token rather
    /// than a single symbol.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::NaturalNumbers(_) | DataType::Taxa(_))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    /// Parses a data type name.
    ///
    /// Alphabets with a configurable number of states may carry it in parentheses, as in
    /// `Standard(4)`; if omitted, ten states are assumed. Standard data takes at most
    /// [`MAX_STANDARD_STATES`] states.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const DEFAULT_NUM_STATES: usize = 10;

        let err = || ParseDataTypeError(s.to_string());

        let (name, num_states) = match s.trim().split_once('(') {
            Some((name, rest)) => {
                let n = rest
                    .strip_suffix(')')
                    .and_then(|n| n.trim().parse::<usize>().ok())
                    .ok_or_else(err)?;
                (name.trim(), n)
            }
            None => (s.trim(), DEFAULT_NUM_STATES),
        };

        match name.to_ascii_lowercase().as_str() {
            "dna" => Ok(DataType::Dna),
            "rna" => Ok(DataType::Rna),
            "aa" | "protein" | "aminoacid" => Ok(DataType::AminoAcid),
            "codon" => Ok(DataType::Codon),
            "standard" if num_states <= MAX_STANDARD_STATES => Ok(DataType::Standard(num_states)),
            "naturalnumbers" => Ok(DataType::NaturalNumbers(num_states)),
            "taxa" => Ok(DataType::Taxa(num_states)),
            _ => Err(err()),
        }
    }
}

/// An error associated with parsing a data type name.
#[derive(Debug)]
pub struct ParseDataTypeError(String);

impl fmt::Display for ParseDataTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse '{}' as data type", self.0)
    }
}

impl std::error::Error for ParseDataTypeError {}

/// How the bits of a special state are filled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Fill {
    /// No bits set.
    Empty,
    /// All bits set.
    Full,
}

/// The bit patterns used for gap and missing states of a data type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Convention {
    /// Bits of a gap state.
    pub gap: Fill,
    /// Bits of a missing state.
    pub missing: Fill,
}

impl Convention {
    const fn new(gap: Fill, missing: Fill) -> Self {
        Self { gap, missing }
    }
}

/// Returns the nucleotide state pattern of an IUPAC symbol, with A as the lowest bit.
///
/// Both `T` and `U` are accepted. Returns `None` for symbols that are not IUPAC nucleotide codes.
pub(crate) fn nucleotide_pattern(symbol: char) -> Option<u8> {
    match symbol.to_ascii_uppercase() {
        'U' => Some(0b1000),
        c => DNA_IUPAC
            .iter()
            .skip(1)
            .position(|&x| x == c)
            .map(|i| i as u8 + 1),
    }
}

/// Returns the IUPAC symbol of a non-empty nucleotide state pattern.
pub(crate) fn nucleotide_symbol(pattern: u8, data_type: DataType) -> char {
    let table = if data_type == DataType::Rna {
        &RNA_IUPAC
    } else {
        &DNA_IUPAC
    };
    table[usize::from(pattern & 0b1111)]
}

/// Returns the state indices of an amino acid symbol, including ambiguity codes.
pub(crate) fn amino_acid_indices(symbol: char) -> Option<Vec<usize>> {
    let symbol = symbol.to_ascii_uppercase();

    if symbol == 'X' {
        return Some((0..AMINO_ACID_SYMBOLS.len()).collect());
    }

    let position = |c: char| AMINO_ACID_SYMBOLS.iter().position(|&x| x == c);

    if let Some(i) = position(symbol) {
        Some(vec![i])
    } else {
        AMINO_ACID_AMBIGUITY
            .iter()
            .find(|(code, _)| *code == symbol)
            .map(|(_, symbols)| symbols.iter().filter_map(|&c| position(c)).collect())
    }
}

/// Returns the amino acid ambiguity code of a set of state indices, if one exists.
pub(crate) fn amino_acid_code(indices: &[usize]) -> Option<char> {
    if indices.len() == AMINO_ACID_SYMBOLS.len() {
        return Some('X');
    }

    AMINO_ACID_AMBIGUITY.iter().find_map(|(code, symbols)| {
        let mut expected = symbols
            .iter()
            .filter_map(|&c| AMINO_ACID_SYMBOLS.iter().position(|&x| x == c))
            .collect::<Vec<_>>();
        expected.sort_unstable();

        (expected == indices).then_some(*code)
    })
}

/// Returns the state index of a standard symbol among the given number of states.
pub(crate) fn standard_index(symbol: char, num_states: usize) -> Option<usize> {
    STANDARD_SYMBOLS
        .chars()
        .take(num_states)
        .position(|c| c == symbol)
}
