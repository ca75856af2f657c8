//! Errors arising from operations on character states and matrices.

use std::fmt;

use crate::DataType;

/// The kind of index that was out of range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IndexKind {
    /// Index of a character (site, column).
    Character,
    /// Index of a state within an alphabet.
    State,
    /// Index of a taxon (row).
    Taxon,
}

impl IndexKind {
    fn plural(&self) -> &'static str {
        match self {
            IndexKind::Character => "characters",
            IndexKind::State => "states",
            IndexKind::Taxon => "taxa",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::Character => "character",
            IndexKind::State => "state",
            IndexKind::Taxon => "taxon",
        })
    }
}

/// An error associated with character states, taxon data, or character matrices.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// A taxon was added to a matrix already containing a taxon by the same name.
    DuplicateTaxon {
        /// Taxon name.
        name: String,
    },
    /// Index is outside the valid range.
    IndexOutOfRange {
        /// What is indexed.
        kind: IndexKind,
        /// Offending index.
        index: usize,
        /// Number of valid indices.
        len: usize,
    },
    /// Codon position is not one of 1, 2, or 3.
    InvalidCodonPosition(usize),
    /// A row does not have the same number of characters as the matrix.
    LengthMismatch {
        /// Name of the taxon.
        name: String,
        /// Number of characters in the matrix.
        expected: usize,
        /// Number of characters in the row.
        found: usize,
    },
    /// A symbol could not be parsed as a state.
    MalformedState {
        /// Data type the symbol was parsed as.
        data_type: DataType,
        /// Offending symbol.
        symbol: String,
    },
    /// No countable observations were found.
    NoObservations,
    /// Taxon sets differ where they are required to be identical.
    TaxonSetMismatch {
        /// Name of a taxon found in only one of the taxon sets.
        name: String,
    },
    /// No taxon with the given name.
    TaxonNotFound {
        /// Taxon name.
        name: String,
    },
    /// Too few included taxa for the requested operation.
    TooFewTaxa {
        /// Least number of taxa required.
        required: usize,
        /// Number of included taxa.
        found: usize,
    },
    /// Data types differ where they are required to be equal.
    TypeMismatch {
        /// Expected data type.
        expected: DataType,
        /// Found data type.
        found: DataType,
    },
    /// Translation between the given data types is not supported.
    UnsupportedTranslation {
        /// Data type translated from.
        from: DataType,
        /// Name of the data type translated to.
        to: String,
    },
}

impl Error {
    pub(crate) fn check_index(kind: IndexKind, index: usize, len: usize) -> Result<(), Self> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { kind, index, len })
        }
    }

    pub(crate) fn check_type(expected: DataType, found: DataType) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::TypeMismatch { expected, found })
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateTaxon { name } => write!(f, "duplicate taxon '{name}'"),
            Error::IndexOutOfRange { kind, index, len } => {
                let noun = if *len == 1 {
                    kind.to_string()
                } else {
                    kind.plural().to_string()
                };
                write!(f, "{kind} index {index} out of range for {len} {noun}")
            }
            Error::InvalidCodonPosition(position) => write!(
                f,
                "invalid codon position {position} (must be one of 1, 2, or 3)"
            ),
            Error::LengthMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "taxon '{name}' has {found} characters, but matrix has {expected} characters"
            ),
            Error::MalformedState { data_type, symbol } => {
                write!(f, "malformed {data_type} state '{symbol}'")
            }
            Error::NoObservations => f.write_str("no countable observations"),
            Error::TaxonSetMismatch { name } => {
                write!(f, "taxon '{name}' not found in both taxon sets")
            }
            Error::TaxonNotFound { name } => write!(f, "taxon '{name}' not found"),
            Error::TooFewTaxa { required, found } => write!(
                f,
                "at least {required} included taxa required, found {found}"
            ),
            Error::TypeMismatch { expected, found } => {
                write!(f, "expected {expected} data, found {found} data")
            }
            Error::UnsupportedTranslation { from, to } => {
                write!(f, "cannot translate {from} data to {to} data")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_display() {
        let e = Error::IndexOutOfRange {
            kind: IndexKind::Taxon,
            index: 3,
            len: 1,
        };
        assert_eq!(e.to_string(), "taxon index 3 out of range for 1 taxon");

        let e = Error::IndexOutOfRange {
            kind: IndexKind::Character,
            index: 10,
            len: 4,
        };
        assert_eq!(e.to_string(), "character index 10 out of range for 4 characters");
    }

    #[test]
    fn test_check_index() {
        assert!(Error::check_index(IndexKind::State, 3, 4).is_ok());
        assert_eq!(
            Error::check_index(IndexKind::State, 4, 4),
            Err(Error::IndexOutOfRange {
                kind: IndexKind::State,
                index: 4,
                len: 4
            })
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let e = Error::check_type(DataType::Dna, DataType::AminoAcid).unwrap_err();
        assert_eq!(e.to_string(), "expected DNA data, found Protein data");
    }
}
