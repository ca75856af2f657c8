#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Tools for working with discrete character matrices.
//!
//! This serves as the core library implementation for the `charmat` CLI, but can also be used as a
//! free-standing library for working with discrete phylogenetic character data.
//!
//! # Overview
//!
//! A [`CharacterState`] is a set of possible states from the alphabet of a [`DataType`], such as
//! DNA, amino acids, or codons, stored as a [`Bitset`]. Ambiguity codes like the IUPAC `R` (`A` or
//! `G`) are states with more than one possible state.
//!
//! States are collected into a [`TaxonData`] sequence for each [`Taxon`], and sequences of equal
//! length are collected into a [`CharacterMatrix`]. Taxa and characters may be excluded from a
//! matrix without removing any data, and summary statistics are calculated over the included part
//! of the matrix only.
//!
//! # Example
//!
//! As a very brief introduction to the API, let's create a small DNA matrix, and then calculate the
//! number of segregating sites and the average number of pairwise differences.
//!
//! ```
//! use charmat_core::{CharacterMatrix, DataType, TaxonData};
//!
//! // Create rows from some data
//! let rows = [("a", "ACGTA"), ("b", "ACCTT"), ("c", "ACGTT")]
//!     .into_iter()
//!     .map(|(name, s)| TaxonData::from_symbols(name, DataType::Dna, s.chars().map(String::from)))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! // Collect the rows into a matrix
//! let mut matrix = CharacterMatrix::from_rows(DataType::Dna, rows)?;
//! assert_eq!(matrix.num_segregating_sites(false), 2);
//!
//! // Exclude a taxon and calculate statistics again
//! matrix.exclude_taxon_by_name("b")?;
//! assert_eq!(matrix.num_segregating_sites(false), 1);
//! assert_eq!(matrix.average_pairwise_sequence_difference(false)?, 1.0);
//! # Ok::<(), charmat_core::Error>(())
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod bitset;
pub use bitset::Bitset;

pub mod error;
pub use error::Error;

pub mod io;
pub use io::Input;

pub mod matrix;
pub use matrix::{CharacterMatrix, Concatenation};

pub mod state;
pub use state::{CharacterState, DataType};

pub mod taxon;
pub use taxon::Taxon;

pub mod taxon_data;
pub use taxon_data::TaxonData;

pub mod translate;
