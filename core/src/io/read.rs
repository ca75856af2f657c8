//! Utilities for reading character matrices.

use std::{fs, io, path::Path};

use crate::{CharacterMatrix, DataType};

use super::{fasta, Input};

/// A builder to read a character matrix.
#[derive(Debug)]
pub struct Builder {
    data_type: DataType,
}

impl Builder {
    /// Read matrix from reader.
    ///
    /// Gzip-compressed input is detected and decompressed.
    pub fn read<R>(self, reader: R) -> io::Result<CharacterMatrix>
    where
        R: io::BufRead + Send,
    {
        fasta::read_matrix(reader, self.data_type)
    }

    /// Read matrix from path.
    pub fn read_from_path<P>(self, path: P) -> io::Result<CharacterMatrix>
    where
        P: AsRef<Path>,
    {
        self.read(io::BufReader::new(fs::File::open(path)?))
    }

    /// Read matrix from stdin.
    pub fn read_from_stdin(self) -> io::Result<CharacterMatrix> {
        self.read(io::BufReader::new(io::stdin()))
    }

    /// Read matrix from input.
    pub fn read_from_input(self, input: &Input) -> io::Result<CharacterMatrix> {
        self.read(input.open()?)
    }

    /// Set data type to read.
    ///
    /// If unset, DNA will be read.
    pub fn set_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            data_type: DataType::Dna,
        }
    }
}
