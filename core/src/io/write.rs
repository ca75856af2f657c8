//! Utilities for writing character matrices.

use std::{fs, io, path::Path};

use crate::CharacterMatrix;

use super::fasta;

/// A builder to write a character matrix in FASTA format.
///
/// Only included taxa and characters are written.
#[derive(Debug, Default)]
pub struct Builder {
    line_width: Option<usize>,
}

impl Builder {
    /// Set line width.
    ///
    /// If set, sequences are wrapped to the provided number of states per line.
    /// If unset, each sequence is written on a single line.
    pub fn set_line_width(mut self, line_width: usize) -> Self {
        self.line_width = Some(line_width);
        self
    }

    /// Write matrix to writer.
    pub fn write<W>(self, writer: &mut W, matrix: &CharacterMatrix) -> io::Result<()>
    where
        W: io::Write,
    {
        fasta::write_matrix(writer, matrix, self.line_width)
    }

    /// Write matrix to stdout.
    pub fn write_to_stdout(self, matrix: &CharacterMatrix) -> io::Result<()> {
        self.write(&mut io::stdout().lock(), matrix)
    }

    /// Write matrix to path.
    ///
    /// If path already exists, it will be overwritten.
    pub fn write_to_path<P>(self, path: P, matrix: &CharacterMatrix) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        self.write(&mut io::BufWriter::new(fs::File::create(path)?), matrix)
    }

    /// Write matrix to path or stdout.
    ///
    /// If the provided path is `None`, write to stdout.
    /// If path already exists, it will be overwritten.
    pub fn write_to_path_or_stdout<P>(
        self,
        path: Option<P>,
        matrix: &CharacterMatrix,
    ) -> io::Result<()>
    where
        P: AsRef<Path>,
    {
        match path {
            Some(path) => self.write_to_path(path, matrix),
            None => self.write_to_stdout(matrix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::io::read;

    #[test]
    fn test_write_line_width() {
        let matrix = read::Builder::default()
            .read(&b">a\nACGTACGT\n"[..])
            .unwrap();

        let mut buf = Vec::new();
        Builder::default()
            .set_line_width(5)
            .write(&mut buf, &matrix)
            .unwrap();

        assert_eq!(buf, b">a\nACGTA\nCGT\n");
    }
}
