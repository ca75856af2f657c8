//! The FASTA format.
//!
//! Records are read and written with [`needletail`]. Each record starts with a header line
//! `>name`, where the taxon name is the first word after `>`, followed by any number of sequence
//! lines.
//!
//! How sequence lines are split into symbols depends on the data type:
//!
//! - Codons: every three non-whitespace characters make up a symbol.
//! - Natural numbers and taxa: symbols are separated by whitespace, including line breaks.
//! - All other data types: every non-whitespace character is a symbol.
//!
//! In all cases, a group of symbols in `(...)` or `{...}` makes up a single ambiguous symbol,
//! except for codons.

use std::{io, str};

use needletail::{
    parse_fastx_reader,
    parser::{write_fasta, LineEnding},
};

use crate::{CharacterMatrix, DataType, TaxonData};

use super::invalid_data;

/// Reads a matrix of the provided data type in FASTA format.
///
/// All rows must have the same number of characters. Empty input gives an empty matrix.
pub fn read_matrix<R>(mut reader: R, data_type: DataType) -> io::Result<CharacterMatrix>
where
    R: io::BufRead + Send,
{
    let mut matrix = CharacterMatrix::new(data_type);

    if reader.fill_buf()?.is_empty() {
        return Ok(matrix);
    }

    let mut records = parse_fastx_reader(reader).map_err(invalid_data)?;

    while let Some(record) = records.next() {
        let record = record.map_err(invalid_data)?;

        let name = str::from_utf8(record.id())
            .map_err(invalid_data)?
            .split_whitespace()
            .next()
            .ok_or_else(|| invalid_data("empty FASTA header"))?
            .to_string();

        // Line breaks separate numeric symbols
        let sequence = str::from_utf8(record.raw_seq()).map_err(invalid_data)?;

        matrix
            .add_taxon_data(parse_row(name, sequence, data_type)?)
            .map_err(invalid_data)?;
    }

    Ok(matrix)
}

fn parse_row(name: String, sequence: &str, data_type: DataType) -> io::Result<TaxonData> {
    let symbols = match data_type {
        DataType::Codon => codon_symbols(sequence)
            .ok_or_else(|| invalid_data(format!("length of '{name}' is not a multiple of three")))?,
        _ => symbols(sequence, data_type.is_numeric())
            .ok_or_else(|| invalid_data(format!("unclosed ambiguity group in '{name}'")))?,
    };

    TaxonData::from_symbols(name, data_type, symbols).map_err(invalid_data)
}

/// Splits a sequence into symbols, or returns `None` if an ambiguity group is not closed.
///
/// If `whitespace_separated` is set, symbols are runs of non-whitespace characters, otherwise
/// each non-whitespace character is a symbol.
fn symbols(sequence: &str, whitespace_separated: bool) -> Option<Vec<String>> {
    let mut symbols = Vec::new();
    let mut current = String::new();
    let mut chars = sequence.chars();

    while let Some(c) = chars.next() {
        let close = match c {
            '(' => Some(')'),
            '{' => Some('}'),
            _ => None,
        };

        if let Some(close) = close {
            if !current.is_empty() {
                symbols.push(std::mem::take(&mut current));
            }

            let mut group = String::from(c);
            loop {
                let c = chars.next()?;
                group.push(c);
                if c == close {
                    break;
                }
            }
            symbols.push(group);
        } else if c.is_whitespace() {
            if !current.is_empty() {
                symbols.push(std::mem::take(&mut current));
            }
        } else if whitespace_separated {
            current.push(c);
        } else {
            symbols.push(String::from(c));
        }
    }

    if !current.is_empty() {
        symbols.push(current);
    }

    Some(symbols)
}

/// Splits a sequence into triplets, or returns `None` if the length is not a multiple of three.
fn codon_symbols(sequence: &str) -> Option<Vec<String>> {
    let chars = sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<Vec<_>>();

    if chars.len() % 3 != 0 {
        return None;
    }

    Some(chars.chunks(3).map(|c| c.iter().collect()).collect())
}

/// Writes the included taxa and characters of a matrix in FASTA format.
///
/// If a line width is provided, sequences are wrapped to that many states per line.
pub fn write_matrix<W>(
    writer: &mut W,
    matrix: &CharacterMatrix,
    line_width: Option<usize>,
) -> io::Result<()>
where
    W: io::Write,
{
    let separator = if matrix.data_type().is_numeric() {
        " "
    } else {
        ""
    };
    let characters = matrix.included_characters().collect::<Vec<_>>();
    let width = line_width.filter(|&w| w > 0).unwrap_or(characters.len().max(1));

    for row in matrix.included_rows() {
        let sequence = characters
            .chunks(width)
            .map(|line| {
                line.iter()
                    .map(|&i| row[i].string_value())
                    .collect::<Vec<_>>()
                    .join(separator)
            })
            .collect::<Vec<_>>()
            .join("\n");

        write_fasta(
            row.name().as_bytes(),
            sequence.as_bytes(),
            &mut *writer,
            LineEnding::Unix,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::Error;

    fn read(s: &str, data_type: DataType) -> io::Result<CharacterMatrix> {
        read_matrix(s.as_bytes(), data_type)
    }

    fn write(matrix: &CharacterMatrix, line_width: Option<usize>) -> String {
        let mut buf = Vec::new();
        write_matrix(&mut buf, matrix, line_width).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            symbols("AC(GT)\nN-", false),
            Some(vec!["A", "C", "(GT)", "N", "-"].into_iter().map(String::from).collect())
        );
        assert_eq!(
            symbols("0 12 (2 4 5)\n{1 3} ?", true),
            Some(
                vec!["0", "12", "(2 4 5)", "{1 3}", "?"]
                    .into_iter()
                    .map(String::from)
                    .collect()
            )
        );
        assert_eq!(symbols("A(CG", false), None);
    }

    #[test]
    fn test_codon_symbols() {
        assert_eq!(
            codon_symbols("ATG\nT TA"),
            Some(vec![String::from("ATG"), String::from("TTA")])
        );
        assert_eq!(codon_symbols("ATGT"), None);
    }

    #[test]
    fn test_read_dna() {
        let src = ">a first taxon\nACGT\nAC\n>b\nAC-T?R\n";
        let matrix = read(src, DataType::Dna).unwrap();

        assert_eq!(matrix.num_taxa(), 2);
        assert_eq!(matrix.num_characters(), 6);
        assert_eq!(matrix.taxon_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(matrix.character(1, 5).unwrap().is_ambiguous());
    }

    #[test]
    fn test_read_natural_numbers() {
        let src = ">a\n0 1\n(2 3)\n>b\n10 ?\n-\n";
        let matrix = read(src, DataType::NaturalNumbers(11)).unwrap();

        assert_eq!(matrix.num_characters(), 3);
        assert_eq!(matrix.character(0, 2).unwrap().num_observed_states(), 2);
        assert_eq!(matrix.character(1, 0).unwrap().state_index(), Some(10));
    }

    #[test]
    fn test_read_codons() {
        let src = ">a\nATGTTT\n>b\nATG---\n";
        let matrix = read(src, DataType::Codon).unwrap();

        assert_eq!(matrix.num_characters(), 2);
        assert!(matrix.character(1, 1).unwrap().is_gap());
        assert!(read(">a\nATGT\n", DataType::Codon).is_err());
    }

    #[test]
    fn test_read_errors() {
        assert!(read("ACGT\n>a\nACGT\n", DataType::Dna).is_err());
        assert!(read(">\nACGT\n", DataType::Dna).is_err());
        assert!(read(">a\n0 x\n", DataType::NaturalNumbers(2)).is_err());

        let e = read(">a\nACGT\n>b\nAC\n", DataType::Dna).unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert_eq!(
            e.to_string(),
            Error::LengthMismatch {
                name: String::from("b"),
                expected: 4,
                found: 2
            }
            .to_string()
        );

        assert!(read(">a\nA\n>a\nC\n", DataType::Dna).is_err());
    }

    #[test]
    fn test_read_empty() {
        let matrix = read("", DataType::Dna).unwrap();
        assert_eq!(matrix.num_taxa(), 0);
    }

    #[test]
    fn test_write() {
        let mut matrix = read(">a\nACGTR\n>b\nAC-T?\n>c\nTTTTT\n", DataType::Dna).unwrap();
        matrix.exclude_taxon(2).unwrap();
        matrix.exclude_character(1).unwrap();

        assert_eq!(write(&matrix, None), ">a\nAGTR\n>b\nA-T?\n");
        assert_eq!(write(&matrix, Some(3)), ">a\nAGT\nR\n>b\nA-T\n?\n");
    }

    #[test]
    fn test_write_natural_numbers() {
        let matrix = read(">a\n0 1 (2 3)\n", DataType::NaturalNumbers(4)).unwrap();
        assert_eq!(write(&matrix, None), ">a\n0 1 (2 3)\n");
    }

    #[test]
    fn test_write_read_codons() {
        let src = ">a\nATGTTY---\n";
        let matrix = read(src, DataType::Codon).unwrap();
        assert_eq!(write(&matrix, None), src);
    }
}
