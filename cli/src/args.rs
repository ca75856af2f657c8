use std::path::PathBuf;

use anyhow::Error;

use clap::{error::ErrorKind, Args, ValueEnum};

use charmat_core::{
    io::read, state::alphabet::MAX_STANDARD_STATES, CharacterMatrix, DataType, Input,
};

/// Arguments for reading a character matrix, shared between subcommands.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Input matrix in FASTA format.
    ///
    /// The input can be provided here or read from stdin, and may be gzip-compressed.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Data type of the input matrix.
    #[arg(short = 't', long, value_enum, default_value_t = DataTypeArg::Dna, value_name = "TYPE")]
    pub data_type: DataTypeArg,

    /// Number of states for standard and natural number data.
    ///
    /// Standard data takes at most 62 states. Ignored for other data types.
    #[arg(long, default_value_t = 10, value_name = "INT")]
    pub num_states: usize,

    /// Taxa to exclude.
    ///
    /// Excluded taxa are kept in the matrix, but ignored by all calculations and output. Use comma
    /// to separate taxon names.
    #[arg(long, use_value_delimiter = true, value_name = "NAME,...")]
    pub exclude_taxa: Vec<String>,

    /// Codon positions to include.
    ///
    /// Only the included characters at the provided codon positions (1, 2, or 3) are kept, counting
    /// from the first included character. Use comma to separate positions.
    #[arg(long, use_value_delimiter = true, value_name = "POS,...")]
    pub codon_position: Vec<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataTypeArg {
    /// DNA nucleotides.
    Dna,
    /// RNA nucleotides.
    Rna,
    /// Amino acids.
    Protein,
    /// Sense codons of the standard genetic code.
    Codon,
    /// Standard morphological data. See also --num-states.
    Standard,
    /// Natural numbers. See also --num-states.
    NaturalNumbers,
}

impl MatrixArgs {
    pub fn data_type(&self) -> Result<DataType, clap::Error> {
        Ok(match self.data_type {
            DataTypeArg::Dna => DataType::Dna,
            DataTypeArg::Rna => DataType::Rna,
            DataTypeArg::Protein => DataType::AminoAcid,
            DataTypeArg::Codon => DataType::Codon,
            DataTypeArg::Standard if self.num_states > MAX_STANDARD_STATES => {
                return Err(clap::Error::raw(
                    ErrorKind::ValueValidation,
                    format!(
                        "standard data takes at most {MAX_STANDARD_STATES} states \
                            (found {} states)\n",
                        self.num_states
                    ),
                ))
            }
            DataTypeArg::Standard => DataType::Standard(self.num_states),
            DataTypeArg::NaturalNumbers => DataType::NaturalNumbers(self.num_states),
        })
    }

    /// Reads the matrix and applies taxon and character masks.
    pub fn read(&self) -> Result<CharacterMatrix, Error> {
        let data_type = self.data_type()?;
        let input = Input::new(self.input.clone())?;

        match input.as_path() {
            Some(path) => log::info!("Reading {data_type} matrix from '{}'", path.display()),
            None => log::info!("Reading {data_type} matrix from stdin"),
        }

        let mut matrix = read::Builder::default()
            .set_data_type(data_type)
            .read_from_input(&input)?;

        log::debug!(
            "Read {} taxa with {} characters",
            matrix.num_taxa(),
            matrix.num_characters()
        );

        for name in self.exclude_taxa.iter() {
            matrix.exclude_taxon_by_name(name)?;
        }

        if !self.codon_position.is_empty() {
            matrix.set_codon_partition(&self.codon_position)?;
        }

        if !self.exclude_taxa.is_empty() || !self.codon_position.is_empty() {
            log::info!(
                "Using {} of {} taxa and {} of {} characters",
                matrix.num_included_taxa(),
                matrix.num_taxa(),
                matrix.num_included_characters(),
                matrix.num_characters()
            );
        }

        Ok(matrix)
    }
}
