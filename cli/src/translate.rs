use std::path::PathBuf;

use anyhow::Error;

use clap::{Parser, ValueEnum};

use charmat_core::io::write;

use crate::args::MatrixArgs;

/// Translate character matrix to another data type.
///
/// Nucleotides may be translated to codons or amino acids, and codons to amino acids, using the
/// standard genetic code. The translated matrix is written in FASTA format. Masks are applied
/// before translating, and the translated matrix contains only the included data.
#[derive(Debug, Parser)]
pub struct Translate {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Data type to translate to.
    #[arg(short = 'T', long, value_enum, value_name = "TYPE")]
    pub to: Target,

    /// Number of states per line.
    ///
    /// By default, each sequence is written on a single line.
    #[arg(short = 'w', long, value_name = "INT")]
    pub line_width: Option<usize>,

    /// Output path.
    ///
    /// If no path is given, the matrix will be output to stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    /// DNA nucleotides.
    Dna,
    /// RNA nucleotides.
    Rna,
    /// Sense codons.
    Codon,
    /// Amino acids.
    Protein,
}

impl Target {
    fn name(&self) -> &'static str {
        match self {
            Target::Dna => "dna",
            Target::Rna => "rna",
            Target::Codon => "codon",
            Target::Protein => "protein",
        }
    }
}

impl Translate {
    pub fn run(self) -> Result<(), Error> {
        let mut matrix = self.matrix.read()?;
        matrix.remove_excluded_characters();

        let excluded = matrix.excluded_taxa().iter().rev().copied().collect::<Vec<_>>();
        for index in excluded {
            matrix.delete_taxon(index)?;
        }

        log::info!("Translating {} matrix to {}", matrix.data_type(), self.to.name());
        let translated = matrix.translate_characters(self.to.name())?;

        let mut builder = write::Builder::default();
        if let Some(line_width) = self.line_width {
            builder = builder.set_line_width(line_width);
        }
        builder.write_to_path_or_stdout(self.output, &translated)?;

        Ok(())
    }
}
