use std::path::PathBuf;

use anyhow::Error;

use clap::Parser;

use charmat_core::io::write;

use crate::args::MatrixArgs;

/// View character matrix.
///
/// Taxon and character masks are applied, and the included data is written in FASTA format.
#[derive(Debug, Parser)]
pub struct View {
    #[command(flatten)]
    pub matrix: MatrixArgs,

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

impl View {
    pub fn run(self) -> Result<(), Error> {
        let matrix = self.matrix.read()?;

        let mut builder = write::Builder::default();
        if let Some(line_width) = self.line_width {
            builder = builder.set_line_width(line_width);
        }
        builder.write_to_path_or_stdout(self.output, &matrix)?;

        Ok(())
    }
}
