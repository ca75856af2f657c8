use std::io::{self, Write};

use anyhow::Error;

use clap::Parser;

use crate::args::MatrixArgs;

/// Calculate pairwise sequence differences from character matrix.
///
/// The number of differing included characters between each pair of included taxa is printed as a
/// tab-separated matrix, with each line starting with a taxon name.
#[derive(Debug, Parser)]
pub struct Dist {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Ignore characters where either state is missing or ambiguous.
    #[arg(long)]
    pub exclude_missing: bool,
}

impl Dist {
    pub fn run(self) -> Result<(), Error> {
        let matrix = self.matrix.read()?;

        let distances = matrix.pairwise_sequence_difference(self.exclude_missing)?;
        log::debug!(
            "Calculated pairwise differences between {} taxa",
            distances.dimension()
        );

        write!(io::stdout().lock(), "{distances}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{args::DataTypeArg, tests::parse_subcmd};

    #[test]
    fn test_parse() {
        let args = parse_subcmd::<Dist>("charmat dist --exclude-missing -t rna input.fa");

        assert!(args.exclude_missing);
        assert_eq!(args.matrix.data_type, DataTypeArg::Rna);
        assert_eq!(args.matrix.input.as_deref(), Some(std::path::Path::new("input.fa")));
    }
}
