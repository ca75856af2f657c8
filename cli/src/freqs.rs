use std::io::{self, Write};

use anyhow::Error;

use clap::Parser;

use charmat_core::CharacterMatrix;

use crate::args::MatrixArgs;

/// Calculate state frequencies from character matrix.
///
/// By default, the frequencies of each included taxon are printed on a line, starting with the
/// taxon name. A header line contains the state symbols.
#[derive(Debug, Parser)]
pub struct Freqs {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Print empirical frequencies pooled over all taxa.
    ///
    /// Only resolved states are counted, and no pseudocounts are added.
    #[arg(short = 'e', long)]
    pub empirical: bool,

    /// Precision to use when printing frequencies.
    #[arg(short = 'p', long, default_value_t = 6, value_name = "INT")]
    pub precision: usize,
}

impl Freqs {
    pub fn run(self) -> Result<(), Error> {
        let matrix = self.matrix.read()?;

        let mut writer = io::stdout().lock();
        self.write(&mut writer, &matrix)
    }

    fn write<W>(&self, writer: &mut W, matrix: &CharacterMatrix) -> Result<(), Error>
    where
        W: Write,
    {
        let labels = matrix.data_type().labels();
        let precision = self.precision;

        if self.empirical {
            let values = matrix.empirical_base_frequencies()?;

            writeln!(writer, "{}", labels.join("\t"))?;
            writeln!(writer, "{}", join(&values, precision))?;
        } else {
            let frequencies = matrix.compute_state_frequencies();

            writeln!(writer, "taxon\t{}", labels.join("\t"))?;
            for (name, values) in frequencies.names().iter().zip(frequencies.values()) {
                writeln!(writer, "{name}\t{}", join(values, precision))?;
            }
        }

        Ok(())
    }
}

fn join(values: &[f64], precision: usize) -> String {
    values
        .iter()
        .map(|x| format!("{x:.precision$}"))
        .collect::<Vec<_>>()
        .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    use charmat_core::io::read;

    use crate::tests::parse_subcmd;

    fn write(cmd: &str, fasta: &str) -> String {
        let freqs = parse_subcmd::<Freqs>(cmd);
        let matrix = read::Builder::default()
            .set_data_type(freqs.matrix.data_type().unwrap())
            .read(fasta.as_bytes())
            .unwrap();

        let mut buf = Vec::new();
        freqs.write(&mut buf, &matrix).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empirical() {
        let output = write("charmat freqs -e -p 2 input.fa", ">a\nAACG\n>b\nAA-?\n");

        assert_eq!(output, "A\tC\tG\tT\n0.67\t0.17\t0.17\t0.00\n");
    }

    #[test]
    fn test_per_taxon_standard() {
        let output = write(
            "charmat freqs -t standard --num-states 2 -p 3 input.fa",
            ">a\n0000\n",
        );

        assert_eq!(output, "taxon\t0\t1\na\t0.995\t0.000\n");
    }
}
