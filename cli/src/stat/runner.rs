use std::{fmt, io};

use anyhow::Error;

use charmat_core::CharacterMatrix;

use super::{Stat, Statistic};

#[derive(Clone, Debug, PartialEq)]
pub struct StatisticWithOptions {
    statistic: Statistic,
    precision: usize,
}

impl StatisticWithOptions {
    pub fn new(statistic: Statistic, precision: usize) -> Self {
        Self {
            statistic,
            precision,
        }
    }
}

#[derive(Debug)]
pub struct Runner<W> {
    writer: W,
    matrix: CharacterMatrix,
    statistics: Vec<StatisticWithOptions>,
    header: bool,
    delimiter: char,
    exclude_missing: bool,
}

impl<W> Runner<W>
where
    W: io::Write,
{
    pub fn run(&mut self) -> Result<(), Error> {
        if self.header {
            self.write_header()?;
        }

        self.write_statistics()
    }

    fn write_header(&mut self) -> Result<(), Error> {
        let header_names = self
            .statistics
            .iter()
            .map(|s| s.statistic.header_name())
            .collect::<Vec<_>>();

        self.write_with_delimiter(header_names)
    }

    fn write_statistics(&mut self) -> Result<(), Error> {
        let statistics = self
            .statistics
            .iter()
            .map(|s| {
                log::debug!("Calculating {}", s.statistic);

                s.statistic
                    .calculate(&self.matrix, self.exclude_missing)
                    .map(|stat| format!("{stat:.precision$}", precision = s.precision))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.write_with_delimiter(statistics)
    }

    fn write_with_delimiter<I>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for (i, x) in items.into_iter().enumerate() {
            if i > 0 {
                write!(self.writer, "{}", self.delimiter)?;
            }
            write!(self.writer, "{x}")?;
        }
        writeln!(self.writer)?;

        Ok(())
    }
}

impl TryFrom<&Stat> for Runner<io::StdoutLock<'static>> {
    type Error = Error;

    fn try_from(args: &Stat) -> Result<Self, Self::Error> {
        let statistics = args.statistics_with_options()?;
        let matrix = args.matrix.read()?;

        Ok(Self {
            writer: io::stdout().lock(),
            matrix,
            statistics,
            header: args.header,
            delimiter: args.delimiter,
            exclude_missing: args.exclude_missing,
        })
    }
}
