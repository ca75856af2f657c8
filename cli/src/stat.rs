use std::fmt;

use anyhow::Error;

use clap::{CommandFactory, Parser, ValueEnum};

use charmat_core::CharacterMatrix;

use crate::args::MatrixArgs;

mod runner;
use runner::{Runner, StatisticWithOptions};

/// Calculate statistics from character matrix.
#[derive(Debug, Parser)]
pub struct Stat {
    #[command(flatten)]
    pub matrix: MatrixArgs,

    /// Delimiter between statistics.
    #[clap(short = 'd', long, default_value_t = ',', value_name = "CHAR")]
    pub delimiter: char,

    /// Include a header with the names of statistics.
    #[clap(short = 'H', long)]
    pub header: bool,

    /// Ignore missing and ambiguous states.
    ///
    /// By default, missing and ambiguous states are treated as any other state. By setting this
    /// flag, they are skipped when comparing states across taxa, and ambiguous sites are skipped
    /// when calculating GC content.
    #[clap(long)]
    pub exclude_missing: bool,

    /// Precision to use when printing statistics.
    ///
    /// If a single value is provided, this will be used for all statistics. If more than one
    /// statistic is calculated, the same number of precision specifiers may be provided, and they
    /// will be applied in the same order. Use comma to separate precision specifiers.
    #[clap(
        short = 'p',
        long,
        default_value = "6",
        use_value_delimiter = true,
        value_name = "INT,..."
    )]
    pub precision: Vec<usize>,

    /// Statistics to calculate.
    ///
    /// More than one statistic can be output. Use comma to separate statistics.
    /// An error will be thrown if the data type or number of taxa in the matrix is incompatible
    /// with the required statistics.
    #[clap(
        short = 's',
        long,
        value_enum,
        required = true,
        use_value_delimiter = true,
        value_name = "STAT,..."
    )]
    pub statistics: Vec<Statistic>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Statistic {
    /// Number of invariant sites.
    Invariant,
    /// Number of segregating sites. Complement of invariant sites.
    Segregating,
    /// Mean number of pairwise differences between taxa. At least two taxa required.
    PairwiseMean,
    /// Maximum number of pairwise differences between taxa. At least two taxa required.
    PairwiseMax,
    /// Minimum number of pairwise differences between taxa. At least two taxa required.
    PairwiseMin,
    /// Maximum GC content of a taxon. DNA and RNA only.
    GcMax,
    /// Minimum GC content of a taxon. DNA and RNA only.
    GcMin,
    /// Mean GC content over taxa. DNA and RNA only.
    GcMean,
    /// Variance of GC content over taxa. DNA and RNA only.
    GcVar,
    /// Length of the longest block of consecutive invariant sites.
    MaxInvariableBlock,
    /// Length of the longest block of consecutive variable sites.
    MaxVariableBlock,
    /// Number of blocks of consecutive invariant sites.
    InvariableBlocks,
    /// Number of sites where all states agree exactly.
    ConstantPatterns,
    /// Number of sites with a missing or ambiguous state in at least one taxon.
    MissingAmbiguous,
    /// Multinomial profile log-likelihood of the site patterns.
    ProfileLikelihood,
    /// Largest state index observed in any taxon.
    MaxStateIndex,
    /// Number of included taxa.
    Taxa,
    /// Number of included sites.
    Sites,
}

impl Statistic {
    pub fn calculate(self, matrix: &CharacterMatrix, exclude_missing: bool) -> Result<f64, Error> {
        Ok(match self {
            Statistic::Invariant => matrix.num_invariant_sites(exclude_missing) as f64,
            Statistic::Segregating => matrix.num_segregating_sites(exclude_missing) as f64,
            Statistic::PairwiseMean => matrix.average_pairwise_sequence_difference(exclude_missing)?,
            Statistic::PairwiseMax => {
                matrix.max_pairwise_sequence_difference(exclude_missing)? as f64
            }
            Statistic::PairwiseMin => {
                matrix.min_pairwise_sequence_difference(exclude_missing)? as f64
            }
            Statistic::GcMax => matrix.max_gc_content(exclude_missing)?,
            Statistic::GcMin => matrix.min_gc_content(exclude_missing)?,
            Statistic::GcMean => matrix.mean_gc_content(exclude_missing)?,
            Statistic::GcVar => matrix.var_gc_content(exclude_missing)?,
            Statistic::MaxInvariableBlock => {
                matrix.max_invariable_block_length(exclude_missing) as f64
            }
            Statistic::MaxVariableBlock => matrix.max_variable_block_length(exclude_missing) as f64,
            Statistic::InvariableBlocks => matrix.num_invariable_site_blocks(exclude_missing) as f64,
            Statistic::ConstantPatterns => matrix.num_constant_patterns() as f64,
            Statistic::MissingAmbiguous => matrix.num_missing_or_ambiguous() as f64,
            Statistic::ProfileLikelihood => matrix.multinomial_profile_likelihood(),
            Statistic::MaxStateIndex => matrix.max_observed_state_index() as f64,
            Statistic::Taxa => matrix.num_included_taxa() as f64,
            Statistic::Sites => matrix.num_included_characters() as f64,
        })
    }

    pub fn header_name(&self) -> &'static str {
        match self {
            Statistic::Invariant => "invariant_sites",
            Statistic::Segregating => "segregating_sites",
            Statistic::PairwiseMean => "pairwise_mean",
            Statistic::PairwiseMax => "pairwise_max",
            Statistic::PairwiseMin => "pairwise_min",
            Statistic::GcMax => "gc_max",
            Statistic::GcMin => "gc_min",
            Statistic::GcMean => "gc_mean",
            Statistic::GcVar => "gc_var",
            Statistic::MaxInvariableBlock => "max_invariable_block",
            Statistic::MaxVariableBlock => "max_variable_block",
            Statistic::InvariableBlocks => "invariable_blocks",
            Statistic::ConstantPatterns => "constant_patterns",
            Statistic::MissingAmbiguous => "missing_ambiguous",
            Statistic::ProfileLikelihood => "profile_likelihood",
            Statistic::MaxStateIndex => "max_state_index",
            Statistic::Taxa => "taxa",
            Statistic::Sites => "sites",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

impl Stat {
    fn statistics_with_options(&self) -> Result<Vec<StatisticWithOptions>, clap::Error> {
        match (&self.precision[..], &self.statistics[..]) {
            (&[precision], statistics) => Ok(statistics
                .iter()
                .map(|&s| StatisticWithOptions::new(s, precision))
                .collect()),
            (precisions, statistics) if precisions.len() == statistics.len() => Ok(statistics
                .iter()
                .zip(precisions.iter())
                .map(|(&s, &p)| StatisticWithOptions::new(s, p))
                .collect()),
            (precisions, statistics) => Err(Stat::command().error(
                clap::error::ErrorKind::ValueValidation,
                format!(
                    "number of precision specifiers must equal one \
                        or the number of statistics \
                        (found {} precision specifiers and {} statistics)",
                    precisions.len(),
                    statistics.len()
                ),
            )),
        }
    }

    pub fn run(self) -> Result<(), Error> {
        let mut runner = Runner::try_from(&self)?;
        runner.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::error::ErrorKind as ClapErrorKind;

    use crate::{
        args::DataTypeArg,
        tests::{parse_subcmd, try_parse_subcmd},
    };

    #[test]
    fn test_statistics_required() {
        let result = try_parse_subcmd::<Stat>("charmat stat input.fa");

        assert_eq!(
            result.unwrap_err().kind(),
            ClapErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_parse_statistics() {
        let args = parse_subcmd::<Stat>(
            "charmat stat -t protein -s segregating,pairwise-mean,gc-var -p 0,2,4 input.fa",
        );

        assert_eq!(
            args.statistics,
            vec![
                Statistic::Segregating,
                Statistic::PairwiseMean,
                Statistic::GcVar
            ]
        );
        assert_eq!(args.precision, vec![0, 2, 4]);
        assert_eq!(args.matrix.data_type, DataTypeArg::Protein);
        assert!(!args.exclude_missing);
    }

    #[test]
    fn test_single_precision_applies_to_all() {
        let args = parse_subcmd::<Stat>("charmat stat -s taxa,sites -p 2 input.fa");

        assert_eq!(
            args.statistics_with_options().unwrap(),
            vec![
                StatisticWithOptions::new(Statistic::Taxa, 2),
                StatisticWithOptions::new(Statistic::Sites, 2),
            ]
        );
    }

    #[test]
    fn test_precision_mismatch() {
        let args = parse_subcmd::<Stat>("charmat stat -s taxa,sites,invariant -p 2,3 input.fa");

        assert_eq!(
            args.statistics_with_options().unwrap_err().kind(),
            ClapErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_parse_masks() {
        let args = parse_subcmd::<Stat>(
            "charmat stat -s sites --exclude-taxa a,b --codon-position 1,2 input.fa",
        );

        assert_eq!(
            args.matrix.exclude_taxa,
            vec![String::from("a"), String::from("b")]
        );
        assert_eq!(args.matrix.codon_position, vec![1, 2]);
    }
}
