use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Alex Vinogradov",
    version,
    about = "pepmut - Y-score analysis of randomized peptide library selections from deep-sequencing reads.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to parse samples in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate and filter FASTQ reads into variable-region peptide matrices, one per sample.
    Parse(ParseArgs),
    /// Compute Y scores and their sampling error from a positive and a negative peptide matrix.
    Score(ScoreArgs),
}

/// Library design options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct LibraryArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Library template: amino acids for constant positions, digits for randomized ones
    /// (e.g. 'LPENGA1111YPYDV'). Overrides the config file.
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Parent peptide, same length as the template. Overrides the config file.
    #[arg(short, long, value_name = "SEQUENCE")]
    pub parent: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scoring.z=2.58
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

/// Arguments for the `parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub library: LibraryArgs,

    /// FASTQ files to parse. If none are given, every *.fastq file in --dir is parsed.
    #[arg(value_name = "FASTQ")]
    pub inputs: Vec<PathBuf>,

    /// Directory scanned for *.fastq files when no inputs are given.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Directory receiving one '<sample>_as_P.txt' matrix per sample.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write per-sample filter statistics to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub library: LibraryArgs,

    /// Peptide matrix of the selected (positive) pool.
    #[arg(long, required = true, value_name = "PATH")]
    pub positive: PathBuf,

    /// Peptide matrix of the reference (negative) pool.
    #[arg(long, required = true, value_name = "PATH")]
    pub negative: PathBuf,

    /// Output prefix; writes '<PREFIX>_Y.csv' and '<PREFIX>_I.csv'.
    #[arg(short, long, required = true, value_name = "PREFIX")]
    pub output: PathBuf,

    /// Standard normal quantile for the confidence intervals. Overrides the config file.
    #[arg(short, long, value_name = "FLOAT")]
    pub z: Option<f64>,
}
