use crate::cli::ScoreArgs;
use crate::config::PartialAnalysisConfig;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use pepmut::{
    core::io::{
        peptide::PeptideMatrixFile,
        scores::{ScoreTable, ScoreTableFile},
        traits::ArtifactFile,
    },
    core::models::matrix::PeptideMatrix,
    workflows,
};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config =
        PartialAnalysisConfig::from_args(&args.library)?.merge_with_cli(&args.library, args.z)?;

    let positive = load_matrix(&args.positive)?;
    let negative = load_matrix(&args.negative)?;

    println!(
        "Scoring {} positive against {} negative peptides (z = {})...",
        positive.nrows(),
        negative.nrows(),
        config.scoring.z
    );
    let report = workflows::score::run(&positive, &negative, &config)?;

    let defaults = DefaultsConfig::default();
    let y_path = output_path(&args.output, defaults.y_suffix);
    let error_path = output_path(&args.output, defaults.error_suffix);
    write_table(&report.y_table(), &y_path)?;
    write_table(&report.error_table(), &error_path)?;

    println!("✓ Wild-type Y score: {:.4}", report.wild_type_y);
    if report.unobserved_cells() > 0 {
        println!(
            "  {} mutant(s) have no reads in the negative pool; their Y score is not finite.",
            report.unobserved_cells()
        );
    }
    println!("✓ Y scores written to: {}", y_path.display());
    println!("✓ Sampling errors written to: {}", error_path.display());
    Ok(())
}

fn load_matrix(path: &Path) -> Result<PeptideMatrix> {
    info!("Loading peptide matrix from {:?}", path);
    PeptideMatrixFile::read_from_path(path).map_err(|e| CliError::reading(path, e))
}

fn write_table(table: &ScoreTable, path: &Path) -> Result<()> {
    info!("Writing score table to {:?}", path);
    ScoreTableFile::write_to_path(table, path).map_err(|e| CliError::writing(path, e))
}

/// Appends `suffix` to the final component of `prefix`, e.g. `out/run1` -> `out/run1_Y.csv`.
fn output_path(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
