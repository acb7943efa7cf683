use crate::cli::ParseArgs;
use crate::config::PartialAnalysisConfig;
use crate::config::defaults::DefaultsConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use pepmut::{
    core::io::{
        fastq::{self, FastqSample},
        peptide::PeptideMatrixFile,
        scores,
        traits::ArtifactFile,
    },
    engine::{filter::FilterStats, progress::ProgressReporter},
    workflows,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// One line of the `--summary` CSV.
#[derive(Debug, Serialize)]
struct SampleSummary<'a> {
    sample: &'a str,
    input: usize,
    length_pass: usize,
    clean_pass: usize,
    retained: usize,
}

impl<'a> SampleSummary<'a> {
    fn new(sample: &'a str, stats: &FilterStats) -> Self {
        Self {
            sample,
            input: stats.input,
            length_pass: stats.length_pass,
            clean_pass: stats.clean_pass,
            retained: stats.retained,
        }
    }
}

pub fn run(args: ParseArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config =
        PartialAnalysisConfig::from_args(&args.library)?.merge_with_cli(&args.library, None)?;

    let paths = resolve_inputs(&args.inputs, &args.dir)?;
    check_unique_sample_names(&paths)?;
    std::fs::create_dir_all(&args.out_dir)?;
    let sources: Vec<FastqSample> = paths.into_iter().map(FastqSample::new).collect();

    println!(
        "Parsing {} sample(s) against template {}...",
        sources.len(),
        String::from_utf8_lossy(config.design.template())
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let outcomes = workflows::parse::run_batch(&sources, &config.design, &reporter);

    let suffix = DefaultsConfig::default().matrix_suffix;
    let mut summaries = Vec::new();
    let mut failed = 0;
    for outcome in &outcomes {
        let parsed = match &outcome.result {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("Sample '{}' failed: {}", outcome.name, e);
                eprintln!("✗ {}: {}", outcome.name, e);
                failed += 1;
                continue;
            }
        };

        let output_path = args.out_dir.join(format!("{}{}", outcome.name, suffix));
        info!("Writing {} rows to {:?}", parsed.matrix.nrows(), &output_path);
        PeptideMatrixFile::write_to_path(&parsed.matrix, &output_path)
            .map_err(|e| CliError::writing(&output_path, e))?;

        println!(
            "✓ {}: {} reads, {} full length, {} clean, {} retained -> {}",
            outcome.name,
            parsed.stats.input,
            parsed.stats.length_pass,
            parsed.stats.clean_pass,
            parsed.stats.retained,
            output_path.display()
        );
        summaries.push(SampleSummary::new(&outcome.name, &parsed.stats));
    }

    if let Some(summary_path) = &args.summary {
        info!("Writing filter summary to {:?}", summary_path);
        scores::write_records(&summaries, summary_path)
            .map_err(|e| CliError::writing(summary_path, e))?;
    }

    if failed > 0 {
        return Err(CliError::Batch {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

fn resolve_inputs(inputs: &[PathBuf], dir: &Path) -> Result<Vec<PathBuf>> {
    let paths = if inputs.is_empty() {
        info!("No inputs given, scanning {:?} for FASTQ files.", dir);
        fastq::discover_samples(dir).map_err(|e| CliError::reading(dir, e))?
    } else {
        inputs.to_vec()
    };

    if paths.is_empty() {
        return Err(CliError::Argument(format!(
            "No .{} files found in '{}'",
            fastq::FASTQ_EXTENSION,
            dir.display()
        )));
    }
    Ok(paths)
}

/// Each sample names its own output file, so two inputs may not share a sample name.
fn check_unique_sample_names(paths: &[PathBuf]) -> Result<()> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for path in paths {
        if let Some(first) = seen.insert(fastq::sample_name(path), path) {
            return Err(CliError::Argument(format!(
                "'{}' and '{}' share the sample name '{}' and would write the same output",
                first.display(),
                path.display(),
                fastq::sample_name(path)
            )));
        }
    }
    Ok(())
}
