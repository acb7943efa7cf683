use crate::core::io::traits::ReadSource;
use crate::core::models::design::LibraryDesign;
use crate::core::models::matrix::PeptideMatrix;
use crate::core::translation;
use crate::engine::error::EngineError;
use crate::engine::filter::{FilterStats, LibraryFilter};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A sample reduced to the parent and its single-point mutants over the variable region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSample {
    pub matrix: PeptideMatrix,
    pub stats: FilterStats,
}

#[derive(Debug)]
pub struct SampleOutcome {
    pub name: String,
    pub result: Result<ParsedSample, EngineError>,
}

/// Translates a batch of reads, builds its peptide matrix and runs the library filter chain.
///
/// A batch with no reads and a batch whose reads all fail the filters give the same
/// result: an empty matrix as wide as the variable region, with zeroed stats. Individual
/// malformed reads never fail the batch; they are flagged during translation and dropped
/// by the filters.
#[instrument(skip_all, name = "parse_workflow")]
pub fn run<S: AsRef<[u8]>>(
    reads: &[S],
    design: &LibraryDesign,
) -> Result<ParsedSample, EngineError> {
    if reads.is_empty() {
        warn!("Sample has no reads.");
        return Ok(ParsedSample {
            matrix: PeptideMatrix::empty(design.variable_positions().len()),
            stats: FilterStats::default(),
        });
    }

    let peptides = translation::translate_all(reads);
    let matrix = PeptideMatrix::from_peptides(&peptides)?;
    let outcome = LibraryFilter::new(design).apply(&matrix)?;

    if outcome.matrix.is_empty() {
        warn!(
            "None of {} reads matched the library design.",
            outcome.stats.input
        );
    }

    Ok(ParsedSample {
        matrix: outcome.matrix,
        stats: outcome.stats,
    })
}

/// Loads and parses every sample independently; one failing sample does not stop the rest.
///
/// With the `parallel` feature, samples are processed concurrently, each on its own buffers.
/// Outcomes are returned in input order.
#[instrument(skip_all, name = "parse_batch_workflow")]
pub fn run_batch<R>(
    sources: &[R],
    design: &LibraryDesign,
    reporter: &ProgressReporter,
) -> Vec<SampleOutcome>
where
    R: ReadSource + Sync,
{
    info!("Parsing {} sample(s).", sources.len());
    reporter.report(Progress::BatchStart {
        total_samples: sources.len() as u64,
    });

    let process = |source: &R| {
        let name = source.name();
        let result = source
            .reads()
            .map_err(|e| EngineError::ReadSource {
                sample: name.clone(),
                source: Box::new(e),
            })
            .and_then(|reads| run(&reads, design));

        match &result {
            Ok(parsed) => {
                info!(
                    "Sample '{}': {} of {} reads retained.",
                    name, parsed.stats.retained, parsed.stats.input
                );
                reporter.report(Progress::SampleFinish {
                    name: name.clone(),
                    retained: parsed.stats.retained,
                });
            }
            Err(e) => {
                warn!("Sample '{}' failed: {}", name, e);
                reporter.report(Progress::Message(format!("{}: {}", name, e)));
                reporter.report(Progress::SampleFinish {
                    name: name.clone(),
                    retained: 0,
                });
            }
        }
        SampleOutcome { name, result }
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<SampleOutcome> = sources.par_iter().map(process).collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<SampleOutcome> = sources.iter().map(process).collect();

    reporter.report(Progress::BatchFinish);
    outcomes
}
