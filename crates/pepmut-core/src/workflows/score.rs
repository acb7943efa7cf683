use crate::core::io::scores::ScoreTable;
use crate::core::models::matrix::PeptideMatrix;
use crate::core::tables::AMINO_ACIDS;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::scoring::{self, ScoringError};
use nalgebra::DMatrix;
use tracing::{info, instrument, warn};

/// Y scores of every single-point mutant and their propagated sampling error.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    /// Enrichment per (amino acid, variable position); parent cells hold `wild_type_y`.
    pub y: DMatrix<f64>,
    /// One-sided error of each Y score, same shape as `y`.
    pub sampling_error: DMatrix<f64>,
    pub wild_type_y: f64,
    /// Column labels: the parent residue at each variable position.
    pub variable_region: Vec<u8>,
    pub positive_rows: usize,
    pub negative_rows: usize,
}

impl ScoreReport {
    /// Row labels shared by both matrices.
    pub fn alphabet(&self) -> &'static [u8] {
        &AMINO_ACIDS
    }

    pub fn y_table(&self) -> ScoreTable {
        ScoreTable {
            values: self.y.clone(),
            variable_region: self.variable_region.clone(),
        }
    }

    pub fn error_table(&self) -> ScoreTable {
        ScoreTable {
            values: self.sampling_error.clone(),
            variable_region: self.variable_region.clone(),
        }
    }

    /// Number of mutant cells with no reads in the negative pool.
    pub fn unobserved_cells(&self) -> usize {
        self.y.iter().filter(|v| !v.is_finite()).count()
    }
}

/// Scores a selected pool against a reference pool, both already filtered to the
/// variable region of `config.design`.
#[instrument(skip_all, name = "score_workflow")]
pub fn run(
    positive: &PeptideMatrix,
    negative: &PeptideMatrix,
    config: &AnalysisConfig,
) -> Result<ScoreReport, EngineError> {
    for (pool, sample) in [("positive", positive), ("negative", negative)] {
        if sample.is_empty() {
            warn!("The {} pool has no rows after filtering.", pool);
            return Err(ScoringError::EmptySample.into());
        }
    }

    let variable_region = config.design.variable_region();
    info!(
        "Scoring {} positive against {} negative peptides over {} variable position(s).",
        positive.nrows(),
        negative.nrows(),
        variable_region.len()
    );

    let (y, wild_type_y) =
        scoring::compute_y_with_wild_type(positive, negative, variable_region)?;
    let sampling_error = scoring::y_sampling_error(positive, negative, config.scoring.z)?;

    let report = ScoreReport {
        y,
        sampling_error,
        wild_type_y,
        variable_region: variable_region.to_vec(),
        positive_rows: positive.nrows(),
        negative_rows: negative.nrows(),
    };
    info!(
        "Wild-type Y score: {:.4}; {} cell(s) without reference reads.",
        report.wild_type_y,
        report.unobserved_cells()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::translation::encode;
    use crate::engine::config::AnalysisConfigBuilder;
    use crate::workflows::parse;

    fn config() -> AnalysisConfig {
        AnalysisConfigBuilder::new()
            .template("MA111G")
            .parent("MAWKLG")
            .build()
            .unwrap()
    }

    fn parsed(peptides: &[&str]) -> PeptideMatrix {
        let reads: Vec<Vec<u8>> = peptides
            .iter()
            .map(|p| encode(p.as_bytes()).unwrap())
            .collect();
        parse::run(&reads, &config().design).unwrap().matrix
    }

    #[test]
    fn reads_to_scores_end_to_end() {
        let positive = parsed(&["MAWKLG", "MAWKLG", "MAAKLG", "MAAKLG", "MACCLG"]);
        let negative = parsed(&["MAWKLG", "MAWKLG", "MAWKLG", "MAAKLG"]);
        let report = run(&positive, &negative, &config()).unwrap();

        assert_eq!(report.positive_rows, 4);
        assert_eq!(report.negative_rows, 4);
        assert_eq!(report.y.shape(), (20, 3));
        assert_eq!(report.sampling_error.shape(), (20, 3));

        let a = 0;
        let w = 18;
        assert!((report.wild_type_y - (0.5 / 0.75)).abs() < 1e-12);
        assert_eq!(report.y[(w, 0)], report.wild_type_y);
        assert_eq!(report.y[(a, 0)], 2.0);
        assert!(report.sampling_error[(a, 0)].is_finite());
        assert!(report.unobserved_cells() > 0);
    }

    #[test]
    fn identical_pools_score_one_at_wild_type() {
        let pool = parsed(&["MAWKLG", "MAAKLG", "MAWCLG"]);
        let report = run(&pool, &pool, &config()).unwrap();
        assert_eq!(report.wild_type_y, 1.0);
        assert!(report.y.iter().filter(|v| v.is_finite()).all(|&v| v == 1.0));
    }

    #[test]
    fn empty_pool_is_reported_as_error() {
        let positive = parsed(&["MAWKLG"]);
        let negative = parsed(&["MACCLG"]);
        assert!(matches!(
            run(&positive, &negative, &config()),
            Err(EngineError::Scoring {
                source: ScoringError::EmptySample
            })
        ));
    }

    #[test]
    fn tables_carry_axis_labels() {
        let pool = parsed(&["MAWKLG", "MAAKLG"]);
        let report = run(&pool, &pool, &config()).unwrap();
        let table = report.y_table();
        assert_eq!(table.column_labels(), vec!["W1", "K2", "L3"]);
        assert_eq!(report.alphabet().len(), 20);
        assert_eq!(report.error_table().values, report.sampling_error);
    }
}
