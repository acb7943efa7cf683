//! Enrichment scoring of a selected ("positive") pool against a reference ("negative") pool.
//!
//! Every matrix produced here has shape (20 x variable positions), rows in
//! [`tables::AMINO_ACIDS`] order. Cells whose reference frequency is zero come out as NaN or
//! infinity. Those values mark mutants with no data and are passed through untouched.

use crate::core::models::matrix::PeptideMatrix;
use crate::core::tables;
use nalgebra::DMatrix;
use std::f64::consts::LN_2;
use thiserror::Error;

/// Two-sided 95% standard normal quantile.
pub const DEFAULT_Z: f64 = 1.96;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScoringError {
    #[error("Cannot compute frequencies for a sample with no rows")]
    EmptySample,

    #[error(
        "Shape mismatch: positive pool has {positive} columns, negative pool has {negative}, variable region has {variable_region}"
    )]
    ShapeMismatch {
        positive: usize,
        negative: usize,
        variable_region: usize,
    },

    #[error("Parent residue '{residue}' at variable position {position} is not in the amino-acid alphabet")]
    UnknownResidue { position: usize, residue: char },
}

/// Fraction of rows carrying each amino acid at each column.
///
/// Cells of the parent residue mix wild-type reads with every mutant at another
/// position; [`compute_y`] replaces them.
pub fn frequency_matrix(sample: &PeptideMatrix) -> Result<DMatrix<f64>, ScoringError> {
    if sample.is_empty() {
        return Err(ScoringError::EmptySample);
    }
    Ok(sample.residue_counts() / sample.nrows() as f64)
}

/// Fraction of rows identical to the parent over the whole variable region.
pub fn wild_type_frequency(
    sample: &PeptideMatrix,
    variable_region: &[u8],
) -> Result<f64, ScoringError> {
    if sample.is_empty() {
        return Err(ScoringError::EmptySample);
    }
    Ok(sample.count_exact(variable_region) as f64 / sample.nrows() as f64)
}

/// Y score of the parent peptide itself.
pub fn wild_type_y_score(
    positive: &PeptideMatrix,
    negative: &PeptideMatrix,
    variable_region: &[u8],
) -> Result<f64, ScoringError> {
    check_shapes(positive, negative, Some(variable_region))?;
    Ok(wild_type_frequency(positive, variable_region)?
        / wild_type_frequency(negative, variable_region)?)
}

/// Per-mutant enrichment: positive-pool frequency over negative-pool frequency.
///
/// Every parent-residue cell is then overwritten with [`wild_type_y_score`].
pub fn compute_y(
    positive: &PeptideMatrix,
    negative: &PeptideMatrix,
    variable_region: &[u8],
) -> Result<DMatrix<f64>, ScoringError> {
    compute_y_with_wild_type(positive, negative, variable_region).map(|(y, _)| y)
}

/// [`compute_y`] together with the wild-type Y score written into its parent cells.
pub fn compute_y_with_wild_type(
    positive: &PeptideMatrix,
    negative: &PeptideMatrix,
    variable_region: &[u8],
) -> Result<(DMatrix<f64>, f64), ScoringError> {
    check_shapes(positive, negative, Some(variable_region))?;
    let parent_rows = parent_rows(variable_region)?;

    let f_pos = frequency_matrix(positive)?;
    let f_neg = frequency_matrix(negative)?;
    let mut y = f_pos.component_div(&f_neg);

    let wt_y = wild_type_y_score(positive, negative, variable_region)?;
    for (position, aa) in parent_rows.into_iter().enumerate() {
        y[(aa, position)] = wt_y;
    }
    Ok((y, wt_y))
}

/// One-sided Agresti-Coull bound of a binomial proportion with `count` successes in `n` trials.
pub fn agresti_coull_bound(count: f64, n: f64, z: f64) -> f64 {
    let z2 = z * z;
    let p_hat = (count + 0.5 * z2) / (n + z2);
    z * (p_hat * (1.0 - p_hat) / (n + z2)).sqrt()
}

/// [`agresti_coull_bound`] applied to every cell of a count matrix.
pub fn agresti_coull_interval(counts: &DMatrix<f64>, n: f64, z: f64) -> DMatrix<f64> {
    counts.map(|c| agresti_coull_bound(c, n, z))
}

/// Sampling error of each Y score.
///
/// The Agresti-Coull bounds of both pools are taken relative to their frequencies, added in
/// quadrature and divided by ln 2.
pub fn y_sampling_error(
    positive: &PeptideMatrix,
    negative: &PeptideMatrix,
    z: f64,
) -> Result<DMatrix<f64>, ScoringError> {
    check_shapes(positive, negative, None)?;

    let relative_error = |sample: &PeptideMatrix| -> Result<DMatrix<f64>, ScoringError> {
        let f = frequency_matrix(sample)?;
        let n = sample.nrows() as f64;
        let ci = agresti_coull_interval(&(&f * n), n, z);
        Ok(ci.component_div(&f))
    };

    let rel_pos = relative_error(positive)?;
    let rel_neg = relative_error(negative)?;
    Ok(rel_pos.zip_map(&rel_neg, |p, n| (p * p + n * n).sqrt() / LN_2))
}

/// Row index of the parent residue at every variable position.
fn parent_rows(variable_region: &[u8]) -> Result<Vec<usize>, ScoringError> {
    variable_region
        .iter()
        .enumerate()
        .map(|(position, &residue)| {
            tables::amino_acid_index(residue).ok_or(ScoringError::UnknownResidue {
                position,
                residue: residue as char,
            })
        })
        .collect()
}

fn check_shapes(
    positive: &PeptideMatrix,
    negative: &PeptideMatrix,
    variable_region: Option<&[u8]>,
) -> Result<(), ScoringError> {
    let expected = variable_region.map_or(positive.ncols(), <[u8]>::len);
    if positive.ncols() != negative.ncols() || positive.ncols() != expected {
        return Err(ScoringError::ShapeMismatch {
            positive: positive.ncols(),
            negative: negative.ncols(),
            variable_region: expected,
        });
    }
    Ok(())
}
