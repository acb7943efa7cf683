use crate::core::models::design::LibraryDesign;
use crate::core::models::matrix::{MatrixError, PeptideMatrix};
use crate::core::translation;
use tracing::debug;

/// Rows must differ from the parent at fewer than this many variable positions.
///
/// Only the parent itself and its single-point mutants survive; double and higher mutants
/// are discarded.
pub const MAX_MUTATIONS_EXCLUSIVE: usize = 2;

/// Row counts after each stage of the filter chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub input: usize,
    pub length_pass: usize,
    pub clean_pass: usize,
    pub retained: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Surviving rows, projected onto the variable region.
    pub matrix: PeptideMatrix,
    pub stats: FilterStats,
}

/// Reduces a translated batch to the interpretable members of a fixed-length library.
///
/// Stages run in a fixed order and never reorder surviving rows: exact length, clean
/// residues, projection onto randomized positions, Hamming distance to the parent.
#[derive(Debug, Clone, Copy)]
pub struct LibraryFilter<'a> {
    design: &'a LibraryDesign,
}

impl<'a> LibraryFilter<'a> {
    pub fn new(design: &'a LibraryDesign) -> Self {
        Self { design }
    }

    pub fn apply(&self, matrix: &PeptideMatrix) -> Result<FilterOutcome, MatrixError> {
        let input = matrix.nrows();

        let by_length = self.by_length(matrix);
        let clean = self.by_cleanliness(&by_length);
        let projected = self.project_variable_region(&clean)?;
        let retained = self.by_hamming_distance(&projected);

        let stats = FilterStats {
            input,
            length_pass: by_length.nrows(),
            clean_pass: clean.nrows(),
            retained: retained.nrows(),
        };
        debug!(
            "Filter chain: {} rows in, {} of length {}, {} clean, {} within {} mutation(s) of parent",
            stats.input,
            stats.length_pass,
            self.design.len(),
            stats.clean_pass,
            stats.retained,
            MAX_MUTATIONS_EXCLUSIVE - 1
        );

        Ok(FilterOutcome {
            matrix: retained,
            stats,
        })
    }

    /// Keeps rows with exactly `design.len()` non-pad cells.
    pub fn by_length(&self, matrix: &PeptideMatrix) -> PeptideMatrix {
        let lengths = matrix.row_lengths();
        matrix.retain_rows(|i| lengths[i] == self.design.len())
    }

    /// Keeps rows whose every non-pad cell is an alphabet residue.
    ///
    /// This rejects the ambiguity sentinel anywhere in the row, including past the
    /// variable region, as well as any stray symbol from an external matrix source.
    pub fn by_cleanliness(&self, matrix: &PeptideMatrix) -> PeptideMatrix {
        matrix.retain_rows(|i| translation::is_clean(&matrix.peptide(i)))
    }

    /// Narrows each row to the randomized positions, in template order.
    pub fn project_variable_region(
        &self,
        matrix: &PeptideMatrix,
    ) -> Result<PeptideMatrix, MatrixError> {
        matrix.project(self.design.variable_positions())
    }

    /// Keeps rows fewer than [`MAX_MUTATIONS_EXCLUSIVE`] substitutions away from the parent.
    pub fn by_hamming_distance(&self, matrix: &PeptideMatrix) -> PeptideMatrix {
        let distances = matrix.hamming_distances(self.design.variable_region());
        matrix.retain_rows(|i| distances[i] < MAX_MUTATIONS_EXCLUSIVE)
    }
}
