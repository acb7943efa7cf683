use crate::core::tables::{self, PAD};
use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MatrixError {
    #[error("Cannot build a peptide matrix from an empty batch")]
    EmptyBatch,

    #[error("Column {column} is out of bounds for a matrix with {width} columns")]
    ColumnOutOfBounds { column: usize, width: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Count of positions at which two sequences differ.
///
/// Compares up to the shorter length; callers compare equal-length sequences.
pub fn hamming_distance(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// A batch of peptides as a dense (peptides x positions) grid of residue bytes.
///
/// Short rows are right-padded with [`PAD`]. Every filtering operation returns a new
/// matrix; a `PeptideMatrix` is never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeptideMatrix {
    cells: DMatrix<u8>,
}

impl PeptideMatrix {
    /// Right-pads every peptide to the longest one in the batch.
    pub fn from_peptides<S: AsRef<[u8]>>(peptides: &[S]) -> Result<Self, MatrixError> {
        let width = peptides
            .iter()
            .map(|p| p.as_ref().len())
            .max()
            .ok_or(MatrixError::EmptyBatch)?;

        let mut cells = DMatrix::from_element(peptides.len(), width, PAD);
        for (i, peptide) in peptides.iter().enumerate() {
            for (j, &residue) in peptide.as_ref().iter().enumerate() {
                cells[(i, j)] = residue;
            }
        }
        Ok(Self { cells })
    }

    /// Builds a matrix from equal-width rows. Unlike [`from_peptides`](Self::from_peptides),
    /// an empty set of rows is allowed as long as the width is known.
    pub fn from_rows<S: AsRef<[u8]>>(rows: &[S], width: usize) -> Result<Self, MatrixError> {
        for (row, r) in rows.iter().enumerate() {
            if r.as_ref().len() != width {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: width,
                    found: r.as_ref().len(),
                });
            }
        }
        let cells = DMatrix::from_fn(rows.len(), width, |i, j| rows[i].as_ref()[j]);
        Ok(Self { cells })
    }

    /// A matrix with no rows and `width` columns.
    pub fn empty(width: usize) -> Self {
        Self {
            cells: DMatrix::from_element(0, width, PAD),
        }
    }

    pub fn nrows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.nrows() == 0
    }

    pub fn row(&self, i: usize) -> Vec<u8> {
        self.cells.row(i).iter().copied().collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..self.nrows()).map(|i| self.row(i))
    }

    /// Row `i` with padding stripped.
    pub fn peptide(&self, i: usize) -> Vec<u8> {
        self.cells
            .row(i)
            .iter()
            .copied()
            .filter(|&c| c != PAD)
            .collect()
    }

    /// Non-pad cells per row.
    pub fn row_lengths(&self) -> Vec<usize> {
        self.cells
            .row_iter()
            .map(|row| row.iter().filter(|&&c| c != PAD).count())
            .collect()
    }

    /// Hamming distance of every row to `reference`.
    pub fn hamming_distances(&self, reference: &[u8]) -> Vec<usize> {
        self.rows()
            .map(|row| hamming_distance(&row, reference))
            .collect()
    }

    /// Rows for which `keep` holds, in their original order.
    pub fn retain_rows(&self, keep: impl Fn(usize) -> bool) -> Self {
        let selected: Vec<usize> = (0..self.nrows()).filter(|&i| keep(i)).collect();
        Self {
            cells: self.cells.select_rows(selected.iter()),
        }
    }

    /// The given columns, in the given order.
    pub fn project(&self, columns: &[usize]) -> Result<Self, MatrixError> {
        if self.nrows() > 0 {
            if let Some(&column) = columns.iter().find(|&&c| c >= self.ncols()) {
                return Err(MatrixError::ColumnOutOfBounds {
                    column,
                    width: self.ncols(),
                });
            }
        }
        let cells = DMatrix::from_fn(self.nrows(), columns.len(), |i, j| {
            self.cells[(i, columns[j])]
        });
        Ok(Self { cells })
    }

    /// Occurrences of each alphabet residue per column, shape (20 x ncols).
    pub fn residue_counts(&self) -> DMatrix<f64> {
        let mut counts = DMatrix::zeros(tables::AMINO_ACIDS.len(), self.ncols());
        for (j, column) in self.cells.column_iter().enumerate() {
            for aa in column.iter().filter_map(|&c| tables::amino_acid_index(c)) {
                counts[(aa, j)] += 1.0;
            }
        }
        counts
    }

    /// Number of rows identical to `sequence` across every column.
    pub fn count_exact(&self, sequence: &[u8]) -> usize {
        self.cells
            .row_iter()
            .filter(|row| row.len() == sequence.len() && row.iter().eq(sequence.iter()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_peptides_right_pads_to_longest() {
        let m = PeptideMatrix::from_peptides(&["MKL", "M", "MKLW"]).unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        assert_eq!(m.row(1), vec![b'M', PAD, PAD, PAD]);
        assert_eq!(m.peptide(0), b"MKL".to_vec());
        assert_eq!(m.row_lengths(), vec![3, 1, 4]);
    }

    #[test]
    fn from_peptides_fails_on_empty_batch() {
        let empty: [&str; 0] = [];
        assert_eq!(
            PeptideMatrix::from_peptides(&empty).unwrap_err(),
            MatrixError::EmptyBatch
        );
    }

    #[test]
    fn from_peptides_accepts_batch_of_empty_peptides() {
        let m = PeptideMatrix::from_peptides(&["", ""]).unwrap();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.ncols(), 0);
        assert_eq!(m.row_lengths(), vec![0, 0]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = PeptideMatrix::from_rows(&["AC", "A"], 2).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        let empty: [&str; 0] = [];
        let m = PeptideMatrix::from_rows(&empty, 5).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.ncols(), 5);
    }

    #[test]
    fn hamming_distance_is_symmetric_and_zero_only_on_match() {
        assert_eq!(hamming_distance(b"ACDE", b"ACDE"), 0);
        assert_eq!(hamming_distance(b"ACDE", b"ACDF"), 1);
        assert_eq!(hamming_distance(b"ACDF", b"ACDE"), 1);
        assert_eq!(hamming_distance(b"ACDE", b"KLMN"), 4);
    }

    #[test]
    fn hamming_distances_compare_every_row_to_reference() {
        let m = PeptideMatrix::from_rows(&["WKL", "AKL", "ACD"], 3).unwrap();
        assert_eq!(m.hamming_distances(b"WKL"), vec![0, 1, 3]);
        assert!(PeptideMatrix::empty(3).hamming_distances(b"WKL").is_empty());
    }

    #[test]
    fn empty_keeps_width_without_rows() {
        let m = PeptideMatrix::empty(4);
        assert!(m.is_empty());
        assert_eq!(m.ncols(), 4);
        assert_eq!(m.residue_counts().shape(), (20, 4));
    }

    #[test]
    fn retain_rows_preserves_order() {
        let m = PeptideMatrix::from_peptides(&["AA", "CC", "DD", "EE"]).unwrap();
        let kept = m.retain_rows(|i| i % 2 == 1);
        assert_eq!(kept.rows().collect::<Vec<_>>(), vec![b"CC".to_vec(), b"EE".to_vec()]);
        assert_eq!(m.nrows(), 4);
    }

    #[test]
    fn project_selects_columns_in_order() {
        let m = PeptideMatrix::from_peptides(&["ACDE", "KLMN"]).unwrap();
        let p = m.project(&[1, 3]).unwrap();
        assert_eq!(p.rows().collect::<Vec<_>>(), vec![b"CE".to_vec(), b"LN".to_vec()]);
        assert_eq!(
            m.project(&[4]).unwrap_err(),
            MatrixError::ColumnOutOfBounds {
                column: 4,
                width: 4
            }
        );
    }

    #[test]
    fn project_of_empty_matrix_yields_requested_width() {
        let m = PeptideMatrix::from_peptides(&["AC"]).unwrap().retain_rows(|_| false);
        let p = m.project(&[5, 6, 7]).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.ncols(), 3);
    }

    #[test]
    fn residue_counts_tally_per_column() {
        let m = PeptideMatrix::from_peptides(&["AC", "AD", "+C"]).unwrap();
        let counts = m.residue_counts();
        assert_eq!(counts.shape(), (20, 2));
        assert_eq!(counts[(0, 0)], 2.0);
        assert_eq!(counts[(1, 1)], 2.0);
        assert_eq!(counts[(2, 1)], 1.0);
        assert_eq!(counts.column(0).sum(), 2.0);
    }

    #[test]
    fn count_exact_requires_full_row_match() {
        let m = PeptideMatrix::from_peptides(&["WKL", "WKL", "WKA"]).unwrap();
        assert_eq!(m.count_exact(b"WKL"), 2);
        assert_eq!(m.count_exact(b"WK"), 0);
    }
}
