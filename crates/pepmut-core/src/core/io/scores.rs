use super::traits::ArtifactFile;
use crate::core::tables::AMINO_ACIDS;
use nalgebra::DMatrix;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;

const LABEL_COLUMN: &str = "aa";

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Score table has {found} rows, expected one per amino acid ({expected})")]
    RowCount { expected: usize, found: usize },
    #[error("Malformed score table: {0}")]
    Format(String),
}

/// A per-(amino acid, position) table together with its axis labels.
///
/// Rows follow [`AMINO_ACIDS`]; columns are the randomized positions, labelled by the parent
/// residue and its 1-based index in the variable region.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    pub values: DMatrix<f64>,
    pub variable_region: Vec<u8>,
}

impl ScoreTable {
    pub fn column_labels(&self) -> Vec<String> {
        self.variable_region
            .iter()
            .enumerate()
            .map(|(i, &wt)| format!("{}{}", wt as char, i + 1))
            .collect()
    }
}

/// CSV rendering of a [`ScoreTable`]. NaN and infinite cells are written verbatim.
pub struct ScoreTableFile;

impl ArtifactFile for ScoreTableFile {
    type Data = ScoreTable;
    type Error = ScoreFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<ScoreTable, ScoreFileError> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.get(0) != Some(LABEL_COLUMN) {
            return Err(ScoreFileError::Format(format!(
                "first column must be '{}'",
                LABEL_COLUMN
            )));
        }
        let variable_region = headers
            .iter()
            .skip(1)
            .map(|label| {
                label
                    .bytes()
                    .next()
                    .ok_or_else(|| ScoreFileError::Format("empty column label".to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let mut values = DMatrix::from_element(AMINO_ACIDS.len(), variable_region.len(), f64::NAN);
        let mut found = 0;
        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            found += 1;
            if i >= AMINO_ACIDS.len() {
                continue;
            }
            let expected = AMINO_ACIDS[i] as char;
            if record.get(0) != Some(expected.to_string().as_str()) {
                return Err(ScoreFileError::Format(format!(
                    "row {} should be labelled '{}'",
                    i + 1,
                    expected
                )));
            }
            for (j, cell) in record.iter().skip(1).enumerate() {
                values[(i, j)] = cell.trim().parse().map_err(|_| {
                    ScoreFileError::Format(format!("invalid number '{}' in row {}", cell, i + 1))
                })?;
            }
        }
        if found != AMINO_ACIDS.len() {
            return Err(ScoreFileError::RowCount {
                expected: AMINO_ACIDS.len(),
                found,
            });
        }

        Ok(ScoreTable {
            values,
            variable_region,
        })
    }

    fn write_to(table: &ScoreTable, writer: &mut impl Write) -> Result<(), ScoreFileError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![LABEL_COLUMN.to_string()];
        header.extend(table.column_labels());
        csv_writer.write_record(&header)?;

        for (i, &aa) in AMINO_ACIDS.iter().enumerate() {
            let mut row = vec![(aa as char).to_string()];
            row.extend(table.values.row(i).iter().map(|v| v.to_string()));
            csv_writer.write_record(&row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Writes serializable records as a CSV file with a header row.
pub fn write_records<T: Serialize, P: AsRef<Path>>(
    records: &[T],
    path: P,
) -> Result<(), ScoreFileError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
