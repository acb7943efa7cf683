use super::traits::ArtifactFile;
use crate::core::models::matrix::{MatrixError, PeptideMatrix};
use crate::core::tables::PAD;
use std::io::{self, BufRead, Write};
use thiserror::Error;

const SHAPE_TAG: &str = "#shape";
const PAD_CHAR: u8 = b'-';

#[derive(Debug, Error)]
pub enum PeptideFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Missing '#shape <rows> <cols>' header line")]
    MissingHeader,
    #[error("Malformed shape header: '{0}'")]
    InvalidHeader(String),
    #[error("Header declares {expected} rows but file holds {found}")]
    RowCount { expected: usize, found: usize },
    #[error("Invalid matrix body: {0}")]
    Matrix(#[from] MatrixError),
}

/// Plain-text peptide matrix: a `#shape <rows> <cols>` header, then one row per line.
///
/// Pad cells are written as `-`. The header keeps the column count of matrices with no
/// rows, which a filtered sample may legitimately have.
pub struct PeptideMatrixFile;

impl ArtifactFile for PeptideMatrixFile {
    type Data = PeptideMatrix;
    type Error = PeptideFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<PeptideMatrix, PeptideFileError> {
        let mut lines = reader.lines();

        let header = lines.next().ok_or(PeptideFileError::MissingHeader)??;
        let (rows, cols) = parse_header(&header)?;

        let mut body = Vec::with_capacity(rows);
        for line in lines {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() && cols > 0 {
                continue;
            }
            body.push(
                line.bytes()
                    .map(|c| if c == PAD_CHAR { PAD } else { c })
                    .collect::<Vec<u8>>(),
            );
        }
        if body.len() != rows {
            return Err(PeptideFileError::RowCount {
                expected: rows,
                found: body.len(),
            });
        }
        Ok(PeptideMatrix::from_rows(&body, cols)?)
    }

    fn write_to(matrix: &PeptideMatrix, writer: &mut impl Write) -> Result<(), PeptideFileError> {
        writeln!(writer, "{} {} {}", SHAPE_TAG, matrix.nrows(), matrix.ncols())?;
        for row in matrix.rows() {
            let line: Vec<u8> = row
                .into_iter()
                .map(|c| if c == PAD { PAD_CHAR } else { c })
                .collect();
            writer.write_all(&line)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

fn parse_header(line: &str) -> Result<(usize, usize), PeptideFileError> {
    let mut fields = line.split_whitespace();
    if fields.next() != Some(SHAPE_TAG) {
        return Err(PeptideFileError::MissingHeader);
    }
    let invalid = || PeptideFileError::InvalidHeader(line.to_string());
    let rows = fields.next().and_then(|f| f.parse().ok()).ok_or_else(invalid)?;
    let cols = fields.next().and_then(|f| f.parse().ok()).ok_or_else(invalid)?;
    if fields.next().is_some() {
        return Err(invalid());
    }
    Ok((rows, cols))
}
