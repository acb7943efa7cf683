use super::traits::ReadSource;
use bio::io::fastq;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const FASTQ_EXTENSION: &str = "fastq";

#[derive(Debug, Error)]
pub enum FastqError {
    #[error("Cannot open '{path}': {source}")]
    Io {
        path: String,
        source: io::Error,
    },
    #[error("Malformed FASTQ record in '{path}': {source}")]
    Record {
        path: String,
        source: fastq::Error,
    },
}

/// Raw nucleotide sequences of every record in a single-read FASTQ file, in file order.
pub fn read_sequences(path: &Path) -> Result<Vec<Vec<u8>>, FastqError> {
    let file = File::open(path).map_err(|e| FastqError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let sequences = read_sequences_from(file).map_err(|e| FastqError::Record {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    debug!("Read {} sequences from {:?}", sequences.len(), path);
    Ok(sequences)
}

pub fn read_sequences_from(reader: impl io::Read) -> Result<Vec<Vec<u8>>, fastq::Error> {
    fastq::Reader::new(reader)
        .records()
        .map(|record| record.map(|r| r.seq().to_vec()))
        .collect()
}

/// A FASTQ file on disk, one sample per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqSample {
    path: PathBuf,
}

impl FastqSample {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadSource for FastqSample {
    type Error = FastqError;

    fn name(&self) -> String {
        sample_name(&self.path)
    }

    fn reads(&self) -> Result<Vec<Vec<u8>>, FastqError> {
        read_sequences(&self.path)
    }
}

/// Every `*.fastq` file directly inside `dir`, sorted by path.
pub fn discover_samples(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == FASTQ_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Sample name of a read file: its file name up to the first `.`.
pub fn sample_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .and_then(|n| n.split('.').next().map(str::to_string))
        .unwrap_or_default()
}
