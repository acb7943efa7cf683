//! Read sources and persistence sinks around the analysis core.
//!
//! - [`fastq`] pulls raw reads out of single-read FASTQ files and discovers sample files.
//! - [`peptide`] stores filtered peptide matrices as plain text.
//! - [`scores`] stores score and error matrices as labelled CSV tables.
//!
//! Everything here is a thin wrapper: the translation, filtering and scoring code never
//! touches the filesystem.

pub mod fastq;
pub mod peptide;
pub mod scores;
pub mod traits;
