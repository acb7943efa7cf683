//! # Core Module
//!
//! Stateless building blocks of the analysis: lookup tables, the library design, peptide
//! matrices, in-frame translation and file formats.
//!
//! ## Architecture
//!
//! - **Lookup Tables** ([`tables`]) - Genetic code, amino-acid alphabet and sentinel symbols
//! - **Data Models** ([`models`]) - Library design and peptide matrices
//! - **Translation** ([`translation`]) - Reads to peptides, with stop and ambiguity handling
//! - **File I/O** ([`io`]) - FASTQ reads, peptide matrices and score tables on disk
//!
//! All tables are process-wide constants; nothing in this module holds mutable state.

pub mod io;
pub mod models;
pub mod tables;
pub mod translation;
