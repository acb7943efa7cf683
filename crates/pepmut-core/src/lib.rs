//! # pepmut Core Library
//!
//! Analysis of deep-sequencing data from randomized peptide library selections. Reads are
//! translated in frame, filtered against the library design down to the parent peptide and
//! its single-point mutants, and two such pools (selected and reference) are compared
//! position by position to give a Y score for every mutant, with an Agresti-Coull
//! confidence interval propagated into the score.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Lookup tables, the library design, peptide matrices,
//!   translation and the file formats around them.
//!
//! - **[`engine`]: The Logic Core.** The library filter chain, the scoring functions,
//!   configuration, progress reporting and errors.
//!
//! - **[`workflows`]: The Public API.** `parse` turns reads into a filtered matrix, `score`
//!   turns two matrices into a score report.
//!
//! ## Scope
//!
//! Only fixed-length libraries are supported, and only reads at Hamming distance 0 or 1
//! from the parent are kept. Double and higher mutants are discarded.

pub mod core;
pub mod engine;
pub mod workflows;
