//! # Core Models Module
//!
//! Immutable data describing a library and the peptides sequenced from it.
//!
//! - [`design`] - The library layout: expected length, randomized positions and the parent
//!   peptide restricted to them.
//! - [`matrix`] - A batch of peptides as a right-padded residue grid, with the row and column
//!   selections the filter chain is built from.
//!
//! ```ignore
//! use pepmut::core::models::{design::LibraryDesign, matrix::PeptideMatrix};
//!
//! let design = LibraryDesign::new("LPENGA1111YPYDV", "LPENGAWKLRYPYDV")?;
//! let matrix = PeptideMatrix::from_peptides(&peptides)?;
//! assert_eq!(design.variable_region(), b"WKLR");
//! ```

pub mod design;
pub mod matrix;
