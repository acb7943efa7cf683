//! # Workflows Module
//!
//! Top-level entry points tying the [`core`](crate::core) models and the
//! [`engine`](crate::engine) together.
//!
//! - **Parse Workflow** ([`parse`]) - Raw reads to a filtered variable-region peptide
//!   matrix, for one sample or a batch of independent samples.
//! - **Score Workflow** ([`score`]) - Two filtered pools to Y scores and their sampling error.

pub mod parse;
pub mod score;
