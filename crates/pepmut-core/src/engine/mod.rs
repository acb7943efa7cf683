//! # Engine Module
//!
//! The analysis logic that runs on top of the [`core`](crate::core) data models.
//!
//! ## Architecture
//!
//! - **Filtering** ([`filter`]) - The fixed-order library filter chain
//! - **Scoring** ([`scoring`]) - Frequencies, Y scores and Agresti-Coull error propagation
//! - **Configuration** ([`config`]) - Library design and scoring parameters
//! - **Progress Monitoring** ([`progress`]) - Callback-based event reporting
//! - **Error Handling** ([`error`]) - Aggregate error type of the workflows
//!
//! Every operation is a pure function of its inputs; nothing here is shared between calls.

pub mod config;
pub mod error;
pub mod filter;
pub mod progress;
pub mod scoring;
