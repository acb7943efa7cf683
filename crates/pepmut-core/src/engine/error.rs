use super::config::ConfigError;
use super::scoring::ScoringError;
use crate::core::models::design::DesignError;
use crate::core::models::matrix::MatrixError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid library design: {source}")]
    Design {
        #[from]
        source: DesignError,
    },

    #[error("Peptide matrix error: {source}")]
    Matrix {
        #[from]
        source: MatrixError,
    },

    #[error("Scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Failed to load reads for sample '{sample}': {source}")]
    ReadSource {
        sample: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
