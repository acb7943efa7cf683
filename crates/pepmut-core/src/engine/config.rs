use super::scoring::DEFAULT_Z;
use crate::core::models::design::{DesignError, LibraryDesign};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid library design: {0}")]
    Design(#[from] DesignError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Standard normal quantile for the Agresti-Coull bounds.
    pub z: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { z: DEFAULT_Z }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub design: LibraryDesign,
    pub scoring: ScoringConfig,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    template: Option<String>,
    parent: Option<String>,
    z: Option<f64>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
    pub fn z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let template = self
            .template
            .ok_or(ConfigError::MissingParameter("template"))?;
        let parent = self.parent.ok_or(ConfigError::MissingParameter("parent"))?;
        let design = LibraryDesign::new(&template, &parent)?;

        let z = self.z.unwrap_or(DEFAULT_Z);
        if !z.is_finite() || z <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "z",
                reason: format!("must be a positive finite number, got {}", z),
            });
        }

        Ok(AnalysisConfig {
            design,
            scoring: ScoringConfig { z },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_uses_default_z_when_unset() {
        let config = AnalysisConfigBuilder::new()
            .template("AA11")
            .parent("AAWK")
            .build()
            .unwrap();
        assert_eq!(config.scoring.z, DEFAULT_Z);
        assert_eq!(config.design.variable_region(), b"WK");
    }

    #[test]
    fn build_reports_missing_template_and_parent() {
        assert_eq!(
            AnalysisConfigBuilder::new().parent("AAWK").build(),
            Err(ConfigError::MissingParameter("template"))
        );
        assert_eq!(
            AnalysisConfigBuilder::new().template("AA11").build(),
            Err(ConfigError::MissingParameter("parent"))
        );
    }

    #[test]
    fn build_rejects_non_positive_z() {
        for z in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = AnalysisConfigBuilder::new()
                .template("AA11")
                .parent("AAWK")
                .z(z)
                .build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter { name: "z", .. })
            ));
        }
    }

    #[test]
    fn build_propagates_design_errors() {
        let result = AnalysisConfigBuilder::new()
            .template("AA11")
            .parent("AAW")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Design(DesignError::LengthMismatch { .. }))
        ));
    }
}
