pub mod defaults;

use crate::cli::LibraryArgs;
use crate::error::{CliError, Result};
use defaults::DefaultsConfig;
use pepmut::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialLibraryConfig {
    template: Option<String>,
    parent: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialScoringConfig {
    z: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    library: Option<PartialLibraryConfig>,
    scoring: Option<PartialScoringConfig>,
}

impl PartialAnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::reading(path, e))
    }

    /// Loads the file named by `--config`, or starts from an empty configuration.
    pub fn from_args(args: &LibraryArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Precedence, highest first: dedicated CLI flags, `--set` values, the config file,
    /// built-in defaults.
    pub fn merge_with_cli(
        mut self,
        args: &LibraryArgs,
        z_override: Option<f64>,
    ) -> Result<core_config::AnalysisConfig> {
        self.apply_set_values(&args.set_values)?;

        let library = self.library.take().unwrap_or_default();
        let scoring = self.scoring.take().unwrap_or_default();

        let template = args.template.clone().or(library.template).ok_or_else(|| {
            CliError::Config(
                "A library template is required, via `--template` or `library.template`."
                    .to_string(),
            )
        })?;
        let parent = args.parent.clone().or(library.parent).ok_or_else(|| {
            CliError::Config(
                "A parent sequence is required, via `--parent` or `library.parent`.".to_string(),
            )
        })?;
        let z = z_override
            .or(scoring.z)
            .unwrap_or(DefaultsConfig::default().z);

        core_config::AnalysisConfigBuilder::new()
            .template(template)
            .parent(parent)
            .z(z)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "library.template" => {
                    self.library.get_or_insert_with(Default::default).template =
                        Some(value_str.to_string());
                }
                "library.parent" => {
                    self.library.get_or_insert_with(Default::default).parent =
                        Some(value_str.to_string());
                }
                "scoring.z" => {
                    self.scoring.get_or_insert_with(Default::default).z =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid float value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_config_file(dir: &TempDir, content: &str) -> PathBuf {
        let file_path = dir.path().join("pepmut.toml");
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn score_args(extra: &[&str]) -> crate::cli::ScoreArgs {
        let mut args = vec![
            "pepmut",
            "score",
            "--positive",
            "pos_as_P.txt",
            "--negative",
            "neg_as_P.txt",
            "-o",
            "out",
        ];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Score(score_args) => score_args,
            _ => panic!("Expected 'score' subcommand"),
        }
    }

    #[test]
    fn load_from_file_and_merge_with_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [library]
            template = "LPENGA1111YPYDV"
            parent = "LPENGAWKLRYPYDV"
            "#,
        );
        let args = score_args(&["-c", path.to_str().unwrap()]);

        let config = PartialAnalysisConfig::from_args(&args.library)
            .unwrap()
            .merge_with_cli(&args.library, args.z)
            .unwrap();
        assert_eq!(config.design.variable_region(), b"WKLR");
        assert_eq!(config.scoring.z, 1.96);
    }

    #[test]
    fn cli_args_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [library]
            template = "AA11"
            parent = "AAWK"

            [scoring]
            z = 1.0
            "#,
        );
        let args = score_args(&[
            "-c",
            path.to_str().unwrap(),
            "--template",
            "A111",
            "--parent",
            "ACDE",
            "-z",
            "2.58",
        ]);

        let config = PartialAnalysisConfig::from_args(&args.library)
            .unwrap()
            .merge_with_cli(&args.library, args.z)
            .unwrap();
        assert_eq!(config.design.variable_region(), b"CDE");
        assert_eq!(config.scoring.z, 2.58);
    }

    #[test]
    fn set_value_overrides_file_but_not_flags() {
        let dir = tempdir().unwrap();
        let path = write_config_file(
            &dir,
            r#"
            [library]
            template = "AA11"
            parent = "AAWK"

            [scoring]
            z = 1.0
            "#,
        );
        let args = score_args(&[
            "-c",
            path.to_str().unwrap(),
            "-S",
            "scoring.z=3.0",
            "-S",
            "library.parent=AACC",
        ]);

        let config = PartialAnalysisConfig::from_args(&args.library)
            .unwrap()
            .merge_with_cli(&args.library, args.z)
            .unwrap();
        assert_eq!(config.scoring.z, 3.0);
        assert_eq!(config.design.variable_region(), b"CC");

        let args = score_args(&["-c", path.to_str().unwrap(), "-S", "scoring.z=3.0", "-z", "2.0"]);
        let config = PartialAnalysisConfig::from_args(&args.library)
            .unwrap()
            .merge_with_cli(&args.library, args.z)
            .unwrap();
        assert_eq!(config.scoring.z, 2.0);
    }

    #[test]
    fn missing_parent_returns_config_error() {
        let args = score_args(&["--template", "AA11"]);
        let result = PartialAnalysisConfig::from_args(&args.library)
            .unwrap()
            .merge_with_cli(&args.library, args.z);
        match result {
            Err(CliError::Config(msg)) => assert!(msg.contains("parent")),
            other => panic!("Expected config error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn invalid_design_and_set_keys_are_rejected() {
        let args = score_args(&["--template", "AA11", "--parent", "AAW"]);
        let result = PartialAnalysisConfig::default().merge_with_cli(&args.library, None);
        assert!(matches!(result, Err(CliError::Config(_))));

        let args = score_args(&["--template", "AA11", "--parent", "AAWK", "-S", "scoring.alpha=1"]);
        let result = PartialAnalysisConfig::default().merge_with_cli(&args.library, None);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("scoring.alpha")));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write_config_file(&dir, "[library]\nscaffold = \"AA\"\n");
        assert!(matches!(
            PartialAnalysisConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
