use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::batch::DEFAULT_BATCH_SIZE;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "shipref-filter.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LookupConfig {
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments placed between the program and the subcommand.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_subcommand")]
    pub subcommand: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_program() -> String {
    "bem".to_string()
}

fn default_subcommand() -> String {
    "getref".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: Vec::new(),
            subcommand: default_subcommand(),
            batch_size: default_batch_size(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), otherwise the default config
    /// file when present, otherwise built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    tracing::debug!(path = %path.display(), "loading default config file");
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply command line / environment overrides on top of the file values.
    pub fn with_overrides(mut self, program: Option<String>, batch_size: Option<usize>) -> Self {
        if let Some(program) = program {
            self.lookup.program = program;
        }
        if let Some(size) = batch_size {
            self.lookup.batch_size = size;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookup.batch_size == 0 {
            anyhow::bail!("lookup.batch_size must be > 0");
        }
        if self.lookup.program.trim().is_empty() {
            anyhow::bail!("lookup.program cannot be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.lookup.program, "bem");
        assert_eq!(config.lookup.subcommand, "getref");
        assert_eq!(config.lookup.batch_size, 100);
        assert!(config.lookup.args.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.lookup.program, "bem");
        assert_eq!(config.lookup.batch_size, 100);
    }

    #[test]
    fn test_partial_section_parses() {
        let config = Config::parse(
            r#"
            [lookup]
            program = "/usr/local/bin/bem"
            batch_size = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.lookup.program, "/usr/local/bin/bem");
        assert_eq!(config.lookup.batch_size, 25);
        assert_eq!(config.lookup.subcommand, "getref");
    }

    #[test]
    fn test_overrides_win() {
        let config = Config::parse("[lookup]\nbatch_size = 25\n")
            .unwrap()
            .with_overrides(Some("fake-bem".to_string()), Some(10));
        assert_eq!(config.lookup.program, "fake-bem");
        assert_eq!(config.lookup.batch_size, 10);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = Config::default().with_overrides(None, Some(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(Config::parse("[lookup\nprogram = ").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::resolve(Some(Path::new("/nonexistent/shipref.toml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
