//! Configuration management for bibref.
//!
//! Parses `bibref.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Overrides from the embedding tool can be applied during load via [`Overrides`].
//!
//! ## Environment Variable Expansion
//!
//! `bibliography.path` supports `~` and environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the bibliography file path.
    pub bibliography: Option<PathBuf>,
    /// Override GFM extensions flag.
    pub gfm: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bibref.toml";

/// Bibliography filename used when none is configured.
const DEFAULT_BIBLIOGRAPHY: &str = "literature.bib";

/// Plugin configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bibliography configuration (path is a relative string from TOML).
    bibliography: BibliographyConfigRaw,
    /// Markdown rendering configuration.
    pub markdown: MarkdownConfig,

    /// Resolved bibliography configuration (set after loading).
    #[serde(skip)]
    pub bibliography_resolved: BibliographyConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw bibliography configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BibliographyConfigRaw {
    path: Option<String>,
}

/// Resolved bibliography configuration.
#[derive(Debug, Default)]
pub struct BibliographyConfig {
    /// BibTeX source file.
    pub path: PathBuf,
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub-flavored extensions (tables, strikethrough, task lists).
    pub gfm: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`bibliography.path`").
        field: String,
        /// Error message (e.g., "${`BIB_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `bibref.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(path) = &overrides.bibliography {
            self.bibliography_resolved.path.clone_from(path);
        }
        if let Some(gfm) = overrides.gfm {
            self.markdown.gfm = gfm;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            bibliography: BibliographyConfigRaw::default(),
            markdown: MarkdownConfig::default(),
            bibliography_resolved: BibliographyConfig {
                path: base.join(DEFAULT_BIBLIOGRAPHY),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.bibliography.path
            && path.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "bibliography.path cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.bibliography.path {
            self.bibliography.path = Some(expand::expand_env(path, "bibliography.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let path = self
            .bibliography
            .path
            .as_deref()
            .unwrap_or(DEFAULT_BIBLIOGRAPHY);

        self.bibliography_resolved = BibliographyConfig {
            path: config_dir.join(path),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.bibliography_resolved.path,
            PathBuf::from("/test/literature.bib")
        );
        assert!(config.markdown.gfm);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.bibliography.path.is_none());
        assert!(config.markdown.gfm);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[bibliography]
path = "refs/thesis.bib"

[markdown]
gfm = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bibliography.path.as_deref(), Some("refs/thesis.bib"));
        assert!(!config.markdown.gfm);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[bibliography]
path = "refs/thesis.bib"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.bibliography_resolved.path,
            PathBuf::from("/project/refs/thesis.bib")
        );
    }

    #[test]
    fn test_resolve_default_path() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.bibliography_resolved.path,
            PathBuf::from("/project/literature.bib")
        );
    }

    #[test]
    fn test_validate_empty_path() {
        let toml = r#"
[bibliography]
path = "  "
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("bibliography.path"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &config_path,
            "[bibliography]\npath = \"${BIBREF_TEST_SURELY_UNSET_VAR:-refs.bib}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.bibliography_resolved.path, dir.path().join("refs.bib"));
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::load(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(path) if path == missing));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[bibliography\n").unwrap();

        let err = Config::load(Some(&config_path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "[markdown]\ngfm = true\n").unwrap();

        let overrides = Overrides {
            bibliography: Some(PathBuf::from("/elsewhere/other.bib")),
            gfm: Some(false),
        };
        let config = Config::load(Some(&config_path), Some(&overrides)).unwrap();

        assert_eq!(
            config.bibliography_resolved.path,
            PathBuf::from("/elsewhere/other.bib")
        );
        assert!(!config.markdown.gfm);
    }
}
