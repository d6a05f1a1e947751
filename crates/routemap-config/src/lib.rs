//! Configuration management for routemap.
//!
//! Parses `routemap.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [manifest]
//! path = "${SITE_DIR:-.}/.docusaurus/routes.js"
//! format = "auto"
//!
//! [matching]
//! case_sensitive = true
//! strict_trailing_slash = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `manifest.path` supports `${VAR}`, `${VAR:-default}` and a leading `~`.

mod expand;

use std::path::{Path, PathBuf};

use routemap_table::{ManifestFormat, MatchOptions};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override manifest path.
    pub manifest_path: Option<PathBuf>,
    /// Override manifest format.
    pub format: Option<ManifestFormat>,
    /// Override case-sensitive matching.
    pub case_sensitive: Option<bool>,
    /// Override strict trailing slash matching.
    pub strict_trailing_slash: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "routemap.toml";

/// Manifest location used when none is configured.
const DEFAULT_MANIFEST_PATH: &str = ".docusaurus/routes.js";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest configuration (path is a relative string from TOML).
    manifest: ManifestConfigRaw,
    /// Path matching options.
    pub matching: MatchOptions,

    /// Resolved manifest configuration (set after loading).
    #[serde(skip)]
    pub manifest_resolved: ManifestConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw manifest configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ManifestConfigRaw {
    path: Option<String>,
    format: ManifestFormat,
}

/// Resolved manifest configuration with an absolute path.
#[derive(Debug, Default)]
pub struct ManifestConfig {
    /// Route manifest file.
    pub path: PathBuf,
    /// Manifest format.
    pub format: ManifestFormat,
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
        /// Config field path (e.g., "`manifest.path`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `routemap.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(path) = &settings.manifest_path {
            self.manifest_resolved.path.clone_from(path);
        }
        if let Some(format) = settings.format {
            self.manifest_resolved.format = format;
        }
        if let Some(case_sensitive) = settings.case_sensitive {
            self.matching.case_sensitive = case_sensitive;
        }
        if let Some(strict) = settings.strict_trailing_slash {
            self.matching.strict_trailing_slash = strict;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    /// Search for config file starting at `dir` and walking up.
    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            manifest: ManifestConfigRaw::default(),
            matching: MatchOptions::default(),
            manifest_resolved: ManifestConfig {
                path: base.join(DEFAULT_MANIFEST_PATH),
                format: ManifestFormat::Auto,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(config = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.manifest.path
            && path.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "manifest.path cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.manifest.path {
            self.manifest.path = Some(expand::expand_env(path, "manifest.path")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let path = self
            .manifest
            .path
            .as_deref()
            .unwrap_or(DEFAULT_MANIFEST_PATH);

        self.manifest_resolved = ManifestConfig {
            path: config_dir.join(path),
            format: self.manifest.format,
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(
            config.manifest_resolved.path,
            PathBuf::from("/site/.docusaurus/routes.js")
        );
        assert_eq!(config.manifest_resolved.format, ManifestFormat::Auto);
        assert_eq!(config.matching, MatchOptions::default());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.manifest.path.is_none());
        assert_eq!(config.manifest.format, ManifestFormat::Auto);
        assert!(config.matching.case_sensitive);
        assert!(!config.matching.strict_trailing_slash);
    }

    #[test]
    fn test_parse_manifest_config() {
        let toml = r#"
[manifest]
path = "build/routes.json"
format = "json"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.manifest.path.as_deref(), Some("build/routes.json"));
        assert_eq!(config.manifest.format, ManifestFormat::Json);
    }

    #[test]
    fn test_parse_routes_js_format() {
        let toml = r#"
[manifest]
format = "routes-js"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.manifest.format, ManifestFormat::RoutesJs);
    }

    #[test]
    fn test_parse_unknown_format_fails() {
        let toml = r#"
[manifest]
format = "yaml"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_matching_config() {
        let toml = r"
[matching]
case_sensitive = false
strict_trailing_slash = true
";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.matching,
            MatchOptions {
                case_sensitive: false,
                strict_trailing_slash: true,
            }
        );
    }

    #[test]
    fn test_parse_partial_matching_config() {
        let toml = r"
[matching]
strict_trailing_slash = true
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.matching.case_sensitive);
        assert!(config.matching.strict_trailing_slash);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[manifest]
path = "build/routes.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/site"));
        assert_eq!(
            config.manifest_resolved.path,
            PathBuf::from("/site/build/routes.json")
        );
    }

    #[test]
    fn test_resolve_paths_default_manifest() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/site"));
        assert_eq!(
            config.manifest_resolved.path,
            PathBuf::from("/site/.docusaurus/routes.js")
        );
    }

    #[test]
    fn test_resolve_paths_absolute_manifest() {
        let toml = r#"
[manifest]
path = "/var/www/routes.js"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/site"));
        assert_eq!(
            config.manifest_resolved.path,
            PathBuf::from("/var/www/routes.js")
        );
    }

    #[test]
    fn test_validate_empty_manifest_path() {
        let toml = r#"
[manifest]
path = "  "
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("manifest.path"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("routemap.toml");
        std::fs::write(
            &config_path,
            r#"
[manifest]
path = "build/routes.json"

[matching]
case_sensitive = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(
            config.manifest_resolved.path,
            temp_dir.path().join("build/routes.json")
        );
        assert!(!config.matching.case_sensitive);
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_explicit_file_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("missing.toml");

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("routemap.toml");
        std::fs::write(&config_path, "[manifest\npath = ").unwrap();

        let result = Config::load(Some(&config_path), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_expands_env_vars() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("routemap.toml");
        std::fs::write(
            &config_path,
            r#"
[manifest]
path = "${ROUTEMAP_TEST_BUILD_DIR:-build}/routes.js"
"#,
        )
        .unwrap();

        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("ROUTEMAP_TEST_BUILD_DIR");
        }
        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(
            config.manifest_resolved.path,
            temp_dir.path().join("build/routes.js")
        );
    }

    #[test]
    fn test_discover_config_in_parent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("routemap.toml");
        std::fs::write(&config_path, "").unwrap();
        let nested = temp_dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();

        let discovered = Config::discover_config_from(nested);

        assert_eq!(discovered, Some(config_path));
    }

    #[test]
    fn test_apply_cli_settings_manifest_path() {
        let mut config = Config::default_with_base(Path::new("/site"));

        let overrides = CliSettings {
            manifest_path: Some(PathBuf::from("/custom/routes.json")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.manifest_resolved.path,
            PathBuf::from("/custom/routes.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_format() {
        let mut config = Config::default_with_base(Path::new("/site"));

        let overrides = CliSettings {
            format: Some(ManifestFormat::Json),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.manifest_resolved.format, ManifestFormat::Json);
    }

    #[test]
    fn test_apply_cli_settings_matching() {
        let mut config = Config::default_with_base(Path::new("/site"));

        let overrides = CliSettings {
            case_sensitive: Some(false),
            strict_trailing_slash: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.matching.case_sensitive);
        assert!(config.matching.strict_trailing_slash);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/site"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.manifest_resolved.path,
            PathBuf::from("/site/.docusaurus/routes.js")
        );
        assert_eq!(config.manifest_resolved.format, ManifestFormat::Auto);
        assert_eq!(config.matching, MatchOptions::default());
    }
}
