//! Configuration management for sitenav.
//!
//! Parses `sitenav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `locales[].link`
//! - `locales[].navbar`
//! - `locales[].notes`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override source file verification.
    pub verify_sources: Option<bool>,
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sitenav.toml";

/// Project data directory, next to the config file.
const PROJECT_DIRNAME: &str = ".sitenav";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    docs: DocsConfigRaw,
    cache: CacheConfigRaw,
    /// Link classification settings.
    pub links: LinksConfig,
    locales: Vec<LocaleConfigRaw>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved locales in declaration order (set after loading).
    #[serde(skip)]
    pub locales_resolved: Vec<LocaleConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    verify_sources: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CacheConfigRaw {
    enabled: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LocaleConfigRaw {
    code: String,
    link: Option<String>,
    navbar: Option<String>,
    notes: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Content root used for source checks.
    pub source_dir: PathBuf,
    /// Project directory for sitenav data (`.sitenav/`).
    pub project_dir: PathBuf,
    /// Whether every page must have a source file.
    pub verify_sources: bool,
    /// Whether the navigation cache is enabled.
    pub cache_enabled: bool,
}

impl DocsConfig {
    /// Cache directory path (`.sitenav/cache/`).
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.project_dir.join("cache")
    }
}

/// Link classification configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Schemes marking a navbar link as external.
    pub external_schemes: Vec<String>,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            external_schemes: ["http", "https", "mailto", "tel"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// One locale with resolved declaration paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Locale code (e.g. `en`).
    pub code: String,
    /// Extra URL prefix of the locale.
    pub link: String,
    /// Navbar declaration file.
    pub navbar: Option<PathBuf>,
    /// Notes declaration file.
    pub notes: Option<PathBuf>,
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
        /// Config field path (e.g., "`locales[0].navbar`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// URI scheme name: a letter followed by letters, digits, `+`, `.` or `-`.
fn is_scheme_name(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sitenav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or validation fails.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(verify_sources) = settings.verify_sources {
            self.docs_resolved.verify_sources = verify_sources;
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.docs_resolved.cache_enabled = cache_enabled;
        }
    }

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

    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            cache: CacheConfigRaw::default(),
            links: LinksConfig::default(),
            locales: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                project_dir: base.join(PROJECT_DIRNAME),
                verify_sources: false,
                cache_enabled: true,
            },
            locales_resolved: Vec::new(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_links()?;
        self.validate_locales()?;
        Ok(())
    }

    fn validate_links(&self) -> Result<(), ConfigError> {
        for scheme in &self.links.external_schemes {
            if !is_scheme_name(scheme) {
                return Err(ConfigError::Validation(format!(
                    "links.external_schemes entry '{scheme}' is not a valid scheme name"
                )));
            }
        }
        Ok(())
    }

    fn validate_locales(&self) -> Result<(), ConfigError> {
        for (i, locale) in self.locales_resolved.iter().enumerate() {
            require_non_empty(&locale.code, &format!("locales[{i}].code"))?;
            if locale.navbar.is_none() && locale.notes.is_none() {
                return Err(ConfigError::Validation(format!(
                    "locales[{i}] ({}) must declare a navbar or notes file",
                    locale.code
                )));
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.docs.source_dir, "docs.source_dir")?;

        for (i, locale) in self.locales.iter_mut().enumerate() {
            expand::expand_opt(&mut locale.link, &format!("locales[{i}].link"))?;
            expand::expand_opt(&mut locale.navbar, &format!("locales[{i}].navbar"))?;
            expand::expand_opt(&mut locale.notes, &format!("locales[{i}].notes"))?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            project_dir: config_dir.join(PROJECT_DIRNAME),
            verify_sources: self.docs.verify_sources.unwrap_or(false),
            cache_enabled: self.cache.enabled.unwrap_or(true),
        };

        self.locales_resolved = self
            .locales
            .iter()
            .map(|locale| LocaleConfig {
                code: locale.code.clone(),
                link: locale.link.clone().unwrap_or_default(),
                navbar: locale.navbar.as_deref().map(|p| config_dir.join(p)),
                notes: locale.notes.as_deref().map(|p| config_dir.join(p)),
            })
            .collect();
    }
}
