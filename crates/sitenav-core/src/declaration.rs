//! Declaration file loading.
//!
//! Navbar and notes declarations are read from YAML, JSON or TOML files,
//! chosen by extension. Every format goes through the same untyped tree so
//! malformed nodes are reported identically.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Violations;
use crate::navbar::NavbarRegistry;
use crate::notes::NotesRegistry;
use crate::shape;

/// Error loading a declaration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Declaration file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// File is not valid YAML, JSON or TOML.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Declaration file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Extension is not one of `yaml`, `yml`, `json` or `toml`.
    #[error("unsupported declaration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// File parsed but declares an invalid navigation.
    #[error("invalid declaration {}: {violations}", path.display())]
    Invalid {
        /// Declaration file path.
        path: PathBuf,
        /// Every violation found in the file.
        violations: Violations,
    },
}

/// Serialization format of a declaration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl DeclarationFormat {
    /// Detect the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse `text` into an untyped tree.
    pub fn parse(self, text: &str) -> Result<Value, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// Contents of one declaration file.
#[derive(Clone, Debug)]
pub struct DeclarationFile {
    path: PathBuf,
    format: DeclarationFormat,
    contents: String,
}

impl DeclarationFile {
    /// Read a declaration file from disk.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let contents = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        Self::from_contents(path, contents)
    }

    /// Wrap already-read contents, detecting the format from `path`.
    pub fn from_contents(path: impl Into<PathBuf>, contents: impl Into<String>) -> Result<Self, LoadError> {
        let path = path.into();
        let Some(format) = DeclarationFormat::from_path(&path) else {
            return Err(LoadError::UnsupportedFormat(path));
        };
        Ok(Self {
            path,
            format,
            contents: contents.into(),
        })
    }

    /// File path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected format.
    #[must_use]
    pub fn format(&self) -> DeclarationFormat {
        self.format
    }

    /// Raw file contents.
    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Interpret the file as a navbar declaration.
    pub fn navbar(&self) -> Result<NavbarRegistry, LoadError> {
        let value = self.value()?;
        shape::navbar_from_value(&value).map_err(|violations| self.invalid(violations))
    }

    /// Interpret the file as a notes declaration.
    pub fn notes(&self) -> Result<NotesRegistry, LoadError> {
        let value = self.value()?;
        shape::notes_from_value(&value).map_err(|violations| self.invalid(violations))
    }

    fn value(&self) -> Result<Value, LoadError> {
        self.format
            .parse(&self.contents)
            .map_err(|message| LoadError::Parse {
                path: self.path.clone(),
                message,
            })
    }

    fn invalid(&self, violations: Violations) -> LoadError {
        LoadError::Invalid {
            path: self.path.clone(),
            violations,
        }
    }
}

/// Read and validate a navbar declaration file.
pub fn load_navbar(path: &Path) -> Result<NavbarRegistry, LoadError> {
    DeclarationFile::read(path)?.navbar()
}

/// Read and validate a notes declaration file.
pub fn load_notes(path: &Path) -> Result<NotesRegistry, LoadError> {
    DeclarationFile::read(path)?.notes()
}
