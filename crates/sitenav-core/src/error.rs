//! Navigation validation errors.
//!
//! Every check in this crate reports a [`NavError`]. Operations that validate
//! a whole registry or site collect them into [`Violations`] so that a single
//! pass surfaces every problem instead of stopping at the first one.

use std::fmt::Write as _;

/// A single navigation validation failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Malformed declaration node (wrong type, missing field, invalid slug).
    #[error("malformed declaration at {location}: {message}")]
    Shape {
        /// Location inside the declaration (e.g. `notes[0].sidebar[1].items[2]`).
        location: String,
        /// What is wrong with the node.
        message: String,
    },
    /// Two pages resolve to the same absolute path.
    #[error("duplicate link {path}: {first_source} and {second_source} resolve to the same page")]
    DuplicateLink {
        /// The colliding absolute path.
        path: String,
        /// Declaration that claimed the path first.
        first_source: String,
        /// Declaration that collided with it.
        second_source: String,
    },
    /// Internal navbar link that matches no resolved page of its locale.
    #[error("dangling navbar link {link} at {location} (locale {locale})")]
    DanglingLink {
        /// Locale code of the navbar.
        locale: String,
        /// Location inside the navbar (e.g. `navbar[0].items[1]`).
        location: String,
        /// The unresolved link.
        link: String,
    },
    /// Locale code registered more than once.
    #[error("locale {0} is registered more than once")]
    DuplicateLocale(String),
    /// Resolved page without a backing content file.
    #[error("page {path} has no source file {source_path}")]
    MissingSource {
        /// Absolute path of the page.
        path: String,
        /// Expected source file path.
        source_path: String,
    },
}

impl NavError {
    /// Create a shape error.
    pub fn shape(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Shape {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Prefix the location of location-carrying errors with `scope`.
    #[must_use]
    fn within(self, scope: &str) -> Self {
        match self {
            Self::Shape { location, message } => Self::Shape {
                location: scoped(scope, &location),
                message,
            },
            Self::DanglingLink {
                locale,
                location,
                link,
            } => Self::DanglingLink {
                locale,
                location: scoped(scope, &location),
                link,
            },
            other => other,
        }
    }
}

fn scoped(scope: &str, location: &str) -> String {
    if location.is_empty() {
        scope.to_owned()
    } else if location.starts_with('[') {
        format!("{scope}{location}")
    } else {
        format!("{scope}.{location}")
    }
}

/// Every violation found during one validation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", render(.0))]
pub struct Violations(Vec<NavError>);

fn render(errors: &[NavError]) -> String {
    let mut out = format!("{} navigation violation(s):", errors.len());
    for error in errors {
        let _ = write!(out, "\n  - {error}");
    }
    out
}

impl Violations {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, error: NavError) {
        self.0.push(error);
    }

    /// Whether no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over recorded violations in detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, NavError> {
        self.0.iter()
    }

    /// Prefix every location with `scope` (e.g. `notes[1]`).
    #[must_use]
    pub fn within(self, scope: &str) -> Self {
        Self(self.0.into_iter().map(|e| e.within(scope)).collect())
    }

    /// Return `value` if nothing was recorded, otherwise the violations.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<NavError> for Violations {
    fn from(error: NavError) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<NavError>> for Violations {
    fn from(errors: Vec<NavError>) -> Self {
        Self(errors)
    }
}

impl Extend<NavError> for Violations {
    fn extend<I: IntoIterator<Item = NavError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for Violations {
    type Item = NavError;
    type IntoIter = std::vec::IntoIter<NavError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a NavError;
    type IntoIter = std::slice::Iter<'a, NavError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
