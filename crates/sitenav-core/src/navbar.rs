//! Top navigation bar declarations and link validation.
//!
//! A [`NavbarRegistry`] is the ordered list of [`NavbarEntry`]s of one locale.
//! Entries are leaf links or nested menus. Internal links are checked against
//! the locale's resolved pages by [`validate_navbar`]; links with a
//! recognized external scheme are left to the build collaborator.

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Violations};
use crate::resolver::ResolvedNotes;

/// Navbar entry: a link or a nested menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavbarEntry {
    /// Nested menu.
    Menu(NavbarMenu),
    /// Leaf link.
    Link(NavbarLink),
}

impl NavbarEntry {
    /// Display label.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Menu(menu) => &menu.text,
            Self::Link(link) => &link.text,
        }
    }
}

impl From<NavbarLink> for NavbarEntry {
    fn from(link: NavbarLink) -> Self {
        Self::Link(link)
    }
}

impl From<NavbarMenu> for NavbarEntry {
    fn from(menu: NavbarMenu) -> Self {
        Self::Menu(menu)
    }
}

/// Leaf navbar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarLink {
    text: String,
    link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_match: Option<String>,
}

impl NavbarLink {
    /// Create a link entry.
    #[must_use]
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            icon: None,
            active_match: None,
        }
    }

    /// Set the icon identifier.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the pattern marking the entry active for matching routes.
    #[must_use]
    pub fn with_active_match(mut self, pattern: impl Into<String>) -> Self {
        self.active_match = Some(pattern.into());
        self
    }

    /// Display label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Link target.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Icon identifier.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Active-route pattern.
    #[must_use]
    pub fn active_match(&self) -> Option<&str> {
        self.active_match.as_deref()
    }

    /// Whether the entry is active for `route`.
    ///
    /// Uses `activeMatch` when set, otherwise compares the route with the link.
    #[must_use]
    pub fn is_active(&self, route: &str) -> bool {
        match &self.active_match {
            Some(pattern) => regex::Regex::new(pattern).is_ok_and(|re| re.is_match(route)),
            None => crate::path::link_key(route) == crate::path::link_key(&self.link),
        }
    }
}

/// Nested navbar menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavbarMenu {
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    items: Vec<NavbarEntry>,
}

impl NavbarMenu {
    /// Create an empty menu.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon: None,
            items: Vec::new(),
        }
    }

    /// Set the icon identifier.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Append an entry.
    #[must_use]
    pub fn item(mut self, entry: impl Into<NavbarEntry>) -> Self {
        self.items.push(entry.into());
        self
    }

    /// Display label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Icon identifier.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Entries in render order.
    #[must_use]
    pub fn items(&self) -> &[NavbarEntry] {
        &self.items
    }
}

/// Ordered navbar of one locale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NavbarEntry>", into = "Vec<NavbarEntry>")]
pub struct NavbarRegistry {
    entries: Vec<NavbarEntry>,
}

impl TryFrom<Vec<NavbarEntry>> for NavbarRegistry {
    type Error = Violations;

    fn try_from(entries: Vec<NavbarEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<NavbarRegistry> for Vec<NavbarEntry> {
    fn from(registry: NavbarRegistry) -> Self {
        registry.entries
    }
}

impl NavbarRegistry {
    /// Create a navbar, validating every entry.
    ///
    /// Labels and leaf links must be non-empty and `activeMatch` patterns must
    /// be valid regular expressions.
    pub fn new(entries: Vec<NavbarEntry>) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        for (i, entry) in entries.iter().enumerate() {
            check_entry(entry, &format!("navbar[{i}]"), &mut violations);
        }
        violations.into_result(Self { entries })
    }

    /// Entries in render order.
    #[must_use]
    pub fn entries(&self) -> &[NavbarEntry] {
        &self.entries
    }

    /// Whether the navbar has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries to render: menus without any visible entry are dropped.
    #[must_use]
    pub fn visible(&self) -> Vec<NavbarEntry> {
        prune(&self.entries)
    }

    /// All leaf links with their locations, depth-first.
    pub fn links(&self) -> Vec<(String, &NavbarLink)> {
        let mut out = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            collect_links(entry, format!("navbar[{i}]"), &mut out);
        }
        out
    }
}

fn check_entry(entry: &NavbarEntry, location: &str, violations: &mut Violations) {
    if entry.text().trim().is_empty() {
        violations.push(NavError::shape(location, "navbar text cannot be empty"));
    }
    match entry {
        NavbarEntry::Link(link) => {
            if link.link.trim().is_empty() {
                violations.push(NavError::shape(location, "navbar link cannot be empty"));
            }
            if let Some(pattern) = &link.active_match
                && let Err(e) = regex::Regex::new(pattern)
            {
                violations.push(NavError::shape(
                    location,
                    format!("invalid activeMatch '{pattern}': {e}"),
                ));
            }
        }
        NavbarEntry::Menu(menu) => {
            if menu.items.is_empty() {
                tracing::warn!(%location, text = %menu.text, "Empty navbar menu will be hidden");
            }
            for (i, item) in menu.items.iter().enumerate() {
                check_entry(item, &format!("{location}.items[{i}]"), violations);
            }
        }
    }
}

fn prune(entries: &[NavbarEntry]) -> Vec<NavbarEntry> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            NavbarEntry::Link(_) => Some(entry.clone()),
            NavbarEntry::Menu(menu) => {
                let items = prune(&menu.items);
                (!items.is_empty()).then(|| {
                    NavbarEntry::Menu(NavbarMenu {
                        text: menu.text.clone(),
                        icon: menu.icon.clone(),
                        items,
                    })
                })
            }
        })
        .collect()
}

fn collect_links<'a>(entry: &'a NavbarEntry, location: String, out: &mut Vec<(String, &'a NavbarLink)>) {
    match entry {
        NavbarEntry::Link(link) => out.push((location, link)),
        NavbarEntry::Menu(menu) => {
            for (i, item) in menu.items.iter().enumerate() {
                collect_links(item, format!("{location}.items[{i}]"), out);
            }
        }
    }
}

/// Schemes that mark a navbar link as external.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkPolicy {
    external_schemes: Vec<String>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::new(["http", "https", "mailto", "tel"])
    }
}

impl LinkPolicy {
    /// Create a policy recognizing `schemes` (case-insensitive).
    #[must_use]
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            external_schemes: schemes
                .into_iter()
                .map(|s| s.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether `link` is external and therefore not checked.
    ///
    /// Protocol-relative links (`//host/path`) are external.
    #[must_use]
    pub fn is_external(&self, link: &str) -> bool {
        if link.starts_with("//") {
            return true;
        }
        let Some((scheme, _)) = link.split_once(':') else {
            return false;
        };
        let valid = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
        valid
            && self
                .external_schemes
                .iter()
                .any(|s| s.eq_ignore_ascii_case(scheme))
    }
}

/// Check every internal leaf link of `navbar` against `notes`.
///
/// Returns one dangling-link error per unresolvable internal link.
pub fn validate_navbar(
    locale: &str,
    navbar: &NavbarRegistry,
    notes: &ResolvedNotes,
    policy: &LinkPolicy,
) -> Vec<NavError> {
    let mut errors = Vec::new();
    let mut checked = 0usize;

    for (location, link) in navbar.links() {
        if policy.is_external(link.link()) {
            continue;
        }
        checked += 1;
        if notes.resolve_link(link.link()).is_none() {
            errors.push(NavError::DanglingLink {
                locale: locale.to_owned(),
                location,
                link: link.link().to_owned(),
            });
        }
    }

    tracing::debug!(%locale, checked, dangling = errors.len(), "Validated navbar links");
    errors
}
