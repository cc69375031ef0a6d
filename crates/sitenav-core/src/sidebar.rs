//! Sidebar tree declarations.
//!
//! A sidebar is an ordered list of [`SidebarGroup`]s. Each group holds
//! [`SidebarItem`]s: page slugs relative to the group's resolved prefix, or
//! nested groups. Declaration order is render order.

use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::path;

/// Entry inside a sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Page slug relative to the enclosing group's prefix.
    Page(String),
    /// Nested group.
    Group(SidebarGroup),
}

/// Named, collapsible group of sidebar items sharing a path prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarGroup {
    text: String,
    #[serde(default)]
    collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    #[serde(default)]
    prefix: String,
    #[serde(default)]
    items: Vec<SidebarItem>,
}

impl SidebarGroup {
    /// Create an expanded group without prefix or items.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the path segment appended to the parent prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the initial collapsed state.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// Set the icon identifier.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Append a page slug.
    #[must_use]
    pub fn page(mut self, slug: impl Into<String>) -> Self {
        self.items.push(SidebarItem::Page(slug.into()));
        self
    }

    /// Append several page slugs.
    #[must_use]
    pub fn pages<I, S>(mut self, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items
            .extend(slugs.into_iter().map(|slug| SidebarItem::Page(slug.into())));
        self
    }

    /// Append a nested group.
    #[must_use]
    pub fn group(mut self, group: SidebarGroup) -> Self {
        self.items.push(SidebarItem::Group(group));
        self
    }

    /// Display label.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Initial collapsed state.
    #[must_use]
    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    /// Icon identifier, passed through unresolved.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Path segment appended to the parent prefix (may be empty).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Items in render order.
    #[must_use]
    pub fn items(&self) -> &[SidebarItem] {
        &self.items
    }

    /// Number of page slugs in this group and all nested groups.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                SidebarItem::Page(_) => 1,
                SidebarItem::Group(group) => group.page_count(),
            })
            .sum()
    }

    /// Check slugs and prefixes of this group and its descendants.
    ///
    /// `location` names this group (e.g. `sidebar[2]`).
    pub(crate) fn check_shape(&self, location: &str, errors: &mut Vec<NavError>) {
        if self.text.trim().is_empty() {
            errors.push(NavError::shape(location, "group text cannot be empty"));
        }
        if self.prefix.starts_with('/') {
            errors.push(NavError::shape(
                location,
                format!("group prefix '{}' must be relative", self.prefix),
            ));
        } else if path::has_parent_segment(&self.prefix) {
            errors.push(NavError::shape(
                location,
                format!("group prefix '{}' must not contain '..' segments", self.prefix),
            ));
        }
        for (i, item) in self.items.iter().enumerate() {
            let item_location = format!("{location}.items[{i}]");
            match item {
                SidebarItem::Page(slug) => {
                    if let Err(e) = check_slug(slug, &item_location) {
                        errors.push(e);
                    }
                }
                SidebarItem::Group(group) => group.check_shape(&item_location, errors),
            }
        }
    }
}

/// Validate that a slug is a non-empty prefix-relative path.
fn check_slug(slug: &str, location: &str) -> Result<(), NavError> {
    if path::normalize(path::strip_markdown_ext(slug)).is_empty() {
        return Err(NavError::shape(location, "page slug cannot be empty"));
    }
    if slug.starts_with('/') {
        return Err(NavError::shape(
            location,
            format!("page slug '{slug}' must be relative to its group"),
        ));
    }
    if path::has_parent_segment(slug) {
        return Err(NavError::shape(
            location,
            format!("page slug '{slug}' must not contain '..' segments"),
        ));
    }
    if slug.contains("://") {
        return Err(NavError::shape(
            location,
            format!("page slug '{slug}' must not be a URL"),
        ));
    }
    Ok(())
}
