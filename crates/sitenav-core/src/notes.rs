//! Notes collections and the per-locale notes registry.
//!
//! A [`NoteCollection`] is one content domain (a user guide, an operator
//! reference) with its own base directory, base link and sidebar. A
//! [`NotesRegistry`] groups the collections of one locale under a shared
//! directory and link prefix.
//!
//! Both types validate on construction and are immutable afterwards.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Violations};
use crate::path;
use crate::sidebar::SidebarGroup;

/// Content domain with its own sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCollection")]
pub struct NoteCollection {
    dir: String,
    link: String,
    sidebar: Vec<SidebarGroup>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    dir: String,
    link: String,
    #[serde(default)]
    sidebar: Vec<SidebarGroup>,
}

impl TryFrom<RawCollection> for NoteCollection {
    type Error = Violations;

    fn try_from(raw: RawCollection) -> Result<Self, Self::Error> {
        Self::new(raw.dir, raw.link, raw.sidebar)
    }
}

impl NoteCollection {
    /// Create a collection, validating its sidebar.
    ///
    /// Fails with shape errors for invalid slugs, prefixes or labels. Pages
    /// that collide on the same path are reported when the collection is
    /// resolved under its registry and locale, where the absolute path is
    /// known.
    pub fn new(
        dir: impl Into<String>,
        link: impl Into<String>,
        sidebar: Vec<SidebarGroup>,
    ) -> Result<Self, Violations> {
        let collection = Self {
            dir: dir.into(),
            link: link.into(),
            sidebar,
        };

        let mut errors = Vec::new();
        for (name, value) in [("dir", &collection.dir), ("link", &collection.link)] {
            if path::has_parent_segment(value) {
                errors.push(NavError::shape(
                    name,
                    format!("'{value}' must not contain '..' segments"),
                ));
            }
        }
        for (i, group) in collection.sidebar.iter().enumerate() {
            group.check_shape(&format!("sidebar[{i}]"), &mut errors);
        }

        Violations::from(errors).into_result(collection)
    }

    /// Base directory segment, relative to the registry directory.
    #[must_use]
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Base link, relative to the registry link.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Top-level sidebar groups in render order.
    #[must_use]
    pub fn sidebar(&self) -> &[SidebarGroup] {
        &self.sidebar
    }

    /// Number of page slugs declared in the sidebar.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.sidebar.iter().map(SidebarGroup::page_count).sum()
    }
}

/// Ordered notes collections of one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry")]
pub struct NotesRegistry {
    dir: String,
    link: String,
    notes: Vec<NoteCollection>,
}

#[derive(Deserialize)]
struct RawRegistry {
    #[serde(default)]
    dir: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    notes: Vec<NoteCollection>,
}

impl TryFrom<RawRegistry> for NotesRegistry {
    type Error = Violations;

    fn try_from(raw: RawRegistry) -> Result<Self, Self::Error> {
        Self::new(raw.dir, raw.link, raw.notes)
    }
}

impl NotesRegistry {
    /// Create a registry, requiring distinct prefixed collection links.
    pub fn new(
        dir: impl Into<String>,
        link: impl Into<String>,
        notes: Vec<NoteCollection>,
    ) -> Result<Self, Violations> {
        let registry = Self {
            dir: dir.into(),
            link: link.into(),
            notes,
        };

        let errors = link_collisions(&registry.link, registry.notes.iter().enumerate());
        Violations::from(errors).into_result(registry)
    }

    /// Locale root directory.
    #[must_use]
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Locale link prefix.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Collections in declaration order.
    #[must_use]
    pub fn notes(&self) -> &[NoteCollection] {
        &self.notes
    }
}

/// Duplicate prefixed links among `(index, collection)` pairs.
///
/// Indexes are reported as given, so callers may pass a subset of the
/// declared collections.
pub(crate) fn link_collisions<'a>(
    registry_link: &str,
    collections: impl IntoIterator<Item = (usize, &'a NoteCollection)>,
) -> Vec<NavError> {
    let mut errors = Vec::new();
    let mut seen: HashMap<String, (usize, &NoteCollection)> = HashMap::new();
    for (i, collection) in collections {
        let link = path::join([registry_link, collection.link()]);
        if let Some(&(first, first_collection)) = seen.get(&link) {
            errors.push(NavError::DuplicateLink {
                path: link,
                first_source: describe(first, first_collection),
                second_source: describe(i, collection),
            });
        } else {
            seen.insert(link, (i, collection));
        }
    }
    errors
}

fn describe(index: usize, collection: &NoteCollection) -> String {
    format!("notes[{index}] (dir '{}')", collection.dir())
}
