//! Path lookups over resolved collections.
//!
//! Pages stay owned by their [`ResolvedCollection`]; the index maps absolute
//! paths and source paths to `(collection, page)` positions, giving O(1)
//! lookups for navbar validation and rendering.

use std::collections::HashMap;

use crate::error::NavError;
use crate::path;
use crate::resolver::ResolvedCollection;

/// Position of a page inside a list of resolved collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRef {
    /// Collection index.
    pub collection: usize,
    /// Page index inside the collection.
    pub page: usize,
}

/// Absolute-path and source-path index of resolved pages.
#[derive(Clone, Debug, Default)]
pub struct PageIndex {
    by_path: HashMap<String, PageRef>,
    by_source: HashMap<String, PageRef>,
}

impl PageIndex {
    /// Index every page of `collections`.
    ///
    /// Returns a duplicate-link error for each page whose absolute path or
    /// Markdown source path was already claimed by an earlier page. The
    /// first claim wins, so a source link never resolves ambiguously.
    pub fn build(collections: &[ResolvedCollection]) -> (Self, Vec<NavError>) {
        let mut index = Self::default();
        let mut errors = Vec::new();

        for (c, collection) in collections.iter().enumerate() {
            for (p, page) in collection.pages.iter().enumerate() {
                let page_ref = PageRef {
                    collection: c,
                    page: p,
                };

                if let Some(first) = index.by_path.get(&page.absolute_path) {
                    let first = &collections[first.collection].pages[first.page];
                    errors.push(NavError::DuplicateLink {
                        path: page.absolute_path.clone(),
                        first_source: first.describe(),
                        second_source: page.describe(),
                    });
                    continue;
                }

                index.by_path.insert(page.absolute_path.clone(), page_ref);

                if let Some(first) = index.by_source.get(&page.source_path) {
                    let first = &collections[first.collection].pages[first.page];
                    errors.push(NavError::DuplicateLink {
                        path: page.source_path.clone(),
                        first_source: first.describe(),
                        second_source: page.describe(),
                    });
                    continue;
                }
                index.by_source.insert(page.source_path.clone(), page_ref);
            }
        }

        (index, errors)
    }

    /// Number of indexed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Page at an absolute path.
    #[must_use]
    pub fn get(&self, absolute_path: &str) -> Option<PageRef> {
        self.by_path.get(absolute_path).copied()
    }

    /// Page backed by a Markdown source path.
    #[must_use]
    pub fn get_by_source(&self, source_path: &str) -> Option<PageRef> {
        self.by_source.get(source_path).copied()
    }

    /// Page addressed by an internal link.
    ///
    /// Links ending in `.md` are matched against source paths, everything
    /// else against absolute paths.
    #[must_use]
    pub fn lookup_link(&self, link: &str) -> Option<PageRef> {
        let key = path::link_key(link);
        if path::is_markdown_link(link) {
            self.get_by_source(&key)
        } else {
            self.get(&key)
        }
    }
}
