//! Source file checks.
//!
//! Resolution never touches the filesystem. Callers that want every resolved
//! page to be backed by a Markdown file plug in a [`ContentSource`].

use std::path::PathBuf;

use crate::error::NavError;
use crate::resolver::ResolvedNotes;

/// Answers whether a Markdown source exists.
pub trait ContentSource {
    /// Whether `source_path` (e.g. `/en/notes/mm_guide/intro.md`) exists.
    fn exists(&self, source_path: &str) -> bool;
}

/// Content source backed by a docs directory on disk.
#[derive(Clone, Debug)]
pub struct FsContent {
    root: PathBuf,
}

impl FsContent {
    /// Create a content source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Docs root directory.
    #[must_use]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl ContentSource for FsContent {
    fn exists(&self, source_path: &str) -> bool {
        if crate::path::has_parent_segment(source_path) {
            return false;
        }
        self.root
            .join(source_path.trim_start_matches('/'))
            .is_file()
    }
}

/// Missing-source errors for every page without a backing file.
pub fn missing_sources(content: &dyn ContentSource, resolved: &ResolvedNotes) -> Vec<NavError> {
    resolved
        .pages()
        .filter(|page| !content.exists(&page.source_path))
        .map(|page| {
            tracing::debug!(path = %page.absolute_path, source = %page.source_path, "Missing source file");
            NavError::MissingSource {
                path: page.absolute_path.clone(),
                source_path: page.source_path.clone(),
            }
        })
        .collect()
}
