//! Multi-locale documentation navigation for sitenav.
//!
//! This crate provides:
//! - [`NotesRegistry`] / [`NoteCollection`] / [`SidebarGroup`]: declared sidebars
//! - [`Resolver`]: flattening sidebars into pages with absolute paths
//! - [`NavbarRegistry`] and [`validate_navbar`]: navbar declarations and link checks
//! - [`SiteNavigation`]: validated navigation of every locale
//! - [`DeclarationFile`]: YAML, JSON and TOML declaration loading
//! - [`NavigationCache`]: fingerprinted JSON cache of resolved navigation
//!
//! Every validating operation reports all problems at once as [`Violations`].
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use sitenav_core::{LocaleDeclaration, SiteNavigation, load_navbar, load_notes};
//!
//! let site = SiteNavigation::builder()
//!     .locale(
//!         LocaleDeclaration::new("en")
//!             .with_navbar(load_navbar(Path::new("docs/.sitenav/en/navbar.yaml"))?)
//!             .with_notes(load_notes(Path::new("docs/.sitenav/en/notes.yaml"))?),
//!     )
//!     .build()?;
//!
//! for page in site.locale("en").into_iter().flat_map(|l| l.resolved.pages()) {
//!     println!("{} -> {}", page.absolute_path, page.source_path);
//! }
//! # Ok(())
//! # }
//! ```

mod cache;
mod content;
mod declaration;
mod error;
mod navbar;
mod notes;
mod page_index;
pub mod path;
mod resolver;
mod shape;
mod sidebar;
mod site;

pub use cache::{FileNavigationCache, NavigationCache, NullNavigationCache, fingerprint};
pub use content::{ContentSource, FsContent, missing_sources};
pub use declaration::{DeclarationFile, DeclarationFormat, LoadError, load_navbar, load_notes};
pub use error::{NavError, Violations};
pub use navbar::{LinkPolicy, NavbarEntry, NavbarLink, NavbarMenu, NavbarRegistry, validate_navbar};
pub use notes::{NoteCollection, NotesRegistry};
pub use page_index::{PageIndex, PageRef};
pub use resolver::{
    ResolvedCollection, ResolvedNotes, ResolvedPage, Resolver, SidebarNode, SlugTitles,
    TitleSource, slug_title,
};
pub use shape::{navbar_from_value, notes_from_value};
pub use sidebar::{SidebarGroup, SidebarItem};
pub use site::{LocaleDeclaration, LocaleNavigation, SiteNavigation, SiteNavigationBuilder};
