//! Sidebar resolution.
//!
//! Flattens the sidebar tree of every [`NoteCollection`] in a
//! [`NotesRegistry`] into an ordered list of [`ResolvedPage`]s with absolute
//! paths, and indexes them for link lookups.
//!
//! # Algorithm
//!
//! 1. The base prefix is `locale link / registry link / collection link`,
//!    normalized (repeated `/` collapsed, trailing `/` stripped).
//! 2. Groups are visited depth-first, pre-order. A non-empty `prefix` is
//!    appended to the current prefix; the group `text` is always appended to
//!    the group chain, so label-only groups keep their children's paths.
//! 3. Each slug emits a page at `current prefix / slug`, in declaration order.
//! 4. Absolute paths must be unique within a collection and across all
//!    collections of the registry. So must Markdown source paths, since
//!    navbar links may address a page by its source.
//!
//! # Example
//!
//! ```
//! use sitenav_core::{NoteCollection, NotesRegistry, Resolver, SidebarGroup};
//!
//! let guide = NoteCollection::new(
//!     "mm_guide",
//!     "/mm_guide/",
//!     vec![SidebarGroup::new("Basic Info").with_prefix("basicinfo").pages(["intro", "framework"])],
//! )?;
//! let notes = NotesRegistry::new("en/notes", "/en/", vec![guide])?;
//!
//! let resolved = Resolver::new("en").resolve_notes(&notes)?;
//! let paths: Vec<_> = resolved.pages().map(|p| p.absolute_path.as_str()).collect();
//! assert_eq!(paths, ["/en/mm_guide/basicinfo/intro", "/en/mm_guide/basicinfo/framework"]);
//! # Ok::<(), sitenav_core::Violations>(())
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Violations};
use crate::notes::{NoteCollection, NotesRegistry};
use crate::page_index::{PageIndex, PageRef};
use crate::path;
use crate::sidebar::{SidebarGroup, SidebarItem};

/// Provides display titles for resolved pages.
///
/// Titles belong to the content collaborator. When a source returns `None`
/// the title is derived from the slug with [`slug_title`].
pub trait TitleSource {
    /// Title for the page declared as `slug` and backed by `source_path`.
    fn title(&self, slug: &str, source_path: &str) -> Option<String>;
}

/// Title source deriving every title from the slug.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlugTitles;

impl TitleSource for SlugTitles {
    fn title(&self, slug: &str, _source_path: &str) -> Option<String> {
        Some(slug_title(slug))
    }
}

/// Derive a human title from a slug.
///
/// Uses the last segment, drops a numeric ordering prefix (`1.index_guide`)
/// and capitalizes words separated by `_` or `-`.
///
/// ```
/// use sitenav_core::slug_title;
///
/// assert_eq!(slug_title("generate/image_caption"), "Image Caption");
/// assert_eq!(slug_title("1.index_guide.md"), "Index Guide");
/// ```
#[must_use]
pub fn slug_title(slug: &str) -> String {
    let stem = path::strip_markdown_ext(slug);
    let last = stem.rsplit('/').find(|s| !s.is_empty()).unwrap_or(stem);
    let last = match last.split_once('.') {
        Some((order, rest)) if !order.is_empty() && order.chars().all(|c| c.is_ascii_digit()) => {
            rest
        }
        _ => last,
    };

    last.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A content page with its final addresses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPage {
    /// Absolute URL path (e.g. `/en/mm_guide/basicinfo/intro`).
    pub absolute_path: String,
    /// Markdown source path (e.g. `/en/notes/mm_guide/basicinfo/intro.md`).
    pub source_path: String,
    /// Display title.
    pub display_text: String,
    /// Number of enclosing groups.
    pub depth: usize,
    /// Labels of enclosing groups, outermost first.
    pub group_chain: Vec<String>,
    /// Slug as declared.
    pub slug: String,
    /// Base link of the owning collection.
    pub collection: String,
}

impl ResolvedPage {
    /// Human-readable origin used in duplicate-link reports.
    ///
    /// Empty parts (a collection mounted at the site root) are skipped.
    #[must_use]
    pub fn describe(&self) -> String {
        std::iter::once(self.collection.as_str())
            .chain(self.group_chain.iter().map(String::as_str))
            .chain(std::iter::once(self.slug.as_str()))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

/// Node of the rendered sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SidebarNode {
    /// Group with its children, kept even when empty.
    Group {
        /// Display label.
        text: String,
        /// Initial collapsed state.
        collapsed: bool,
        /// Icon identifier.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        /// Child nodes in render order.
        children: Vec<SidebarNode>,
    },
    /// Page leaf.
    Page {
        /// Display title.
        text: String,
        /// Absolute URL path.
        link: String,
    },
}

/// Resolved sidebar of one collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCollection {
    /// Base URL prefix of the collection.
    pub link: String,
    /// Base source directory of the collection.
    pub dir: String,
    /// Pages in sidebar render order.
    pub pages: Vec<ResolvedPage>,
    /// Sidebar tree for rendering.
    pub tree: Vec<SidebarNode>,
}

/// Resolved notes of one locale with a path index.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "CachedNotes")]
pub struct ResolvedNotes {
    collections: Vec<ResolvedCollection>,
    #[serde(skip)]
    index: PageIndex,
}

#[derive(Deserialize)]
struct CachedNotes {
    collections: Vec<ResolvedCollection>,
}

impl From<CachedNotes> for ResolvedNotes {
    fn from(cached: CachedNotes) -> Self {
        let (index, _) = PageIndex::build(&cached.collections);
        Self {
            collections: cached.collections,
            index,
        }
    }
}

impl PartialEq for ResolvedNotes {
    fn eq(&self, other: &Self) -> bool {
        self.collections == other.collections
    }
}

impl Eq for ResolvedNotes {}

impl ResolvedNotes {
    /// Resolved collections in declaration order.
    #[must_use]
    pub fn collections(&self) -> &[ResolvedCollection] {
        &self.collections
    }

    /// All pages, collection by collection, in render order.
    pub fn pages(&self) -> impl Iterator<Item = &ResolvedPage> {
        self.collections.iter().flat_map(|c| c.pages.iter())
    }

    /// Number of resolved pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.index.len()
    }

    /// Page at an absolute path.
    #[must_use]
    pub fn page(&self, absolute_path: &str) -> Option<&ResolvedPage> {
        self.index.get(absolute_path).map(|r| self.at(r))
    }

    /// Page addressed by a link, either a page URL or a Markdown source path.
    #[must_use]
    pub fn resolve_link(&self, link: &str) -> Option<&ResolvedPage> {
        self.index.lookup_link(link).map(|r| self.at(r))
    }

    /// Flat absolute path to page mapping.
    #[must_use]
    pub fn path_map(&self) -> HashMap<&str, &ResolvedPage> {
        self.pages().map(|p| (p.absolute_path.as_str(), p)).collect()
    }

    fn at(&self, page_ref: PageRef) -> &ResolvedPage {
        &self.collections[page_ref.collection].pages[page_ref.page]
    }
}

/// Resolves notes registries of one locale.
pub struct Resolver<'a> {
    locale: &'a str,
    locale_link: &'a str,
    titles: &'a dyn TitleSource,
}

impl<'a> Resolver<'a> {
    /// Create a resolver for `locale` with no locale link and slug titles.
    #[must_use]
    pub fn new(locale: &'a str) -> Self {
        Self {
            locale,
            locale_link: "",
            titles: &SlugTitles,
        }
    }

    /// Set the extra URL prefix of the locale.
    #[must_use]
    pub fn with_locale_link(mut self, locale_link: &'a str) -> Self {
        self.locale_link = locale_link;
        self
    }

    /// Set the title source.
    #[must_use]
    pub fn with_titles(mut self, titles: &'a dyn TitleSource) -> Self {
        self.titles = titles;
        self
    }

    /// Resolve one collection of `registry`.
    pub fn resolve_collection(
        &self,
        registry: &NotesRegistry,
        collection: &NoteCollection,
    ) -> Result<ResolvedCollection, Violations> {
        let (resolved, errors) = self.flatten(registry, collection);
        Violations::from(errors).into_result(resolved)
    }

    /// Resolve every collection of `registry`.
    ///
    /// All-or-nothing: any violation fails the whole registry, and every
    /// violation found is reported.
    pub fn resolve_notes(&self, registry: &NotesRegistry) -> Result<ResolvedNotes, Violations> {
        let (resolved, violations) = self.resolve_notes_partial(registry);
        violations.into_result(resolved)
    }

    /// Resolve every collection, returning what resolved alongside violations.
    ///
    /// Colliding pages are left out of the result, so callers can keep
    /// validating against it without cascading errors.
    pub(crate) fn resolve_notes_partial(
        &self,
        registry: &NotesRegistry,
    ) -> (ResolvedNotes, Violations) {
        let mut violations = Violations::new();
        let mut collections = Vec::with_capacity(registry.notes().len());

        for (i, collection) in registry.notes().iter().enumerate() {
            let (resolved, errors) = self.flatten(registry, collection);
            tracing::debug!(
                locale = %self.locale,
                collection = %resolved.link,
                pages = resolved.pages.len(),
                "Resolved collection"
            );
            violations.extend(Violations::from(errors).within(&format!("notes[{i}]")));
            collections.push(resolved);
        }

        let (index, errors) = PageIndex::build(&collections);
        violations.extend(errors);

        (ResolvedNotes { collections, index }, violations)
    }

    fn flatten(
        &self,
        registry: &NotesRegistry,
        collection: &NoteCollection,
    ) -> (ResolvedCollection, Vec<NavError>) {
        let link = path::join([self.locale_link, registry.link(), collection.link()]);
        let dir = path::join([registry.dir(), collection.dir()]);

        let mut flattener = Flattener {
            locale: self.locale,
            collection: &link,
            titles: self.titles,
            pages: Vec::new(),
            seen: HashMap::new(),
            errors: Vec::new(),
        };
        let mut chain = Vec::new();
        let tree = collection
            .sidebar()
            .iter()
            .enumerate()
            .map(|(i, group)| {
                flattener.group(group, &format!("sidebar[{i}]"), &link, &dir, &mut chain)
            })
            .collect();

        let Flattener { pages, errors, .. } = flattener;
        let resolved = ResolvedCollection {
            link: link.clone(),
            dir,
            pages,
            tree,
        };
        (resolved, errors)
    }
}

/// Pre-order walk state for one collection.
struct Flattener<'a> {
    locale: &'a str,
    collection: &'a str,
    titles: &'a dyn TitleSource,
    pages: Vec<ResolvedPage>,
    seen: HashMap<String, usize>,
    errors: Vec<NavError>,
}

impl Flattener<'_> {
    fn group(
        &mut self,
        group: &SidebarGroup,
        location: &str,
        parent_link: &str,
        parent_dir: &str,
        chain: &mut Vec<String>,
    ) -> SidebarNode {
        let (link, dir) = if group.prefix().is_empty() {
            (parent_link.to_owned(), parent_dir.to_owned())
        } else {
            (
                path::join([parent_link, group.prefix()]),
                path::join([parent_dir, group.prefix()]),
            )
        };
        chain.push(group.text().to_owned());

        let mut children = Vec::with_capacity(group.items().len());
        for (i, item) in group.items().iter().enumerate() {
            let item_location = format!("{location}.items[{i}]");
            match item {
                SidebarItem::Page(slug) => {
                    if let Some(node) = self.page(slug, &item_location, &link, &dir, chain) {
                        children.push(node);
                    }
                }
                SidebarItem::Group(inner) => {
                    children.push(self.group(inner, &item_location, &link, &dir, chain));
                }
            }
        }

        chain.pop();
        SidebarNode::Group {
            text: group.text().to_owned(),
            collapsed: group.collapsed(),
            icon: group.icon().map(str::to_owned),
            children,
        }
    }

    fn page(
        &mut self,
        slug: &str,
        location: &str,
        link: &str,
        dir: &str,
        chain: &[String],
    ) -> Option<SidebarNode> {
        if !self.locale.is_empty() && path::first_segment(slug) == self.locale {
            self.errors.push(NavError::shape(
                location,
                format!("page slug '{slug}' must not repeat the locale segment"),
            ));
            return None;
        }

        let stem = path::strip_markdown_ext(slug);
        let absolute_path = path::join([link, stem]);
        let source_path = path::markdown_source(&path::join([dir, stem]));
        let display_text = self
            .titles
            .title(slug, &source_path)
            .unwrap_or_else(|| slug_title(slug));

        let page = ResolvedPage {
            absolute_path,
            source_path,
            display_text,
            depth: chain.len(),
            group_chain: chain.to_vec(),
            slug: slug.to_owned(),
            collection: self.collection.to_owned(),
        };

        if let Some(&first) = self.seen.get(&page.absolute_path) {
            self.errors.push(NavError::DuplicateLink {
                path: page.absolute_path.clone(),
                first_source: self.pages[first].describe(),
                second_source: page.describe(),
            });
            return None;
        }

        let node = SidebarNode::Page {
            text: page.display_text.clone(),
            link: page.absolute_path.clone(),
        };
        self.seen.insert(page.absolute_path.clone(), self.pages.len());
        self.pages.push(page);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry(notes: Vec<NoteCollection>) -> NotesRegistry {
        NotesRegistry::new("en/notes", "/en/", notes).unwrap()
    }

    fn collection(dir: &str, link: &str, sidebar: Vec<SidebarGroup>) -> NoteCollection {
        NoteCollection::new(dir, link, sidebar).unwrap()
    }

    fn paths(notes: &ResolvedNotes) -> Vec<&str> {
        notes.pages().map(|p| p.absolute_path.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_basic_info() {
        let guide = collection(
            "mm_guide",
            "/mm_guide/",
            vec![SidebarGroup::new("Basic Info").with_prefix("basicinfo").pages(["intro", "framework"])],
        );
        let notes = registry(vec![guide]);

        let resolved = Resolver::new("en").resolve_notes(&notes).unwrap();

        assert_eq!(
            paths(&resolved),
            vec!["/en/mm_guide/basicinfo/intro", "/en/mm_guide/basicinfo/framework"]
        );
        let intro = resolved.page("/en/mm_guide/basicinfo/intro").unwrap();
        assert_eq!(intro.source_path, "/en/notes/mm_guide/basicinfo/intro.md");
        assert_eq!(intro.display_text, "Intro");
        assert_eq!(intro.depth, 1);
        assert_eq!(intro.group_chain, vec!["Basic Info".to_owned()]);
        assert_eq!(intro.collection, "/en/mm_guide");
    }

    #[test]
    fn test_preorder_order_matches_declaration() {
        let sidebar = vec![
            SidebarGroup::new("A")
                .with_prefix("a")
                .page("one")
                .group(SidebarGroup::new("B").with_prefix("b").pages(["two", "three"]))
                .page("four"),
            SidebarGroup::new("C").with_prefix("c").page("five"),
        ];
        let notes = registry(vec![collection("d", "/d/", sidebar)]);

        let resolved = Resolver::new("en").resolve_notes(&notes).unwrap();

        assert_eq!(
            paths(&resolved),
            vec![
                "/en/d/a/one",
                "/en/d/a/b/two",
                "/en/d/a/b/three",
                "/en/d/a/four",
                "/en/d/c/five",
            ]
        );
        let depths: Vec<_> = resolved.pages().map(|p| p.depth).collect();
        assert_eq!(depths, vec![1, 2, 2, 1, 1]);
    }

    #[test]
    fn test_leaf_count_is_conserved_at_any_depth() {
        for depth in 0..6 {
            let mut group = SidebarGroup::new(format!("L{depth}"))
                .with_prefix(format!("l{depth}"))
                .pages(["x", "y"]);
            for level in (0..depth).rev() {
                group = SidebarGroup::new(format!("L{level}"))
                    .with_prefix(format!("l{level}"))
                    .page(format!("p{level}"))
                    .group(group);
            }
            let expected = group.page_count();
            let notes = registry(vec![collection("d", "/d/", vec![group])]);

            let resolved = Resolver::new("en").resolve_notes(&notes).unwrap();

            assert_eq!(resolved.page_count(), expected);
            assert_eq!(resolved.pages().count(), depth + 2);
        }
    }

    #[test]
    fn test_empty_prefix_keeps_paths_but_extends_chain() {
        let flat = registry(vec![collection(
            "d",
            "/d/",
            vec![SidebarGroup::new("Outer").with_prefix("outer").pages(["intro"])],
        )]);
        let labelled = registry(vec![collection(
            "d",
            "/d/",
            vec![SidebarGroup::new("Outer")
                .with_prefix("outer")
                .group(SidebarGroup::new("Label only").page("intro"))],
        )]);

        let flat = Resolver::new("en").resolve_notes(&flat).unwrap();
        let labelled = Resolver::new("en").resolve_notes(&labelled).unwrap();

        assert_eq!(paths(&flat), paths(&labelled));
        let page = labelled.pages().next().unwrap();
        assert_eq!(
            page.group_chain,
            vec!["Outer".to_owned(), "Label only".to_owned()]
        );
        assert_eq!(page.depth, 2);
    }

    #[test]
    fn test_empty_group_yields_no_pages_but_stays_in_tree() {
        let notes = registry(vec![collection(
            "d",
            "/d/",
            vec![
                SidebarGroup::new("Empty").with_prefix("empty").with_collapsed(true),
                SidebarGroup::new("Full").with_icon("carbon:idea").page("intro"),
            ],
        )]);

        let resolved = Resolver::new("en").resolve_notes(&notes).unwrap();

        assert_eq!(paths(&resolved), vec!["/en/d/intro"]);
        assert_eq!(
            resolved.collections()[0].tree,
            vec![
                SidebarNode::Group {
                    text: "Empty".to_owned(),
                    collapsed: true,
                    icon: None,
                    children: Vec::new(),
                },
                SidebarNode::Group {
                    text: "Full".to_owned(),
                    collapsed: false,
                    icon: Some("carbon:idea".to_owned()),
                    children: vec![SidebarNode::Page {
                        text: "Intro".to_owned(),
                        link: "/en/d/intro".to_owned(),
                    }],
                },
            ]
        );
    }

    #[test]
    fn test_cross_collection_duplicates_fail() {
        let guide = collection(
            "mm_guide",
            "/mm_guide/",
            vec![SidebarGroup::new("Basic Info").with_prefix("basicinfo").page("intro")],
        );
        let other = collection(
            "other",
            "/mm_guide/basicinfo",
            vec![SidebarGroup::new("Flat").page("intro")],
        );
        let notes = registry(vec![guide, other]);

        let err = Resolver::new("en").resolve_notes(&notes).unwrap_err();

        assert_eq!(
            err.into_iter().collect::<Vec<_>>(),
            vec![NavError::DuplicateLink {
                path: "/en/mm_guide/basicinfo/intro".to_owned(),
                first_source: "/en/mm_guide > Basic Info > intro".to_owned(),
                second_source: "/en/mm_guide/basicinfo > Flat > intro".to_owned(),
            }]
        );
    }

    #[test]
    fn test_slugs_normalizing_to_same_path_collide() {
        let sidebar = vec![
            SidebarGroup::new("Basic Info").with_prefix("basicinfo").page("intro"),
            SidebarGroup::new("Aliases").pages(["basicinfo/intro.md", "./basicinfo//intro"]),
        ];

        let notes = registry(vec![collection("mm_guide", "/mm_guide/", sidebar)]);

        let err = Resolver::new("en").resolve_notes(&notes).unwrap_err();

        let duplicates: Vec<_> = err
            .iter()
            .filter(|e| {
                matches!(e, NavError::DuplicateLink { path, .. } if path == "/en/mm_guide/basicinfo/intro")
            })
            .collect();
        assert_eq!(duplicates.len(), 2);
        assert_eq!(err.len(), 2);
    }

    #[test]
    fn test_duplicate_inside_collection_reports_absolute_path() {
        let sidebar = vec![
            SidebarGroup::new("Basic Info").with_prefix("basicinfo").pages(["intro", "intro.md"]),
        ];
        let notes = registry(vec![collection("mm_guide", "/mm_guide/", sidebar)]);

        let (resolved, violations) = Resolver::new("en").resolve_notes_partial(&notes);

        assert_eq!(
            violations.into_iter().collect::<Vec<_>>(),
            vec![NavError::DuplicateLink {
                path: "/en/mm_guide/basicinfo/intro".to_owned(),
                first_source: "/en/mm_guide > Basic Info > intro".to_owned(),
                second_source: "/en/mm_guide > Basic Info > intro.md".to_owned(),
            }]
        );
        assert_eq!(paths(&resolved), vec!["/en/mm_guide/basicinfo/intro"]);
    }

    #[test]
    fn test_collections_sharing_a_source_dir_collide() {
        let notes = registry(vec![
            collection("shared", "/a/", vec![SidebarGroup::new("A").page("intro")]),
            collection("shared", "/b/", vec![SidebarGroup::new("B").page("intro")]),
        ]);

        let err = Resolver::new("en").resolve_notes(&notes).unwrap_err();

        assert_eq!(
            err.into_iter().collect::<Vec<_>>(),
            vec![NavError::DuplicateLink {
                path: "/en/notes/shared/intro.md".to_owned(),
                first_source: "/en/a > A > intro".to_owned(),
                second_source: "/en/b > B > intro".to_owned(),
            }]
        );
    }

    #[test]
    fn test_describe_skips_empty_collection_link() {
        let notes = NotesRegistry::new(
            "notes",
            "",
            vec![collection("d", "", vec![SidebarGroup::new("G").page("intro")])],
        )
        .unwrap();

        let resolved = Resolver::new("en").resolve_notes(&notes).unwrap();

        let page = resolved.page("/intro").unwrap();
        assert_eq!(page.collection, "");
        assert_eq!(page.describe(), "G > intro");
    }

    #[test]
    fn test_locale_segment_in_slug_is_shape_error() {
        let notes = registry(vec![collection(
            "d",
            "/d/",
            vec![SidebarGroup::new("G").pages(["en/intro", "guide"])],
        )]);

        let err = Resolver::new("en").resolve_notes(&notes).unwrap_err();

        assert_eq!(
            err.into_iter().collect::<Vec<_>>(),
            vec![NavError::shape(
                "notes[0].sidebar[0].items[0]",
                "page slug 'en/intro' must not repeat the locale segment"
            )]
        );
    }

    #[test]
    fn test_locale_link_and_custom_titles() {
        struct Fixed;
        impl TitleSource for Fixed {
            fn title(&self, slug: &str, _source_path: &str) -> Option<String> {
                (slug == "intro").then(|| "Introduction".to_owned())
            }
        }

        let notes = NotesRegistry::new(
            "notes",
            "/",
            vec![collection("d", "/d/", vec![SidebarGroup::new("G").pages(["intro", "audio_caption"])])],
        )
        .unwrap();

        let resolved = Resolver::new("zh")
            .with_locale_link("/zh/")
            .with_titles(&Fixed)
            .resolve_notes(&notes)
            .unwrap();

        let titles: Vec<_> = resolved
            .pages()
            .map(|p| (p.absolute_path.as_str(), p.display_text.as_str()))
            .collect();
        assert_eq!(
            titles,
            vec![("/zh/d/intro", "Introduction"), ("/zh/d/audio_caption", "Audio Caption")]
        );
    }

    #[test]
    fn test_resolve_link_accepts_page_and_source_forms() {
        let notes = registry(vec![collection(
            "mm_guide",
            "/mm_guide/",
            vec![SidebarGroup::new("Basic Info").with_prefix("basicinfo").page("intro")],
        )]);
        let resolved = Resolver::new("en").resolve_notes(&notes).unwrap();

        let by_source = resolved.resolve_link("/en/notes/mm_guide/basicinfo/intro.md");
        let by_path = resolved.resolve_link("/en/mm_guide/basicinfo/intro/");

        assert_eq!(by_source, by_path);
        assert!(by_source.is_some());
        assert!(resolved.resolve_link("/en/notes/mm_guide/basicinfo/missing.md").is_none());
        assert_eq!(resolved.path_map().len(), 1);
    }

    #[test]
    fn test_slug_title() {
        assert_eq!(slug_title("intro"), "Intro");
        assert_eq!(slug_title("install_image_understanding"), "Install Image Understanding");
        assert_eq!(slug_title("filter/image-clip-filter"), "Image Clip Filter");
        assert_eq!(slug_title("1.index_guide"), "Index Guide");
    }

    #[test]
    fn test_resolved_notes_json_round_trip_rebuilds_index() {
        let notes = registry(vec![collection(
            "d",
            "/d/",
            vec![SidebarGroup::new("G").pages(["a", "b"])],
        )]);
        let resolved = Resolver::new("en").resolve_notes(&notes).unwrap();

        let json = serde_json::to_string(&resolved).unwrap();
        let restored: ResolvedNotes = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, resolved);
        assert_eq!(restored.page("/en/d/b").map(|p| p.slug.as_str()), Some("b"));
    }
}
