//! Locale aggregation.
//!
//! [`SiteNavigationBuilder`] collects one [`LocaleDeclaration`] per locale,
//! resolves every notes registry, validates every navbar against the pages of
//! its own locale and produces the immutable [`SiteNavigation`].
//!
//! # Example
//!
//! ```
//! use sitenav_core::{
//!     LocaleDeclaration, NavbarLink, NavbarRegistry, NoteCollection, NotesRegistry,
//!     SidebarGroup, SiteNavigation,
//! };
//!
//! let guide = NoteCollection::new(
//!     "mm_guide",
//!     "/mm_guide/",
//!     vec![SidebarGroup::new("Basic Info").with_prefix("basicinfo").pages(["intro"])],
//! )?;
//! let notes = NotesRegistry::new("en/notes", "/en/", vec![guide])?;
//! let navbar = NavbarRegistry::new(vec![
//!     NavbarLink::new("Introduction", "/en/notes/mm_guide/basicinfo/intro.md").into(),
//! ])?;
//!
//! let site = SiteNavigation::builder()
//!     .locale(LocaleDeclaration::new("en").with_navbar(navbar).with_notes(notes))
//!     .build()?;
//!
//! assert_eq!(site.locale_codes().collect::<Vec<_>>(), ["en"]);
//! assert!(site.page("en", "/en/mm_guide/basicinfo/intro").is_some());
//! # Ok::<(), sitenav_core::Violations>(())
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::content::ContentSource;
use crate::error::{NavError, Violations};
use crate::navbar::{LinkPolicy, NavbarRegistry, validate_navbar};
use crate::notes::NotesRegistry;
use crate::resolver::{ResolvedNotes, ResolvedPage, Resolver, SlugTitles, TitleSource};

/// Declared navigation of one locale.
///
/// A locale may declare only a navbar or only notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleDeclaration {
    code: String,
    link: String,
    navbar: Option<NavbarRegistry>,
    notes: Option<NotesRegistry>,
}

impl LocaleDeclaration {
    /// Declare a locale with neither navbar nor notes.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            link: String::new(),
            navbar: None,
            notes: None,
        }
    }

    /// Set the extra URL prefix of the locale.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    /// Set the navbar.
    #[must_use]
    pub fn with_navbar(mut self, navbar: NavbarRegistry) -> Self {
        self.navbar = Some(navbar);
        self
    }

    /// Set the notes registry.
    #[must_use]
    pub fn with_notes(mut self, notes: NotesRegistry) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Locale code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Validated navigation of one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleNavigation {
    /// Locale code (e.g. `en`).
    pub code: String,
    /// Extra URL prefix of the locale.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    /// Navbar as declared (empty when the locale declares none).
    #[serde(default)]
    pub navbar: NavbarRegistry,
    /// Notes registry as declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<NotesRegistry>,
    /// Resolved pages of the notes registry.
    #[serde(default)]
    pub resolved: ResolvedNotes,
}

/// Validated navigation of every locale, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteNavigation {
    locales: Vec<LocaleNavigation>,
}

impl SiteNavigation {
    /// Start declaring a site.
    #[must_use]
    pub fn builder() -> SiteNavigationBuilder {
        SiteNavigationBuilder::default()
    }

    /// Locales in declaration order.
    #[must_use]
    pub fn locales(&self) -> &[LocaleNavigation] {
        &self.locales
    }

    /// Locale codes in declaration order, for locale switchers.
    pub fn locale_codes(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(|l| l.code.as_str())
    }

    /// Navigation of one locale.
    #[must_use]
    pub fn locale(&self, code: &str) -> Option<&LocaleNavigation> {
        self.locales.iter().find(|l| l.code == code)
    }

    /// Page of `locale` at an absolute path.
    #[must_use]
    pub fn page(&self, locale: &str, absolute_path: &str) -> Option<&ResolvedPage> {
        self.locale(locale)?.resolved.page(absolute_path)
    }

    /// Total number of resolved pages across locales.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.locales.iter().map(|l| l.resolved.page_count()).sum()
    }
}

/// Builder for [`SiteNavigation`].
pub struct SiteNavigationBuilder {
    locales: Vec<LocaleDeclaration>,
    policy: LinkPolicy,
    titles: Box<dyn TitleSource>,
    content: Option<Box<dyn ContentSource>>,
}

impl Default for SiteNavigationBuilder {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            policy: LinkPolicy::default(),
            titles: Box::new(SlugTitles),
            content: None,
        }
    }
}

impl SiteNavigationBuilder {
    /// Register a locale. Order is kept for locale switchers.
    #[must_use]
    pub fn locale(mut self, declaration: LocaleDeclaration) -> Self {
        self.locales.push(declaration);
        self
    }

    /// Set which link schemes count as external.
    #[must_use]
    pub fn link_policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the title source for resolved pages.
    #[must_use]
    pub fn titles(mut self, titles: impl TitleSource + 'static) -> Self {
        self.titles = Box::new(titles);
        self
    }

    /// Require a backing source file for every resolved page.
    #[must_use]
    pub fn verify_sources(mut self, content: impl ContentSource + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Resolve and validate every locale.
    ///
    /// Duplicate locale codes fail before any resolution happens. Otherwise
    /// every locale is resolved and validated and all violations are reported
    /// together.
    pub fn build(self) -> Result<SiteNavigation, Violations> {
        let duplicates = duplicate_locales(&self.locales);
        if !duplicates.is_empty() {
            return Err(duplicates);
        }

        let mut violations = Violations::new();
        let mut locales = Vec::with_capacity(self.locales.len());

        for declaration in self.locales {
            let resolver = Resolver::new(&declaration.code)
                .with_locale_link(&declaration.link)
                .with_titles(self.titles.as_ref());

            let resolved = match &declaration.notes {
                Some(notes) => {
                    let (resolved, errors) = resolver.resolve_notes_partial(notes);
                    violations.extend(errors);
                    resolved
                }
                None => ResolvedNotes::default(),
            };

            let navbar = declaration.navbar.unwrap_or_default();
            violations.extend(validate_navbar(
                &declaration.code,
                &navbar,
                &resolved,
                &self.policy,
            ));

            if let Some(content) = &self.content {
                violations.extend(crate::content::missing_sources(content.as_ref(), &resolved));
            }

            locales.push(LocaleNavigation {
                code: declaration.code,
                link: declaration.link,
                navbar,
                notes: declaration.notes,
                resolved,
            });
        }

        let site = violations.into_result(SiteNavigation { locales })?;
        tracing::info!(
            locales = site.locales.len(),
            pages = site.page_count(),
            "Built site navigation"
        );
        Ok(site)
    }
}

fn duplicate_locales(locales: &[LocaleDeclaration]) -> Violations {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut violations = Violations::new();
    for declaration in locales {
        let code = declaration.code.as_str();
        if !seen.insert(code) && reported.insert(code) {
            violations.push(NavError::DuplicateLocale(code.to_owned()));
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navbar::{NavbarLink, NavbarMenu};
    use crate::notes::NoteCollection;
    use crate::sidebar::SidebarGroup;
    use pretty_assertions::assert_eq;

    fn notes(locale: &str, groups: Vec<SidebarGroup>) -> NotesRegistry {
        let guide = NoteCollection::new("mm_guide", "/mm_guide/", groups).unwrap();
        NotesRegistry::new(format!("{locale}/notes"), format!("/{locale}/"), vec![guide]).unwrap()
    }

    fn basic_info(text: &str) -> SidebarGroup {
        SidebarGroup::new(text)
            .with_prefix("basicinfo")
            .pages(["intro", "framework"])
    }

    fn navbar(links: &[&str]) -> NavbarRegistry {
        let menu = links
            .iter()
            .fold(NavbarMenu::new("Use Cases"), |menu, link| {
                menu.item(NavbarLink::new("Entry", *link))
            });
        NavbarRegistry::new(vec![menu.into()]).unwrap()
    }

    #[test]
    fn test_builds_two_locales_in_order() {
        let site = SiteNavigation::builder()
            .locale(
                LocaleDeclaration::new("en")
                    .with_notes(notes("en", vec![basic_info("Basic Info")]))
                    .with_navbar(navbar(&["/en/notes/mm_guide/basicinfo/intro.md"])),
            )
            .locale(
                LocaleDeclaration::new("zh")
                    .with_notes(notes("zh", vec![basic_info("基础信息")]))
                    .with_navbar(navbar(&["/zh/notes/mm_guide/basicinfo/framework.md"])),
            )
            .build()
            .unwrap();

        assert_eq!(site.locale_codes().collect::<Vec<_>>(), vec!["en", "zh"]);
        assert_eq!(site.page_count(), 4);
        let zh = site.page("zh", "/zh/mm_guide/basicinfo/intro").unwrap();
        assert_eq!(zh.group_chain, vec!["基础信息".to_owned()]);
    }

    #[test]
    fn test_duplicate_locale_fails_before_resolution() {
        let broken_notes = {
            let guide = NoteCollection::new("g", "/g/", vec![SidebarGroup::new("G").page("a")]).unwrap();
            let other = NoteCollection::new("o", "/", vec![SidebarGroup::new("O").with_prefix("g").page("a")]).unwrap();
            NotesRegistry::new("zh/notes", "/zh/", vec![guide, other]).unwrap()
        };

        let err = SiteNavigation::builder()
            .locale(LocaleDeclaration::new("zh").with_notes(broken_notes))
            .locale(LocaleDeclaration::new("en"))
            .locale(LocaleDeclaration::new("zh"))
            .locale(LocaleDeclaration::new("zh"))
            .build()
            .unwrap_err();

        assert_eq!(
            err.into_iter().collect::<Vec<_>>(),
            vec![NavError::DuplicateLocale("zh".to_owned())]
        );
    }

    #[test]
    fn test_navbar_checked_only_against_own_locale() {
        let err = SiteNavigation::builder()
            .locale(LocaleDeclaration::new("en").with_notes(notes("en", vec![basic_info("Basic Info")])))
            .locale(
                LocaleDeclaration::new("zh")
                    .with_navbar(navbar(&["/en/notes/mm_guide/basicinfo/intro.md"])),
            )
            .build()
            .unwrap_err();

        assert_eq!(
            err.into_iter().collect::<Vec<_>>(),
            vec![NavError::DanglingLink {
                locale: "zh".to_owned(),
                location: "navbar[0].items[0]".to_owned(),
                link: "/en/notes/mm_guide/basicinfo/intro.md".to_owned(),
            }]
        );
    }

    #[test]
    fn test_all_violations_reported_together() {
        let colliding = {
            let guide = NoteCollection::new("g", "/g/", vec![SidebarGroup::new("G").with_prefix("x").page("a")]).unwrap();
            let other = NoteCollection::new("o", "/g/x", vec![SidebarGroup::new("O").page("a")]).unwrap();
            NotesRegistry::new("en/notes", "/en/", vec![guide, other]).unwrap()
        };

        let err = SiteNavigation::builder()
            .locale(
                LocaleDeclaration::new("en")
                    .with_notes(colliding)
                    .with_navbar(navbar(&[
                        "/en/g/x/a",
                        "/en/notes/missing.md",
                        "https://example.com",
                    ])),
            )
            .locale(LocaleDeclaration::new("zh").with_navbar(navbar(&["/zh/nowhere"])))
            .build()
            .unwrap_err();

        let kinds: Vec<_> = err
            .iter()
            .map(|e| match e {
                NavError::DuplicateLink { .. } => "duplicate",
                NavError::DanglingLink { .. } => "dangling",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["duplicate", "dangling", "dangling"]);
    }

    #[test]
    fn test_locale_without_notes_or_navbar_is_valid() {
        let site = SiteNavigation::builder()
            .locale(LocaleDeclaration::new("en").with_navbar(navbar(&["https://github.com"])))
            .locale(LocaleDeclaration::new("zh").with_notes(notes("zh", vec![basic_info("基础信息")])))
            .build()
            .unwrap();

        let en = site.locale("en").unwrap();
        assert!(en.notes.is_none());
        assert_eq!(en.resolved.page_count(), 0);
        assert!(site.locale("zh").unwrap().navbar.is_empty());
    }

    #[test]
    fn test_verify_sources_reports_missing_files() {
        struct OnlyIntro;
        impl ContentSource for OnlyIntro {
            fn exists(&self, source_path: &str) -> bool {
                source_path.ends_with("/intro.md")
            }
        }

        let err = SiteNavigation::builder()
            .locale(LocaleDeclaration::new("en").with_notes(notes("en", vec![basic_info("Basic Info")])))
            .verify_sources(OnlyIntro)
            .build()
            .unwrap_err();

        assert_eq!(
            err.into_iter().collect::<Vec<_>>(),
            vec![NavError::MissingSource {
                path: "/en/mm_guide/basicinfo/framework".to_owned(),
                source_path: "/en/notes/mm_guide/basicinfo/framework.md".to_owned(),
            }]
        );
    }

    #[test]
    fn test_json_round_trip() {
        let site = SiteNavigation::builder()
            .locale(
                LocaleDeclaration::new("en")
                    .with_link("/")
                    .with_notes(notes("en", vec![basic_info("Basic Info")]))
                    .with_navbar(navbar(&["/en/notes/mm_guide/basicinfo/intro.md"])),
            )
            .build()
            .unwrap();

        let json = serde_json::to_string(&site).unwrap();
        let restored: SiteNavigation = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, site);
        assert!(restored.page("en", "/en/mm_guide/basicinfo/framework").is_some());
    }
}
