//! URL and source path helpers.
//!
//! All resolved paths share one canonical form: a leading `/`, no repeated
//! separators, no trailing `/`, no `.` segments. The root path is the empty
//! string, so appending `/slug` to it yields `/slug`.

/// Markdown source file extension.
const MARKDOWN_EXT: &str = ".md";

/// Normalize a path into canonical form.
///
/// Collapses repeated `/`, drops `.` segments and the trailing `/`.
///
/// # Example
///
/// ```
/// use sitenav_core::path::normalize;
///
/// assert_eq!(normalize("//en///mm_guide/"), "/en/mm_guide");
/// assert_eq!(normalize("/"), "");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    join(std::iter::once(path))
}

/// Join path pieces with `/` and normalize the result.
///
/// Pieces may themselves contain separators; empty pieces are skipped.
#[must_use]
pub fn join<'a>(pieces: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in pieces
        .into_iter()
        .flat_map(|piece| piece.split('/'))
        .filter(|segment| !segment.is_empty() && *segment != ".")
    {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// Strip a trailing `.md` extension from a slug.
#[must_use]
pub fn strip_markdown_ext(slug: &str) -> &str {
    slug.strip_suffix(MARKDOWN_EXT).unwrap_or(slug)
}

/// Build the Markdown source path for a page path.
#[must_use]
pub fn markdown_source(path: &str) -> String {
    format!("{path}{MARKDOWN_EXT}")
}

/// Whether a link points at a Markdown source file rather than a page URL.
#[must_use]
pub fn is_markdown_link(link: &str) -> bool {
    strip_query(link).ends_with(MARKDOWN_EXT)
}

/// Canonical lookup key for an internal link.
///
/// Drops query/fragment, normalizes separators and strips an `.html` suffix
/// so `/en/guide/intro.html`, `/en/guide/intro/` and `/en/guide/intro` agree.
#[must_use]
pub fn link_key(link: &str) -> String {
    let normalized = normalize(strip_query(link));
    match normalized.strip_suffix(".html") {
        Some(stem) => stem.to_owned(),
        None => normalized,
    }
}

fn strip_query(link: &str) -> &str {
    link.split(['?', '#']).next().unwrap_or(link)
}

/// Whether a path contains a `..` segment.
///
/// Declared slugs, prefixes and directories must not step above their base.
#[must_use]
pub fn has_parent_segment(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

/// First segment of a slug (`generate/image_qa` -> `generate`).
#[must_use]
pub fn first_segment(slug: &str) -> &str {
    slug.split('/')
        .find(|segment| !segment.is_empty() && *segment != ".")
        .unwrap_or("")
}
