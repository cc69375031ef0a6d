//! Typed model from untyped declaration trees.
//!
//! Declaration files are parsed into a [`serde_json::Value`] first, whatever
//! their format. The functions here walk that tree and report every malformed
//! node with its location instead of failing on the first one, then hand the
//! result to the validating constructors.

use serde_json::{Map, Value};

use crate::error::{NavError, Violations};
use crate::navbar::{NavbarEntry, NavbarLink, NavbarMenu, NavbarRegistry};
use crate::notes::{NoteCollection, NotesRegistry, link_collisions};
use crate::sidebar::SidebarGroup;

/// Build a navbar from a declaration tree.
///
/// Accepts either an array of entries or an object with an `items` array.
pub fn navbar_from_value(value: &Value) -> Result<NavbarRegistry, Violations> {
    let mut errors = Vec::new();
    let items = match value {
        Value::Array(items) => Some(items),
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(items)) => Some(items),
            Some(other) => {
                errors.push(expected("items", "an array of navbar entries", other));
                None
            }
            None => {
                errors.push(NavError::shape("items", "missing required field"));
                None
            }
        },
        other => {
            errors.push(expected("navbar", "an array of navbar entries", other));
            None
        }
    };

    let entries: Vec<_> = items
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, item)| navbar_entry(item, &format!("navbar[{i}]"), &mut errors))
        .collect();

    if !errors.is_empty() {
        return Err(errors.into());
    }
    NavbarRegistry::new(entries)
}

/// Build a notes registry from a declaration tree.
pub fn notes_from_value(value: &Value) -> Result<NotesRegistry, Violations> {
    let Some(map) = value.as_object() else {
        return Err(expected("notes", "an object", value).into());
    };

    let mut violations = Violations::new();
    let mut errors = Vec::new();
    let dir = optional_string(map, "dir", "", &mut errors).unwrap_or_default();
    let link = optional_string(map, "link", "", &mut errors).unwrap_or_default();
    let notes = match map.get("notes") {
        None | Some(Value::Null) => &[][..],
        Some(Value::Array(notes)) => notes.as_slice(),
        Some(other) => {
            errors.push(expected("notes", "an array of collections", other));
            &[][..]
        }
    };
    violations.extend(errors);

    let mut collections = Vec::with_capacity(notes.len());
    for (i, note) in notes.iter().enumerate() {
        let scope = format!("notes[{i}]");
        match collection(note, &scope) {
            Ok(collection) => collections.push((i, collection)),
            Err(errors) => violations.extend(errors),
        }
    }

    if !violations.is_empty() {
        // Link collisions among the well-formed collections belong to the same report.
        violations.extend(link_collisions(
            &link,
            collections.iter().map(|(i, collection)| (*i, collection)),
        ));
        return Err(violations);
    }
    NotesRegistry::new(dir, link, collections.into_iter().map(|(_, c)| c).collect())
}

fn collection(value: &Value, location: &str) -> Result<NoteCollection, Violations> {
    let Some(map) = value.as_object() else {
        return Err(expected(location, "a notes collection", value).into());
    };

    let mut errors = Vec::new();
    let dir = required_string(map, "dir", location, &mut errors);
    let link = required_string(map, "link", location, &mut errors);
    let sidebar = match map.get("sidebar") {
        Some(Value::Array(groups)) => groups
            .iter()
            .enumerate()
            .filter_map(|(i, group)| {
                let location = format!("{location}.sidebar[{i}]");
                match group {
                    Value::Object(map) => sidebar_group(map, &location, &mut errors),
                    other => {
                        errors.push(expected(&location, "a sidebar group", other));
                        None
                    }
                }
            })
            .collect(),
        Some(other) => {
            errors.push(expected(&format!("{location}.sidebar"), "an array of groups", other));
            Vec::new()
        }
        None => {
            errors.push(NavError::shape(
                format!("{location}.sidebar"),
                "missing required field",
            ));
            Vec::new()
        }
    };

    match (dir, link) {
        (Some(dir), Some(link)) if errors.is_empty() => {
            NoteCollection::new(dir, link, sidebar).map_err(|v| v.within(location))
        }
        _ => Err(errors.into()),
    }
}

fn sidebar_group(
    map: &Map<String, Value>,
    location: &str,
    errors: &mut Vec<NavError>,
) -> Option<SidebarGroup> {
    let text = required_string(map, "text", location, errors);
    let prefix = optional_string(map, "prefix", location, errors);
    let icon = optional_string(map, "icon", location, errors);
    let collapsed = match map.get("collapsed") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(collapsed)) => *collapsed,
        Some(other) => {
            errors.push(expected(&field(location, "collapsed"), "a boolean", other));
            false
        }
    };

    let mut group = SidebarGroup::new(text.unwrap_or_default()).with_collapsed(collapsed);
    if let Some(prefix) = prefix {
        group = group.with_prefix(prefix);
    }
    if let Some(icon) = icon {
        group = group.with_icon(icon);
    }

    match map.get("items") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                let item_location = format!("{location}.items[{i}]");
                match item {
                    Value::String(slug) => group = group.page(slug.as_str()),
                    Value::Object(map) => {
                        if let Some(inner) = sidebar_group(map, &item_location, errors) {
                            group = group.group(inner);
                        }
                    }
                    other => errors.push(expected(&item_location, "a page slug or a group", other)),
                }
            }
        }
        Some(other) => errors.push(expected(&field(location, "items"), "an array", other)),
    }

    Some(group)
}

fn navbar_entry(value: &Value, location: &str, errors: &mut Vec<NavError>) -> Option<NavbarEntry> {
    let Some(map) = value.as_object() else {
        errors.push(expected(location, "a navbar entry", value));
        return None;
    };

    let text = required_string(map, "text", location, errors);
    let icon = optional_string(map, "icon", location, errors);

    if let Some(items) = map.get("items") {
        let Value::Array(items) = items else {
            errors.push(expected(&field(location, "items"), "an array", items));
            return None;
        };
        let entries: Vec<_> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| navbar_entry(item, &format!("{location}.items[{i}]"), errors))
            .collect();
        let mut menu = NavbarMenu::new(text?);
        if let Some(icon) = icon {
            menu = menu.with_icon(icon);
        }
        return Some(entries.into_iter().fold(menu, NavbarMenu::item).into());
    }

    let link = required_string(map, "link", location, errors);
    let active_match = optional_string(map, "activeMatch", location, errors);
    let mut entry = NavbarLink::new(text?, link?);
    if let Some(icon) = icon {
        entry = entry.with_icon(icon);
    }
    if let Some(pattern) = active_match {
        entry = entry.with_active_match(pattern);
    }
    Some(entry.into())
}

fn required_string(
    map: &Map<String, Value>,
    key: &str,
    location: &str,
    errors: &mut Vec<NavError>,
) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(expected(&field(location, key), "a string", other));
            None
        }
        None => {
            errors.push(NavError::shape(field(location, key), "missing required field"));
            None
        }
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    location: &str,
    errors: &mut Vec<NavError>,
) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(expected(&field(location, key), "a string", other));
            None
        }
    }
}

fn field(location: &str, key: &str) -> String {
    if location.is_empty() {
        key.to_owned()
    } else {
        format!("{location}.{key}")
    }
}

fn expected(location: &str, what: &str, found: &Value) -> NavError {
    NavError::shape(location, format!("expected {what}, found {}", kind(found)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::SidebarItem;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn shape_errors(violations: &Violations) -> Vec<(&str, &str)> {
        violations
            .iter()
            .filter_map(|e| match e {
                NavError::Shape { location, message } => Some((location.as_str(), message.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_notes_from_value() {
        let value = json!({
            "dir": "en/notes",
            "link": "/en/",
            "notes": [{
                "dir": "mm_guide",
                "link": "/mm_guide/",
                "sidebar": [{
                    "text": "Basic Info",
                    "prefix": "basicinfo",
                    "collapsed": true,
                    "icon": "carbon:idea",
                    "items": ["intro", {"text": "Deep", "items": ["framework"]}]
                }],
                "unknown": "ignored"
            }]
        });

        let notes = notes_from_value(&value).unwrap();

        assert_eq!(notes.dir(), "en/notes");
        let group = &notes.notes()[0].sidebar()[0];
        assert!(group.collapsed());
        assert_eq!(group.icon(), Some("carbon:idea"));
        assert_eq!(group.items().len(), 2);
        assert!(matches!(&group.items()[1], SidebarItem::Group(inner) if inner.text() == "Deep"));
    }

    #[test]
    fn test_notes_reports_every_malformed_node() {
        let value = json!({
            "notes": [
                {
                    "dir": "ok",
                    "link": "/ok/",
                    "sidebar": [{"text": "Fine", "items": ["a"]}]
                },
                {
                    "dir": "bad",
                    "link": "/bad/",
                    "sidebar": [
                        {"text": "G", "items": ["a", "b", 3, {"items": []}]},
                        "loose"
                    ]
                },
                {"link": 7}
            ]
        });

        let err = notes_from_value(&value).unwrap_err();

        assert_eq!(
            shape_errors(&err),
            vec![
                ("notes[1].sidebar[0].items[2]", "expected a page slug or a group, found number"),
                ("notes[1].sidebar[0].items[3].text", "missing required field"),
                ("notes[1].sidebar[1]", "expected a sidebar group, found string"),
                ("notes[2].dir", "missing required field"),
                ("notes[2].link", "expected a string, found number"),
                ("notes[2].sidebar", "missing required field"),
            ]
        );
    }

    #[test]
    fn test_constructor_errors_are_scoped() {
        let value = json!({
            "dir": "en/notes",
            "link": "/en/",
            "notes": [
                {"dir": "a", "link": "/a/", "sidebar": []},
                {"dir": "b", "link": "/b/", "sidebar": [{"text": "G", "items": ["/abs"]}]}
            ]
        });

        let err = notes_from_value(&value).unwrap_err();

        assert_eq!(
            shape_errors(&err),
            vec![(
                "notes[1].sidebar[0].items[0]",
                "page slug '/abs' must be relative to its group"
            )]
        );
    }

    #[test]
    fn test_link_collisions_reported_with_shape_errors() {
        let value = json!({
            "dir": "en/notes",
            "link": "/en/",
            "notes": [
                {"dir": "a", "link": "/guide/", "sidebar": []},
                {"dir": "b", "link": "/b/", "sidebar": [{"text": "G", "items": [false]}]},
                {"dir": "c", "link": "guide", "sidebar": []}
            ]
        });

        let err = notes_from_value(&value).unwrap_err();

        assert_eq!(
            err.into_iter().collect::<Vec<_>>(),
            vec![
                NavError::shape(
                    "notes[1].sidebar[0].items[0]",
                    "expected a page slug or a group, found boolean"
                ),
                NavError::DuplicateLink {
                    path: "/en/guide".to_owned(),
                    first_source: "notes[0] (dir 'a')".to_owned(),
                    second_source: "notes[2] (dir 'c')".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_notes_must_be_an_object() {
        let err = notes_from_value(&json!(["a"])).unwrap_err();

        assert_eq!(shape_errors(&err), vec![("notes", "expected an object, found array")]);
    }

    #[test]
    fn test_navbar_from_array_and_items_object() {
        let entries = json!([
            {"text": "Home", "link": "/en/", "activeMatch": "^/en/$"},
            {"text": "Use Cases", "icon": "carbon:idea", "items": [
                {"text": "Intro", "link": "/en/notes/mm_guide/basicinfo/intro.md"}
            ]}
        ]);

        let from_array = navbar_from_value(&entries).unwrap();
        let from_object = navbar_from_value(&json!({"items": entries})).unwrap();

        assert_eq!(from_array, from_object);
        assert_eq!(from_array.entries().len(), 2);
        assert!(matches!(&from_array.entries()[1], NavbarEntry::Menu(menu) if menu.icon() == Some("carbon:idea")));
    }

    #[test]
    fn test_navbar_reports_malformed_entries() {
        let value = json!([
            {"text": "Home"},
            "bare",
            {"text": "Menu", "items": [{"link": "/x"}, {"text": "Bad", "link": "/y", "activeMatch": "("}]}
        ]);

        let err = navbar_from_value(&value).unwrap_err();

        assert_eq!(
            shape_errors(&err),
            vec![
                ("navbar[0].link", "missing required field"),
                ("navbar[1]", "expected a navbar entry, found string"),
                ("navbar[2].items[0].text", "missing required field"),
            ]
        );
    }

    #[test]
    fn test_navbar_constructor_checks_run_after_shape() {
        let value = json!([{"text": "Bad", "link": "/y", "activeMatch": "("}]);

        let err = navbar_from_value(&value).unwrap_err();

        assert_eq!(err.len(), 1);
        assert!(matches!(
            err.iter().next(),
            Some(NavError::Shape { location, message }) if location == "navbar[0]" && message.starts_with("invalid activeMatch")
        ));
    }
}
