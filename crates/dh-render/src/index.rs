//! Heading and route annotation index.

use std::collections::{BTreeMap, BTreeSet};

use dh_gdocs::types::{ParagraphElement, StructuralElement};

/// Headings of one document and the routes attached to them.
///
/// Heading texts are stored as written; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    headings: BTreeSet<String>,
    folded_headings: BTreeSet<String>,
    /// Route name to the heading texts annotated with it.
    routes: BTreeMap<String, BTreeSet<String>>,
}

impl DocumentIndex {
    /// Index the heading paragraphs of a document body.
    ///
    /// Within heading paragraphs, every plain run with text is a heading
    /// and becomes the anchor for following suggested insertions. A
    /// suggested insertion after an anchor is read as a route annotation.
    #[must_use]
    pub fn build(elements: &[StructuralElement]) -> Self {
        let mut index = Self::default();
        let mut anchor: Option<String> = None;

        let heading_paragraphs = elements
            .iter()
            .filter_map(StructuralElement::as_paragraph)
            .filter(|p| p.is_heading_style());

        for paragraph in heading_paragraphs {
            for run in paragraph
                .elements
                .iter()
                .filter_map(ParagraphElement::as_text_run)
            {
                let text = run.text().trim();
                if text.is_empty() {
                    continue;
                }
                if run.is_suggested_insertion() {
                    if let Some(heading) = &anchor {
                        for route in parse_route_annotation(text) {
                            index.add_route(route, heading);
                        }
                    }
                    continue;
                }
                index.add_heading(text);
                anchor = Some(text.to_owned());
            }
        }

        index
    }

    fn add_heading(&mut self, text: &str) {
        self.headings.insert(text.to_owned());
        self.folded_headings.insert(text.to_lowercase());
    }

    fn add_route(&mut self, route: String, heading: &str) {
        self.routes
            .entry(route)
            .or_default()
            .insert(heading.to_owned());
    }

    /// Whether `text` is a known heading of this document.
    #[must_use]
    pub fn is_heading(&self, text: &str) -> bool {
        !text.is_empty() && self.folded_headings.contains(&text.to_lowercase())
    }

    /// Routes annotated on `heading`, in name order.
    #[must_use]
    pub fn routes_for(&self, heading: &str) -> Vec<&str> {
        let folded = heading.to_lowercase();
        self.routes
            .iter()
            .filter(|(_, headings)| headings.iter().any(|h| h.to_lowercase() == folded))
            .map(|(route, _)| route.as_str())
            .collect()
    }

    /// Known heading texts as written.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.headings.iter().map(String::as_str)
    }
}

/// Parse a `[route_a, route_b]` annotation into unique route names.
///
/// One leading `[` and one trailing `]` are stripped; names are trimmed,
/// empty names dropped, and duplicates removed keeping first occurrence.
#[must_use]
pub fn parse_route_annotation(annotation: &str) -> Vec<String> {
    let inner = annotation.strip_prefix('[').unwrap_or(annotation);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let mut routes: Vec<String> = Vec::new();
    for name in inner.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        if !routes.iter().any(|r| r == name) {
            routes.push(name.to_owned());
        }
    }
    routes
}

#[cfg(test)]
mod tests {
    use dh_gdocs::mock::{DocumentBuilder, paragraph, run, suggestion};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_route_annotation_dedups() {
        assert_eq!(parse_route_annotation("[a, a, b]"), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_route_annotation_drops_empty_names() {
        assert_eq!(
            parse_route_annotation("[ admin_users ,, ,admin_roles]"),
            vec!["admin_users", "admin_roles"]
        );
        assert!(parse_route_annotation("[]").is_empty());
        assert_eq!(parse_route_annotation("app_home"), vec!["app_home"]);
    }

    #[test]
    fn test_build_collects_headings_and_routes() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Users", "admin_users, admin_roles")
            .text("Body")
            .heading("Settings")
            .build();
        let index = DocumentIndex::build(&doc.body.content);

        assert_eq!(index.headings().collect::<Vec<_>>(), vec!["Settings", "Users"]);
        assert!(index.is_heading("users"));
        assert!(!index.is_heading("Body"));
        assert_eq!(index.routes_for("USERS"), vec!["admin_roles", "admin_users"]);
        assert!(index.routes_for("Settings").is_empty());
    }

    #[test]
    fn test_annotation_without_preceding_heading_is_ignored() {
        let doc = DocumentBuilder::new("d")
            .paragraph_element(paragraph("HEADING_1", vec![suggestion("[admin_x]"), run("\n")]))
            .build();
        let index = DocumentIndex::build(&doc.body.content);
        assert!(index.routes_for("").is_empty());
        assert_eq!(index.headings().count(), 0);
    }

    #[test]
    fn test_multi_run_heading_anchors_last_run() {
        let doc = DocumentBuilder::new("d")
            .paragraph_element(paragraph(
                "HEADING_3",
                vec![run("Roles "), run("and rights"), suggestion("[admin_roles]")],
            ))
            .build();
        let index = DocumentIndex::build(&doc.body.content);
        assert!(index.is_heading("Roles"));
        assert!(index.is_heading("and rights"));
        assert_eq!(index.routes_for("and rights"), vec!["admin_roles"]);
    }

    #[test]
    fn test_anchor_carries_across_heading_paragraphs() {
        let doc = DocumentBuilder::new("d")
            .heading("Users")
            .paragraph_element(paragraph("HEADING_2", vec![suggestion("[admin_users]")]))
            .build();
        let index = DocumentIndex::build(&doc.body.content);
        assert_eq!(index.routes_for("Users"), vec!["admin_users"]);
    }

    #[test]
    fn test_normal_text_is_not_indexed() {
        let doc = DocumentBuilder::new("d")
            .runs(vec![run("Plain"), suggestion("[app_x]")])
            .build();
        let index = DocumentIndex::build(&doc.body.content);
        assert!(!index.is_heading("Plain"));
        assert!(index.routes_for("Plain").is_empty());
    }
}
