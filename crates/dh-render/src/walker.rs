//! Content walk over one document.
//!
//! The walk is a fold: [`WalkState::step`] consumes the state and one
//! structural element and returns the next state. A section closes when a
//! heading boundary is crossed, emitting one [`RouteRecord`] per route
//! owned by the walked subsystem.

use dh_gdocs::types::{
    Document, InlineObjectElement, Paragraph, ParagraphElement, StructuralElement, TextRun,
};
use tracing::debug;

use crate::image::ImageAssets;
use crate::index::DocumentIndex;
use crate::list::ListAccumulator;
use crate::store::{HelpRecord, RouteRecord};
use crate::style::{RunText, apply_alignment, apply_inline_style, nl2br};
use crate::subsystem::Subsystem;
use crate::table::render_table;

/// Read-only inputs of a walk.
#[derive(Debug, Clone, Copy)]
pub struct WalkContext<'a> {
    /// Index of the walked document.
    pub index: &'a DocumentIndex,
    /// Resolved images of the document's locale.
    pub images: &'a ImageAssets,
    /// Subsystem the document belongs to.
    pub subsystem: Subsystem,
}

/// Accumulator threaded through the walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkState {
    current_heading: String,
    fragment: String,
    list: ListAccumulator,
    records: Vec<RouteRecord>,
}

impl WalkState {
    /// Heading of the section being built, empty before the first heading.
    #[must_use]
    pub fn current_heading(&self) -> &str {
        &self.current_heading
    }

    /// HTML of the section being built, without pending list items.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Records emitted so far.
    #[must_use]
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<RouteRecord> {
        self.records
    }

    /// Process one structural element.
    #[must_use]
    pub fn step(
        mut self,
        element: &StructuralElement,
        is_last: bool,
        ctx: &WalkContext<'_>,
    ) -> Self {
        match element {
            StructuralElement::Table(table) => {
                if self.in_section() {
                    self.list.flush_into(&mut self.fragment);
                    self.fragment.push_str(&render_table(table));
                }
            }
            StructuralElement::Paragraph(paragraph) => {
                for inline in &paragraph.elements {
                    match inline {
                        ParagraphElement::TextRun(run) if run.has_pending_suggestion() => {}
                        ParagraphElement::TextRun(run) => {
                            self.text_run(paragraph, run, is_last, ctx);
                        }
                        ParagraphElement::InlineObject(object) => {
                            self.image(paragraph, object, ctx);
                        }
                        ParagraphElement::Other => {}
                    }
                }
            }
            StructuralElement::Other => {}
        }
        self
    }

    fn in_section(&self) -> bool {
        !self.current_heading.is_empty()
    }

    fn image(
        &mut self,
        paragraph: &Paragraph,
        object: &InlineObjectElement,
        ctx: &WalkContext<'_>,
    ) {
        let Some(asset) = object
            .inline_object_id
            .as_deref()
            .and_then(|id| ctx.images.get(id))
        else {
            return;
        };
        if self.in_section() {
            self.list.flush_into(&mut self.fragment);
            self.fragment.push_str(&asset.to_html(paragraph.alignment()));
        }
    }

    fn text_run(
        &mut self,
        paragraph: &Paragraph,
        run: &TextRun,
        is_last: bool,
        ctx: &WalkContext<'_>,
    ) {
        let text = RunText::extract(run);
        if text.is_blank() {
            return;
        }

        let end_of_document = is_last && ctx.index.is_heading(&self.current_heading);
        let next_heading = text.text != self.current_heading
            && ctx.index.is_heading(&text.text)
            && paragraph.is_heading_style();

        if end_of_document || next_heading {
            self.close_section(ctx);
            self.current_heading = text.text;
        } else if self.in_section() {
            self.append(paragraph, run, &text);
        }
    }

    fn append(&mut self, paragraph: &Paragraph, run: &TextRun, text: &RunText) {
        let styled = apply_inline_style(&text.html, run.style());

        if paragraph.list_id().is_some() {
            self.list.push(&styled);
            if text.ends_with_newline {
                self.list.seal();
            }
            return;
        }

        self.list.flush_into(&mut self.fragment);
        self.fragment
            .push_str(&nl2br(&apply_alignment(styled, paragraph.alignment())));
        if text.ends_with_newline {
            self.fragment.push_str("<br/>");
        }
    }

    /// Emit the current section to every owned route and start over.
    fn close_section(&mut self, ctx: &WalkContext<'_>) {
        self.list.flush_into(&mut self.fragment);
        let content = std::mem::take(&mut self.fragment);
        if !self.in_section() {
            return;
        }

        let routes: Vec<&str> = ctx
            .index
            .routes_for(&self.current_heading)
            .into_iter()
            .filter(|route| ctx.subsystem.owns_route(route))
            .collect();
        debug!(
            "Closing section '{}' for {} route(s)",
            self.current_heading,
            routes.len()
        );

        for route in routes {
            self.records.push(RouteRecord {
                route: route.to_owned(),
                record: HelpRecord {
                    heading: self.current_heading.clone(),
                    content: content.clone(),
                },
            });
        }
    }
}

/// Walk a document and collect its help records.
#[must_use]
pub fn walk_document(document: &Document, ctx: &WalkContext<'_>) -> Vec<RouteRecord> {
    let elements = &document.body.content;
    let last = elements.len().saturating_sub(1);
    elements
        .iter()
        .enumerate()
        .fold(WalkState::default(), |state, (i, element)| {
            state.step(element, i == last, ctx)
        })
        .into_records()
}

#[cfg(test)]
mod tests {
    use dh_gdocs::mock::{DocumentBuilder, paragraph, run, styled_run, suggestion};
    use dh_gdocs::types::{Alignment, TextStyle};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::image::ImageAsset;

    fn walk(document: &Document, subsystem: Subsystem) -> Vec<RouteRecord> {
        walk_with_images(document, subsystem, &ImageAssets::new())
    }

    fn walk_with_images(
        document: &Document,
        subsystem: Subsystem,
        images: &ImageAssets,
    ) -> Vec<RouteRecord> {
        let index = DocumentIndex::build(&document.body.content);
        let ctx = WalkContext {
            index: &index,
            images,
            subsystem,
        };
        walk_document(document, &ctx)
    }

    fn contents(records: &[RouteRecord]) -> Vec<(&str, &str, &str)> {
        records
            .iter()
            .map(|r| {
                (
                    r.route.as_str(),
                    r.record.heading.as_str(),
                    r.record.content.as_str(),
                )
            })
            .collect()
    }

    fn bold() -> TextStyle {
        TextStyle {
            bold: Some(true),
            ..TextStyle::default()
        }
    }

    #[test]
    fn test_single_heading_two_paragraphs() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Users", "admin_users")
            .text("First")
            .text("Second")
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Admin)),
            vec![("admin_users", "Users", "<br/>First<br/>Second<br/>")]
        );
    }

    #[test]
    fn test_sections_split_at_headings() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Users", "admin_users")
            .text("About users")
            .heading_with_routes("Roles", "admin_roles, admin_users")
            .text("About roles")
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Admin)),
            vec![
                ("admin_users", "Users", "<br/>About users<br/>"),
                ("admin_roles", "Roles", "<br/>About roles<br/>"),
                ("admin_users", "Roles", "<br/>About roles<br/>"),
            ]
        );
    }

    #[test]
    fn test_other_subsystem_routes_are_dropped() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home, admin_home")
            .text("Welcome")
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Client)),
            vec![("app_home", "Home", "<br/>Welcome<br/>")]
        );
        assert_eq!(
            contents(&walk(&doc, Subsystem::Admin)),
            vec![("admin_home", "Home", "<br/>Welcome<br/>")]
        );
    }

    #[test]
    fn test_content_before_first_heading_is_ignored() {
        let doc = DocumentBuilder::new("d")
            .text("Preamble")
            .table(vec![vec![("cell", None)]])
            .heading_with_routes("Home", "app_home")
            .text("Body")
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Client)),
            vec![("app_home", "Home", "<br/>Body<br/>")]
        );
    }

    #[test]
    fn test_suggested_edits_never_appear() {
        let mut deletion = run("deleted ");
        deletion.suggested_deletion_ids = vec!["s.2".to_owned()];
        let mut restyle = run("restyled ");
        restyle
            .suggested_text_style_changes
            .insert("s.3".to_owned(), serde_json::json!({"textStyle": {}}));

        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home")
            .runs(vec![
                run("kept "),
                suggestion("inserted "),
                deletion,
                restyle,
                run("end\n"),
            ])
            .build();

        let records = walk(&doc, Subsystem::Client);
        assert_eq!(contents(&records), vec![("app_home", "Home", "<br/>kept end<br/>")]);
    }

    #[test]
    fn test_bullets_collapse_into_one_list() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Steps", "app_steps")
            .bullet("l1", vec![styled_run("One", bold()), run(" first\n")])
            .bullet("l1", vec![run("\n")])
            .bullet("l1", vec![run("Two\n")])
            .bullet("l1", vec![run("Three")])
            .text("After")
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Client)),
            vec![(
                "app_steps",
                "Steps",
                "<br/><ul><li><b>One</b> first</li><li>Two</li><li>Three</li></ul>After<br/>"
            )]
        );
    }

    #[test]
    fn test_pending_list_flushed_at_heading_boundary() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Steps", "app_steps")
            .bullet("l1", vec![run("One\n")])
            .heading_with_routes("Next", "app_next")
            .text("Other")
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Client)),
            vec![
                ("app_steps", "Steps", "<br/><ul><li>One</li></ul>"),
                ("app_next", "Next", "<br/>Other<br/>"),
            ]
        );
    }

    #[test]
    fn test_image_flushes_list_and_uses_paragraph_alignment() {
        let mut images = ImageAssets::new();
        images.insert(
            "kix.1".to_owned(),
            ImageAsset {
                data_uri: "data:image/png;base64,AA==".to_owned(),
                width: 150.0,
                height: 75.0,
            },
        );
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Steps", "app_steps")
            .bullet("l1", vec![run("One\n")])
            .image_aligned("kix.1", "https://img/a.png", 100.0, 50.0, Some(Alignment::Center))
            .image("kix.unresolved", "https://img/b.png", 1.0, 1.0)
            .build();

        let records = walk_with_images(&doc, Subsystem::Client, &images);
        assert_eq!(
            contents(&records),
            vec![(
                "app_steps",
                "Steps",
                "<br/><ul><li>One</li></ul>\
                 <img src='data:image/png;base64,AA==' width='150' height='75' \
                 referrerpolicy='no-referrer' style='display: block; margin: auto; text-align: center;' />\
                 <span style='display: block; text-align: center'></span><br/>\
                 <br/>"
            )]
        );
    }

    #[test]
    fn test_alignment_and_styles() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home")
            .aligned("Centered", Alignment::Center)
            .aligned("Right", Alignment::End)
            .runs(vec![styled_run("<b>", bold())])
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Client)),
            vec![(
                "app_home",
                "Home",
                "<br/><span style='display: block; text-align: center'>Centered</span><br/>\
                 <span style='display: block; text-align: right'>Right</span><br/>\
                 <b>&lt;b&gt;</b>"
            )]
        );
    }

    #[test]
    fn test_table_inside_section() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home")
            .table(vec![vec![("A", None)]])
            .build();

        let records = walk(&doc, Subsystem::Client);
        assert_eq!(
            records[0].record.content,
            "<br/><br><table class=\"table\" style=\"width: 100%\"><tr>\
             <td style='background-color: rgb(255, 255, 255)'>A</td></tr></table>"
        );
    }

    #[test]
    fn test_heading_text_requires_heading_style() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Users", "admin_users")
            .text("Roles")
            .heading_with_routes("Roles", "admin_roles")
            .text("x")
            .build();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Admin)),
            vec![
                ("admin_users", "Users", "<br/>Roles<br/>"),
                ("admin_roles", "Roles", "<br/>x<br/>"),
            ]
        );
    }

    #[test]
    fn test_last_element_closes_section() {
        let mut doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home")
            .text("Body")
            .build();
        // Without the trailing empty paragraph the last run becomes the boundary.
        doc.body.content.pop();

        assert_eq!(
            contents(&walk(&doc, Subsystem::Client)),
            vec![("app_home", "Home", "<br/>")]
        );
    }

    #[test]
    fn test_document_without_last_boundary_emits_nothing_for_open_section() {
        let mut doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home")
            .element(StructuralElement::Other)
            .element(StructuralElement::Paragraph(paragraph("NORMAL_TEXT", vec![])))
            .build();
        doc.body.content.pop();

        assert!(walk(&doc, Subsystem::Client).is_empty());
    }

    #[test]
    fn test_step_by_step_state() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home")
            .bullet("l1", vec![run("pending")])
            .build();
        let index = DocumentIndex::build(&doc.body.content);
        let images = ImageAssets::new();
        let ctx = WalkContext {
            index: &index,
            images: &images,
            subsystem: Subsystem::Client,
        };

        let state = WalkState::default().step(&doc.body.content[0], false, &ctx);
        assert_eq!(state.current_heading(), "Home");
        assert_eq!(state.fragment(), "<br/>");

        let state = state.step(&doc.body.content[1], false, &ctx);
        assert_eq!(state.fragment(), "<br/>");
        assert!(state.records().is_empty());

        let state = state.step(&doc.body.content[2], true, &ctx);
        assert_eq!(state.current_heading(), "");
        assert_eq!(
            contents(state.records()),
            vec![("app_home", "Home", "<br/><ul><li>pending</li></ul>")]
        );
    }

    #[test]
    fn test_repeated_walk_is_identical() {
        let doc = DocumentBuilder::new("d")
            .heading_with_routes("Home", "app_home")
            .text("Body")
            .bullet("l", vec![run("item\n")])
            .build();
        assert_eq!(walk(&doc, Subsystem::Client), walk(&doc, Subsystem::Client));
    }
}
