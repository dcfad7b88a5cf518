//! List item accumulation.

/// Pending list items of the section being built.
///
/// A list item may arrive as several runs; runs are appended to the last
/// item until one ends with a newline, which seals the item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccumulator {
    items: Vec<String>,
}

impl ListAccumulator {
    /// Append styled HTML to the item in progress.
    pub fn push(&mut self, html: &str) {
        match self.items.last_mut() {
            Some(item) => item.push_str(html),
            None => self.items.push(html.to_owned()),
        }
    }

    /// Close the item in progress and open an empty one.
    pub fn seal(&mut self) {
        self.items.push(String::new());
    }

    /// Append all pending items as one `<ul>` to `out` and clear.
    ///
    /// Empty items are omitted. Does nothing when no item is pending.
    pub fn flush_into(&mut self, out: &mut String) {
        if self.items.is_empty() {
            return;
        }
        out.push_str("<ul>");
        for item in self.items.drain(..).filter(|item| !item.is_empty()) {
            out.push_str("<li>");
            out.push_str(&item);
            out.push_str("</li>");
        }
        out.push_str("</ul>");
    }
}
