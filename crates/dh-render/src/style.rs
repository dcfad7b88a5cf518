//! Text run styling.

use dh_gdocs::types::{Alignment, TextRun, TextStyle};

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Text extracted from one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunText {
    /// Content with leading and trailing newlines removed.
    ///
    /// Compared against heading texts.
    pub text: String,
    /// Escaped `text`, wrapped in an anchor when the run is a link.
    pub html: String,
    /// Whether the untrimmed content ended with a newline.
    pub ends_with_newline: bool,
}

impl RunText {
    /// Extract the text of a run.
    #[must_use]
    pub fn extract(run: &TextRun) -> Self {
        let raw = run.text();
        let text = raw.trim_matches('\n');
        let escaped = escape_html(text);
        let html = match run.style().link_url() {
            Some(url) => format!(
                "<a href='{}' target='_blank'>{escaped}</a>",
                escape_html(url)
            ),
            None => escaped,
        };
        Self {
            text: text.to_owned(),
            html,
            ends_with_newline: raw.ends_with('\n'),
        }
    }

    /// Whether the run contributes nothing at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && !self.ends_with_newline
    }
}

/// Wrap `html` in the character style tags of `style`, innermost first.
pub(crate) fn apply_inline_style(html: &str, style: &TextStyle) -> String {
    let mut result = html.to_owned();
    for (enabled, tag) in [
        (style.is_bold(), "b"),
        (style.is_italic(), "i"),
        (style.is_underline(), "u"),
        (style.is_strikethrough(), "s"),
    ] {
        if enabled {
            result = format!("<{tag}>{result}</{tag}>");
        }
    }
    result
}

/// Wrap `html` in a block span for centered or end alignment.
pub(crate) fn apply_alignment(html: String, alignment: Option<Alignment>) -> String {
    match alignment {
        Some(Alignment::Center) => {
            format!("<span style='display: block; text-align: center'>{html}</span>")
        }
        Some(Alignment::End) => {
            format!("<span style='display: block; text-align: right'>{html}</span>")
        }
        _ => html,
    }
}

/// Insert `<br />` before every line break.
pub(crate) fn nl2br(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                result.push_str("<br />");
                result.push(c);
                let pair = if c == '\r' { '\n' } else { '\r' };
                if let Some(next) = chars.next_if_eq(&pair) {
                    result.push(next);
                }
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use dh_gdocs::mock::{run, styled_run};
    use dh_gdocs::types::Link;

    use super::*;

    fn style(bold: bool, italic: bool, underline: bool, strikethrough: bool) -> TextStyle {
        TextStyle {
            bold: Some(bold),
            italic: Some(italic),
            underline: Some(underline),
            strikethrough: Some(strikethrough),
            link: None,
        }
    }

    #[test]
    fn test_extract_trims_only_newlines() {
        let text = RunText::extract(&run("\n  Hello  \n\n"));
        assert_eq!(text.text, "  Hello  ");
        assert!(text.ends_with_newline);

        let text = RunText::extract(&run("Hello"));
        assert!(!text.ends_with_newline);
    }

    #[test]
    fn test_extract_blank() {
        assert!(RunText::extract(&run("")).is_blank());
        assert!(!RunText::extract(&run("\n")).is_blank());
    }

    #[test]
    fn test_extract_escapes_and_links() {
        let linked = styled_run(
            "Docs & more\n",
            TextStyle {
                link: Some(Link {
                    url: Some("https://example.com/?a=1&b=2".to_owned()),
                }),
                ..TextStyle::default()
            },
        );
        let text = RunText::extract(&linked);
        assert_eq!(text.text, "Docs & more");
        assert_eq!(
            text.html,
            "<a href='https://example.com/?a=1&amp;b=2' target='_blank'>Docs &amp; more</a>"
        );
        assert!(text.ends_with_newline);
    }

    #[test]
    fn test_inline_style_order() {
        assert_eq!(
            apply_inline_style("x", &style(true, true, true, true)),
            "<s><u><i><b>x</b></i></u></s>"
        );
        assert_eq!(apply_inline_style("x", &style(false, true, false, false)), "<i>x</i>");
        assert_eq!(apply_inline_style("x", &TextStyle::default()), "x");
    }

    #[test]
    fn test_alignment() {
        assert_eq!(
            apply_alignment("x".to_owned(), Some(Alignment::Center)),
            "<span style='display: block; text-align: center'>x</span>"
        );
        assert_eq!(
            apply_alignment("x".to_owned(), Some(Alignment::End)),
            "<span style='display: block; text-align: right'>x</span>"
        );
        assert_eq!(apply_alignment("x".to_owned(), Some(Alignment::Justified)), "x");
        assert_eq!(apply_alignment("x".to_owned(), None), "x");
    }

    #[test]
    fn test_nl2br() {
        assert_eq!(nl2br("a\nb"), "a<br />\nb");
        assert_eq!(nl2br("a\r\nb"), "a<br />\r\nb");
        assert_eq!(nl2br("plain"), "plain");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }
}
