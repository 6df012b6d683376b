// src/render.rs

//! Turns classified spans back into text: terminal escape sequences, HTML
//! markup in the class-name convention host engines use, or a plain token
//! listing.

use std::fmt::Write;

use crate::config::{OutputFormat, Theme};
use crate::highlight::Span;
use crate::style::SGR_RESET;

/// Class prefix host engines put in front of category names.
pub const HTML_CLASS_PREFIX: &str = "hljs-";

/// Renders in the given format.
pub fn render(format: OutputFormat, source: &str, spans: &[Span], theme: &Theme) -> String {
    match format {
        OutputFormat::Ansi => ansi(source, spans, theme),
        OutputFormat::Html => html(source, spans),
        OutputFormat::Tokens => tokens(source, spans),
    }
}

/// Wraps each classified span in its theme's SGR sequence and a reset.
/// Spans whose style is plain are copied through unchanged.
pub fn ansi(source: &str, spans: &[Span], theme: &Theme) -> String {
    let mut out = String::with_capacity(source.len());
    for span in spans {
        let text = span.text(source);
        let sequence = span
            .category
            .and_then(|category| theme.style_for(category).sgr_sequence());
        match sequence {
            Some(sequence) => {
                out.push_str(&sequence);
                out.push_str(text);
                out.push_str(SGR_RESET);
            }
            None => out.push_str(text),
        }
    }
    out
}

/// `<span class="hljs-{category}">` around classified spans, everything escaped.
pub fn html(source: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    for span in spans {
        let text = escape_html(span.text(source));
        match span.category {
            Some(category) => {
                // Writing to a String cannot fail.
                let _ = write!(
                    out,
                    "<span class=\"{}{}\">{}</span>",
                    HTML_CLASS_PREFIX, category, text
                );
            }
            None => out.push_str(&text),
        }
    }
    out
}

/// One line per classified span: `category<TAB>start..end<TAB>text`.
/// The text is debug-escaped so newlines stay on one line.
pub fn tokens(source: &str, spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        if let Some(category) = span.category {
            let _ = writeln!(
                out,
                "{}\t{}..{}\t{:?}",
                category,
                span.range.start,
                span.range.end,
                span.text(source)
            );
        }
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{alakon, Category, GrammarOptions};
    use crate::highlight::Highlighter;
    use crate::style::Style;

    fn spans(source: &str) -> Vec<Span> {
        Highlighter::new(&alakon(&GrammarOptions::extended()))
            .unwrap()
            .highlight(source)
    }

    #[test_log::test]
    fn ansi_wraps_only_classified_text() {
        let source = "if x < 42";
        let out = ansi(source, &spans(source), &Theme::default());
        assert_eq!(out, "\x1b[1;35mif\x1b[0m x < \x1b[36m42\x1b[0m");
    }

    #[test_log::test]
    fn ansi_skips_plain_styles() {
        let theme = Theme {
            number: Style::default(),
            ..Theme::default()
        };
        let source = "7";
        assert_eq!(ansi(source, &spans(source), &theme), "7");
    }

    #[test_log::test]
    fn html_uses_host_class_names() {
        let source = "num s = \"<b>\" & true";
        let out = html(source, &spans(source));
        assert_eq!(
            out,
            "<span class=\"hljs-built_in\">num</span> s = \
             <span class=\"hljs-string\">&quot;&lt;b&gt;&quot;</span> &amp; \
             <span class=\"hljs-keyword\">true</span>"
        );
    }

    #[test_log::test]
    fn tokens_lists_classified_spans() {
        let source = "while \"a\"";
        let out = tokens(source, &spans(source));
        assert_eq!(out, "keyword\t0..5\t\"while\"\nstring\t6..9\t\"\\\"a\\\"\"\n");
    }

    #[test_log::test]
    fn render_dispatches_on_format() {
        let source = "false";
        let spans = spans(source);
        let theme = Theme::default();
        assert_eq!(render(OutputFormat::Html, source, &spans, &theme), html(source, &spans));
        assert_eq!(render(OutputFormat::Tokens, source, &spans, &theme), tokens(source, &spans));
        assert!(render(OutputFormat::Ansi, source, &spans, &theme).contains("false"));
        assert_eq!(spans[0].category, Some(Category::Keyword));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_html("a<b>&'\""), "a&lt;b&gt;&amp;&#x27;&quot;");
    }
}
