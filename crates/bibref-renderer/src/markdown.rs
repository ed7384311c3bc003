//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Options controlling the pulldown-cmark parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Enable GitHub-flavored extensions (tables, strikethrough, task lists).
    pub gfm: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self { gfm: true }
    }
}

impl MarkdownOptions {
    /// Parser options for pulldown-cmark.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

/// Render markdown to an HTML fragment.
///
/// Raw HTML produced by directive preprocessing passes through unchanged.
#[must_use]
pub fn render_markdown(markdown: &str, options: &MarkdownOptions) -> String {
    let parser = Parser::new_ext(markdown, options.parser_options());
    let mut output = String::with_capacity(markdown.len() + markdown.len() / 2);
    html::push_html(&mut output, parser);
    output
}
