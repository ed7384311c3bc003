//! Reference list rendering: `::references`.
//!
//! Output markup:
//!
//! ```text
//! <div class="references">
//!   <div class="citation">
//!     <div class="citation-number" id="cite-1">1.</div>
//!     <div class="citation-text">Authors, Title, <i>Book</i>, <i>Publisher</i>, Year.</div>
//!   </div>
//!   ...
//! </div>
//! ```
//!
//! (whitespace added for readability; the rendered HTML has none).

use bibref_renderer::directive::{
    DirectiveArgs, DirectiveContext, DirectiveOutput, LeafDirective, Replacements,
};
use bibref_renderer::escape_html;

use crate::{Entry, Registry};

/// Emitted during preprocessing and swapped for the list after rendering.
///
/// A `div` line starts an HTML block in `CommonMark`, so pulldown-cmark keeps
/// it verbatim.
const REFERENCES_PLACEHOLDER: &str = "<div data-bibref-references></div>";

/// One display field of a reference, in rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceField<'a> {
    Authors(&'a str),
    Title { text: &'a str, url: Option<&'a str> },
    BookTitle { text: &'a str, url: Option<&'a str> },
    Publisher(&'a str),
    Year(&'a str),
}

impl<'a> ReferenceField<'a> {
    /// Present fields of `entry` in display order.
    #[must_use]
    pub fn from_entry(entry: &'a Entry) -> Vec<Self> {
        [
            entry.author.as_deref().map(Self::Authors),
            entry.title.as_deref().map(|text| Self::Title {
                text,
                url: entry.url.as_deref(),
            }),
            entry.booktitle.as_deref().map(|text| Self::BookTitle {
                text,
                url: entry.bookurl.as_deref(),
            }),
            entry.publisher.as_deref().map(Self::Publisher),
            entry.year.as_deref().map(Self::Year),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    #[must_use]
    pub fn render(&self) -> String {
        match *self {
            Self::Authors(authors) => format_authors(authors),
            Self::Title { text, url } => link(text, url),
            Self::BookTitle { text, url } => format!("<i>{}</i>", link(text, url)),
            Self::Publisher(publisher) => format!("<i>{}</i>", escape_html(publisher.trim())),
            Self::Year(year) => escape_html(year.trim()),
        }
    }
}

fn link(text: &str, url: Option<&str>) -> String {
    let text = escape_html(text.trim());
    match url {
        Some(url) => format!(r#"<a href="{}">{text}</a>"#, escape_html(url.trim())),
        None => text,
    }
}

/// Shorten long author lists.
///
/// The raw string is split on the literal substring `and`. With more than
/// three parts, only the first part is kept, followed by an italic "et al.".
/// Names that contain "and" (e.g. "Alexander") also split there.
///
/// # Example
///
/// ```
/// use bibref::format_authors;
///
/// assert_eq!(format_authors("Smith, J. and Doe, A."), "Smith, J. and Doe, A.");
/// assert_eq!(
///     format_authors("Jones, A. and Lee, B. and Park, C. and Kim, D."),
///     "Jones, A. <i>et al.</i>"
/// );
/// ```
#[must_use]
pub fn format_authors(authors: &str) -> String {
    let parts: Vec<&str> = authors.split("and").collect();
    if parts.len() > 3 {
        format!("{} <i>et al.</i>", escape_html(parts[0].trim()))
    } else {
        escape_html(authors.trim())
    }
}

/// Render one reference list item.
#[must_use]
pub fn render_entry(number: u32, entry: &Entry) -> String {
    let text = ReferenceField::from_entry(entry)
        .iter()
        .map(ReferenceField::render)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"<div class="citation"><div class="citation-number" id="cite-{number}">{number}.</div><div class="citation-text">{text}.</div></div>"#
    )
}

/// Render every cited entry, in citation-number order.
///
/// Entries that were never cited are left out.
#[must_use]
pub fn render_references(registry: &Registry) -> String {
    let cited = registry.cited();
    tracing::debug!(count = cited.len(), "Rendering reference list");

    let mut html = String::from(r#"<div class="references">"#);
    for citation in cited {
        if let Some(number) = citation.number() {
            html.push_str(&render_entry(number, citation.entry()));
        }
    }
    html.push_str("</div>");
    html
}

/// The `references` leaf directive.
///
/// The list is rendered in post-processing, so it includes citations that
/// appear after the directive in the page.
#[derive(Debug, Default)]
pub struct ReferencesDirective {
    seen: bool,
}

impl ReferencesDirective {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeafDirective<Registry> for ReferencesDirective {
    fn name(&self) -> &'static str {
        "references"
    }

    fn process(
        &mut self,
        _args: DirectiveArgs,
        _ctx: &mut DirectiveContext<'_, Registry>,
    ) -> DirectiveOutput {
        self.seen = true;
        // Trailing newline leaves a blank line, closing the HTML block.
        DirectiveOutput::html(format!("{REFERENCES_PLACEHOLDER}\n"))
    }

    fn post_process(&mut self, state: &Registry, replacements: &mut Replacements) {
        if self.seen {
            replacements.add(REFERENCES_PLACEHOLDER, render_references(state));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bibliography;
    use pretty_assertions::assert_eq;

    fn entry(key: &str) -> Entry {
        Entry::new(key)
    }

    #[test]
    fn test_authors_up_to_three_verbatim() {
        assert_eq!(format_authors("Smith, J."), "Smith, J.");
        assert_eq!(
            format_authors("Lee, B. and Park, C. and Kim, D."),
            "Lee, B. and Park, C. and Kim, D."
        );
    }

    #[test]
    fn test_authors_four_or_more_et_al() {
        assert_eq!(
            format_authors("Jones, A. and Lee, B. and Park, C. and Kim, D."),
            "Jones, A. <i>et al.</i>"
        );
        assert_eq!(
            format_authors("A and B and C and D and E"),
            "A <i>et al.</i>"
        );
    }

    #[test]
    fn test_authors_literal_and_split() {
        // "Alexander" contains "and", giving four segments
        assert_eq!(
            format_authors("Alexander, C. and Brown, D. and Chen, E."),
            "Alex <i>et al.</i>"
        );
    }

    #[test]
    fn test_title_with_and_without_url() {
        let linked = Entry {
            title: Some("Foo".to_owned()),
            url: Some("https://example.com/foo".to_owned()),
            ..entry("A")
        };
        let plain = Entry {
            title: Some("Foo".to_owned()),
            ..entry("B")
        };

        assert_eq!(
            render_entry(1, &linked),
            r#"<div class="citation"><div class="citation-number" id="cite-1">1.</div><div class="citation-text"><a href="https://example.com/foo">Foo</a>.</div></div>"#
        );
        assert_eq!(
            render_entry(2, &plain),
            r#"<div class="citation"><div class="citation-number" id="cite-2">2.</div><div class="citation-text">Foo.</div></div>"#
        );
    }

    #[test]
    fn test_missing_title_omitted() {
        let entry = Entry {
            author: Some("Smith, J.".to_owned()),
            year: Some("2020".to_owned()),
            ..entry("A")
        };

        let fields = ReferenceField::from_entry(&entry);
        assert_eq!(
            fields,
            vec![ReferenceField::Authors("Smith, J."), ReferenceField::Year("2020")]
        );
        assert!(render_entry(1, &entry).contains(">Smith, J., 2020.</div>"));
    }

    #[test]
    fn test_all_fields_in_order() {
        let entry = Entry {
            author: Some("Doe, J.".to_owned()),
            title: Some("Baz".to_owned()),
            url: Some("https://example.com/baz".to_owned()),
            booktitle: Some("Proceedings".to_owned()),
            bookurl: Some("https://example.com/proc".to_owned()),
            publisher: Some("ACM".to_owned()),
            year: Some("2018".to_owned()),
            ..entry("DOE2018")
        };

        let text: Vec<String> = ReferenceField::from_entry(&entry)
            .iter()
            .map(ReferenceField::render)
            .collect();
        assert_eq!(
            text,
            vec![
                "Doe, J.".to_owned(),
                r#"<a href="https://example.com/baz">Baz</a>"#.to_owned(),
                r#"<i><a href="https://example.com/proc">Proceedings</a></i>"#.to_owned(),
                "<i>ACM</i>".to_owned(),
                "2018".to_owned(),
            ]
        );
    }

    #[test]
    fn test_book_title_without_url_is_italic() {
        let field = ReferenceField::BookTitle {
            text: "Handbook",
            url: None,
        };
        assert_eq!(field.render(), "<i>Handbook</i>");
    }

    #[test]
    fn test_values_trimmed_and_escaped() {
        let field = ReferenceField::Title {
            text: "  Tom & Jerry <3 ",
            url: Some(r#"https://example.com/?a=1&b="2""#),
        };
        assert_eq!(
            field.render(),
            r#"<a href="https://example.com/?a=1&amp;b=&quot;2&quot;">Tom &amp; Jerry &lt;3</a>"#
        );
    }

    #[test]
    fn test_entry_without_fields() {
        assert!(render_entry(3, &entry("EMPTY")).contains(r#"<div class="citation-text">.</div>"#));
    }

    #[test]
    fn test_render_references_only_cited_in_order() {
        let mut registry = Registry::new(Bibliography::from_entries(vec![
            Entry {
                title: Some("Alpha".to_owned()),
                ..entry("A")
            },
            Entry {
                title: Some("Beta".to_owned()),
                ..entry("B")
            },
            Entry {
                title: Some("Gamma".to_owned()),
                ..entry("C")
            },
        ]));
        registry.cite("C");
        registry.cite("A");

        let html = render_references(&registry);

        assert!(html.starts_with(r#"<div class="references">"#));
        assert!(html.ends_with("</div></div>"));
        assert!(!html.contains("Beta"));
        let gamma = html.find("Gamma").unwrap();
        let alpha = html.find("Alpha").unwrap();
        assert!(gamma < alpha);
        assert!(html.contains(r#"id="cite-1">1.</div><div class="citation-text">Gamma.</div>"#));
        assert!(html.contains(r#"id="cite-2">2.</div><div class="citation-text">Alpha.</div>"#));
    }

    #[test]
    fn test_render_references_empty() {
        let registry = Registry::new(Bibliography::from_entries(vec![entry("A")]));
        assert_eq!(render_references(&registry), r#"<div class="references"></div>"#);
    }

    #[test]
    fn test_directive_post_process() {
        let mut registry = Registry::new(Bibliography::from_entries(vec![Entry {
            title: Some("Foo".to_owned()),
            ..entry("A")
        }]));
        let mut directive = ReferencesDirective::new();

        let mut ctx = DirectiveContext {
            line: 1,
            state: &mut registry,
        };
        let output = directive.process(DirectiveArgs::default(), &mut ctx);
        assert_eq!(
            output,
            DirectiveOutput::Html(format!("{REFERENCES_PLACEHOLDER}\n"))
        );

        registry.cite("A");

        let mut html = format!("{REFERENCES_PLACEHOLDER}\n<p>text</p>\n");
        let mut replacements = Replacements::new();
        directive.post_process(&registry, &mut replacements);
        replacements.apply(&mut html);

        assert!(html.starts_with(r#"<div class="references"><div class="citation">"#));
        assert!(html.ends_with("</div></div></div>\n<p>text</p>\n"));
    }

    #[test]
    fn test_directive_not_seen_no_replacement() {
        let registry = Registry::default();
        let mut directive = ReferencesDirective::new();
        let mut replacements = Replacements::new();

        directive.post_process(&registry, &mut replacements);
        assert!(replacements.is_empty());
    }
}
