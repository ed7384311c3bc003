//! BibTeX citations and reference lists for markdown documentation.
//!
//! Authors cite sources inline with `:cite[KEY]` and place the reference
//! list with a `::references` line. Citation numbers are assigned in order
//! of first reference; the list contains only cited entries, ordered by
//! number.
//!
//! # Architecture
//!
//! - [`Bibliography`] reads and parses the BibTeX file (via `biblatex`).
//! - [`Registry`] holds the per-build citation numbers.
//! - [`CiteDirective`] and [`ReferencesDirective`] plug into the
//!   `bibref-renderer` directive processor and receive the registry
//!   explicitly through the directive context.
//! - [`Session`] ties these together for one build.
//!
//! # Example
//!
//! ```
//! use bibref::{Bibliography, Session};
//! use bibref_renderer::MarkdownOptions;
//!
//! let bib = Bibliography::parse(r"
//!     @article{SMITH2020, author = {Smith, J.}, title = {Foo}, year = 2020}
//! ")?;
//! let mut session = Session::from_bibliography(bib, MarkdownOptions::default());
//!
//! let page = session.render("As shown :cite[SMITH2020].\n\n::references\n");
//! assert!(page.html.contains("Smith, J., Foo, 2020."));
//! # Ok::<(), bibref::Error>(())
//! ```

mod bibliography;
mod cite;
mod error;
mod references;
mod registry;
mod session;

pub use bibliography::{Bibliography, Entry};
pub use cite::{CITATION_NOT_FOUND, CiteDirective, resolve};
pub use error::Error;
pub use references::{
    ReferenceField, ReferencesDirective, format_authors, render_entry, render_references,
};
pub use registry::{Citation, Registry};
pub use session::{RenderedPage, Session};

/// Stylesheet for the reference list classes
/// (`references`, `citation`, `citation-number`, `citation-text`).
pub const STYLESHEET: &str = include_str!("../assets/style.css");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_covers_reference_classes() {
        for class in [
            ".references",
            ".citation",
            ".citation-number",
            ".citation-text",
        ] {
            assert!(STYLESHEET.contains(class), "missing {class}");
        }
    }
}
