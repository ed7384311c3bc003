//! Build session: bibliography loading and page rendering.

use std::path::Path;

use bibref_config::{Config, Overrides};
use bibref_renderer::directive::DirectiveProcessor;
use bibref_renderer::{MarkdownOptions, render_markdown};

use crate::{Bibliography, CiteDirective, Error, ReferencesDirective, Registry};

/// Result of rendering one page.
#[derive(Debug)]
pub struct RenderedPage {
    /// Rendered HTML fragment.
    pub html: String,
    /// Non-fatal problems, e.g. unknown citation keys.
    pub warnings: Vec<String>,
}

/// One documentation build.
///
/// Owns the citation registry for the lifetime of the build. Pages rendered
/// through the same session share citation numbers, so a key cited on an
/// earlier page keeps its number on later pages.
///
/// # Example
///
/// ```
/// use bibref::{Bibliography, Session};
/// use bibref_renderer::MarkdownOptions;
///
/// let bib = Bibliography::parse("@book{KNUTH1984, title = {Literate Programming}, year = 1984}")?;
/// let mut session = Session::from_bibliography(bib, MarkdownOptions::default());
///
/// let page = session.render("See :cite[knuth1984].\n\n::references\n");
/// assert!(page.html.contains(r##"<a href="#cite-1">[1]</a>"##));
/// assert!(page.html.contains(r#"id="cite-1""#));
/// # Ok::<(), bibref::Error>(())
/// ```
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    options: MarkdownOptions,
}

impl Session {
    /// Load configuration and initialize a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the bibliography cannot be loaded.
    pub fn load(config_path: Option<&Path>, overrides: Option<&Overrides>) -> Result<Self, Error> {
        let config = Config::load(config_path, overrides)?;
        Self::init(&config)
    }

    /// Build-start hook: read the configured bibliography once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] or [`Error::Parse`] if the bibliography cannot
    /// be loaded. Both abort the build.
    pub fn init(config: &Config) -> Result<Self, Error> {
        let bibliography = Bibliography::load(&config.bibliography_resolved.path)?;
        let options = MarkdownOptions {
            gfm: config.markdown.gfm,
        };
        Ok(Self::from_bibliography(bibliography, options))
    }

    #[must_use]
    pub fn from_bibliography(bibliography: Bibliography, options: MarkdownOptions) -> Self {
        Self {
            registry: Registry::new(bibliography),
            options,
        }
    }

    /// Directive processor with the `cite` and `references` handlers.
    ///
    /// For hosts that drive preprocessing and post-processing themselves.
    #[must_use]
    pub fn processor() -> DirectiveProcessor<Registry> {
        DirectiveProcessor::new()
            .with_inline(CiteDirective::new())
            .with_leaf(ReferencesDirective::new())
    }

    /// Render one markdown page to HTML.
    pub fn render(&mut self, markdown: &str) -> RenderedPage {
        let mut processor = Self::processor();

        let preprocessed = processor.process(markdown, &mut self.registry);
        let mut html = render_markdown(&preprocessed, &self.options);
        processor.post_process(&mut html, &self.registry);

        RenderedPage {
            html,
            warnings: processor.warnings(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
