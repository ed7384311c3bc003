//! Directive output types.

/// Output from directive processing.
///
/// - [`Html`](Self::Html): HTML that passes through pulldown-cmark unchanged
/// - [`Skip`](Self::Skip): leave the directive text in the document as written
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveOutput {
    /// HTML that passes through pulldown-cmark unchanged.
    Html(String),
    /// Don't handle this directive (pass through unchanged).
    Skip,
}

impl DirectiveOutput {
    /// Create an HTML output.
    ///
    /// # Example
    ///
    /// ```
    /// use bibref_renderer::directive::DirectiveOutput;
    ///
    /// let output = DirectiveOutput::html(r##"<a href="#cite-1">[1]</a>"##);
    /// assert!(matches!(output, DirectiveOutput::Html(_)));
    /// ```
    #[must_use]
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }
}
