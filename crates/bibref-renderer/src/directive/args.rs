//! Directive argument parsing.
//!
//! Holds the `[content]` part of a directive.

/// Parsed arguments from directive syntax.
///
/// # Example
///
/// ```
/// use bibref_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::new("SMITH2020");
/// assert_eq!(args.content, "SMITH2020");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Content from brackets (empty string if not provided).
    pub content: String,
}

impl DirectiveArgs {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
