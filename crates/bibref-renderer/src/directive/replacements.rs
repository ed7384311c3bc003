//! String replacements collected during post-processing.

/// Collects string replacements and applies them in one scan of the HTML.
///
/// Handlers register `(from, to)` pairs in
/// [`LeafDirective::post_process`](super::LeafDirective::post_process); the
/// processor then calls [`apply`](Self::apply) once. Inserted text is never
/// rescanned, so one handler's output cannot trigger another's replacement.
///
/// # Example
///
/// ```
/// use bibref_renderer::directive::Replacements;
///
/// let mut html = "<p>x</p><div data-refs></div>".to_string();
/// let mut replacements = Replacements::new();
/// replacements.add("<div data-refs></div>", r#"<div class="references"></div>"#);
/// replacements.apply(&mut html);
///
/// assert_eq!(html, r#"<p>x</p><div class="references"></div>"#);
/// ```
#[derive(Debug, Default)]
pub struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Create a new empty replacements collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new replacements collector with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Register a replacement: every occurrence of `from` becomes `to`.
    ///
    /// When two patterns match at the same position, the one registered first wins.
    /// Empty patterns are ignored.
    pub fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let from = from.into();
        if !from.is_empty() {
            self.items.push((from, to.into()));
        }
    }

    /// Apply all registered replacements.
    ///
    /// Consumes the collector to prevent accidental reuse.
    pub fn apply(self, html: &mut String) {
        if self.items.is_empty() {
            return;
        }

        let mut output = String::with_capacity(html.len());
        let mut rest = html.as_str();

        while let Some((pos, idx)) = self.earliest_match(rest) {
            let (from, to) = &self.items[idx];
            output.push_str(&rest[..pos]);
            output.push_str(to);
            rest = &rest[pos + from.len()..];
        }
        output.push_str(rest);

        *html = output;
    }

    /// Position and pattern index of the leftmost match in `s`.
    fn earliest_match(&self, s: &str) -> Option<(usize, usize)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(idx, (from, _))| s.find(from.as_str()).map(|pos| (pos, idx)))
            .min()
    }

    /// Check if there are any replacements registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of registered replacements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
