//! Inline citation markers: `:cite[KEY]`.

use bibref_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};

use crate::Registry;

/// Text emitted in place of a citation whose key is not in the bibliography.
pub const CITATION_NOT_FOUND: &str = "[Citation not found]";

/// Resolve a citation key to its inline marker, assigning a number on first use.
///
/// # Example
///
/// ```
/// use bibref::{Bibliography, Entry, Registry, resolve};
///
/// let mut registry = Registry::new(Bibliography::from_entries(vec![Entry::new("SMITH2020")]));
///
/// assert_eq!(resolve(&mut registry, "smith2020"), r##"<a href="#cite-1">[1]</a>"##);
/// assert_eq!(resolve(&mut registry, "NOPE"), "[Citation not found]");
/// ```
pub fn resolve(registry: &mut Registry, key: &str) -> String {
    render_marker(registry.cite(key))
}

fn render_marker(number: Option<u32>) -> String {
    match number {
        Some(n) => format!(r##"<a href="#cite-{n}">[{n}]</a>"##),
        None => CITATION_NOT_FOUND.to_owned(),
    }
}

/// Marker for insertion into markdown source.
///
/// Brackets become character references so the markdown parser cannot read
/// `[N]` as a reference link; they render back as literal brackets.
fn markdown_marker(number: Option<u32>) -> String {
    render_marker(number).replace('[', "&#91;").replace(']', "&#93;")
}

/// The `cite` inline directive.
///
/// `:cite[KEY]` becomes a link to the matching reference list entry.
/// Unknown keys render as [`CITATION_NOT_FOUND`] and are reported through
/// [`warnings`](InlineDirective::warnings).
#[derive(Debug, Default)]
pub struct CiteDirective {
    warnings: Vec<String>,
}

impl CiteDirective {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InlineDirective<Registry> for CiteDirective {
    fn name(&self) -> &'static str {
        "cite"
    }

    fn process(
        &mut self,
        args: DirectiveArgs,
        ctx: &mut DirectiveContext<'_, Registry>,
    ) -> DirectiveOutput {
        let key = args.content.trim();
        if key.is_empty() {
            return DirectiveOutput::Skip;
        }

        let number = ctx.state.cite(key);
        if number.is_none() {
            tracing::warn!(key, line = ctx.line, "Citation key not found");
            self.warnings
                .push(format!("line {}: citation key '{key}' not found", ctx.line));
        }

        DirectiveOutput::html(markdown_marker(number))
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
