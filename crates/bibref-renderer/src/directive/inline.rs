//! Inline directive trait.
//!
//! Inline directives use single-colon syntax: `:name[content]`

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput};

/// Handler for inline directives: `:name[content]`
///
/// Inline directives appear within text flow and produce inline HTML.
/// `S` is the per-build state the processor is run with.
///
/// # Example
///
/// ```
/// use bibref_renderer::directive::{DirectiveArgs, DirectiveContext, DirectiveOutput, InlineDirective};
///
/// struct Footnote;
///
/// impl InlineDirective<u32> for Footnote {
///     fn name(&self) -> &str { "fn" }
///
///     fn process(&mut self, _args: DirectiveArgs, ctx: &mut DirectiveContext<'_, u32>) -> DirectiveOutput {
///         *ctx.state += 1;
///         DirectiveOutput::html(format!("<sup>{}</sup>", ctx.state))
///     }
/// }
/// ```
pub trait InlineDirective<S>: Send {
    /// Directive name, matched against `:name[...]`.
    fn name(&self) -> &str;

    /// Process one occurrence of the directive.
    ///
    /// Returns [`DirectiveOutput::Html`] to emit HTML or
    /// [`DirectiveOutput::Skip`] to leave the source text in place.
    fn process(&mut self, args: DirectiveArgs, ctx: &mut DirectiveContext<'_, S>)
    -> DirectiveOutput;

    /// Warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}
