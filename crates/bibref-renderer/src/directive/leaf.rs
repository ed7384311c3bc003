//! Leaf directive trait.
//!
//! Leaf directives use double-colon syntax on a line of their own:
//! `::name[content]`

use super::{DirectiveArgs, DirectiveContext, DirectiveOutput, Replacements};

/// Handler for leaf directives: `::name[content]`
///
/// Leaf directives are self-contained blocks.
///
/// # Two-Phase Processing
///
/// A leaf directive whose output depends on the whole document (such as a
/// list of everything referenced on the page) emits a placeholder from
/// [`process`](Self::process) and registers the real markup in
/// [`post_process`](Self::post_process), which runs after the entire page
/// has been preprocessed and rendered.
pub trait LeafDirective<S>: Send {
    /// Directive name, matched against `::name[...]`.
    fn name(&self) -> &str;

    /// Process one occurrence of the directive.
    fn process(&mut self, args: DirectiveArgs, ctx: &mut DirectiveContext<'_, S>)
    -> DirectiveOutput;

    /// Register string replacements to apply to the rendered HTML.
    ///
    /// `state` is the final per-build state after preprocessing.
    fn post_process(&mut self, _state: &S, _replacements: &mut Replacements) {}

    /// Warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}
