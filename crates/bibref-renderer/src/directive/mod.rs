//! Pluggable directives API for `CommonMark` directive syntax.
//!
//! Handlers are registered on a [`DirectiveProcessor`] and invoked with a
//! mutable per-build state value.
//!
//! # Architecture
//!
//! Processing has two phases:
//!
//! 1. **Preprocessing** ([`DirectiveProcessor::process`]): directive syntax is
//!    replaced with HTML that passes through pulldown-cmark unchanged.
//!
//! 2. **Post-processing** ([`DirectiveProcessor::post_process`]): leaf
//!    handlers patch the rendered HTML through the [`Replacements`] collector,
//!    after every directive in the page has been seen.
//!
//! # Directive Types
//!
//! - **Inline** ([`InlineDirective`]): `:name[content]` anywhere in text
//! - **Leaf** ([`LeafDirective`]): `::name[content]` on its own line

mod args;
mod context;
mod fence;
mod inline;
mod leaf;
mod output;
mod parser;
mod processor;
mod replacements;

pub use args::DirectiveArgs;
pub use context::DirectiveContext;
pub use inline::InlineDirective;
pub use leaf::LeafDirective;
pub use output::DirectiveOutput;
pub use processor::DirectiveProcessor;
pub use replacements::Replacements;
