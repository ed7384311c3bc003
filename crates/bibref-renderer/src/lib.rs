//! Markdown rendering with pluggable directives.
//!
//! This crate is the host side of bibref: it expands CommonMark directives
//! through handlers registered on a [`DirectiveProcessor`](directive::DirectiveProcessor),
//! converts the result to HTML with pulldown-cmark, and lets handlers patch the
//! HTML in a post-processing pass.
//!
//! Handlers never reach for global state. Each processing call is given a
//! mutable state value `S` that is threaded through to every handler via
//! [`DirectiveContext`](directive::DirectiveContext).
//!
//! # Example
//!
//! ```
//! use bibref_renderer::{MarkdownOptions, render_markdown};
//!
//! let html = render_markdown("# Hello\n\n**Bold** text", &MarkdownOptions::default());
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

pub mod directive;
mod markdown;
mod util;

pub use markdown::{MarkdownOptions, render_markdown};
pub use util::escape_html;
