//! Directive processor for `CommonMark` directives.
//!
//! Handles preprocessing (before pulldown-cmark) and post-processing (after rendering).

use super::fence::FenceTracker;
use super::parser::{ParsedDirective, find_inline, parse_leaf_line};
use super::{DirectiveContext, DirectiveOutput, InlineDirective, LeafDirective, Replacements};

/// Processor for `CommonMark` directives.
///
/// Generic over the per-build state `S` that handlers read and mutate. The
/// state is not owned by the processor; it is passed into
/// [`process`](Self::process) and [`post_process`](Self::post_process), so the
/// same state can outlive several processors (one per page).
///
/// # Example
///
/// ```
/// use bibref_renderer::directive::{
///     DirectiveArgs, DirectiveContext, DirectiveOutput, DirectiveProcessor, InlineDirective,
/// };
///
/// struct Footnote;
///
/// impl InlineDirective<u32> for Footnote {
///     fn name(&self) -> &str { "fn" }
///     fn process(&mut self, _args: DirectiveArgs, ctx: &mut DirectiveContext<'_, u32>) -> DirectiveOutput {
///         *ctx.state += 1;
///         DirectiveOutput::html(format!("<sup>{}</sup>", ctx.state))
///     }
/// }
///
/// let mut count = 0_u32;
/// let mut processor = DirectiveProcessor::<u32>::new().with_inline(Footnote);
/// let output = processor.process("One:fn[] two:fn[]", &mut count);
/// assert_eq!(output, "One<sup>1</sup> two<sup>2</sup>");
/// ```
pub struct DirectiveProcessor<S> {
    inline_handlers: Vec<Box<dyn InlineDirective<S>>>,
    leaf_handlers: Vec<Box<dyn LeafDirective<S>>>,
    fence: FenceTracker,
}

impl<S> Default for DirectiveProcessor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> DirectiveProcessor<S> {
    /// Create a processor with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inline_handlers: Vec::new(),
            leaf_handlers: Vec::new(),
            fence: FenceTracker::default(),
        }
    }

    /// Register an inline directive handler.
    #[must_use]
    pub fn with_inline<D: InlineDirective<S> + 'static>(mut self, handler: D) -> Self {
        self.inline_handlers.push(Box::new(handler));
        self
    }

    /// Register a leaf directive handler.
    #[must_use]
    pub fn with_leaf<D: LeafDirective<S> + 'static>(mut self, handler: D) -> Self {
        self.leaf_handlers.push(Box::new(handler));
        self
    }

    /// Preprocess markdown, replacing handled directives with their HTML.
    ///
    /// Directives are dispatched strictly in document order, top to bottom and
    /// left to right. Fenced code blocks and inline code spans are left alone.
    #[must_use]
    pub fn process(&mut self, input: &str, state: &mut S) -> String {
        self.fence = FenceTracker::default();

        let mut output = String::with_capacity(input.len());
        let line_count = input.lines().count();

        for (idx, line) in input.lines().enumerate() {
            let processed = self.process_line(line, idx + 1, state);
            output.push_str(&processed);

            // Preserve line endings
            if idx + 1 < line_count || input.ends_with('\n') {
                output.push('\n');
            }
        }

        output
    }

    fn process_line(&mut self, line: &str, line_num: usize, state: &mut S) -> String {
        if self.fence.update(line) || self.fence.in_fence() {
            return line.to_owned();
        }

        if let Some(directive) = parse_leaf_line(line)
            && let Some(html) = self.dispatch_leaf(directive, line_num, state)
        {
            return html;
        }

        self.process_inline_directives(line, line_num, state)
    }

    fn process_inline_directives(&mut self, line: &str, line_num: usize, state: &mut S) -> String {
        let mut result = String::with_capacity(line.len());
        let mut remaining = line;

        while let Some((directive, start, end)) = find_inline(remaining) {
            result.push_str(&remaining[..start]);

            match self.dispatch_inline(directive, line_num, state) {
                DirectiveOutput::Html(html) => result.push_str(&html),
                DirectiveOutput::Skip => result.push_str(&remaining[start..end]),
            }

            remaining = &remaining[end..];
        }

        result.push_str(remaining);
        result
    }

    fn dispatch_inline(
        &mut self,
        directive: ParsedDirective,
        line_num: usize,
        state: &mut S,
    ) -> DirectiveOutput {
        let Some(handler) = self
            .inline_handlers
            .iter_mut()
            .find(|h| h.name() == directive.name)
        else {
            return DirectiveOutput::Skip;
        };

        let mut ctx = DirectiveContext {
            line: line_num,
            state,
        };
        handler.process(directive.args, &mut ctx)
    }

    /// Returns `None` when no handler takes the line, so it can still be
    /// scanned for inline directives.
    fn dispatch_leaf(
        &mut self,
        directive: ParsedDirective,
        line_num: usize,
        state: &mut S,
    ) -> Option<String> {
        let handler = self
            .leaf_handlers
            .iter_mut()
            .find(|h| h.name() == directive.name)?;

        let mut ctx = DirectiveContext {
            line: line_num,
            state,
        };
        match handler.process(directive.args, &mut ctx) {
            DirectiveOutput::Html(html) => Some(html),
            DirectiveOutput::Skip => None,
        }
    }

    /// Post-process rendered HTML.
    ///
    /// Collects replacements from every leaf handler and applies them in a
    /// single pass. `state` is the state after preprocessing finished.
    pub fn post_process(&mut self, html: &mut String, state: &S) {
        let mut replacements = Replacements::with_capacity(self.leaf_handlers.len());

        for handler in &mut self.leaf_handlers {
            handler.post_process(state, &mut replacements);
        }

        replacements.apply(html);
    }

    /// Get all warnings generated by the registered handlers.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let inline = self.inline_handlers.iter().flat_map(|h| h.warnings());
        let leaf = self.leaf_handlers.iter().flat_map(|h| h.warnings());
        inline.chain(leaf).cloned().collect()
    }
}
