//! Directive processing context.

/// Context handed to a directive handler for one directive occurrence.
///
/// Carries the source location and a mutable borrow of the per-build state
/// the processor was invoked with. Handlers read and update that state
/// directly; nothing is shared through globals.
///
/// # Example
///
/// ```
/// use bibref_renderer::directive::DirectiveContext;
///
/// let mut counter = 0_u32;
/// let ctx = DirectiveContext { line: 3, state: &mut counter };
/// *ctx.state += 1;
/// assert_eq!(counter, 1);
/// ```
pub struct DirectiveContext<'a, S> {
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Per-build state shared by all handlers of a processor.
    pub state: &'a mut S,
}
