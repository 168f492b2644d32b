//! Call-site trace sources.
//!
//! A scope asks its trace source for text once when it opens and once per
//! failed assertion. Capturing and formatting stack traces is left to the
//! source; the scope only copies whatever comes back into its buffer.

/// Supplies call-site trace text
pub trait TraceSource {
    fn capture(&self) -> Option<String>;
}

/// Never supplies anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSource for NoTrace {
    fn capture(&self) -> Option<String> {
        None
    }
}

/// Trace source backed by a closure
pub struct FnTrace<F>(pub F);

impl<F> TraceSource for FnTrace<F>
where
    F: Fn() -> Option<String>,
{
    fn capture(&self) -> Option<String> {
        (self.0)()
    }
}
