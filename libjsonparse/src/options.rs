//! Caller-configurable parse limits.

/// Options for [`crate::parse_with_options`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum container nesting depth. `None` means unbounded, in which
    /// case deeply nested input is limited only by the call stack.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Options with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit container nesting to `depth` levels. The root array or object
    /// is level 1.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
