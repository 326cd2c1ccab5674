//! Per-call search statistics.

/// Counters from the most recent search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Tree nodes entered (root included).
    pub nodes_visited: u64,
    /// Sibling sets cut short by an alpha-beta bound.
    pub prunes: u64,
    /// Wall-clock time of the call, in microseconds.
    pub time_us: u64,
    /// Whether a node or time budget tripped mid-search.
    pub budget_exhausted: bool,
}

impl SearchStats {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
