use crate::CycleError;

/// Memory the orchestrator carries between cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentState {
    cursor: i64,
    last_failure: Option<CycleError>,
}

impl AgentState {
    /// Starts tracking from the given Unix timestamp with no failure memory.
    pub fn new(initial_cursor: i64) -> Self {
        Self {
            cursor: initial_cursor,
            last_failure: None,
        }
    }

    /// Lower bound of homework updates already observed.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// The failure whose notification was last delivered, if any.
    pub fn last_failure(&self) -> Option<&CycleError> {
        self.last_failure.as_ref()
    }

    /// Moves the cursor forward. The cursor never moves backward.
    pub(crate) fn advance_cursor(&mut self, timestamp: i64) {
        self.cursor = self.cursor.max(timestamp);
    }

    pub(crate) fn remember_failure(&mut self, failure: CycleError) {
        self.last_failure = Some(failure);
    }
}
