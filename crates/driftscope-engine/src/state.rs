// crates/driftscope-engine/src/state.rs
//
// Run state machine for the drift loop.
//
// Valid transitions:
//   Running -> StoppedThreshold
//   Running -> StoppedMaxIter
// Both stopped states are terminal.

use std::fmt;

use driftscope_core::DriftError;

/// Lifecycle states of a drift-measurement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The loop is iterating.
    Running,
    /// A recorded distance strictly exceeded the stopping threshold.
    StoppedThreshold,
    /// The iteration cap was reached without exceeding the threshold.
    StoppedMaxIter,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunState::Running)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Running => write!(f, "Running"),
            RunState::StoppedThreshold => write!(f, "StoppedThreshold"),
            RunState::StoppedMaxIter => write!(f, "StoppedMaxIter"),
        }
    }
}

/// State machine enforcing the stopping contract.
pub struct RunStateMachine {
    pub current: RunState,
}

impl RunStateMachine {
    /// Create a state machine in the Running state.
    pub fn new() -> Self {
        Self {
            current: RunState::Running,
        }
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns an error if the transition is not valid; terminal states
    /// admit no transitions out.
    pub fn transition(&mut self, new_state: RunState) -> Result<(), DriftError> {
        let valid = matches!(
            (&self.current, &new_state),
            (RunState::Running, RunState::StoppedThreshold)
                | (RunState::Running, RunState::StoppedMaxIter)
        );

        if valid {
            tracing::info!("State transition: {} -> {}", self.current, new_state);
            self.current = new_state;
            Ok(())
        } else {
            Err(DriftError::InvalidState(format!(
                "invalid run state transition: {} -> {}",
                self.current, new_state
            )))
        }
    }
}

impl Default for RunStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
