//! Wheel strategy state machine.
//!
//! ```text
//!   Cash --PutSold--> WaitingAssignment --PutAssigned--> Assigned
//!    ^                      |                              |
//!    +------PutExpired------+                              |
//!    +---------------------CallSold------------------------+
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::signal::Action;

/// Shares per option contract, used when an assignment does not say.
pub const SHARES_PER_CONTRACT: u32 = 100;

/// Position of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelState {
    Cash,
    WaitingAssignment,
    Assigned,
    /// Any state name this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl WheelState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::WaitingAssignment => "waiting_assignment",
            Self::Assigned => "assigned",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for WheelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that happened to the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelEvent {
    PutSold,
    PutExpired,
    PutAssigned { shares: u32 },
    /// Covered call sold; the shares are assumed called away.
    CallSold,
}

impl fmt::Display for WheelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PutSold => f.write_str("put_sold"),
            Self::PutExpired => f.write_str("put_expired"),
            Self::PutAssigned { shares } => write!(f, "put_assigned({shares})"),
            Self::CallSold => f.write_str("call_sold"),
        }
    }
}

impl From<Action> for WheelEvent {
    fn from(action: Action) -> Self {
        match action {
            Action::SellPut => Self::PutSold,
            Action::SellCall => Self::CallSold,
        }
    }
}

/// Apply `event` to `state`.
pub fn transition(state: WheelState, event: WheelEvent) -> Result<WheelState, CoreError> {
    use WheelEvent::*;
    use WheelState::*;

    match (state, event) {
        (Cash, PutSold) => Ok(WaitingAssignment),
        (WaitingAssignment, PutExpired) => Ok(Cash),
        (WaitingAssignment, PutAssigned { .. }) => Ok(Assigned),
        (Assigned, CallSold) => Ok(Cash),
        _ => Err(CoreError::Conflict(format!(
            "Invalid wheel transition: {state} -> {event}"
        ))),
    }
}

/// The trade to place next, if any.
pub fn recommended_action(state: WheelState) -> Option<Action> {
    match state {
        WheelState::Cash => Some(Action::SellPut),
        WheelState::Assigned => Some(Action::SellCall),
        WheelState::WaitingAssignment | WheelState::Unknown => None,
    }
}
