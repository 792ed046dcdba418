use serde::{Deserialize, Serialize};

/// Where an election currently sits in its lifecycle.
///
/// This is always computed from the stored fields (`is_active` plus the
/// voting window) at read time; it is never stored, and there is no
/// background task driving transitions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionPhase {
    /// The voting window has not opened yet.
    Scheduled,
    /// Open for voting: `is_active` is set and now is within the window.
    Active,
    /// Past the window, or deactivated by an administrator mid-window.
    Closed,
}
