//! User commands accepted by the match engine.
//!
//! Commands are validated and applied at the next tick boundary. Invalid
//! commands leave the match unchanged.

use serde::{Deserialize, Serialize};

use crate::enums::TeamSide;
use crate::types::AgentId;

/// All possible user actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Draft ---
    /// Pick an agent for a side during the pick phase.
    SelectAgent { side: TeamSide, agent_id: AgentId },
    /// Ban an agent on behalf of the side to act.
    BanAgent { agent_id: AgentId },

    // --- Timeouts ---
    /// Call a timeout. No-op when the side has none left.
    CallTimeout { side: TeamSide },
    /// End the running timeout early.
    ResumeFromTimeout,

    // --- Clock control ---
    /// Pause (`false`) or resume (`true`) every countdown.
    SetPlaying { playing: bool },
    /// Abandon the match. Discards all in-progress state.
    ExitMatch,
}
