//! Tactical advice with a canned fallback.
//!
//! The advisory service is optional and best-effort. Any failure is logged
//! and replaced by a role-keyed line so the match never waits on it.

use tracing::warn;

use clutch_core::enums::PlayerRole;
use clutch_core::error::AdvisoryError;
use clutch_core::providers::{AdvisoryContext, AdvisoryService};

/// Canned advice keyed by the side's focus role.
pub fn fallback_advice(role: Option<PlayerRole>) -> &'static str {
    match role {
        Some(PlayerRole::Duelist) => "Let the duelists take first contact and trade them quickly.",
        Some(PlayerRole::Initiator) => "Clear angles with utility before anyone peeks.",
        Some(PlayerRole::Controller) => "Smoke off the rotations and slow the round down.",
        Some(PlayerRole::Sentinel) => "Anchor the sites and play for the retake.",
        Some(PlayerRole::Flex) | None => "Reset, stick together and play your default.",
    }
}

/// Ask the service, falling back to canned text on any error.
pub fn advice_or_fallback(
    service: Option<&dyn AdvisoryService>,
    context: &AdvisoryContext,
) -> String {
    let Some(service) = service else {
        return fallback_advice(context.focus_role).to_string();
    };
    match service.tactical_advice(context) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => fallback_advice(context.focus_role).to_string(),
        Err(err) => {
            warn!(%err, side = ?context.side, "advisory service failed, using canned advice");
            fallback_advice(context.focus_role).to_string()
        }
    }
}

/// Offline advisor that always serves the canned lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedAdvisor;

impl AdvisoryService for CannedAdvisor {
    fn tactical_advice(&self, context: &AdvisoryContext) -> Result<String, AdvisoryError> {
        Ok(fallback_advice(context.focus_role).to_string())
    }
}
