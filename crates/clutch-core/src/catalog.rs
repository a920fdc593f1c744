//! Static reference data: the agent catalog and the map pool.

use crate::enums::AgentRole;
use crate::error::CatalogError;
use crate::types::{Agent, AgentId, MapId, MapLayout};

/// Read-only agent lookup.
#[derive(Debug, Clone)]
pub struct AgentCatalog {
    agents: Vec<Agent>,
}

impl AgentCatalog {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    /// The built-in roster of agents.
    pub fn builtin() -> Self {
        use AgentRole::*;

        let table: [(&str, AgentRole, u8); 20] = [
            ("Blaze", Duelist, 2),
            ("Razorwind", Duelist, 4),
            ("Phantom Lynx", Duelist, 3),
            ("Nova", Duelist, 5),
            ("Ember", Duelist, 1),
            ("Hawkeye", Initiator, 2),
            ("Pulse", Initiator, 3),
            ("Tracker", Initiator, 4),
            ("Breach Wolf", Initiator, 3),
            ("Echo", Initiator, 2),
            ("Veil", Controller, 2),
            ("Nightshade", Controller, 4),
            ("Cinder", Controller, 3),
            ("Mistral", Controller, 5),
            ("Dusk", Controller, 1),
            ("Warden", Sentinel, 2),
            ("Bastion", Sentinel, 3),
            ("Lockstep", Sentinel, 4),
            ("Tripwire", Sentinel, 1),
            ("Oracle", Sentinel, 5),
        ];

        let agents = table
            .iter()
            .enumerate()
            .map(|(i, (name, role, difficulty))| Agent {
                id: i as AgentId + 1,
                name: name.to_string(),
                role: *role,
                difficulty: *difficulty,
            })
            .collect();
        Self { agents }
    }

    pub fn list_agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn get_agent(&self, id: AgentId) -> Result<&Agent, CatalogError> {
        self.agents
            .iter()
            .find(|a| a.id == id)
            .ok_or(CatalogError::AgentNotFound(id))
    }

    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|a| a.id).collect()
    }
}

impl Default for AgentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The pool maps are drawn from.
#[derive(Debug, Clone)]
pub struct MapPool {
    maps: Vec<MapLayout>,
}

impl MapPool {
    pub fn new(maps: Vec<MapLayout>) -> Self {
        Self { maps }
    }

    pub fn builtin() -> Self {
        let table: [(&str, u8, u8, bool); 7] = [
            ("Harbor", 2, 4, true),
            ("Citadel", 3, 6, true),
            ("Dunes", 2, 5, true),
            ("Foundry", 2, 3, true),
            ("Monsoon", 3, 5, true),
            ("Glacier", 2, 6, true),
            ("Orbit", 2, 2, false),
        ];

        let maps = table
            .iter()
            .enumerate()
            .map(|(i, (name, sites, chokes, enabled))| MapLayout {
                id: i as MapId + 1,
                name: name.to_string(),
                bomb_sites: *sites,
                choke_points: *chokes,
                enabled: *enabled,
            })
            .collect();
        Self { maps }
    }

    pub fn maps(&self) -> &[MapLayout] {
        &self.maps
    }

    /// Maps eligible for selection.
    pub fn enabled(&self) -> Vec<&MapLayout> {
        self.maps.iter().filter(|m| m.enabled).collect()
    }

    pub fn get_map(&self, id: MapId) -> Result<&MapLayout, CatalogError> {
        self.maps
            .iter()
            .find(|m| m.id == id)
            .ok_or(CatalogError::MapNotFound(id))
    }
}

impl Default for MapPool {
    fn default() -> Self {
        Self::builtin()
    }
}
