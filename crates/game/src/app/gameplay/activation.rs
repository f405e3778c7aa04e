use tracing::{debug, info, warn};

use super::world::World;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum ZoneState {
    #[default]
    NoZone,
    InZone(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ZoneTransition {
    Stayed,
    Entered(String),
    Left,
}

/// Diffs the player's current zone against the tracked one and drives
/// activation on the world's entities.
///
/// Moving straight from one zone into another activates the new zone but
/// leaves the previous one active. Both are cleared on the next frame spent
/// outside every zone.
#[derive(Debug, Default)]
pub(crate) struct ZoneTracker {
    state: ZoneState,
}

impl ZoneTracker {
    #[cfg(test)]
    pub(crate) fn state(&self) -> &ZoneState {
        &self.state
    }

    pub(crate) fn current_zone(&self) -> Option<&str> {
        match &self.state {
            ZoneState::NoZone => None,
            ZoneState::InZone(zone) => Some(zone),
        }
    }

    pub(crate) fn observe(
        &mut self,
        zone: Option<&str>,
        carrying: &str,
        world: &mut World,
    ) -> ZoneTransition {
        match zone.filter(|zone| !zone.is_empty()) {
            Some(zone) => {
                if self.current_zone() == Some(zone) {
                    return ZoneTransition::Stayed;
                }
                match world.zone_mut(zone) {
                    Some(entity) => entity.activate(carrying),
                    None => warn!(zone, "zone_without_entity"),
                }
                info!(zone, previous = ?self.current_zone(), carrying, "zone_activated");
                self.state = ZoneState::InZone(zone.to_string());
                ZoneTransition::Entered(zone.to_string())
            }
            None => {
                let was_in_zone = self.state != ZoneState::NoZone;
                self.state = ZoneState::NoZone;
                world.deactivate_all();
                if was_in_zone {
                    debug!("zones_deactivated");
                    ZoneTransition::Left
                } else {
                    ZoneTransition::Stayed
                }
            }
        }
    }
}
