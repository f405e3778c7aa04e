use std::collections::BTreeMap;

use engine::{Vec2, ZoneMap};
use thiserror::Error;
use tracing::{info, warn};

use super::interactive::Interactive;

#[derive(Debug, Error)]
pub(crate) enum WorldBuildError {
    #[error("zone '{zone}' is placed in the zone map but has no entity")]
    UnknownZone { zone: String },
    #[error("zone '{zone}' has more than one entity")]
    DuplicateEntity { zone: String },
}

/// Owns every zone entity for the lifetime of the run together with the
/// immutable zone geometry.
pub(crate) struct World {
    zone_map: ZoneMap,
    zones: BTreeMap<String, Box<dyn Interactive>>,
}

impl World {
    pub(crate) fn new(
        zone_map: ZoneMap,
        entities: Vec<Box<dyn Interactive>>,
    ) -> Result<Self, WorldBuildError> {
        let mut zones = BTreeMap::new();
        for entity in entities {
            let zone = entity.id().to_string();
            if zones.contains_key(&zone) {
                return Err(WorldBuildError::DuplicateEntity { zone });
            }
            zones.insert(zone, entity);
        }

        if let Some(zone) = zone_map.zone_ids().find(|zone| !zones.contains_key(*zone)) {
            return Err(WorldBuildError::UnknownZone {
                zone: zone.to_string(),
            });
        }

        for zone in zones.keys() {
            if zone_map.rect_of(zone).is_none() {
                warn!(zone = %zone, "zone_entity_not_placed");
            }
        }

        info!(
            zone_count = zones.len(),
            region_count = zone_map.len(),
            "world_built"
        );
        Ok(Self { zone_map, zones })
    }

    #[cfg(test)]
    pub(crate) fn zone_map(&self) -> &ZoneMap {
        &self.zone_map
    }

    pub(crate) fn zone_at(&self, point: Vec2) -> Option<&str> {
        self.zone_map.zone_at(point)
    }

    pub(crate) fn zone(&self, id: &str) -> Option<&(dyn Interactive + 'static)> {
        self.zones.get(id).map(|zone| zone.as_ref())
    }

    pub(crate) fn zone_mut(&mut self, id: &str) -> Option<&mut (dyn Interactive + 'static)> {
        self.zones.get_mut(id).map(|zone| zone.as_mut())
    }

    #[cfg(test)]
    pub(crate) fn zones(&self) -> impl Iterator<Item = &(dyn Interactive + 'static)> + '_ {
        self.zones.values().map(|zone| zone.as_ref())
    }

    pub(crate) fn deactivate_all(&mut self) {
        for zone in self.zones.values_mut() {
            zone.deactivate();
        }
    }

    pub(crate) fn update(&mut self, fixed_dt_seconds: f32) {
        for zone in self.zones.values_mut() {
            zone.update(fixed_dt_seconds);
        }
    }

    #[cfg(test)]
    pub(crate) fn active_zone_ids(&self) -> Vec<&str> {
        self.zones()
            .filter(|zone| zone.is_active())
            .map(|zone| zone.id())
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.zones.len()
    }
}
