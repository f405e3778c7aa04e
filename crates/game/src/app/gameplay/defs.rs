use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use engine::{Vec2, ZoneMap};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use super::field::{Crop, Field};
use super::interactive::{Interactive, InteractiveState};
use super::landmarks::{House, River};
use super::pen::{Human, Pen};
use super::world::{World, WorldBuildError};

const DEFAULT_MATURITY_SECONDS: f32 = 20.0;
const DEFAULT_YIELD_PER_PLANTING: u32 = 3;
const DEFAULT_DAY_SECONDS: f32 = 60.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct WorldDefs {
    pub(crate) player: PlayerDef,
    pub(crate) zones: Vec<ZoneDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlayerDef {
    pub(crate) spawn: Vec2,
    pub(crate) move_speed: f32,
    #[serde(default)]
    pub(crate) hunger: i32,
    #[serde(default)]
    pub(crate) hunger_drain_per_second: f32,
    #[serde(default)]
    pub(crate) carrying: String,
    #[serde(default = "default_popup_seconds")]
    pub(crate) popup_seconds: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum ZoneDef {
    Field(FieldDef),
    Pen(PenDef),
    River(LandmarkDef),
    House(LandmarkDef),
}

impl ZoneDef {
    fn zone(&self) -> &str {
        match self {
            Self::Field(def) => &def.zone,
            Self::Pen(def) => &def.zone,
            Self::River(def) | Self::House(def) => &def.zone,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FieldDef {
    pub(crate) zone: String,
    pub(crate) title: String,
    pub(crate) crop: String,
    #[serde(default)]
    pub(crate) planted: bool,
    #[serde(default)]
    pub(crate) amount_left: u32,
    #[serde(default)]
    pub(crate) crop_ready: bool,
    #[serde(default = "default_maturity_seconds")]
    pub(crate) maturity_seconds: f32,
    #[serde(default = "default_yield_per_planting")]
    pub(crate) yield_per_planting: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PenDef {
    pub(crate) zone: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) food: u32,
    #[serde(default)]
    pub(crate) humans: Vec<String>,
    #[serde(default = "default_day_seconds")]
    pub(crate) day_seconds: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LandmarkDef {
    pub(crate) zone: String,
    pub(crate) title: String,
}

fn default_maturity_seconds() -> f32 {
    DEFAULT_MATURITY_SECONDS
}

fn default_yield_per_planting() -> u32 {
    DEFAULT_YIELD_PER_PLANTING
}

fn default_day_seconds() -> f32 {
    DEFAULT_DAY_SECONDS
}

fn default_popup_seconds() -> f32 {
    3.0
}

#[derive(Debug, Error)]
pub(crate) enum WorldDefsError {
    #[error("failed to read world definitions {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse world definitions at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("zone '{zone}' is defined more than once")]
    DuplicateZone { zone: String },
    #[error("expected exactly one house, found {count}")]
    HouseCount { count: usize },
    #[error(transparent)]
    Build(#[from] WorldBuildError),
}

pub(crate) fn load_world_defs(path: &Path) -> Result<WorldDefs, WorldDefsError> {
    let raw = fs::read_to_string(path).map_err(|source| WorldDefsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let defs = parse_world_defs(&raw)?;
    info!(
        path = %path.display(),
        zone_count = defs.zones.len(),
        "world_defs_loaded"
    );
    Ok(defs)
}

pub(crate) fn parse_world_defs(raw: &str) -> Result<WorldDefs, WorldDefsError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    let defs = serde_path_to_error::deserialize::<_, WorldDefs>(&mut deserializer).map_err(
        |error| {
            let path = error.path().to_string();
            WorldDefsError::Decode {
                path,
                source: error.into_inner(),
            }
        },
    )?;
    validate_world_defs(&defs)?;
    Ok(defs)
}

fn validate_world_defs(defs: &WorldDefs) -> Result<(), WorldDefsError> {
    let mut seen = HashSet::new();
    for def in &defs.zones {
        if !seen.insert(def.zone()) {
            return Err(WorldDefsError::DuplicateZone {
                zone: def.zone().to_string(),
            });
        }
    }

    let house_count = defs
        .zones
        .iter()
        .filter(|def| matches!(def, ZoneDef::House(_)))
        .count();
    if house_count != 1 {
        return Err(WorldDefsError::HouseCount { count: house_count });
    }
    Ok(())
}

/// Instantiates every zone entity once and hands them to the world together
/// with the zone geometry.
pub(crate) fn build_world(defs: &WorldDefs, zone_map: ZoneMap) -> Result<World, WorldDefsError> {
    let mut entities: Vec<Box<dyn Interactive>> = Vec::with_capacity(defs.zones.len());
    for def in &defs.zones {
        entities.push(build_zone(def, &zone_map));
    }
    Ok(World::new(zone_map, entities)?)
}

fn build_zone(def: &ZoneDef, zone_map: &ZoneMap) -> Box<dyn Interactive> {
    match def {
        ZoneDef::Field(def) => {
            let crop = if def.crop_ready {
                Crop::mature(def.crop.clone(), def.maturity_seconds)
            } else {
                Crop::new(def.crop.clone(), def.maturity_seconds)
            };
            Box::new(Field::new(
                InteractiveState::new(def.zone.clone(), def.title.clone()),
                crop,
                def.planted,
                def.amount_left,
                def.yield_per_planting,
            ))
        }
        ZoneDef::Pen(def) => {
            let rect = zone_map.rect_of(&def.zone).unwrap_or_else(|| {
                warn!(zone = %def.zone, "pen_rect_missing");
                Default::default()
            });
            Box::new(Pen::new(
                InteractiveState::new(def.zone.clone(), def.title.clone()),
                rect,
                def.humans.iter().map(Human::new).collect(),
                def.food,
                def.day_seconds,
            ))
        }
        ZoneDef::River(def) => Box::new(River::new(InteractiveState::new(
            def.zone.clone(),
            def.title.clone(),
        ))),
        ZoneDef::House(def) => Box::new(House::new(InteractiveState::new(
            def.zone.clone(),
            def.title.clone(),
        ))),
    }
}
