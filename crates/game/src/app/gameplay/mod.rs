mod activation;
mod defs;
mod events;
mod field;
mod interactive;
mod landmarks;
mod pen;
mod player;
mod presenter;
mod scene;
mod world;

use engine::{Scene, ZoneMap};

pub(crate) use defs::{load_world_defs, WorldDefsError};
#[cfg(test)]
pub(crate) use interactive::{MenuEntry, ZoneOverlay};
pub(crate) use presenter::{FrameView, Presenter};

use defs::{build_world, WorldDefs};
use player::{Hud, Player};
use scene::FarmScene;

/// Builds the farm scene from loaded world definitions and zone geometry.
pub(crate) fn build_scene(
    defs: &WorldDefs,
    zone_map: ZoneMap,
    presenter: Box<dyn Presenter>,
) -> Result<Box<dyn Scene>, WorldDefsError> {
    let world = build_world(defs, zone_map)?;
    let player = Player::from_def(&defs.player);
    let hud = Hud::new(defs.player.popup_seconds);
    Ok(Box::new(FarmScene::new(world, player, hud, presenter)))
}
