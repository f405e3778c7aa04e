use engine::{InputSnapshot, OptionKey, Scene, SceneCommand};
use tracing::{debug, info};

use super::activation::{ZoneTracker, ZoneTransition};
use super::events::EventBus;
use super::interactive::apply_option_keys;
use super::player::{Hud, Player};
use super::presenter::{FrameView, Presenter};
use super::world::World;

/// The farm: one world, one player, one popup HUD.
///
/// Per frame: move, resolve the zone under the player, drive activation,
/// run pressed options against the tracked zone, tick the world, then let the
/// player and HUD drain the event bus.
pub(crate) struct FarmScene {
    world: World,
    tracker: ZoneTracker,
    events: EventBus,
    player: Player,
    hud: Hud,
    presenter: Box<dyn Presenter>,
    frame: u64,
}

impl FarmScene {
    pub(crate) fn new(
        world: World,
        player: Player,
        hud: Hud,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        Self {
            world,
            tracker: ZoneTracker::default(),
            events: EventBus::default(),
            player,
            hud,
            presenter,
            frame: 0,
        }
    }

    pub(crate) fn frame_view(&self) -> FrameView {
        let zone_panel = self
            .tracker
            .current_zone()
            .and_then(|zone| self.world.zone(zone))
            .and_then(|zone| zone.overlay(self.player.carrying()));
        FrameView {
            frame: self.frame,
            position: self.player.position(),
            zone_panel,
            popup: self.hud.visible_popup().map(str::to_string),
            carrying: self.player.carrying().to_string(),
            hunger: self.player.hunger(),
        }
    }

    fn drive_activation(&mut self) {
        let zone = self
            .world
            .zone_at(self.player.position())
            .map(str::to_string);
        let transition = self
            .tracker
            .observe(zone.as_deref(), self.player.carrying(), &mut self.world);
        if let ZoneTransition::Entered(zone) = transition {
            debug!(frame = self.frame, zone = %zone, "zone_entered");
        }
    }

    fn run_pressed_options(&mut self, pressed: Vec<OptionKey>) {
        if pressed.is_empty() {
            return;
        }
        let Some(zone_id) = self.tracker.current_zone() else {
            debug!(frame = self.frame, keys = pressed.len(), "option_keys_outside_zone");
            return;
        };
        match self.world.zone_mut(zone_id) {
            Some(zone) if zone.is_active() => {
                apply_option_keys(zone, self.player.carrying(), pressed, &mut self.events);
            }
            _ => debug!(frame = self.frame, zone = zone_id, "option_keys_without_active_zone"),
        }
    }
}

impl Scene for FarmScene {
    fn load(&mut self) {
        self.frame = 0;
        info!(
            zone_count = self.world.len(),
            spawn_x = self.player.position().x,
            spawn_y = self.player.position().y,
            "scene_loaded"
        );
    }

    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        self.frame = self.frame.saturating_add(1);

        self.player.apply_movement(input, fixed_dt_seconds);
        self.drive_activation();
        self.run_pressed_options(input.pressed_option_keys().collect());
        self.world.update(fixed_dt_seconds);

        self.player.apply_events(&mut self.events);
        self.hud.receive(&mut self.events);
        self.player.tick_hunger(fixed_dt_seconds);
        self.hud.tick(fixed_dt_seconds);

        SceneCommand::None
    }

    fn render(&mut self) {
        let view = self.frame_view();
        self.presenter.present(&view);
    }

    fn unload(&mut self) {
        info!(
            frames = self.frame,
            hunger = self.player.hunger(),
            carrying = self.player.carrying(),
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let zone = self.tracker.current_zone().unwrap_or("-");
        Some(format!(
            "Deadication | zone: {zone} | carrying: {} | hunger: {}",
            self.player.carrying(),
            self.player.hunger()
        ))
    }
}
