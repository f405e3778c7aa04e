use std::collections::VecDeque;

use engine::{InputAction, InputSnapshot, Vec2};
use tracing::{debug, info};

use super::defs::PlayerDef;
use super::events::EventBus;

#[derive(Debug)]
pub(crate) struct Player {
    position: Vec2,
    move_speed: f32,
    carrying: String,
    hunger: i32,
    hunger_drain_per_second: f32,
    drain_accumulator: f32,
}

impl Player {
    pub(crate) fn from_def(def: &PlayerDef) -> Self {
        Self {
            position: def.spawn,
            move_speed: def.move_speed.max(0.0),
            carrying: def.carrying.clone(),
            hunger: def.hunger.max(0),
            hunger_drain_per_second: def.hunger_drain_per_second.max(0.0),
            drain_accumulator: 0.0,
        }
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn carrying(&self) -> &str {
        &self.carrying
    }

    pub(crate) fn hunger(&self) -> i32 {
        self.hunger
    }

    /// Moves along every held direction. Diagonals are normalized so they are
    /// not faster than straight moves.
    pub(crate) fn apply_movement(&mut self, input: &InputSnapshot, fixed_dt_seconds: f32) {
        let mut dx = 0.0f32;
        let mut dy = 0.0f32;
        if input.is_down(InputAction::MoveUp) {
            dy -= 1.0;
        }
        if input.is_down(InputAction::MoveDown) {
            dy += 1.0;
        }
        if input.is_down(InputAction::MoveLeft) {
            dx -= 1.0;
        }
        if input.is_down(InputAction::MoveRight) {
            dx += 1.0;
        }

        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return;
        }
        let step = self.move_speed * fixed_dt_seconds / length;
        self.position.x += dx * step;
        self.position.y += dy * step;
    }

    /// Drains the inventory and consumption streams. The last inventory event
    /// of the frame wins.
    pub(crate) fn apply_events(&mut self, events: &mut EventBus) {
        for item in events.drain_inventory() {
            debug!(from = %self.carrying, to = %item, "carried_item_changed");
            self.carrying = item;
        }

        let mut consumed = 0i32;
        for amount in events.drain_consumption() {
            consumed = consumed.saturating_add(amount);
        }
        if consumed != 0 {
            self.hunger = self.hunger.saturating_add(consumed).max(0);
            info!(consumed, hunger = self.hunger, "hunger_fed");
        }
    }

    pub(crate) fn tick_hunger(&mut self, fixed_dt_seconds: f32) {
        if self.hunger_drain_per_second <= 0.0 || fixed_dt_seconds <= 0.0 {
            return;
        }
        self.drain_accumulator += self.hunger_drain_per_second * fixed_dt_seconds;
        let whole = self.drain_accumulator.floor();
        if whole >= 1.0 {
            self.drain_accumulator -= whole;
            self.hunger = self.hunger.saturating_sub(whole as i32).max(0);
        }
    }
}

/// Popup queue fed by the message stream. One popup is visible at a time and
/// each stays up for `popup_seconds` before the next one replaces it.
#[derive(Debug)]
pub(crate) struct Hud {
    queued: VecDeque<String>,
    visible: Option<VisiblePopup>,
    popup_seconds: f32,
}

#[derive(Debug)]
struct VisiblePopup {
    text: String,
    remaining_seconds: f32,
}

impl Hud {
    pub(crate) fn new(popup_seconds: f32) -> Self {
        Self {
            queued: VecDeque::new(),
            visible: None,
            popup_seconds: popup_seconds.max(0.0),
        }
    }

    pub(crate) fn receive(&mut self, events: &mut EventBus) {
        self.queued.extend(events.drain_messages());
    }

    pub(crate) fn tick(&mut self, fixed_dt_seconds: f32) {
        if let Some(popup) = &mut self.visible {
            popup.remaining_seconds -= fixed_dt_seconds;
            if popup.remaining_seconds <= 0.0 {
                self.visible = None;
            }
        }
        if self.visible.is_none() {
            if let Some(text) = self.queued.pop_front() {
                debug!(popup = %text, queued = self.queued.len(), "popup_shown");
                self.visible = Some(VisiblePopup {
                    text,
                    remaining_seconds: self.popup_seconds,
                });
            }
        }
    }

    pub(crate) fn visible_popup(&self) -> Option<&str> {
        self.visible.as_ref().map(|popup| popup.text.as_str())
    }

    #[cfg(test)]
    pub(crate) fn queued_len(&self) -> usize {
        self.queued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_def() -> PlayerDef {
        PlayerDef {
            spawn: Vec2::new(10.0, 10.0),
            move_speed: 20.0,
            hunger: 5,
            hunger_drain_per_second: 2.0,
            carrying: String::new(),
            popup_seconds: 1.0,
        }
    }

    #[test]
    fn held_directions_move_the_player() {
        let mut player = Player::from_def(&player_def());
        let input = InputSnapshot::empty().with_action_down(InputAction::MoveRight, true);

        player.apply_movement(&input, 0.5);

        assert_eq!(player.position(), Vec2::new(20.0, 10.0));
    }

    #[test]
    fn diagonal_moves_are_normalized() {
        let mut player = Player::from_def(&player_def());
        let input = InputSnapshot::empty()
            .with_action_down(InputAction::MoveUp, true)
            .with_action_down(InputAction::MoveLeft, true);

        player.apply_movement(&input, 1.0);

        let moved_x = 10.0 - player.position().x;
        let moved_y = 10.0 - player.position().y;
        let distance = (moved_x * moved_x + moved_y * moved_y).sqrt();
        assert!((distance - 20.0).abs() < 1e-3, "{distance}");
    }

    #[test]
    fn opposite_directions_cancel() {
        let mut player = Player::from_def(&player_def());
        let input = InputSnapshot::empty()
            .with_action_down(InputAction::MoveUp, true)
            .with_action_down(InputAction::MoveDown, true);

        player.apply_movement(&input, 1.0);

        assert_eq!(player.position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn inventory_events_apply_in_order_and_last_wins() {
        let mut player = Player::from_def(&player_def());
        let mut events = EventBus::default();
        events.send_inventory("seeds");
        events.send_inventory("");
        events.send_inventory("food");

        player.apply_events(&mut events);

        assert_eq!(player.carrying(), "food");
        assert!(events.is_empty());
    }

    #[test]
    fn consumption_accumulates_into_hunger() {
        let mut player = Player::from_def(&player_def());
        let mut events = EventBus::default();
        events.send_consumption(50);
        events.send_consumption(50);

        player.apply_events(&mut events);

        assert_eq!(player.hunger(), 105);
    }

    #[test]
    fn hunger_drains_over_time_and_floors_at_zero() {
        let mut player = Player::from_def(&player_def());

        player.tick_hunger(0.25);
        assert_eq!(player.hunger(), 5);
        player.tick_hunger(0.25);
        assert_eq!(player.hunger(), 4);

        player.tick_hunger(100.0);
        assert_eq!(player.hunger(), 0);
    }

    #[test]
    fn hud_shows_popups_one_at_a_time_in_order() {
        let mut hud = Hud::new(1.0);
        let mut events = EventBus::default();
        events.send_message("first");
        events.send_message("second");

        hud.receive(&mut events);
        hud.tick(0.1);
        assert_eq!(hud.visible_popup(), Some("first"));
        assert_eq!(hud.queued_len(), 1);

        hud.tick(0.5);
        assert_eq!(hud.visible_popup(), Some("first"));

        hud.tick(0.5);
        assert_eq!(hud.visible_popup(), Some("second"));

        hud.tick(1.0);
        assert_eq!(hud.visible_popup(), None);
    }

    #[test]
    fn hud_without_messages_stays_empty() {
        let mut hud = Hud::new(1.0);
        hud.tick(1.0);
        assert_eq!(hud.visible_popup(), None);
    }
}
