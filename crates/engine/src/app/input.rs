#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SelectOption1,
    SelectOption2,
    SelectOption3,
    SelectOption4,
    SelectOption5,
    Quit,
}

const ACTION_COUNT: usize = 10;

impl InputAction {
    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::SelectOption1 => 4,
            InputAction::SelectOption2 => 5,
            InputAction::SelectOption3 => 6,
            InputAction::SelectOption4 => 7,
            InputAction::SelectOption5 => 8,
            InputAction::Quit => 9,
        }
    }
}

/// Ordinal menu key. Key `N` selects the `N`th offered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl OptionKey {
    pub const ALL: [OptionKey; 5] = [
        OptionKey::One,
        OptionKey::Two,
        OptionKey::Three,
        OptionKey::Four,
        OptionKey::Five,
    ];

    pub fn from_ordinal(ordinal: usize) -> Option<Self> {
        Self::ALL.get(ordinal.checked_sub(1)?).copied()
    }

    pub const fn ordinal(self) -> usize {
        self.list_index() + 1
    }

    pub const fn list_index(self) -> usize {
        match self {
            OptionKey::One => 0,
            OptionKey::Two => 1,
            OptionKey::Three => 2,
            OptionKey::Four => 3,
            OptionKey::Five => 4,
        }
    }

    pub const fn action(self) -> InputAction {
        match self {
            OptionKey::One => InputAction::SelectOption1,
            OptionKey::Two => InputAction::SelectOption2,
            OptionKey::Three => InputAction::SelectOption3,
            OptionKey::Four => InputAction::SelectOption4,
            OptionKey::Five => InputAction::SelectOption5,
        }
    }
}

/// Held state of every action for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    pub fn with(mut self, action: InputAction) -> Self {
        self.set(action, true);
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    pressed: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.actions.is_down(InputAction::Quit)
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// True only on the frame the action went from released to held.
    pub fn just_pressed(&self, action: InputAction) -> bool {
        self.pressed.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.actions.set(action, true);
        self.pressed.set(action, true);
        self
    }

    pub fn with_option_pressed(self, key: OptionKey) -> Self {
        self.with_action_pressed(key.action())
    }

    /// Option keys pressed this frame, in ordinal order.
    pub fn pressed_option_keys(&self) -> impl Iterator<Item = OptionKey> + '_ {
        OptionKey::ALL
            .into_iter()
            .filter(|key| self.just_pressed(key.action()))
    }
}

/// Turns per-frame held states into snapshots with press edges.
#[derive(Debug, Default)]
pub struct KeyEdgeTracker {
    previous: ActionStates,
}

impl KeyEdgeTracker {
    pub fn snapshot_for_frame(&mut self, current: ActionStates) -> InputSnapshot {
        let mut pressed = ActionStates::default();
        for (idx, is_down) in current.down.iter().enumerate() {
            pressed.down[idx] = *is_down && !self.previous.down[idx];
        }
        self.previous = current;
        InputSnapshot {
            actions: current,
            pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_option_key_does_not_repeat_press_edges() {
        let mut tracker = KeyEdgeTracker::default();
        let held = ActionStates::default().with(InputAction::SelectOption1);

        let first = tracker.snapshot_for_frame(held);
        let second = tracker.snapshot_for_frame(held);
        let released = tracker.snapshot_for_frame(ActionStates::default());
        let third = tracker.snapshot_for_frame(held);

        assert!(first.just_pressed(InputAction::SelectOption1));
        assert!(!second.just_pressed(InputAction::SelectOption1));
        assert!(second.is_down(InputAction::SelectOption1));
        assert!(!released.just_pressed(InputAction::SelectOption1));
        assert!(third.just_pressed(InputAction::SelectOption1));
    }

    #[test]
    fn pressed_option_keys_are_reported_in_ordinal_order() {
        let snapshot = InputSnapshot::empty()
            .with_option_pressed(OptionKey::Four)
            .with_option_pressed(OptionKey::Two);

        let keys: Vec<OptionKey> = snapshot.pressed_option_keys().collect();
        assert_eq!(keys, vec![OptionKey::Two, OptionKey::Four]);
    }

    #[test]
    fn held_movement_is_not_a_press_edge() {
        let snapshot = InputSnapshot::empty().with_action_down(InputAction::MoveLeft, true);

        assert!(snapshot.is_down(InputAction::MoveLeft));
        assert!(!snapshot.just_pressed(InputAction::MoveLeft));
        assert_eq!(snapshot.pressed_option_keys().count(), 0);
    }

    #[test]
    fn option_key_ordinals_round_trip() {
        assert_eq!(OptionKey::from_ordinal(1), Some(OptionKey::One));
        assert_eq!(OptionKey::from_ordinal(5), Some(OptionKey::Five));
        assert_eq!(OptionKey::from_ordinal(0), None);
        assert_eq!(OptionKey::from_ordinal(6), None);
        assert_eq!(OptionKey::Three.ordinal(), 3);
        assert_eq!(OptionKey::Three.list_index(), 2);
    }

    #[test]
    fn quit_follows_held_quit_action() {
        let mut tracker = KeyEdgeTracker::default();
        let snapshot = tracker.snapshot_for_frame(ActionStates::default().with(InputAction::Quit));
        assert!(snapshot.quit_requested());
    }
}
