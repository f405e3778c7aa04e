use engine::{OptionKey, Rect};
use tracing::{debug, info};

use super::events::EventBus;

pub(crate) const ITEM_NONE: &str = "";
pub(crate) const ITEM_FOOD: &str = "food";
pub(crate) const ITEM_CLOTH: &str = "cloth";
pub(crate) const ITEM_SEEDS: &str = "seeds";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoneAction {
    ObservePen,
    FeedHumans,
    ClotheHumans,
    EatHuman,
    ObserveField,
    PlantSeeds,
    HarvestCrops,
    ObserveRiver,
    CatchFish,
    Rest,
    TakeSeeds,
    TakeCloth,
    PutDown,
}

/// A labeled action offered by a zone. Built fresh on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ZoneOption {
    pub(crate) text: String,
    pub(crate) action: ZoneAction,
}

impl ZoneOption {
    pub(crate) fn new(text: impl Into<String>, action: ZoneAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MenuEntry {
    pub(crate) ordinal: usize,
    pub(crate) label: String,
}

/// What the presentation layer needs to draw the panel of an active zone.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ZoneOverlay {
    pub(crate) title: String,
    pub(crate) region: Option<Rect>,
    pub(crate) entries: Vec<MenuEntry>,
}

/// Shared record embedded in every zone variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InteractiveState {
    id: String,
    title: String,
    active: bool,
}

impl InteractiveState {
    pub(crate) fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            active: false,
        }
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

pub(crate) trait Interactive {
    fn state(&self) -> &InteractiveState;
    fn state_mut(&mut self) -> &mut InteractiveState;

    /// Options available for the carried item. Must not depend on whether the
    /// zone is active.
    fn options_for(&self, carrying: &str) -> Vec<ZoneOption>;

    /// Runs an offered action. Actions never fail once offered.
    fn perform(&mut self, action: ZoneAction, carrying: &str, events: &mut EventBus);

    fn update(&mut self, _fixed_dt_seconds: f32) {}

    /// World region the zone draws into, when it has one of its own.
    fn region(&self) -> Option<Rect> {
        None
    }

    /// Zone identifier from the placement asset.
    fn id(&self) -> &str {
        &self.state().id
    }

    fn title(&self) -> &str {
        &self.state().title
    }

    fn is_active(&self) -> bool {
        self.state().active
    }

    fn activate(&mut self, _carrying: &str) {
        self.state_mut().set_active(true);
    }

    fn deactivate(&mut self) {
        self.state_mut().set_active(false);
    }

    fn overlay(&self, carrying: &str) -> Option<ZoneOverlay> {
        if !self.is_active() {
            return None;
        }
        let entries = self
            .options_for(carrying)
            .into_iter()
            .enumerate()
            .map(|(idx, option)| MenuEntry {
                ordinal: idx + 1,
                label: option.text,
            })
            .collect();
        Some(ZoneOverlay {
            title: self.title().to_string(),
            region: self.region(),
            entries,
        })
    }
}

pub(crate) fn select_option(
    pressed: Option<OptionKey>,
    options: &[ZoneOption],
) -> Option<&ZoneOption> {
    options.get(pressed?.list_index())
}

/// Runs every pressed key against one option list computed for this frame.
/// Returns how many actions ran.
pub(crate) fn apply_option_keys(
    zone: &mut dyn Interactive,
    carrying: &str,
    pressed: impl IntoIterator<Item = OptionKey>,
    events: &mut EventBus,
) -> usize {
    let options = zone.options_for(carrying);
    let mut executed = 0;
    for key in pressed {
        let Some(option) = select_option(Some(key), &options) else {
            debug!(
                zone = zone.id(),
                key = key.ordinal(),
                offered = options.len(),
                "option_key_out_of_range"
            );
            continue;
        };
        info!(
            zone = zone.id(),
            key = key.ordinal(),
            option = %option.text,
            carrying,
            "option_selected"
        );
        zone.perform(option.action, carrying, events);
        executed += 1;
    }
    executed
}

pub(crate) fn ignore_foreign_action(zone: &dyn Interactive, action: ZoneAction) {
    debug!(zone = zone.id(), action = ?action, "zone_action_not_offered_here");
}
