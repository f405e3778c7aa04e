use tracing::debug;

use super::events::EventBus;
use super::interactive::{
    ignore_foreign_action, Interactive, InteractiveState, ZoneAction, ZoneOption, ITEM_FOOD,
    ITEM_NONE, ITEM_SEEDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CropStage {
    Seedling,
    Growing,
    Mature,
}

impl CropStage {
    fn describe(self) -> &'static str {
        match self {
            Self::Seedling => "just sprouting",
            Self::Growing => "growing",
            Self::Mature => "ready to harvest",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Crop {
    species: String,
    growth_seconds: f32,
    maturity_seconds: f32,
}

impl Crop {
    pub(crate) fn new(species: impl Into<String>, maturity_seconds: f32) -> Self {
        Self {
            species: species.into(),
            growth_seconds: 0.0,
            maturity_seconds: maturity_seconds.max(0.0),
        }
    }

    /// A crop planted long enough ago to be harvestable straight away.
    pub(crate) fn mature(species: impl Into<String>, maturity_seconds: f32) -> Self {
        let mut crop = Self::new(species, maturity_seconds);
        crop.growth_seconds = crop.maturity_seconds;
        crop
    }

    pub(crate) fn species(&self) -> &str {
        &self.species
    }

    pub(crate) fn grow(&mut self, dt_seconds: f32) {
        if dt_seconds > 0.0 {
            self.growth_seconds = (self.growth_seconds + dt_seconds).min(self.maturity_seconds);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.growth_seconds = 0.0;
    }

    pub(crate) fn stage(&self) -> CropStage {
        if self.growth_seconds >= self.maturity_seconds {
            CropStage::Mature
        } else if self.growth_seconds * 2.0 < self.maturity_seconds {
            CropStage::Seedling
        } else {
            CropStage::Growing
        }
    }

    pub(crate) fn is_mature(&self) -> bool {
        self.stage() == CropStage::Mature
    }
}

#[derive(Debug)]
pub(crate) struct Field {
    state: InteractiveState,
    crop: Crop,
    planted: bool,
    amount_left: u32,
    yield_per_planting: u32,
}

impl Field {
    pub(crate) fn new(
        state: InteractiveState,
        crop: Crop,
        planted: bool,
        amount_left: u32,
        yield_per_planting: u32,
    ) -> Self {
        Self {
            state,
            crop,
            planted,
            amount_left,
            yield_per_planting,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_planted(&self) -> bool {
        self.planted
    }

    #[cfg(test)]
    pub(crate) fn amount_left(&self) -> u32 {
        self.amount_left
    }

    #[cfg(test)]
    pub(crate) fn crop(&self) -> &Crop {
        &self.crop
    }

    /// A planted field with nothing left to harvest can be replanted.
    fn is_fallow(&self) -> bool {
        !self.planted || self.amount_left == 0
    }

    fn can_harvest(&self) -> bool {
        !self.is_fallow() && self.crop.is_mature()
    }

    fn describe(&self) -> String {
        if self.is_fallow() {
            return format!("{} lies fallow. Bring seeds to plant it.", self.title());
        }
        format!(
            "The {} in {} is {}. {} harvest(s) left.",
            self.crop.species(),
            self.title(),
            self.crop.stage().describe(),
            self.amount_left
        )
    }
}

impl Interactive for Field {
    fn state(&self) -> &InteractiveState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InteractiveState {
        &mut self.state
    }

    fn options_for(&self, carrying: &str) -> Vec<ZoneOption> {
        let mut options = vec![ZoneOption::new("Observe field", ZoneAction::ObserveField)];

        if self.is_fallow() && carrying == ITEM_SEEDS {
            options.push(ZoneOption::new("Plant seeds", ZoneAction::PlantSeeds));
        }

        if self.can_harvest() && carrying == ITEM_NONE {
            options.push(ZoneOption::new("Harvest crops", ZoneAction::HarvestCrops));
        }

        options
    }

    fn perform(&mut self, action: ZoneAction, _carrying: &str, events: &mut EventBus) {
        match action {
            ZoneAction::ObserveField => events.send_message(self.describe()),
            ZoneAction::PlantSeeds => {
                self.planted = true;
                self.crop.reset();
                self.amount_left = self.yield_per_planting;
                events.send_inventory(ITEM_NONE);
                events.send_message(format!(
                    "You planted {} in {}",
                    self.crop.species(),
                    self.title()
                ));
            }
            ZoneAction::HarvestCrops => {
                self.amount_left = self.amount_left.saturating_sub(1);
                events.send_inventory(ITEM_FOOD);
                events.send_message(format!(
                    "You harvested {} from {}",
                    self.crop.species(),
                    self.title()
                ));
                if self.amount_left == 0 {
                    self.planted = false;
                    self.crop.reset();
                    debug!(zone = self.id(), "field_exhausted");
                }
            }
            other => ignore_foreign_action(&*self, other),
        }
    }

    fn update(&mut self, fixed_dt_seconds: f32) {
        if !self.is_fallow() {
            self.crop.grow(fixed_dt_seconds);
        }
    }
}
