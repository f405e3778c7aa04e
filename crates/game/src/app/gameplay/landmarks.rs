use super::events::EventBus;
use super::interactive::{
    ignore_foreign_action, Interactive, InteractiveState, ZoneAction, ZoneOption, ITEM_CLOTH,
    ITEM_FOOD, ITEM_NONE, ITEM_SEEDS,
};

#[derive(Debug)]
pub(crate) struct River {
    state: InteractiveState,
}

impl River {
    pub(crate) fn new(state: InteractiveState) -> Self {
        Self { state }
    }
}

impl Interactive for River {
    fn state(&self) -> &InteractiveState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InteractiveState {
        &mut self.state
    }

    fn options_for(&self, carrying: &str) -> Vec<ZoneOption> {
        let mut options = vec![ZoneOption::new("Observe river", ZoneAction::ObserveRiver)];
        if carrying == ITEM_NONE {
            options.push(ZoneOption::new("Catch fish", ZoneAction::CatchFish));
        }
        options
    }

    fn perform(&mut self, action: ZoneAction, _carrying: &str, events: &mut EventBus) {
        match action {
            ZoneAction::ObserveRiver => events.send_message("The river runs cold and fast."),
            ZoneAction::CatchFish => {
                events.send_inventory(ITEM_FOOD);
                events.send_message("You caught a fish. The humans might eat it.");
            }
            other => ignore_foreign_action(&*self, other),
        }
    }
}

/// The farmhouse. Exactly one exists per world.
#[derive(Debug)]
pub(crate) struct House {
    state: InteractiveState,
}

impl House {
    pub(crate) fn new(state: InteractiveState) -> Self {
        Self { state }
    }
}

impl Interactive for House {
    fn state(&self) -> &InteractiveState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InteractiveState {
        &mut self.state
    }

    fn options_for(&self, carrying: &str) -> Vec<ZoneOption> {
        let mut options = vec![ZoneOption::new("Rest", ZoneAction::Rest)];
        if carrying == ITEM_NONE {
            options.push(ZoneOption::new("Take seeds", ZoneAction::TakeSeeds));
            options.push(ZoneOption::new("Take cloth", ZoneAction::TakeCloth));
        } else {
            options.push(ZoneOption::new(
                format!("Put down {carrying}"),
                ZoneAction::PutDown,
            ));
        }
        options
    }

    fn perform(&mut self, action: ZoneAction, carrying: &str, events: &mut EventBus) {
        match action {
            ZoneAction::Rest => events.send_message("You rest for a moment. The dead do not sleep."),
            ZoneAction::TakeSeeds => {
                events.send_inventory(ITEM_SEEDS);
                events.send_message("You picked up a bag of seeds.");
            }
            ZoneAction::TakeCloth => {
                events.send_inventory(ITEM_CLOTH);
                events.send_message("You picked up some cloth.");
            }
            ZoneAction::PutDown => {
                events.send_inventory(ITEM_NONE);
                events.send_message(format!("You put down the {carrying}."));
            }
            other => ignore_foreign_action(&*self, other),
        }
    }
}
