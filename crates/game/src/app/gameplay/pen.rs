use engine::Rect;
use tracing::debug;

use super::events::EventBus;
use super::interactive::{
    ignore_foreign_action, Interactive, InteractiveState, ZoneAction, ZoneOption, ITEM_CLOTH,
    ITEM_FOOD, ITEM_NONE,
};

pub(crate) const EAT_HUMAN_CONSUMPTION: i32 = 50;
const FOOD_PER_DELIVERY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Human {
    pub(crate) name: String,
    pub(crate) clothed: bool,
}

impl Human {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clothed: false,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Pen {
    state: InteractiveState,
    humans: Vec<Human>,
    food: u32,
    rect: Rect,
    day_seconds: f32,
    day_elapsed_seconds: f32,
}

impl Pen {
    pub(crate) fn new(
        state: InteractiveState,
        rect: Rect,
        humans: Vec<Human>,
        food: u32,
        day_seconds: f32,
    ) -> Self {
        Self {
            state,
            humans,
            food,
            rect,
            day_seconds,
            day_elapsed_seconds: 0.0,
        }
    }

    #[cfg(test)]
    pub(crate) fn humans(&self) -> &[Human] {
        &self.humans
    }

    #[cfg(test)]
    pub(crate) fn food(&self) -> u32 {
        self.food
    }

    /// Each human eats one unit of stock per elapsed day.
    fn feed_from_stock(&mut self) {
        let demand = u32::try_from(self.humans.len()).unwrap_or(u32::MAX);
        let before = self.food;
        self.food = self.food.saturating_sub(demand);
        debug!(
            zone = self.id(),
            humans = self.humans.len(),
            food_before = before,
            food_after = self.food,
            "pen_day_elapsed"
        );
    }
}

impl Interactive for Pen {
    fn state(&self) -> &InteractiveState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut InteractiveState {
        &mut self.state
    }

    fn options_for(&self, carrying: &str) -> Vec<ZoneOption> {
        let mut options = vec![ZoneOption::new("Observe pen", ZoneAction::ObservePen)];

        if carrying == ITEM_FOOD {
            options.push(ZoneOption::new("Feed humans", ZoneAction::FeedHumans));
        }

        if carrying == ITEM_CLOTH {
            options.push(ZoneOption::new(
                "Give humans cloth for warmth",
                ZoneAction::ClotheHumans,
            ));
        }

        if !self.humans.is_empty() {
            options.push(ZoneOption::new("Eat a human", ZoneAction::EatHuman));
        }

        options
    }

    fn perform(&mut self, action: ZoneAction, _carrying: &str, events: &mut EventBus) {
        match action {
            ZoneAction::ObservePen => events.send_message("This pen holds humans for eating!"),
            ZoneAction::FeedHumans => {
                self.food = self.food.saturating_add(FOOD_PER_DELIVERY);
                events.send_inventory(ITEM_NONE);
                events.send_message(format!("You gave food to the humans in {}", self.title()));
            }
            ZoneAction::ClotheHumans => {
                for human in &mut self.humans {
                    human.clothed = true;
                }
                events.send_message(format!(
                    "You gave clothes to the humans in {}",
                    self.title()
                ));
                events.send_inventory(ITEM_NONE);
            }
            // Nobody is removed from the pen; only the hunger counter moves.
            ZoneAction::EatHuman => {
                events.send_message("You ate some brains!  Yum!");
                events.send_consumption(EAT_HUMAN_CONSUMPTION);
            }
            other => ignore_foreign_action(&*self, other),
        }
    }

    fn region(&self) -> Option<Rect> {
        Some(self.rect)
    }

    fn update(&mut self, fixed_dt_seconds: f32) {
        if self.day_seconds <= 0.0 || fixed_dt_seconds <= 0.0 {
            return;
        }
        self.day_elapsed_seconds += fixed_dt_seconds;
        while self.day_elapsed_seconds >= self.day_seconds {
            self.day_elapsed_seconds -= self.day_seconds;
            self.feed_from_stock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: f32 = 30.0;

    fn pen(humans: &[&str], food: u32) -> Pen {
        Pen::new(
            InteractiveState::new("pen1", "Top pen"),
            Rect::new(0.0, 0.0, 50.0, 50.0),
            humans.iter().map(|name| Human::new(*name)).collect(),
            food,
            DAY,
        )
    }

    fn labels(options: &[ZoneOption]) -> Vec<&str> {
        options.iter().map(|option| option.text.as_str()).collect()
    }

    #[test]
    fn observe_is_always_first() {
        let pen = pen(&[], 0);
        for carrying in [ITEM_NONE, ITEM_FOOD, ITEM_CLOTH, "seeds"] {
            assert_eq!(pen.options_for(carrying)[0].text, "Observe pen");
        }
    }

    #[test]
    fn carried_item_gates_feed_and_clothe() {
        let pen = pen(&[], 0);

        assert!(labels(&pen.options_for(ITEM_FOOD)).contains(&"Feed humans"));
        assert!(labels(&pen.options_for(ITEM_CLOTH)).contains(&"Give humans cloth for warmth"));

        let options = pen.options_for(ITEM_NONE);
        let empty_hands = labels(&options);
        assert!(!empty_hands.contains(&"Feed humans"));
        assert!(!empty_hands.contains(&"Give humans cloth for warmth"));
    }

    #[test]
    fn empty_pen_never_offers_eating() {
        let pen = pen(&[], 5);
        for carrying in [ITEM_NONE, ITEM_FOOD, ITEM_CLOTH, "seeds", "brains"] {
            assert!(
                !labels(&pen.options_for(carrying)).contains(&"Eat a human"),
                "{carrying}"
            );
        }
    }

    #[test]
    fn occupied_pen_lists_options_in_policy_order() {
        let pen = pen(&["Ada"], 0);
        assert_eq!(
            labels(&pen.options_for(ITEM_FOOD)),
            vec!["Observe pen", "Feed humans", "Eat a human"]
        );
        assert_eq!(
            labels(&pen.options_for(ITEM_CLOTH)),
            vec!["Observe pen", "Give humans cloth for warmth", "Eat a human"]
        );
    }

    #[test]
    fn observing_only_publishes_a_message() {
        let mut pen = pen(&["Ada"], 2);
        let mut events = EventBus::default();

        pen.perform(ZoneAction::ObservePen, ITEM_NONE, &mut events);

        let messages: Vec<String> = events.drain_messages().collect();
        assert_eq!(messages, vec!["This pen holds humans for eating!"]);
        assert!(events.is_empty());
        assert_eq!(pen.food(), 2);
        assert_eq!(pen.humans().len(), 1);
    }

    #[test]
    fn feeding_clears_hands_and_stocks_food() {
        let mut pen = pen(&["Ada"], 0);
        let mut events = EventBus::default();

        pen.perform(ZoneAction::FeedHumans, ITEM_FOOD, &mut events);

        let items: Vec<String> = events.drain_inventory().collect();
        assert_eq!(items, vec![String::new()]);
        let messages: Vec<String> = events.drain_messages().collect();
        assert_eq!(messages, vec!["You gave food to the humans in Top pen"]);
        assert_eq!(pen.food(), 1);
    }

    #[test]
    fn clothing_clears_hands_and_warms_everyone() {
        let mut pen = pen(&["Ada", "Bo"], 0);
        let mut events = EventBus::default();

        pen.perform(ZoneAction::ClotheHumans, ITEM_CLOTH, &mut events);

        assert!(pen.humans().iter().all(|human| human.clothed));
        let messages: Vec<String> = events.drain_messages().collect();
        assert_eq!(messages, vec!["You gave clothes to the humans in Top pen"]);
        assert_eq!(events.drain_inventory().count(), 1);
    }

    // Eating reports to the hunger counter but keeps the human in the pen.
    #[test]
    fn eating_publishes_one_message_and_fifty_consumption_without_removing_anyone() {
        let mut pen = pen(&["Ada", "Bo"], 3);
        let before = pen.humans().to_vec();
        let mut events = EventBus::default();

        pen.perform(ZoneAction::EatHuman, ITEM_NONE, &mut events);

        assert_eq!(events.pending_counts().messages, 1);
        assert_eq!(events.pending_counts().inventory, 0);
        let consumption: Vec<i32> = events.drain_consumption().collect();
        assert_eq!(consumption, vec![EAT_HUMAN_CONSUMPTION]);
        assert_eq!(EAT_HUMAN_CONSUMPTION, 50);
        assert_eq!(pen.humans(), before.as_slice());
        assert_eq!(pen.food(), 3);
    }

    #[test]
    fn each_day_humans_eat_from_stock_without_going_negative() {
        let mut pen = pen(&["Ada", "Bo"], 3);

        pen.update(DAY - 1.0);
        assert_eq!(pen.food(), 3);

        pen.update(1.0);
        assert_eq!(pen.food(), 1);

        pen.update(DAY * 3.0);
        assert_eq!(pen.food(), 0);
    }

    #[test]
    fn options_survive_deactivation() {
        let mut pen = pen(&["Ada"], 0);
        pen.activate(ITEM_FOOD);
        pen.deactivate();
        assert_eq!(pen.options_for(ITEM_FOOD).len(), 3);
    }

    #[test]
    fn overlay_carries_the_pen_region() {
        let mut pen = pen(&["Ada"], 0);
        pen.activate(ITEM_NONE);

        let overlay = pen.overlay(ITEM_NONE).expect("overlay");
        assert_eq!(overlay.region, Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
    }
}
