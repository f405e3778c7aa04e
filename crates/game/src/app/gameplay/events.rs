use std::collections::VecDeque;

/// One-directional notification streams from option execution back into the
/// rest of the game.
///
/// Producers only ever push; consumers drain once per frame. Every stream is
/// an unbounded FIFO, so a burst of sends inside one frame is never dropped
/// and never stalls the producer.
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    messages: VecDeque<String>,
    inventory: VecDeque<String>,
    consumption: VecDeque<i32>,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EventCounts {
    pub(crate) messages: usize,
    pub(crate) inventory: usize,
    pub(crate) consumption: usize,
}

impl EventBus {
    /// Display text for the popup view.
    pub(crate) fn send_message(&mut self, text: impl Into<String>) {
        self.messages.push_back(text.into());
    }

    /// New carried item. An empty string means empty hands.
    pub(crate) fn send_inventory(&mut self, item: impl Into<String>) {
        self.inventory.push_back(item.into());
    }

    pub(crate) fn send_consumption(&mut self, amount: i32) {
        self.consumption.push_back(amount);
    }

    pub(crate) fn drain_messages(&mut self) -> impl Iterator<Item = String> + '_ {
        self.messages.drain(..)
    }

    pub(crate) fn drain_inventory(&mut self) -> impl Iterator<Item = String> + '_ {
        self.inventory.drain(..)
    }

    pub(crate) fn drain_consumption(&mut self) -> impl Iterator<Item = i32> + '_ {
        self.consumption.drain(..)
    }

    #[cfg(test)]
    pub(crate) fn pending_counts(&self) -> EventCounts {
        EventCounts {
            messages: self.messages.len(),
            inventory: self.inventory.len(),
            consumption: self.consumption.len(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.pending_counts() == EventCounts::default()
    }
}
