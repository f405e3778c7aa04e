use engine::Vec2;

use super::interactive::{MenuEntry, ZoneOverlay};

/// Everything the presentation layer draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FrameView {
    pub(crate) frame: u64,
    pub(crate) position: Vec2,
    pub(crate) zone_panel: Option<ZoneOverlay>,
    pub(crate) popup: Option<String>,
    pub(crate) carrying: String,
    pub(crate) hunger: i32,
}

impl FrameView {
    #[cfg(test)]
    pub(crate) fn panel_visible(&self) -> bool {
        self.zone_panel.is_some()
    }

    #[cfg(test)]
    pub(crate) fn title(&self) -> Option<&str> {
        self.zone_panel.as_ref().map(|panel| panel.title.as_str())
    }

    pub(crate) fn menu(&self) -> &[MenuEntry] {
        self.zone_panel
            .as_ref()
            .map(|panel| panel.entries.as_slice())
            .unwrap_or_default()
    }
}

pub(crate) trait Presenter {
    fn present(&mut self, view: &FrameView);
}
