use std::io::{self, BufRead, Write};

use engine::{ActionStates, InputAction, InputSource, OptionKey};
use tracing::{debug, warn};

use super::gameplay::{FrameView, Presenter};

/// Reads one frame of held actions per line.
///
/// `w`/`a`/`s`/`d` hold a direction, `1`-`5` hold an option key and `q`
/// quits. Whitespace is ignored, unknown characters are logged and skipped.
/// Bytes that are not UTF-8 are replaced and skipped like any unknown key.
/// End of input ends the run.
pub(crate) struct TerminalInput<R> {
    reader: R,
    line: Vec<u8>,
}

impl<R: BufRead> TerminalInput<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }
}

impl<R: BufRead> InputSource for TerminalInput<R> {
    fn next_frame(&mut self) -> io::Result<Option<ActionStates>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        Ok(Some(parse_frame_line(&String::from_utf8_lossy(&self.line))))
    }
}

pub(crate) fn parse_frame_line(line: &str) -> ActionStates {
    let mut states = ActionStates::default();
    for ch in line.chars().filter(|ch| !ch.is_whitespace()) {
        match action_for_char(ch) {
            Some(action) => states.set(action, true),
            None => debug!(key = %ch, "unmapped_terminal_key"),
        }
    }
    states
}

fn action_for_char(ch: char) -> Option<InputAction> {
    match ch.to_ascii_lowercase() {
        'w' => Some(InputAction::MoveUp),
        's' => Some(InputAction::MoveDown),
        'a' => Some(InputAction::MoveLeft),
        'd' => Some(InputAction::MoveRight),
        'q' => Some(InputAction::Quit),
        digit => digit
            .to_digit(10)
            .and_then(|ordinal| OptionKey::from_ordinal(ordinal as usize))
            .map(OptionKey::action),
    }
}

/// Writes a text rendition of each frame. Only frames that differ from the
/// previous one are printed.
pub(crate) struct TerminalPresenter<W> {
    out: W,
    last_rendered: Option<String>,
}

impl<W: Write> TerminalPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            last_rendered: None,
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn present(&mut self, view: &FrameView) {
        let rendered = render_frame(view);
        if self.last_rendered.as_deref() == Some(rendered.as_str()) {
            return;
        }
        let result = writeln!(self.out, "{rendered}").and_then(|()| self.out.flush());
        if let Err(error) = result {
            warn!(error = %error, frame = view.frame, "present_failed");
        }
        self.last_rendered = Some(rendered);
    }
}

fn render_frame(view: &FrameView) -> String {
    let carrying = if view.carrying.is_empty() {
        "nothing"
    } else {
        view.carrying.as_str()
    };
    let mut text = format!(
        "-- ({:.0}, {:.0}) | carrying: {carrying} | hunger: {}",
        view.position.x, view.position.y, view.hunger
    );
    if let Some(panel) = &view.zone_panel {
        text.push_str(&format!("\n[{}]", panel.title));
        if let Some(region) = panel.region {
            text.push_str(&format!(
                " ({:.0}, {:.0})-({:.0}, {:.0})",
                region.min.x, region.min.y, region.max.x, region.max.y
            ));
        }
        for entry in view.menu() {
            text.push_str(&format!("\n  {}. {}", entry.ordinal, entry.label));
        }
    }
    if let Some(popup) = &view.popup {
        text.push_str(&format!("\n>> {popup}"));
    }
    text
}
