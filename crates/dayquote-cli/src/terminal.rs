//! Single terminal line as a typewriter target

use std::io::{self, Write};

use crossterm::{
    cursor::{self, MoveToColumn},
    style::Print,
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use dayquote_core::{TargetId, TextTarget};
use parking_lot::Mutex;

const CURSOR: char = '▍';

#[derive(Default)]
struct LineState {
    text: String,
    cursor: bool,
}

/// Redraws the current terminal line on every write
pub struct TerminalLine {
    id: TargetId,
    state: Mutex<LineState>,
}

impl TerminalLine {
    pub fn new(id: &str) -> Self {
        Self {
            id: TargetId::new(id),
            state: Mutex::new(LineState::default()),
        }
    }

    /// Hide the terminal's own cursor while we draw ours
    pub fn begin(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.queue(cursor::Hide)?;
        out.flush()
    }

    /// Restore the terminal cursor and move past the quote line
    pub fn finish(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.queue(cursor::Show)?.queue(Print("\n"))?;
        out.flush()
    }

    fn draw(&self, state: &LineState) {
        if let Err(e) = draw_line(state) {
            tracing::debug!(error = %e, "Failed to draw quote line");
        }
    }
}

fn draw_line(state: &LineState) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.queue(MoveToColumn(0))?
        .queue(Clear(ClearType::CurrentLine))?
        .queue(Print(&state.text))?;
    if state.cursor {
        out.queue(Print(CURSOR))?;
    }
    out.flush()
}

impl TextTarget for TerminalLine {
    fn id(&self) -> TargetId {
        self.id.clone()
    }

    fn set_text(&self, text: &str) {
        let mut state = self.state.lock();
        state.text.clear();
        state.text.push_str(text);
        self.draw(&state);
    }

    fn set_cursor(&self, visible: bool) {
        let mut state = self.state.lock();
        if state.cursor != visible {
            state.cursor = visible;
            self.draw(&state);
        }
    }
}
