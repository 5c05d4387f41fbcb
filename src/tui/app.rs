//! Inspector application state and key handling.

use crossterm::event::KeyCode;
use crate::session::{Outcome, Session};
use crate::register::MAX_BIT;

/// Bits shown per grid row.
pub const ROW_BITS: u32 = 16;

/// Inspector application state.
pub struct InspectorApp {
    /// The register and its transcript.
    pub session: Session,
    /// Bit under the grid cursor.
    pub cursor: u32,
    /// Text being typed into the input line.
    pub input: String,
    /// Status message to display.
    pub status: String,
    /// Should we quit?
    pub should_quit: bool,
}

impl InspectorApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            cursor: 0,
            input: String::new(),
            status: "Ready. Tab toggles the selected bit, Enter runs the input, Esc quits.".into(),
            should_quit: false,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => self.cursor = (self.cursor + 1).min(MAX_BIT),
            KeyCode::Right => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Up => self.cursor = (self.cursor + ROW_BITS).min(MAX_BIT),
            KeyCode::Down => self.cursor = self.cursor.saturating_sub(ROW_BITS),
            KeyCode::Tab => self.toggle_selected(),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    /// Flip the bit under the cursor.
    pub fn toggle_selected(&mut self) {
        match self.session.register_mut().toggle_bit(self.cursor) {
            Ok(on) => {
                self.status = format!("Bit {} = {}", self.cursor, if on { 1 } else { 0 });
            }
            Err(e) => self.status = format!("Error: {}", e),
        }
    }

    /// Run the input line through the session.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        if line.trim().is_empty() {
            return;
        }

        self.status = match self.session.execute(&line) {
            Ok(Outcome::Calculated(result)) => format!("{} = {}", line.trim(), result),
            Ok(Outcome::Value(v)) => format!("{} → 0x{:X}", line.trim(), v),
            Ok(Outcome::TranscriptCleared) => "Transcript cleared.".into(),
            Err(e) => format!("Error: {}", e),
        };
    }
}

/// Run the inspector on a session.
pub fn run_inspector(session: Session) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = InspectorApp::new(session);

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
