use blackjack::io::{KeyInput, KeyPress, Pacer, Presenter, Status, TableView};
use blackjack::GameError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ui;

/// Lines kept in the log pane
const MAX_LOG_LINES: usize = 20;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Crossterm keyboard, ratatui screen and a sleeping pacer behind the engine's `Console`
pub struct TerminalConsole {
    terminal: Tui,
    log_buffer: Arc<Mutex<Vec<String>>>,
    logs: Vec<String>,
    log_visible: bool,
    last_frame: Option<(TableView, Status)>,
}

impl TerminalConsole {
    pub fn new(terminal: Tui, log_buffer: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            terminal,
            log_buffer,
            logs: Vec::new(),
            log_visible: true,
            last_frame: None,
        }
    }

    pub fn into_terminal(self) -> Tui {
        self.terminal
    }

    fn sync_logs(&mut self) {
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.logs.push(msg);
            if self.logs.len() > MAX_LOG_LINES {
                self.logs.remove(0);
            }
        }
    }

    fn toggle_log(&mut self) {
        self.log_visible = !self.log_visible;
        self.redraw();
    }

    fn redraw(&mut self) {
        self.sync_logs();
        let Self {
            terminal,
            logs,
            log_visible,
            last_frame,
            ..
        } = self;
        if let Some((view, status)) = last_frame.as_ref() {
            if let Err(e) = terminal.draw(|f| ui::draw(f, view, status, logs, *log_visible)) {
                log::warn!("Failed to draw frame: {e}");
            }
        }
    }
}

/// What a single terminal key event means to the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keystroke {
    Exit,
    ToggleLog,
    Char(char),
    Ignored,
}

fn classify(key: &KeyEvent) -> Keystroke {
    if key.kind != KeyEventKind::Press {
        return Keystroke::Ignored;
    }
    match key.code {
        KeyCode::Char('c' | 'C') if key.modifiers.contains(KeyModifiers::CONTROL) => Keystroke::Exit,
        KeyCode::Char('l' | 'L') => Keystroke::ToggleLog,
        KeyCode::Char(c) => Keystroke::Char(c),
        _ => Keystroke::Ignored,
    }
}

impl KeyInput for TerminalConsole {
    fn next_key(&mut self) -> Result<KeyPress, GameError> {
        // Keys typed during a pause are dropped so one press answers one prompt.
        // Ctrl+C still ends the session.
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match classify(&key) {
                    Keystroke::Exit => return Ok(KeyPress::Exit),
                    Keystroke::ToggleLog => self.toggle_log(),
                    Keystroke::Char(_) | Keystroke::Ignored => {}
                }
            }
        }

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match classify(&key) {
                Keystroke::Exit => return Ok(KeyPress::Exit),
                Keystroke::ToggleLog => self.toggle_log(),
                Keystroke::Char(c) => return Ok(KeyPress::Char(c)),
                Keystroke::Ignored => {}
            }
        }
    }
}

impl Presenter for TerminalConsole {
    fn render(&mut self, view: &TableView, status: &Status) {
        self.last_frame = Some((view.clone(), *status));
        self.redraw();
    }
}

impl Pacer for TerminalConsole {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_exits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify(&key), Keystroke::Exit);
    }

    #[test]
    fn test_plain_c_is_a_char() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(classify(&key), Keystroke::Char('c'));
    }

    #[test]
    fn test_l_toggles_log_in_either_case() {
        let lower = KeyEvent::new(KeyCode::Char('l'), KeyModifiers::NONE);
        let upper = KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT);
        assert_eq!(classify(&lower), Keystroke::ToggleLog);
        assert_eq!(classify(&upper), Keystroke::ToggleLog);
    }

    #[test]
    fn test_release_and_non_char_keys_are_ignored() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('h'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(classify(&release), Keystroke::Ignored);

        let ctrl_c_release =
            KeyEvent::new_with_kind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Release);
        assert_eq!(classify(&ctrl_c_release), Keystroke::Ignored);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(classify(&enter), Keystroke::Ignored);
    }
}
