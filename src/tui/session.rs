use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::model::ListItem;
use crate::ops::{EditorKey, EditorView, Interaction};

use super::app::App;
use super::input::prompt::{PromptInput, PromptStep};
use super::input::{editor_key, normalize_key};
use super::render;
use super::theme::Theme;

/// Where key presses come from
pub trait KeySource {
    /// Block until the next terminal event. `Ok(None)` for anything that is
    /// not a key press (resize, focus, release).
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>>;

    /// Wait up to `timeout` for a key press
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;
}

/// Keys from the real terminal
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }

    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        self.read_key()
    }
}

/// The terminal plus its key source. Lends itself to the list editors as
/// their blocking `Interaction` for chord keys and text prompts.
pub struct Session<'t, B: Backend, K> {
    terminal: &'t mut Terminal<B>,
    keys: K,
    theme: Theme,
}

impl<'t, B: Backend, K: KeySource> Session<'t, B, K> {
    pub fn new(terminal: &'t mut Terminal<B>, keys: K, theme: Theme) -> Self {
        Session {
            terminal,
            keys,
            theme,
        }
    }

    pub fn draw(&mut self, app: &App) -> io::Result<()> {
        self.terminal.draw(|frame| render::render(frame, app))?;
        Ok(())
    }

    pub fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        self.keys.poll_key(timeout)
    }

    /// Ring the terminal bell
    pub fn bell(&mut self) {
        let mut out = io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

impl<B: Backend, K: KeySource, T: ListItem> Interaction<T> for Session<'_, B, K> {
    fn next_key(&mut self) -> Option<EditorKey> {
        loop {
            match self.keys.read_key() {
                Ok(Some(key)) => return Some(editor_key(normalize_key(key))),
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("key input closed: {}", e);
                    return None;
                }
            }
        }
    }

    fn prompt(&mut self, label: &str, max_len: usize, view: EditorView<'_, T>) -> Option<String> {
        let mut input = PromptInput::new(label, max_len);
        loop {
            let theme = &self.theme;
            if let Err(e) = self
                .terminal
                .draw(|frame| render::render_prompt(frame, theme, &view, &input))
            {
                log::error!("could not draw prompt: {}", e);
                return None;
            }
            match self.keys.read_key() {
                Ok(Some(key)) => {
                    if let PromptStep::Done(text) = input.handle_key(key) {
                        return text;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("key input closed during prompt: {}", e);
                    return None;
                }
            }
        }
    }
}
