use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::{pop_grapheme, pop_word};

/// Single-line text entry shown in a popup over the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInput {
    label: String,
    buffer: String,
    max_len: usize,
}

/// Result of feeding one key to a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    Editing,
    /// Finished; `None` when cancelled or left empty
    Done(Option<String>),
}

impl PromptInput {
    pub fn new(label: &str, max_len: usize) -> Self {
        PromptInput {
            label: label.to_string(),
            buffer: String::new(),
            max_len,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptStep {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.buffer);
                PromptStep::Done((!text.is_empty()).then_some(text))
            }
            KeyCode::Esc => PromptStep::Done(None),
            KeyCode::Backspace => {
                pop_grapheme(&mut self.buffer);
                PromptStep::Editing
            }
            KeyCode::Char('w') if ctrl => {
                pop_word(&mut self.buffer);
                PromptStep::Editing
            }
            KeyCode::Char('u') if ctrl => {
                self.buffer.clear();
                PromptStep::Editing
            }
            // The list files cannot escape a quote
            KeyCode::Char('"') => PromptStep::Editing,
            KeyCode::Char(c) if !ctrl => {
                if self.buffer.chars().count() < self.max_len {
                    self.buffer.push(c);
                }
                PromptStep::Editing
            }
            _ => PromptStep::Editing,
        }
    }
}
