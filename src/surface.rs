//! Rendering port between the controllers and whatever displays the chat.

use crate::transcript::Transcript;
use crate::types::Author;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    /// Message input together with the send button.
    Composer,
    /// The "index files" button.
    Index,
}

pub trait Surface {
    fn append_message(&mut self, text: &str, author: Author);
    fn show_typing(&mut self);
    fn hide_typing(&mut self);
    fn set_busy(&mut self, control: Control, busy: bool);
    fn is_busy(&self, control: Control) -> bool;
    /// Blocking notice the user has to acknowledge.
    fn show_prompt(&mut self, text: &str);
    fn clear_input(&mut self);
    fn focus_input(&mut self);

    /// Marks `control` busy unless it already is. Returns `false` when
    /// another action still holds it.
    fn claim(&mut self, control: Control) -> bool {
        if self.is_busy(control) {
            return false;
        }
        self.set_busy(control, true);
        true
    }
}

/// Headless surface that keeps everything in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    pub transcript: Transcript,
    pub composer_busy: bool,
    pub index_busy: bool,
    pub prompts: Vec<String>,
    pub input_cleared: bool,
    pub input_focused: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.transcript.messages().map(|m| m.text.clone()).collect()
    }
}

impl Surface for MemorySurface {
    fn append_message(&mut self, text: &str, author: Author) {
        self.transcript.append(text, author);
    }

    fn show_typing(&mut self) {
        self.transcript.show_typing();
    }

    fn hide_typing(&mut self) {
        self.transcript.hide_typing();
    }

    fn set_busy(&mut self, control: Control, busy: bool) {
        match control {
            Control::Composer => self.composer_busy = busy,
            Control::Index => self.index_busy = busy,
        }
    }

    fn is_busy(&self, control: Control) -> bool {
        match control {
            Control::Composer => self.composer_busy,
            Control::Index => self.index_busy,
        }
    }

    fn show_prompt(&mut self, text: &str) {
        self.prompts.push(text.to_string());
    }

    fn clear_input(&mut self) {
        self.input_cleared = true;
        self.input_focused = false;
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }
}
