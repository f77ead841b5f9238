use crate::types::{Author, ChatMessage};

pub const TYPING_TEXT: &str = "…";

#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Message(ChatMessage),
    /// Placeholder shown while a request is in flight.
    Typing,
}

/// Ordered chat log. Entries appear exactly in the order they were appended.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>, author: Author) {
        self.entries
            .push(Entry::Message(ChatMessage::new(text, author)));
    }

    pub fn show_typing(&mut self) {
        if !self.is_typing() {
            self.entries.push(Entry::Typing);
        }
    }

    pub fn hide_typing(&mut self) {
        self.entries.retain(|entry| !matches!(entry, Entry::Typing));
    }

    pub fn is_typing(&self) -> bool {
        self.entries.iter().any(|entry| matches!(entry, Entry::Typing))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Rendered messages without the typing placeholder.
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Message(msg) => Some(msg),
            Entry::Typing => None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
