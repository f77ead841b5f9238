//! User-action handlers. Each one drives a `Surface` and never returns an
//! error: failures are rendered into the transcript and the UI is always
//! left interactive.

mod ask;
mod upload;

pub use ask::ask_messages;
pub use upload::{FileSource, PREVIEW_LIMIT, UNREADABLE, preview_snippet, upload_message};

use crate::api::Backend;
use crate::config::DEFAULT_TOP_K;
use crate::i18n::Language;
use crate::session::Settings;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChatClient {
    backend: Arc<dyn Backend>,
    settings: Settings,
    top_k: u32,
}

impl ChatClient {
    pub fn new(backend: Arc<dyn Backend>, settings: Settings) -> Self {
        Self {
            backend,
            settings,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Messages are rendered in whatever language is active when they arrive.
    fn language(&self) -> Language {
        self.settings.language()
    }
}
