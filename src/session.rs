use crate::i18n::{Language, UiText};
use crate::storage::SettingsStore;
use std::sync::Arc;

pub const SESSION_KEY: &str = "session_id";
pub const LANGUAGE_KEY: &str = "ui_lang";

/// Persisted client settings: the session identifier and the interface
/// language. Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct Settings {
    store: Arc<dyn SettingsStore>,
}

impl Settings {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Return the persisted session id, generating and storing one on first use.
    pub fn session_id(&self) -> String {
        if let Some(id) = self.store.get(SESSION_KEY) {
            let id = id.trim();
            if !id.is_empty() {
                return id.to_string();
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        if let Err(err) = self.store.set(SESSION_KEY, &id) {
            tracing::warn!("failed to persist session id: {err}");
        }
        tracing::info!(session_id = %id, "created new session");
        id
    }

    /// Stored language, or the default when unset or unrecognised.
    pub fn language(&self) -> Language {
        self.store
            .get(LANGUAGE_KEY)
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) {
        if let Err(err) = self.store.set(LANGUAGE_KEY, language.code()) {
            tracing::warn!("failed to persist language {language}: {err}");
        }
    }

    /// Persist `language` and produce the strings to re-render the interface
    /// with, including the file caption for `file_count` picked files.
    pub fn apply_language(&self, language: Language, file_count: usize) -> UiText {
        self.set_language(language);
        tracing::debug!(%language, "applied interface language");
        UiText::new(language, file_count)
    }
}
