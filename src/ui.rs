use crate::api::HttpBackend;
use crate::config::ClientConfig;
use crate::controller::{ChatClient, FileSource};
use crate::i18n::{Language, UiText};
use crate::session::Settings;
use crate::storage::SettingsStore;
use crate::surface::{Control, Surface};
use crate::transcript::Transcript;
use crate::types::Author;
use crate::views::{ChatPanel, PromptDialog, SidePanel};
use dioxus::html::FileEngine;
use dioxus::prelude::*;
use std::sync::Arc;

const DOCCHAT_CSS: Asset = asset!("/assets/docchat.css");

/// Shared, read-only application state handed to the root component.
#[derive(Clone)]
pub struct AppContext {
    pub client: ChatClient,
    pub api_url: String,
    pub session_id: String,
}

impl AppContext {
    pub fn new(config: &ClientConfig) -> Self {
        let settings = Settings::new(default_store(config));
        let session_id = settings.session_id();
        let backend = Arc::new(HttpBackend::from_config(config));
        Self {
            client: ChatClient::new(backend, settings).with_top_k(config.top_k),
            api_url: config.api_url.clone(),
            session_id,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store(config: &ClientConfig) -> Arc<dyn SettingsStore> {
    let root = config
        .data_dir
        .clone()
        .unwrap_or_else(crate::storage::default_data_dir);
    tracing::debug!(root = %root.display(), "using file settings store");
    Arc::new(crate::storage::FileStore::new(root))
}

#[cfg(target_arch = "wasm32")]
fn default_store(_config: &ClientConfig) -> Arc<dyn SettingsStore> {
    Arc::new(crate::storage::MemoryStore::new())
}

/// `Surface` backed by the root component's signals.
#[derive(Clone, Copy, PartialEq)]
pub struct SignalSurface {
    pub transcript: Signal<Transcript>,
    pub input: Signal<String>,
    pub composer_busy: Signal<bool>,
    pub index_busy: Signal<bool>,
    pub prompt: Signal<Option<String>>,
    /// Bumped whenever the message input should take focus.
    pub focus_ticket: Signal<u64>,
}

impl Surface for SignalSurface {
    fn append_message(&mut self, text: &str, author: Author) {
        self.transcript.with_mut(|t| t.append(text, author));
    }

    fn show_typing(&mut self) {
        self.transcript.with_mut(|t| t.show_typing());
    }

    fn hide_typing(&mut self) {
        self.transcript.with_mut(|t| t.hide_typing());
    }

    fn set_busy(&mut self, control: Control, busy: bool) {
        match control {
            Control::Composer => self.composer_busy.set(busy),
            Control::Index => self.index_busy.set(busy),
        }
    }

    fn is_busy(&self, control: Control) -> bool {
        match control {
            Control::Composer => *self.composer_busy.peek(),
            Control::Index => *self.index_busy.peek(),
        }
    }

    fn show_prompt(&mut self, text: &str) {
        self.prompt.set(Some(text.to_string()));
    }

    fn clear_input(&mut self) {
        self.input.set(String::new());
    }

    fn focus_input(&mut self) {
        self.focus_ticket.with_mut(|ticket| *ticket += 1);
    }
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();

    let initial_language = ctx.client.settings().language();
    let mut ui_text = use_signal(|| {
        ctx.client
            .settings()
            .apply_language(initial_language, 0)
    });
    let transcript = use_signal(|| {
        let mut transcript = Transcript::new();
        transcript.append(initial_language.t("greeting"), Author::Bot);
        transcript
    });
    let surface = SignalSurface {
        transcript,
        input: use_signal(String::new),
        composer_busy: use_signal(|| false),
        index_busy: use_signal(|| false),
        prompt: use_signal(|| None),
        focus_ticket: use_signal(|| 0),
    };
    let mut picked_files = use_signal(|| Option::<Arc<dyn FileEngine>>::None);

    use_effect(move || {
        let code = ui_text.read().language.code();
        let _ = document::eval(&format!("document.documentElement.lang = '{code}';"));
    });

    let file_count = move || {
        picked_files
            .read()
            .as_ref()
            .map(|engine| engine.files().len())
            .unwrap_or(0)
    };

    let settings = ctx.client.settings().clone();
    let on_language = move |code: String| match code.parse::<Language>() {
        Ok(language) => ui_text.set(settings.apply_language(language, file_count())),
        Err(err) => tracing::warn!("{err}"),
    };

    let on_files = move |engine: Option<Arc<dyn FileEngine>>| {
        picked_files.set(engine);
        let count = file_count();
        ui_text.with_mut(|text| *text = UiText::new(text.language, count));
    };

    let upload_client = ctx.client.clone();
    let on_index = move |_: MouseEvent| {
        let files = PickedFiles::new(picked_files());
        let mut surface = surface;
        // Claimed before the task starts so a second click cannot begin
        // another batch while files are still being read.
        if !files.is_empty() && !surface.claim(Control::Index) {
            return;
        }
        let client = upload_client.clone();
        spawn(async move {
            client.index_files(&mut surface, &files).await;
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: DOCCHAT_CSS }
        div { class: "layout",
            ChatPanel { surface, ui_text }
            SidePanel {
                ui_text,
                index_busy: surface.index_busy,
                on_language,
                on_files,
                on_index,
            }
        }
        PromptDialog { prompt: surface.prompt }
    }
}

/// Files chosen in the picker, read lazily while the batch runs.
struct PickedFiles {
    engine: Option<Arc<dyn FileEngine>>,
    paths: Vec<String>,
}

impl PickedFiles {
    fn new(engine: Option<Arc<dyn FileEngine>>) -> Self {
        let paths = engine.as_ref().map(|e| e.files()).unwrap_or_default();
        Self { engine, paths }
    }

    fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[async_trait::async_trait(?Send)]
impl FileSource for PickedFiles {
    fn file_names(&self) -> Vec<String> {
        self.paths.clone()
    }

    async fn read(&self, index: usize) -> Option<Vec<u8>> {
        let engine = self.engine.as_ref()?;
        let path = self.paths.get(index)?;
        engine.read_file(path).await
    }
}
