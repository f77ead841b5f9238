//! Integration tests for the ask and upload controllers
//!
//! Drives `ChatClient` against an in-process backend and a surface that
//! records every call, so ordering and busy-state handling are visible.

use async_trait::async_trait;
use docchat::api::{ApiError, ApiResult, AskRequest, Backend};
use docchat::controller::{ChatClient, FileSource};
use docchat::i18n::Language;
use docchat::session::Settings;
use docchat::storage::MemoryStore;
use docchat::surface::{Control, MemorySurface, Surface};
use docchat::types::{AskResult, Author, UploadFile, UploadResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeBackend {
    ask_replies: Mutex<VecDeque<ApiResult<AskResult>>>,
    upload_replies: Mutex<VecDeque<ApiResult<UploadResult>>>,
    asked: Mutex<Vec<AskRequest>>,
    uploaded: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn with_ask(reply: ApiResult<AskResult>) -> Self {
        let backend = Self::default();
        backend.ask_replies.lock().unwrap().push_back(reply);
        backend
    }

    fn with_uploads(replies: Vec<ApiResult<UploadResult>>) -> Self {
        let backend = Self::default();
        backend.upload_replies.lock().unwrap().extend(replies);
        backend
    }

    fn asked(&self) -> Vec<AskRequest> {
        self.asked.lock().unwrap().clone()
    }

    fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn ask(&self, request: &AskRequest) -> ApiResult<AskResult> {
        self.asked.lock().unwrap().push(request.clone());
        self.ask_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected ask call")
    }

    async fn upload(&self, file: &UploadFile) -> ApiResult<UploadResult> {
        self.uploaded.lock().unwrap().push(file.name.clone());
        self.upload_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected upload call")
    }
}

/// A response body that is not JSON, the same failure a dropped connection
/// surfaces as.
fn transport_error() -> ApiError {
    ApiError::Decode(serde_json::from_str::<serde_json::Value>("<html>").unwrap_err())
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Append(String, Author),
    ShowTyping,
    HideTyping,
    Busy(Control, bool),
    Prompt(String),
    ClearInput,
    FocusInput,
}

#[derive(Default)]
struct RecordingSurface {
    inner: MemorySurface,
    calls: Vec<Call>,
}

impl Surface for RecordingSurface {
    fn append_message(&mut self, text: &str, author: Author) {
        self.calls.push(Call::Append(text.to_string(), author));
        self.inner.append_message(text, author);
    }

    fn show_typing(&mut self) {
        self.calls.push(Call::ShowTyping);
        self.inner.show_typing();
    }

    fn hide_typing(&mut self) {
        self.calls.push(Call::HideTyping);
        self.inner.hide_typing();
    }

    fn set_busy(&mut self, control: Control, busy: bool) {
        self.calls.push(Call::Busy(control, busy));
        self.inner.set_busy(control, busy);
    }

    fn is_busy(&self, control: Control) -> bool {
        self.inner.is_busy(control)
    }

    fn show_prompt(&mut self, text: &str) {
        self.calls.push(Call::Prompt(text.to_string()));
        self.inner.show_prompt(text);
    }

    fn clear_input(&mut self) {
        self.calls.push(Call::ClearInput);
        self.inner.clear_input();
    }

    fn focus_input(&mut self) {
        self.calls.push(Call::FocusInput);
        self.inner.focus_input();
    }
}

fn client(backend: Arc<FakeBackend>) -> ChatClient {
    let settings = Settings::new(Arc::new(MemoryStore::new()));
    settings.set_language(Language::En);
    ChatClient::new(backend, settings)
}

fn file(name: &str) -> UploadFile {
    UploadFile::new(name, name.as_bytes().to_vec())
}

/// Picker contents where some files refuse to be read.
struct PickedFiles(Vec<(&'static str, Option<&'static str>)>);

#[async_trait(?Send)]
impl FileSource for PickedFiles {
    fn file_names(&self) -> Vec<String> {
        self.0.iter().map(|(name, _)| name.to_string()).collect()
    }

    async fn read(&self, index: usize) -> Option<Vec<u8>> {
        self.0.get(index).and_then(|(_, text)| text.map(|t| t.as_bytes().to_vec()))
    }
}

mod ask_tests {
    use super::*;

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let backend = Arc::new(FakeBackend::default());
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();

        client.send_message(&mut surface, "   \n\t").await;
        client.send_message(&mut surface, "").await;

        assert!(surface.calls.is_empty());
        assert!(backend.asked().is_empty());
    }

    #[tokio::test]
    async fn test_answer_with_sources() {
        let backend = Arc::new(FakeBackend::with_ask(Ok(AskResult {
            answer: Some("  The report covers Q3.  ".to_string()),
            sources: Some(vec!["q3.pdf".to_string(), "notes.txt".to_string()]),
            ..Default::default()
        })));
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();

        client.send_message(&mut surface, "  what is it?  ").await;

        assert_eq!(
            backend.asked(),
            vec![AskRequest {
                query: "what is it?".to_string(),
                top_k: 5,
            }]
        );
        assert_eq!(
            surface.calls,
            vec![
                Call::Append("what is it?".to_string(), Author::User),
                Call::ClearInput,
                Call::Busy(Control::Composer, true),
                Call::ShowTyping,
                Call::HideTyping,
                Call::Append("The report covers Q3.".to_string(), Author::Bot),
                Call::Append("Sources: q3.pdf, notes.txt".to_string(), Author::Bot),
                Call::Busy(Control::Composer, false),
                Call::FocusInput,
            ]
        );
        assert!(!surface.inner.transcript.is_typing());
    }

    #[tokio::test]
    async fn test_empty_answer_renders_no_answer() {
        let backend = Arc::new(FakeBackend::with_ask(Ok(AskResult {
            answer: Some(String::new()),
            sources: Some(Vec::new()),
            ..Default::default()
        })));
        let client = client(backend);
        let mut surface = RecordingSurface::default();

        client.send_message(&mut surface, "anything?").await;

        assert_eq!(
            surface.inner.texts(),
            vec!["anything?", "No answer found in the uploaded materials."]
        );
    }

    #[tokio::test]
    async fn test_backend_error_is_shown_once() {
        let backend = Arc::new(FakeBackend::with_ask(Ok(AskResult {
            error: Some("timeout".to_string()),
            trace: Some("Traceback ...".to_string()),
            answer: Some("should not render".to_string()),
            sources: Some(vec!["x.pdf".to_string()]),
        })));
        let client = client(backend);
        let mut surface = RecordingSurface::default();

        client.send_message(&mut surface, "slow question").await;

        let bot: Vec<_> = surface
            .inner
            .transcript
            .messages()
            .filter(|m| m.author == Author::Bot)
            .map(|m| m.text.clone())
            .collect();
        assert_eq!(bot, vec!["Error: timeout"]);
        assert!(!surface.inner.composer_busy);
        assert!(surface.inner.input_focused);
    }

    #[tokio::test]
    async fn test_transport_failure_restores_composer() {
        let backend = Arc::new(FakeBackend::with_ask(Err(transport_error())));
        let client = client(backend);
        let mut surface = RecordingSurface::default();

        client.send_message(&mut surface, "hello").await;

        assert_eq!(surface.inner.texts(), vec!["hello", "Network error"]);
        assert!(!surface.inner.composer_busy);
        assert!(!surface.inner.transcript.is_typing());
        assert_eq!(surface.calls.last(), Some(&Call::FocusInput));
    }

    #[tokio::test]
    async fn test_reply_uses_language_active_at_render() {
        let backend = Arc::new(FakeBackend::with_ask(Ok(AskResult::default())));
        let client = client(backend);
        client.settings().set_language(Language::Pl);
        let mut surface = MemorySurface::new();

        client.send_message(&mut surface, "pytanie").await;

        assert_eq!(
            surface.texts(),
            vec!["pytanie", "Brak odpowiedzi w przesłanych materiałach."]
        );
    }
}

mod upload_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_selection_prompts() {
        let backend = Arc::new(FakeBackend::default());
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();

        client.index_files(&mut surface, &Vec::<UploadFile>::new()).await;

        assert_eq!(surface.calls, vec![Call::Prompt("Choose files.".to_string())]);
        assert!(backend.uploaded().is_empty());
    }

    #[tokio::test]
    async fn test_results_follow_file_order() {
        let backend = Arc::new(FakeBackend::with_uploads(vec![
            Ok(UploadResult::Indexed {
                chunks: 3,
                ftype: "pdf".to_string(),
                bytes: 120,
            }),
            Ok(UploadResult::Rejected {
                error: "no_text_extracted".to_string(),
                bytes: Some(64),
                ftype: Some("image".to_string()),
                preview: Some("  \u{0}PNG\r\n\r\n  header ".to_string()),
            }),
        ]));
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();

        client
            .index_files(&mut surface, &vec![file("/home/me/a.txt"), file("scan.png")])
            .await;

        assert_eq!(backend.uploaded(), vec!["a.txt", "scan.png"]);
        assert_eq!(
            surface.calls,
            vec![
                Call::Busy(Control::Index, true),
                Call::Append("OK: a.txt → 3 chunks (pdf, 120 bytes)".to_string(), Author::Bot),
                Call::Append(
                    "Failed: scan.png → no_text_extracted (bytes=64, ftype=image) preview=\" PNG header \""
                        .to_string(),
                    Author::Bot
                ),
                Call::Busy(Control::Index, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_aborts_batch() {
        let backend = Arc::new(FakeBackend::with_uploads(vec![
            Ok(UploadResult::Indexed {
                chunks: 1,
                ftype: "txt".to_string(),
                bytes: 5,
            }),
            Err(transport_error()),
            Ok(UploadResult::Indexed {
                chunks: 9,
                ftype: "txt".to_string(),
                bytes: 9,
            }),
        ]));
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();

        client
            .index_files(&mut surface, &vec![file("1.txt"), file("2.txt"), file("3.txt")])
            .await;

        assert_eq!(backend.uploaded(), vec!["1.txt", "2.txt"]);
        assert_eq!(
            surface.inner.texts(),
            vec!["OK: 1.txt → 1 chunks (txt, 5 bytes)", "Network error"]
        );
        assert!(!surface.inner.index_busy);
        assert_eq!(surface.calls.last(), Some(&Call::Busy(Control::Index, false)));
    }

    #[tokio::test]
    async fn test_unreadable_file_is_reported_in_order() {
        let backend = Arc::new(FakeBackend::with_uploads(vec![
            Ok(UploadResult::Indexed {
                chunks: 2,
                ftype: "txt".to_string(),
                bytes: 4,
            }),
            Ok(UploadResult::Indexed {
                chunks: 1,
                ftype: "md".to_string(),
                bytes: 3,
            }),
        ]));
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();
        let picked = PickedFiles(vec![
            ("/tmp/a.txt", Some("aaaa")),
            ("/tmp/locked.pdf", None),
            ("c.md", Some("ccc")),
        ]);

        client.index_files(&mut surface, &picked).await;

        assert_eq!(backend.uploaded(), vec!["a.txt", "c.md"]);
        assert_eq!(
            surface.calls,
            vec![
                Call::Busy(Control::Index, true),
                Call::Append("OK: a.txt → 2 chunks (txt, 4 bytes)".to_string(), Author::Bot),
                Call::Append(
                    "Failed: locked.pdf → file_unreadable (bytes=?, ftype=?)".to_string(),
                    Author::Bot
                ),
                Call::Append("OK: c.md → 1 chunks (md, 3 bytes)".to_string(), Author::Bot),
                Call::Busy(Control::Index, false),
            ]
        );
    }

    #[tokio::test]
    async fn test_all_unreadable_does_not_prompt() {
        let backend = Arc::new(FakeBackend::default());
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();
        let picked = PickedFiles(vec![("gone.txt", None)]);

        client.index_files(&mut surface, &picked).await;

        assert!(backend.uploaded().is_empty());
        assert!(surface.inner.prompts.is_empty());
        assert_eq!(
            surface.inner.texts(),
            vec!["Failed: gone.txt → file_unreadable (bytes=?, ftype=?)"]
        );
        assert!(!surface.inner.index_busy);
    }

    #[tokio::test]
    async fn test_claimed_index_is_released_after_batch() {
        let backend = Arc::new(FakeBackend::with_uploads(vec![Ok(UploadResult::Indexed {
            chunks: 1,
            ftype: "txt".to_string(),
            bytes: 1,
        })]));
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();

        // The click handler claims the button before the batch task runs.
        assert!(surface.claim(Control::Index));
        assert!(!surface.claim(Control::Index));

        client.index_files(&mut surface, &vec![file("x.txt")]).await;

        assert_eq!(backend.uploaded(), vec!["x.txt"]);
        assert!(surface.claim(Control::Index));
    }
}

mod busy_tests {
    use super::*;

    #[tokio::test]
    async fn test_claimed_composer_is_released_after_reply() {
        let backend = Arc::new(FakeBackend::with_ask(Ok(AskResult {
            answer: Some("yes".to_string()),
            ..Default::default()
        })));
        let client = client(backend.clone());
        let mut surface = RecordingSurface::default();

        assert!(surface.claim(Control::Composer));
        // A second send while the first is pending is refused.
        assert!(!surface.claim(Control::Composer));

        client.send_message(&mut surface, "ready?").await;

        assert_eq!(backend.asked().len(), 1);
        assert!(!surface.inner.composer_busy);
        assert!(surface.claim(Control::Composer));
    }
}
