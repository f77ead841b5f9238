use super::ChatClient;
use crate::api::AskRequest;
use crate::i18n::Language;
use crate::surface::{Control, Surface};
use crate::types::{AskResult, Author};

impl ChatClient {
    /// Send one question and render the reply. Blank input is ignored.
    pub async fn send_message<S: Surface + ?Sized>(&self, surface: &mut S, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        surface.append_message(query, Author::User);
        surface.clear_input();
        surface.set_busy(Control::Composer, true);
        surface.show_typing();

        let request = AskRequest {
            query: query.to_string(),
            top_k: self.top_k,
        };
        let outcome = self.backend.ask(&request).await;
        surface.hide_typing();

        let lang = self.language();
        match outcome {
            Ok(result) => {
                if let Some(error) = result.error.as_deref().filter(|e| !e.is_empty()) {
                    tracing::error!(
                        "ask failed: {}",
                        result.trace.as_deref().unwrap_or(error)
                    );
                }
                for text in ask_messages(lang, &result) {
                    surface.append_message(&text, Author::Bot);
                }
            }
            Err(err) => {
                tracing::error!("ask request failed: {err}");
                surface.append_message(&lang.t("net_error"), Author::Bot);
            }
        }

        surface.set_busy(Control::Composer, false);
        surface.focus_input();
    }
}

/// Bot messages for a backend reply: an error line, or the answer followed
/// by an optional sources line.
pub fn ask_messages(lang: Language, result: &AskResult) -> Vec<String> {
    if let Some(error) = result.error.as_deref().filter(|e| !e.is_empty()) {
        return vec![lang.t_with("ask_error", &[("error", &error)])];
    }

    let answer = result.answer.as_deref().unwrap_or_default().trim();
    let mut messages = vec![if answer.is_empty() {
        lang.t("no_answer")
    } else {
        answer.to_string()
    }];

    if let Some(sources) = result.sources.as_ref().filter(|s| !s.is_empty()) {
        messages.push(format!("{}{}", lang.t("sources_label"), sources.join(", ")));
    }
    messages
}
