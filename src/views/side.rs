use crate::api::ENDPOINTS;
use crate::i18n::{Language, UiText};
use crate::ui::AppContext;
use dioxus::html::FileEngine;
use dioxus::prelude::*;
use std::sync::Arc;

#[component]
pub fn SidePanel(
    ui_text: Signal<UiText>,
    index_busy: Signal<bool>,
    on_language: EventHandler<String>,
    on_files: EventHandler<Option<Arc<dyn FileEngine>>>,
    on_index: EventHandler<MouseEvent>,
) -> Element {
    let text = ui_text.read().clone();

    rsx! {
        aside { class: "side-panel",
            LanguagePicker { text: text.clone(), on_language }
            div { class: "settings-section",
                h3 { class: "section-title", "{text.upload_title}" }
                input {
                    id: "files",
                    r#type: "file",
                    multiple: true,
                    hidden: true,
                    onchange: move |ev: FormEvent| on_files.call(ev.files()),
                }
                div { class: "hstack",
                    label { r#for: "files", id: "chooseBtn", class: "btn", "{text.choose_button}" }
                    span { id: "fileNames", class: "text-muted", "{text.file_caption}" }
                }
                button {
                    id: "indexBtn",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: index_busy(),
                    onclick: move |ev| on_index.call(ev),
                    if index_busy() { "{text.uploading}" } else { "{text.index_button}" }
                }
            }
            ServerStatus { text }
        }
    }
}

#[component]
fn LanguagePicker(text: UiText, on_language: EventHandler<String>) -> Element {
    rsx! {
        div { class: "settings-section",
            select {
                id: "lang",
                title: "{text.lang_title}",
                onchange: move |ev| on_language.call(ev.value()),
                for language in Language::ALL {
                    option {
                        value: language.code(),
                        selected: language == text.language,
                        "{language.native_name()}"
                    }
                }
            }
        }
    }
}

#[component]
fn ServerStatus(text: UiText) -> Element {
    let ctx = use_context::<AppContext>();
    let endpoints = ENDPOINTS.join(", ");

    rsx! {
        div { class: "settings-section status",
            p {
                span { class: "text-muted", "{text.server_label} " }
                code { "{ctx.api_url}" }
            }
            p {
                span { class: "text-muted", "{text.endpoints_label} " }
                code { "{endpoints}" }
            }
            p {
                span { class: "text-muted", "{text.session_label} " }
                input {
                    id: "sid",
                    r#type: "text",
                    value: "{ctx.session_id}",
                    readonly: true,
                }
            }
        }
    }
}
