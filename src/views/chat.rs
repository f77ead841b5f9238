use crate::i18n::UiText;
use crate::surface::{Control, Surface};
use crate::transcript::{Entry, TYPING_TEXT};
use crate::ui::{AppContext, SignalSurface};
use dioxus::events::Key;
use dioxus::prelude::*;

const SCROLL_TO_BOTTOM: &str = r#"
const log = document.getElementById("chatbox");
if (log) { log.scrollTop = log.scrollHeight; }
"#;

const FOCUS_INPUT: &str = r#"document.getElementById("message")?.focus();"#;

#[component]
pub fn ChatPanel(surface: SignalSurface, ui_text: Signal<UiText>) -> Element {
    let mut input = surface.input;
    let busy = surface.composer_busy;

    // Runs after every transcript change has been rendered.
    use_effect(move || {
        let _ = surface.transcript.read().len();
        let _ = document::eval(SCROLL_TO_BOTTOM);
    });

    use_effect(move || {
        let ticket = *surface.focus_ticket.read();
        if ticket > 0 && !busy() {
            let _ = document::eval(FOCUS_INPUT);
        }
    });

    let send_message = move |text: String| {
        let mut surface = surface;
        if text.trim().is_empty() || !surface.claim(Control::Composer) {
            return;
        }
        let client = consume_context::<AppContext>().client;
        spawn(async move {
            client.send_message(&mut surface, &text).await;
        });
    };

    let text = ui_text.read().clone();
    let transcript = surface.transcript.read().clone();

    rsx! {
        div { class: "chat-wrap",
            div { id: "chatbox", class: "chatbox",
                for entry in transcript.entries().iter() {
                    {render_entry(entry)}
                }
            }
            div { class: "composer",
                input {
                    id: "message",
                    r#type: "text",
                    placeholder: "{text.message_placeholder}",
                    value: "{input}",
                    disabled: busy(),
                    autofocus: true,
                    oninput: move |ev| input.set(ev.value()),
                    onkeydown: move |ev| {
                        if ev.key() == Key::Enter && !ev.modifiers().shift() {
                            ev.prevent_default();
                            send_message(input());
                        }
                    },
                }
                button {
                    id: "sendBtn",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: move |_| send_message(input()),
                    "{text.send_button}"
                }
            }
        }
    }
}

fn render_entry(entry: &Entry) -> Element {
    match entry {
        Entry::Message(msg) => rsx! {
            div { class: format_args!("message {}", msg.author.css_class()), "{msg.text}" }
        },
        Entry::Typing => rsx! {
            div { class: "message bot typing", "{TYPING_TEXT}" }
        },
    }
}
