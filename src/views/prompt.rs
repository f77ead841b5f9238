use dioxus::prelude::*;

/// Modal notice; nothing else is clickable until it is dismissed.
#[component]
pub fn PromptDialog(prompt: Signal<Option<String>>) -> Element {
    let mut prompt = prompt;
    let Some(message) = prompt() else {
        return rsx! {};
    };

    rsx! {
        div { class: "prompt-overlay", role: "alertdialog",
            div { class: "prompt-box",
                p { "{message}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    autofocus: true,
                    onclick: move |_| prompt.set(None),
                    "OK"
                }
            }
        }
    }
}
