pub mod chat;
pub mod prompt;
pub mod side;

pub use chat::ChatPanel;
pub use prompt::PromptDialog;
pub use side::SidePanel;
