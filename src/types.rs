use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

impl Author {
    pub fn css_class(self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub author: Author,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, author: Author) -> Self {
        Self {
            text: text.into(),
            author,
        }
    }
}

/// Answer payload returned by `/ask`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AskResult {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub trace: Option<String>,
}

/// Outcome of indexing a single file.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadResult {
    Indexed {
        chunks: u64,
        ftype: String,
        bytes: u64,
    },
    Rejected {
        error: String,
        bytes: Option<u64>,
        ftype: Option<String>,
        preview: Option<String>,
    },
}

/// A picked file, read into memory and ready to send.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Keeps only the final path component so desktop pickers, which hand
    /// out absolute paths, still upload under the original file name.
    pub fn new(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: display_file_name(name),
            bytes,
        }
    }
}

pub fn display_file_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
        .to_string()
}
