use super::ChatClient;
use crate::i18n::Language;
use crate::surface::{Control, Surface};
use crate::types::{Author, UploadFile, UploadResult, display_file_name};
use async_trait::async_trait;

/// Maximum characters of a rejected file's preview shown in the chat.
pub const PREVIEW_LIMIT: usize = 80;

/// Error code shown for a picked file whose contents could not be read.
pub const UNREADABLE: &str = "file_unreadable";

/// Files picked for one batch. Contents are read only when their turn comes.
#[async_trait(?Send)]
pub trait FileSource {
    /// Picked names in list order, possibly carrying a directory part.
    fn file_names(&self) -> Vec<String>;

    /// Contents of the file at `index`, or `None` when it cannot be read.
    async fn read(&self, index: usize) -> Option<Vec<u8>>;
}

#[async_trait(?Send)]
impl FileSource for Vec<UploadFile> {
    fn file_names(&self) -> Vec<String> {
        self.iter().map(|file| file.name.clone()).collect()
    }

    async fn read(&self, index: usize) -> Option<Vec<u8>> {
        self.get(index).map(|file| file.bytes.clone())
    }
}

impl ChatClient {
    /// Upload the picked files one at a time, in order, reporting each result.
    ///
    /// A file that cannot be read is reported and skipped. A transport
    /// failure stops the batch; files after it are not sent.
    pub async fn index_files<S, F>(&self, surface: &mut S, files: &F)
    where
        S: Surface + ?Sized,
        F: FileSource + ?Sized,
    {
        let names = files.file_names();
        if names.is_empty() {
            surface.show_prompt(&self.language().t("choose_files_alert"));
            return;
        }

        surface.set_busy(Control::Index, true);

        for (index, name) in names.iter().enumerate() {
            let Some(bytes) = files.read(index).await else {
                tracing::warn!(%name, "could not read picked file");
                let text = upload_message(self.language(), &display_file_name(name), &unreadable());
                surface.append_message(&text, Author::Bot);
                continue;
            };

            let file = UploadFile::new(name, bytes);
            match self.backend.upload(&file).await {
                Ok(result) => {
                    let text = upload_message(self.language(), &file.name, &result);
                    surface.append_message(&text, Author::Bot);
                }
                Err(err) => {
                    tracing::error!(
                        name = %file.name,
                        skipped = names.len() - index - 1,
                        "upload failed, abandoning batch: {err}"
                    );
                    surface.append_message(&self.language().t("net_error"), Author::Bot);
                    break;
                }
            }
        }

        surface.set_busy(Control::Index, false);
    }
}

fn unreadable() -> UploadResult {
    UploadResult::Rejected {
        error: UNREADABLE.to_string(),
        bytes: None,
        ftype: None,
        preview: None,
    }
}

pub fn upload_message(lang: Language, name: &str, result: &UploadResult) -> String {
    match result {
        UploadResult::Indexed {
            chunks,
            ftype,
            bytes,
        } => lang.t_with(
            "ok_upload",
            &[
                ("name", &name),
                ("chunks", chunks),
                ("ftype", ftype),
                ("bytes", bytes),
            ],
        ),
        UploadResult::Rejected {
            error,
            bytes,
            ftype,
            preview,
        } => {
            let bytes = bytes.map_or_else(|| "?".to_string(), |b| b.to_string());
            let ftype = ftype.as_deref().unwrap_or("?");
            let mut text = lang.t_with(
                "fail_upload",
                &[
                    ("name", &name),
                    ("error", error),
                    ("bytes", &bytes),
                    ("ftype", &ftype),
                ],
            );
            if let Some(preview) = preview.as_deref().filter(|p| !p.is_empty()) {
                text.push_str(&format!(" preview=\"{}\"", preview_snippet(preview)));
            }
            text
        }
    }
}

/// Printable, single-line, at most `PREVIEW_LIMIT` characters. Each
/// whitespace run becomes one space; edges are not trimmed.
pub fn preview_snippet(raw: &str) -> String {
    let mut snippet = String::new();
    let mut in_space = false;
    for c in raw.chars().filter(|c| *c != '\u{FFFD}') {
        if c.is_control() || c.is_whitespace() {
            if !in_space {
                snippet.push(' ');
            }
            in_space = true;
        } else {
            snippet.push(c);
            in_space = false;
        }
    }
    snippet.chars().take(PREVIEW_LIMIT).collect()
}
