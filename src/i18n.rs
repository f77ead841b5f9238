//! Interface strings for the supported languages.
//!
//! Lookups fall back from the requested language to English and then to the
//! key itself, so a missing translation shows up as a readable key instead
//! of an empty label.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

type Table = HashMap<&'static str, &'static str>;

const RU: &[(&str, &str)] = &[
    ("choose_button", "Выбрать файлы"),
    ("no_file", "Файл не выбран"),
    ("files_selected", "Выбрано файлов: {n}"),
    ("lang_title", "Язык интерфейса"),
    ("message_placeholder", "Задайте вопрос по загруженным файлам..."),
    ("send_button", "Отправить"),
    ("upload_title", "Загрузить файлы"),
    ("index_button", "Индексировать"),
    ("server_label", "Сервер:"),
    ("endpoints_label", "Эндпоинты:"),
    ("session_label", "Сессия:"),
    (
        "greeting",
        "Привет! Загрузите файлы справа и задавайте вопросы по их содержимому.",
    ),
    ("uploading", "Загрузка…"),
    ("choose_files_alert", "Выберите файлы."),
    ("ok_upload", "OK: {name} → {chunks} фрагм. ({ftype}, {bytes} байт)"),
    (
        "fail_upload",
        "Не удалось: {name} → {error} (bytes={bytes}, ftype={ftype})",
    ),
    ("net_error", "Сетевая ошибка"),
    ("ask_error", "Ошибка: {error}"),
    ("no_answer", "Ответа в загруженных материалах не найдено."),
    ("sources_label", "Источники: "),
];

const EN: &[(&str, &str)] = &[
    ("choose_button", "Choose files"),
    ("no_file", "No file selected"),
    ("files_selected", "Selected: {n} file(s)"),
    ("lang_title", "Interface language"),
    ("message_placeholder", "Ask a question about the uploaded files…"),
    ("send_button", "Send"),
    ("upload_title", "Upload files"),
    ("index_button", "Index"),
    ("server_label", "Server:"),
    ("endpoints_label", "Endpoints:"),
    ("session_label", "Session:"),
    (
        "greeting",
        "Hello! Upload files on the right and ask questions about their content.",
    ),
    ("uploading", "Uploading…"),
    ("choose_files_alert", "Choose files."),
    ("ok_upload", "OK: {name} → {chunks} chunks ({ftype}, {bytes} bytes)"),
    (
        "fail_upload",
        "Failed: {name} → {error} (bytes={bytes}, ftype={ftype})",
    ),
    ("net_error", "Network error"),
    ("ask_error", "Error: {error}"),
    ("no_answer", "No answer found in the uploaded materials."),
    ("sources_label", "Sources: "),
];

const PL: &[(&str, &str)] = &[
    ("choose_button", "Wybierz pliki"),
    ("no_file", "Nie wybrano pliku"),
    ("files_selected", "Wybrano plików: {n}"),
    ("lang_title", "Język interfejsu"),
    ("message_placeholder", "Zadaj pytanie dotyczące wgranych plików…"),
    ("send_button", "Wyślij"),
    ("upload_title", "Prześlij pliki"),
    ("index_button", "Indeksuj"),
    ("server_label", "Serwer:"),
    ("endpoints_label", "Endpointy:"),
    ("session_label", "Sesja:"),
    (
        "greeting",
        "Cześć! Prześlij pliki po prawej i zadawaj pytania o ich treść.",
    ),
    ("uploading", "Wysyłanie…"),
    ("choose_files_alert", "Wybierz pliki."),
    ("ok_upload", "OK: {name} → {chunks} fragmentów ({ftype}, {bytes} bajtów)"),
    (
        "fail_upload",
        "Nie udało się: {name} → {error} (bytes={bytes}, ftype={ftype})",
    ),
    ("net_error", "Błąd sieci"),
    ("ask_error", "Błąd: {error}"),
    ("no_answer", "Brak odpowiedzi w przesłanych materiałach."),
    ("sources_label", "Źródła: "),
];

static TABLES: Lazy<HashMap<&'static str, Table>> = Lazy::new(|| {
    let mut tables = HashMap::new();
    tables.insert("ru", RU.iter().copied().collect());
    tables.insert("en", EN.iter().copied().collect());
    tables.insert("pl", PL.iter().copied().collect());
    tables
});

/// Every key known to the English table.
pub fn keys() -> impl Iterator<Item = &'static str> {
    EN.iter().map(|(key, _)| *key)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    Ru,
    En,
    Pl,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::En, Language::Pl];

    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Pl => "pl",
        }
    }

    /// Name shown in the language selector, in the language itself.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::Ru => "Русский",
            Language::En => "English",
            Language::Pl => "Polski",
        }
    }

    pub fn t(self, key: &str) -> String {
        translate(self.code(), key, &[])
    }

    pub fn t_with(self, key: &str, vars: &[(&str, &dyn fmt::Display)]) -> String {
        translate(self.code(), key, vars)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            "pl" => Ok(Language::Pl),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Resolve `key` for `lang` and substitute `{name}` placeholders from `vars`.
///
/// Placeholders without a matching variable are left as-is.
pub fn translate(lang: &str, key: &str, vars: &[(&str, &dyn fmt::Display)]) -> String {
    let template = TABLES
        .get(lang)
        .and_then(|table| table.get(key))
        .or_else(|| TABLES.get("en").and_then(|table| table.get(key)))
        .copied()
        .unwrap_or(key);

    let mut text = template.to_string();
    for (name, value) in vars {
        text = text.replace(&format!("{{{name}}}"), &value.to_string());
    }
    text
}

/// Every localized string the interface shows, for one language.
#[derive(Clone, Debug, PartialEq)]
pub struct UiText {
    pub language: Language,
    pub lang_title: String,
    pub message_placeholder: String,
    pub send_button: String,
    pub upload_title: String,
    pub choose_button: String,
    /// "No file selected" or the selected-file count.
    pub file_caption: String,
    pub index_button: String,
    pub uploading: String,
    pub server_label: String,
    pub endpoints_label: String,
    pub session_label: String,
}

impl UiText {
    pub fn new(language: Language, file_count: usize) -> Self {
        let file_caption = if file_count > 0 {
            language.t_with("files_selected", &[("n", &file_count)])
        } else {
            language.t("no_file")
        };
        Self {
            language,
            lang_title: language.t("lang_title"),
            message_placeholder: language.t("message_placeholder"),
            send_button: language.t("send_button"),
            upload_title: language.t("upload_title"),
            choose_button: language.t("choose_button"),
            file_caption,
            index_button: language.t("index_button"),
            uploading: language.t("uploading"),
            server_label: language.t("server_label"),
            endpoints_label: language.t("endpoints_label"),
            session_label: language.t("session_label"),
        }
    }
}
