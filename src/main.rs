use docchat::config::ClientConfig;
use docchat::ui::{App, AppContext};

/// Bundled config for mobile builds (iOS/Android)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    // Fall back to bundled config (mobile builds)
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if std::env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

/// KEY=VALUE pairs, skipping blanks and `#` comments.
fn parse_env_lines(contents: &str) -> impl Iterator<Item = (&str, &str)> {
    contents.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        line.split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
    })
}

fn main() -> anyhow::Result<()> {
    load_dotenv();
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "starting docchat");

    dioxus::LaunchBuilder::new()
        .with_context(AppContext::new(&config))
        .launch(App);
    Ok(())
}
