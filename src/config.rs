use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TOP_K: u32 = 5;

/// Runtime configuration, read from the environment once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub top_k: u32,
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            top_k: DEFAULT_TOP_K,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("DOCCHAT_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&api_url)?;

        let top_k = match lookup("DOCCHAT_TOP_K") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DOCCHAT_TOP_K must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_TOP_K,
        };
        if top_k == 0 {
            bail!("DOCCHAT_TOP_K must be at least 1");
        }

        let data_dir = lookup("DOCCHAT_DATA_DIR")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            top_k,
            data_dir,
        })
    }
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let url = reqwest::Url::parse(raw).with_context(|| format!("invalid DOCCHAT_API_URL {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("DOCCHAT_API_URL must use http or https, got {}", url.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
