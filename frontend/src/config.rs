use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Used when neither `window.__HOSPEDAJE_ENV` nor `./config.json` name an API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();

pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn get_from_env_js() -> Option<String> {
    // Optional global object: window.__HOSPEDAJE_ENV = { API_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__HOSPEDAJE_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    first_configured_url(
        ENV_URL_KEYS
            .iter()
            .filter_map(|key| js_sys::Reflect::get(&obj, &(*key).into()).ok())
            .map(|v| v.as_string()),
    )
}

const ENV_URL_KEYS: [&str; 3] = ["API_URL", "VITE_API_URL", "api_base_url"];

/// First candidate that normalizes to a usable URL; blank values fall through.
fn first_configured_url(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .find_map(|candidate| candidate.as_deref().and_then(normalize_base_url))
}

fn cache_base_url(value: &str) -> String {
    let value = value.to_string();
    let _ = API_BASE_URL.set(value.clone());
    value
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    if let Some(url) = get_from_env_js() {
        log::info!("API base URL taken from __HOSPEDAJE_ENV: {}", url);
        return cache_base_url(&url);
    }
    if let Some(url) = fetch_runtime_config()
        .await
        .and_then(|cfg| cfg.api_base_url)
        .as_deref()
        .and_then(normalize_base_url)
    {
        log::info!("API base URL taken from config.json: {}", url);
        return cache_base_url(&url);
    }
    log::info!("API base URL defaulted to {}", DEFAULT_API_BASE_URL);
    cache_base_url(DEFAULT_API_BASE_URL)
}

pub async fn init() {
    let _ = await_api_base_url().await;
}
