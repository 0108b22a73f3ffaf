use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "ENVIRONMENT")]
    pub environment: Option<String>,
    #[serde(default, alias = "SAMPLE_FALLBACK")]
    pub sample_fallback: Option<bool>,
}

impl RuntimeConfig {
    /// Fills fields missing here from `other`.
    pub fn or(self, other: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(other.api_base_url),
            environment: self.environment.or(other.environment),
            sample_fallback: self.sample_fallback.or(other.sample_fallback),
        }
    }

    /// True once every field has a value, so lower-priority sources have
    /// nothing left to contribute.
    pub fn is_complete(&self) -> bool {
        self.api_base_url.is_some() && self.environment.is_some() && self.sample_fallback.is_some()
    }

    fn is_empty(&self) -> bool {
        self.api_base_url.is_none() && self.environment.is_none() && self.sample_fallback.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            _ => Environment::Production,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub environment: Environment,
    pub sample_fallback: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            environment: Environment::Production,
            sample_fallback: false,
        }
    }
}

impl AppConfig {
    pub fn from_runtime(cfg: RuntimeConfig) -> Self {
        let api_base_url = cfg
            .api_base_url
            .as_deref()
            .map(normalize_base_url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self {
            api_base_url,
            environment: cfg
                .environment
                .as_deref()
                .map(Environment::parse)
                .unwrap_or_default(),
            sample_fallback: cfg.sample_fallback.unwrap_or(false),
        }
    }

    /// The sample employee set may only stand in for the backend in
    /// development builds that opt in.
    pub fn sample_fallback_enabled(&self) -> bool {
        self.environment == Environment::Development && self.sample_fallback
    }
}

pub fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Cached config, or the production default when nothing has been loaded.
pub fn current() -> AppConfig {
    APP_CONFIG.get().cloned().unwrap_or_default()
}

fn cache_config(cfg: AppConfig) -> AppConfig {
    let _ = APP_CONFIG.set(cfg);
    current()
}

fn read_global(name: &str) -> Option<RuntimeConfig> {
    // Expect optional global object: window.__STAFFDESK_ENV = { API_BASE_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let string_field = |keys: &[&str]| {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&obj, &(*key).into())
                .ok()
                .and_then(|v| v.as_string())
        })
    };
    let bool_field = |keys: &[&str]| {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(&obj, &(*key).into())
                .ok()
                .and_then(|v| v.as_bool())
        })
    };
    let cfg = RuntimeConfig {
        api_base_url: string_field(&["API_BASE_URL", "api_base_url"]),
        environment: string_field(&["ENVIRONMENT", "environment"]),
        sample_fallback: bool_field(&["SAMPLE_FALLBACK", "sample_fallback"]),
    };
    (!cfg.is_empty()).then_some(cfg)
}

fn snapshot_from_globals() -> Option<RuntimeConfig> {
    match (read_global("__STAFFDESK_ENV"), read_global("__STAFFDESK_CONFIG")) {
        (Some(env), Some(cfg)) => Some(env.or(cfg)),
        (env, cfg) => env.or(cfg),
    }
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

/// Resolves the config once. Sources are merged field by field, highest
/// priority first: `window.__STAFFDESK_ENV`, `window.__STAFFDESK_CONFIG`,
/// then `{origin}/config.json`. The file is fetched whenever a field is still
/// unset after the globals.
pub async fn await_config() -> AppConfig {
    if let Some(cached) = APP_CONFIG.get() {
        return cached.clone();
    }
    let globals = snapshot_from_globals().unwrap_or_default();
    let runtime = if globals.is_complete() {
        globals
    } else {
        match fetch_runtime_config().await {
            Some(file) => globals.or(file),
            None => globals,
        }
    };
    cache_config(AppConfig::from_runtime(runtime))
}

pub async fn init() {
    let cfg = await_config().await;
    log::info!(
        "Runtime config: api={} env={:?} sample_fallback={}",
        cfg.api_base_url,
        cfg.environment,
        cfg.sample_fallback_enabled()
    );
}
