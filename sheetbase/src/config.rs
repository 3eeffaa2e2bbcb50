use sheet_client::ClientConfig;
use sheet_client::config::DEFAULT_TIMEOUT_SECS;
use std::fmt;

use crate::generator::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// 应用配置 - read once at startup and passed down explicitly
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | GOOGLE_SHEET_SCRIPT_URL | - | 表格端点地址; unset ⇒ setup required |
/// | API_KEY / GEMINI_API_KEY | - | generation provider key |
/// | GEMINI_MODEL | gemini-3-flash-preview | generation model |
/// | GEMINI_BASE_URL | https://generativelanguage.googleapis.com | provider base URL |
/// | REQUEST_TIMEOUT_SECS | 30 | 请求超时(秒) |
///
/// # 示例
///
/// ```ignore
/// GOOGLE_SHEET_SCRIPT_URL=https://script.google.com/macros/s/.../exec cargo run -- list
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Remote store endpoint
    pub script_url: Option<String>,
    /// Generation provider credential
    pub api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Per-request timeout (seconds), shared by both HTTP collaborators
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            script_url: get("GOOGLE_SHEET_SCRIPT_URL"),
            api_key: get("API_KEY").or_else(|| get("GEMINI_API_KEY")),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            request_timeout_secs: get("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Configuration for the given endpoint, defaults elsewhere
    pub fn with_script_url(script_url: impl Into<String>) -> Self {
        Self {
            script_url: Some(script_url.into()),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// No endpoint configured: remote operations are suppressed
    pub fn is_setup_required(&self) -> bool {
        self.script_url.is_none()
    }

    /// Client configuration for the endpoint, if one is set
    pub fn client_config(&self) -> Option<ClientConfig> {
        self.script_url.as_ref().map(|url| {
            ClientConfig::new(url.clone())
                .with_timeout(self.request_timeout_secs)
                .with_user_agent(concat!("sheetbase/", env!("CARGO_PKG_VERSION")))
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

// Keeps the key out of logs and `config` output
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("script_url", &self.script_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "GOOGLE_SHEET_SCRIPT_URL = {}",
            self.script_url.as_deref().unwrap_or("<not set>")
        )?;
        writeln!(
            f,
            "API_KEY                 = {}",
            if self.api_key.is_some() { "<set>" } else { "<not set>" }
        )?;
        writeln!(f, "GEMINI_MODEL            = {}", self.gemini_model)?;
        writeln!(f, "GEMINI_BASE_URL         = {}", self.gemini_base_url)?;
        write!(f, "REQUEST_TIMEOUT_SECS    = {}", self.request_timeout_secs)
    }
}
