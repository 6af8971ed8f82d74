//! Generation backends: configuration, provider abstraction, and the ordered
//! fallback selector. Every failure here degrades to "no result"; nothing in
//! this module propagates an error to callers.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

const DEFAULT_LOCAL_MODEL: &str = "qwen2.5:3b";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Process-wide backend configuration, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct BackendConfig {
    pub local_url: Option<String>,
    pub local_token: Option<String>,
    pub local_model: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    /// Whether the caller asked for LLM summaries at all.
    pub requested: bool,
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl BackendConfig {
    /// Read endpoints and credentials from the environment.
    pub fn from_env(requested: bool) -> Self {
        Self {
            local_url: env_nonempty("LOCAL_CHATBOX_URL"),
            local_token: env_nonempty("LOCAL_CHATBOX_TOKEN"),
            local_model: env_nonempty("LOCAL_CHATBOX_MODEL"),
            openai_api_key: env_nonempty("OPENAI_API_KEY"),
            openai_model: env_nonempty("OPENAI_MODEL"),
            requested,
        }
    }

    /// LLM calls happen only when requested AND at least one backend is
    /// reachable by configuration.
    pub fn enabled(&self) -> bool {
        self.requested && (self.local_url.is_some() || self.openai_api_key.is_some())
    }

    pub fn local_model(&self) -> String {
        self.local_model
            .clone()
            .or_else(|| self.openai_model.clone())
            .unwrap_or_else(|| DEFAULT_LOCAL_MODEL.to_string())
    }

    pub fn openai_model(&self) -> String {
        self.openai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string())
    }
}

/// One text-generation backend. Implementations must never fail loudly:
/// transport errors, bad status codes, and unusable payloads all map to
/// `None`.
#[async_trait]
pub trait GenProvider: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Option<String>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent("research-scout/0.1")
        .connect_timeout(Duration::from_secs(4))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("reqwest client")
}

// ------------------------------------------------------------
// Local chatbox provider
// ------------------------------------------------------------

/// Generic local completion endpoint (ollama-style chatbox services).
/// Single attempt per call, 30 s ceiling, no retries.
pub struct LocalChatboxProvider {
    http: reqwest::Client,
    url: String,
    token: Option<String>,
    model: String,
}

impl LocalChatboxProvider {
    pub fn new(url: String, token: Option<String>, model: String) -> Self {
        Self {
            http: http_client(),
            url,
            token,
            model,
        }
    }
}

#[derive(Serialize)]
struct LocalRequest<'a> {
    prompt: &'a str,
    max_tokens: u32,
    model: &'a str,
}

/// Pull usable text out of a local-chatbox response body. Tries a fixed set
/// of top-level keys, then the `choices[0]` nesting, then the raw body.
pub(crate) fn extract_completion_text(body: &str) -> Option<String> {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        if v.is_object() {
            for key in ["response", "text", "result", "output", "reply"] {
                if let Some(s) = v.get(key).and_then(Value::as_str) {
                    let t = s.trim();
                    if !t.is_empty() {
                        return Some(t.to_string());
                    }
                }
            }
            if let Some(choice) = v
                .get("choices")
                .and_then(Value::as_array)
                .and_then(|a| a.first())
            {
                for key in ["text", "message", "content"] {
                    if let Some(s) = choice.get(key).and_then(Value::as_str) {
                        let t = s.trim();
                        if !t.is_empty() {
                            return Some(t.to_string());
                        }
                    }
                }
            }
        }
    }
    let raw = body.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

#[async_trait]
impl GenProvider for LocalChatboxProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Option<String> {
        let payload = LocalRequest {
            prompt,
            max_tokens,
            model: &self.model,
        };
        let mut req = self.http.post(&self.url).json(&payload);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = ?e, "local chatbox call failed");
                return None;
            }
        };
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "local chatbox returned non-success");
            return None;
        }
        let body = match resp.text().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = ?e, "local chatbox body read failed");
                return None;
            }
        };
        extract_completion_text(&body)
    }

    fn name(&self) -> &'static str {
        "local-chatbox"
    }
}

// ------------------------------------------------------------
// OpenAI provider
// ------------------------------------------------------------

/// OpenAI Chat Completions provider. Requires an API key.
pub struct OpenAiProvider {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: http_client(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl GenProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Option<String> {
        if self.api_key.is_empty() {
            return None;
        }

        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
        }
        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: ChoiceMsg,
        }
        #[derive(Deserialize)]
        struct ChoiceMsg {
            content: String,
        }

        let req = Req {
            model: &self.model,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
            max_tokens,
        };

        let resp = match self
            .http
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(error = ?e, "openai call failed");
                return None;
            }
        };
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "openai returned non-success");
            return None;
        }
        let body: Resp = match resp.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = ?e, "openai response parse failed");
                return None;
            }
        };
        let content = body
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .unwrap_or("");
        if content.is_empty() {
            None
        } else {
            Some(content.to_string())
        }
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ------------------------------------------------------------
// Selector
// ------------------------------------------------------------

/// Ordered list of backends: local service first, then cloud. The first
/// non-empty result wins; when disabled, `generate` is a no-op.
pub struct BackendSelector {
    enabled: bool,
    providers: Vec<Box<dyn GenProvider>>,
}

impl BackendSelector {
    pub fn from_config(cfg: &BackendConfig) -> Self {
        if cfg.requested && !cfg.enabled() {
            warn!("LLM requested but no local chatbox or OpenAI API key found; falling back to heuristic summaries");
        }

        let mut providers: Vec<Box<dyn GenProvider>> = Vec::new();
        if cfg.enabled() {
            if let Some(url) = &cfg.local_url {
                providers.push(Box::new(LocalChatboxProvider::new(
                    url.clone(),
                    cfg.local_token.clone(),
                    cfg.local_model(),
                )));
            }
            if let Some(key) = &cfg.openai_api_key {
                providers.push(Box::new(OpenAiProvider::new(
                    key.clone(),
                    cfg.openai_model(),
                )));
            }
        }
        Self {
            enabled: cfg.enabled(),
            providers,
        }
    }

    /// Selector with an explicit provider list, enabled. Used by tests and
    /// anywhere the default env wiring is not wanted.
    pub fn with_providers(providers: Vec<Box<dyn GenProvider>>) -> Self {
        Self {
            enabled: true,
            providers,
        }
    }

    /// Selector that never generates anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            providers: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Try each provider in order; return the first non-empty trimmed text.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> Option<String> {
        if !self.enabled {
            return None;
        }
        for provider in &self.providers {
            match provider.generate(prompt, max_tokens).await {
                Some(text) if !text.trim().is_empty() => {
                    return Some(text.trim().to_string());
                }
                _ => debug!(provider = provider.name(), "backend yielded no text"),
            }
        }
        None
    }
}
