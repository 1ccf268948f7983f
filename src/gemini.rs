use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use url::Url;

// ── Constants ────────────────────────────────────────────────────────────────

const USER_AGENT: &str = "blogiphilia-api/1.0";

/// Returned as the assistant text when the upstream reply has no candidate text.
pub const FALLBACK_TEXT: &str = "No response generated.";

pub const GENERATION_CONFIG: GenerationConfig = GenerationConfig {
    temperature: 0.7,
    top_p: 0.95,
    top_k: 40,
    max_output_tokens: 1024,
};

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("GEMINI_API_URL is not configured")]
    MissingEndpoint,
    #[error("invalid GEMINI_API_URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("{}", with_causes(.0))]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl GenerateError {
    /// Upstream HTTP status, when the failure came from a non-2xx reply.
    pub fn upstream_status(&self) -> Option<StatusCode> {
        match self {
            GenerateError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

// ── Client ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct GeminiConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerateError> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_url.is_some()
    }

    /// Sends one `generateContent` call and returns the first candidate's
    /// text. No retries.
    pub async fn generate(&self, instruction: &str) -> Result<String, GenerateError> {
        let url = self.endpoint()?;
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: instruction }],
            }],
            generation_config: GENERATION_CONFIG,
        };

        // Error text reaches callers, so strip the URL (it carries the key).
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Request(e.without_url()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerateError::Request(e.without_url()))?;

        if !status.is_success() {
            return Err(upstream_error(status, &bytes));
        }

        let value: Value = serde_json::from_slice(&bytes)?;
        Ok(candidate_text(&value)
            .unwrap_or(FALLBACK_TEXT)
            .to_string())
    }

    fn endpoint(&self) -> Result<Url, GenerateError> {
        let raw = self
            .config
            .api_url
            .as_deref()
            .ok_or(GenerateError::MissingEndpoint)?;
        let mut url = Url::parse(raw)?;
        if let Some(key) = &self.config.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

// ── Response helpers ─────────────────────────────────────────────────────────

pub fn candidate_text(value: &Value) -> Option<&str> {
    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

/// Renders an error followed by its `source()` chain, since reqwest's own
/// `Display` stops at the outermost layer.
fn with_causes(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}

fn upstream_error(status: StatusCode, body: &[u8]) -> GenerateError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("upstream returned status {}", status.as_u16()));
    GenerateError::Upstream { status, message }
}
