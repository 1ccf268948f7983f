use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    pub prompt: Option<String>,
    pub blog_data: Option<BlogData>,
}

#[derive(Debug, Deserialize)]
pub struct BlogData {
    pub title: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Body returned by the assistant endpoint. Exactly one of `text` and
/// `message` is set, matching `success`.
#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AssistantResponse {
    pub fn ok(text: String) -> Self {
        Self {
            success: true,
            text: Some(text),
            message: None,
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            success: false,
            text: None,
            message: Some(message),
        }
    }
}
