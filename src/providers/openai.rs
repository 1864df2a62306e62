//! OpenAI-style chat completions backend
//!
//! Bearer-token auth; result text lives at `choices[0].message.content`.

use super::{ApiRequest, ProviderAdapter, ProviderKind, ProviderProfile};
use crate::error::{RedraftError, RedraftResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct OpenAiAdapter;

impl ProviderAdapter for OpenAiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn build_request(&self, prompt: &str, profile: &ProviderProfile) -> RedraftResult<ApiRequest> {
        let body = serde_json::to_value(ChatRequest {
            model: &profile.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        })?;

        Ok(ApiRequest {
            url: profile.endpoint.clone(),
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("Authorization", format!("Bearer {}", profile.api_key)),
            ],
            body,
        })
    }

    fn extract_text(&self, body: &str) -> RedraftResult<String> {
        let parsed: ChatResponse = serde_json::from_str(body)
            .map_err(|e| RedraftError::ResponseShape(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| RedraftError::ResponseShape("response contained no choices".into()))
    }
}
