//! Anthropic Messages backend
//!
//! Key goes in the `x-api-key` header rather than a bearer token; the
//! Messages API additionally requires `max_tokens`, an `anthropic-version`
//! header, and block-structured message content. Result text lives at
//! `content[0].text`.

use super::{ApiRequest, ProviderAdapter, ProviderKind, ProviderProfile};
use crate::error::{RedraftError, RedraftResult};
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    text: String,
}

pub struct AnthropicAdapter;

impl ProviderAdapter for AnthropicAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn build_request(&self, prompt: &str, profile: &ProviderProfile) -> RedraftResult<ApiRequest> {
        let body = serde_json::to_value(MessagesRequest {
            model: &profile.model,
            max_tokens: profile.max_tokens,
            system: &profile.system_prompt,
            messages: vec![Message {
                role: "user",
                content: vec![ContentBlock {
                    kind: "text",
                    text: prompt,
                }],
            }],
        })?;

        Ok(ApiRequest {
            url: profile.endpoint.clone(),
            headers: vec![
                ("Content-Type", "application/json".to_string()),
                ("x-api-key", profile.api_key.clone()),
                ("anthropic-version", ANTHROPIC_VERSION.to_string()),
            ],
            body,
        })
    }

    fn extract_text(&self, body: &str) -> RedraftResult<String> {
        let parsed: MessagesResponse = serde_json::from_str(body)
            .map_err(|e| RedraftError::ResponseShape(e.to_string()))?;
        parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| RedraftError::ResponseShape("response contained no content".into()))
    }
}
