//! HTTP client for the text-generation service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::NarrativeConfig;
use crate::errors::{AnalysisError, Result};
use crate::narrative::{NarrativePrompt, NarrativeService};

pub struct HttpNarrativeService {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpNarrativeService {
    pub fn new(config: &NarrativeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::narrative(format!("client build failed: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: std::env::var(&config.api_key_env).ok(),
        })
    }

    fn system_message(prompt: &NarrativePrompt) -> String {
        let mut message = prompt.persona.clone();
        for directive in &prompt.directives {
            message.push('\n');
            message.push_str(directive);
        }
        message.push_str(&format!("\nRespond following the '{}' shape.", prompt.schema));
        message
    }
}

#[async_trait]
impl NarrativeService for HttpNarrativeService {
    async fn generate(&self, prompt: &NarrativePrompt, context: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": Self::system_message(prompt) },
                { "role": "user", "content": context },
            ],
            "temperature": 0.2,
            "max_tokens": 400,
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AnalysisError::narrative(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable response body".to_string());
            return Err(AnalysisError::narrative(format!(
                "{} returned {}: {}",
                url,
                status,
                truncate(&detail, 200)
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::narrative(format!("invalid JSON: {e}")))?;

        extract_content(&value)
            .ok_or_else(|| AnalysisError::narrative("response missing message content"))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Pull `choices[0].message.content` out of an untyped response.
fn extract_content(value: &Value) -> Option<String> {
    let content = value
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()?
        .trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_content_reads_the_standard_shape() {
        let value = json!({
            "choices": [
                { "message": { "content": "  The region is competitive.  " } }
            ]
        });
        assert_eq!(
            extract_content(&value).unwrap(),
            "The region is competitive."
        );
    }

    #[test]
    fn extract_content_rejects_odd_shapes() {
        assert!(extract_content(&json!({})).is_none());
        assert!(extract_content(&json!({"choices": []})).is_none());
        assert!(extract_content(&json!({"choices": [{"message": {}}]})).is_none());
        assert!(extract_content(&json!({"choices": [{"message": {"content": "   "}}]})).is_none());
        assert!(extract_content(&json!({"choices": [{"message": {"content": 42}}]})).is_none());
    }
}
