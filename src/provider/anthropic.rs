use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::wire::{ModelReply, PromptRequest};

pub struct Anthropic {
    model: String,
    timeout: Duration,
    api_base: String,
    api_version: String,
}

impl Anthropic {
    pub fn new(model: String, timeout_secs: u64, api_base: String) -> Self {
        Self {
            model,
            timeout: Duration::from_secs(timeout_secs),
            api_base,
            api_version: "2023-06-01".into(),
        }
    }
}

#[derive(Serialize)]
struct MsgRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Msg<'a>>,
    system: &'a str,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MsgResponse {
    content: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(default)]
    text: String,
    #[serde(default)]
    r#type: String,
}

#[async_trait]
impl Provider for Anthropic {
    async fn send(&self, req: &PromptRequest, debug: bool) -> Result<ModelReply> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow!("ANTHROPIC_API_KEY env var is not set"))?;

        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        let client = Client::builder().timeout(self.timeout).build()?;
        let body = MsgRequest {
            model: &self.model,
            max_tokens: 4096,
            messages: vec![Msg { role: "user", content: &req.instruction.user }],
            system: &req.instruction.system,
        };

        if debug {
            eprintln!("debug/anthropic: POST {}", url);
        }

        let resp = client
            .post(&url)
            .header("x-api-key", &api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .context("anthropic request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("anthropic read body failed")?;
        if debug {
            eprintln!("debug/anthropic: raw body:\n{}\n", text);
        }

        if !status.is_success() {
            return Err(anyhow!("Anthropic API error ({}): {}", status, text));
        }

        let parsed: MsgResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("anthropic response parse error: {}", e))?;

        let content = parsed
            .content
            .into_iter()
            .find(|b| b.r#type == "text" || !b.text.is_empty())
            .map(|b| b.text)
            .ok_or_else(|| anyhow!("anthropic: empty content"))?;

        Ok(ModelReply { text: content })
    }
}
