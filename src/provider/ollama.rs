use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::wire::{Instruction, ModelReply, PromptRequest};

pub struct Ollama {
    model: String,
    url: String,
    timeout: Duration,
}

impl Ollama {
    pub fn new(model: String, timeout_secs: u64, url: String) -> Self {
        Self {
            model,
            url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Msg>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Serialize)]
struct Msg {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: String,
}

fn to_messages(ins: &Instruction) -> Vec<Msg> {
    vec![
        Msg { role: "system".into(), content: ins.system.clone() },
        Msg { role: "user".into(), content: ins.user.clone() },
    ]
}

#[async_trait]
impl Provider for Ollama {
    async fn send(&self, req: &PromptRequest, debug: bool) -> Result<ModelReply> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let client = Client::builder().timeout(self.timeout).build()?;
        let body = ChatRequest {
            model: &self.model,
            messages: to_messages(&req.instruction),
            stream: false,
            options: OllamaOptions { temperature: 0.2 },
        };

        if debug {
            eprintln!("debug/ollama: POST {}", url);
        }

        let resp = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("ollama request failed. Make sure Ollama is running with: ollama serve")?;

        let status = resp.status();
        let text = resp.text().await.context("ollama read body failed")?;

        if debug {
            eprintln!("debug/ollama: raw body:\n{}\n", text);
        }

        if !status.is_success() {
            return Err(anyhow!("Ollama API error ({}): {}", status, text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("failed to parse Ollama response: {}.\nBody was:\n{}", e, text))?;

        Ok(ModelReply { text: parsed.message.content })
    }
}
