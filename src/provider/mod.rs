use anyhow::Result;
use async_trait::async_trait;

use crate::cli::ProviderKind;
use crate::wire::{ModelReply, PromptRequest};

pub mod anthropic;
pub mod ollama;
pub mod openai;

/// One text-generation call per user-initiated generation. No retry.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn send(&self, req: &PromptRequest, debug: bool) -> Result<ModelReply>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(
    kind: ProviderKind,
    model: String,
    timeout_secs: u64,
    ollama_url: Option<String>,
    anthropic_api_base: String,
) -> Result<DynProvider> {
    match kind {
        ProviderKind::OpenAI => Ok(Box::new(openai::OpenAIProvider::new(model, timeout_secs))),
        ProviderKind::Anthropic => Ok(Box::new(anthropic::Anthropic::new(
            model,
            timeout_secs,
            anthropic_api_base,
        ))),
        ProviderKind::Ollama => Ok(Box::new(ollama::Ollama::new(
            model,
            timeout_secs,
            ollama_url.unwrap_or_else(|| "http://localhost:11434".into()),
        ))),
    }
}
