//! The generation pipeline: validate → call the provider once → extract →
//! commit. Failures leave the store exactly as it was.

use crate::artifact::{ArtifactStore, UiState};
use crate::config::Config;
use crate::errors::GenError;
use crate::extract::extract;
use crate::prompt;
use crate::provider::Provider;
use crate::wire::{GenerationRequest, ModelReply, PromptRequest};

/// Everything a completed cycle produced, handed back for logging/display.
#[derive(Debug)]
pub struct Generation {
    pub request: PromptRequest,
    pub reply: ModelReply,
    pub html: String,
}

pub async fn run_generation(
    req: &GenerationRequest,
    provider: &dyn Provider,
    store: &mut ArtifactStore,
    ui: &mut UiState,
    cfg: &Config,
    debug: bool,
) -> Result<Generation, GenError> {
    // Reject blank prompts before any network I/O.
    req.validate()?;

    let prompt_req = prompt::build_request(req, cfg);
    let ticket = store.begin();
    let _loading = ui.begin_loading();

    let reply = provider
        .send(&prompt_req, debug)
        .await
        .map_err(|e| GenError::Provider(e.to_string()))?;

    let html = extract(&reply.text);
    if store.commit(ticket, html.clone()) {
        ui.output_visible = true;
    }

    Ok(Generation { request: prompt_req, reply, html })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Framework;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        reply: Result<String, String>,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn replying(text: &str) -> Self {
            Self { reply: Ok(text.into()), calls: AtomicUsize::new(0) }
        }

        fn failing(msg: &str) -> Self {
            Self { reply: Err(msg.into()), calls: AtomicUsize::new(0) }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Provider for FakeProvider {
        async fn send(&self, _req: &PromptRequest, _debug: bool) -> Result<ModelReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(ModelReply { text: text.clone() }),
                Err(msg) => Err(anyhow!("{msg}")),
            }
        }
    }

    fn request(text: &str) -> GenerationRequest {
        GenerationRequest { prompt_text: text.into(), framework: Framework::HtmlCss }
    }

    #[tokio::test]
    async fn blank_prompt_never_reaches_the_provider() {
        let provider = FakeProvider::replying("unused");
        let mut store = ArtifactStore::new();
        let mut ui = UiState::default();

        let err = run_generation(&request("   "), &provider, &mut store, &mut ui, &Config::default(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, GenError::EmptyPrompt));
        assert_eq!(provider.call_count(), 0);
        assert_eq!(store.get(), None);
        assert!(!ui.is_loading());
        assert!(!ui.output_visible);
    }

    #[tokio::test]
    async fn success_stores_exactly_the_extracted_text() {
        let provider =
            FakeProvider::replying("Sure!\n```html\n<div>Hi</div>\n```\nAnything else?");
        let mut store = ArtifactStore::new();
        let mut ui = UiState::default();

        let gen = run_generation(&request("a greeting"), &provider, &mut store, &mut ui, &Config::default(), false)
            .await
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(gen.html, "<div>Hi</div>");
        assert_eq!(store.get(), Some("<div>Hi</div>"));
        assert!(ui.output_visible);
        assert!(!ui.is_loading());
    }

    #[tokio::test]
    async fn reply_without_fences_is_kept_whole() {
        let provider = FakeProvider::replying("  <p>bare</p>  ");
        let mut store = ArtifactStore::new();
        let mut ui = UiState::default();

        run_generation(&request("x"), &provider, &mut store, &mut ui, &Config::default(), false)
            .await
            .unwrap();

        assert_eq!(store.get(), Some("<p>bare</p>"));
    }

    #[tokio::test]
    async fn provider_failure_preserves_previous_artifact() {
        let provider = FakeProvider::failing("boom");
        let mut store = ArtifactStore::new();
        store.set("<p>previous</p>".into());
        let mut ui = UiState::default();

        let err = run_generation(&request("a table"), &provider, &mut store, &mut ui, &Config::default(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, GenError::Provider(_)));
        assert_eq!(provider.call_count(), 1);
        assert_eq!(store.get(), Some("<p>previous</p>"));
        assert!(!ui.is_loading());
        assert!(!ui.output_visible);
    }

    #[tokio::test]
    async fn superseded_generation_cannot_clobber_newer_artifact() {
        let slow = FakeProvider::replying("```\n<p>stale</p>\n```");
        let fast = FakeProvider::replying("```\n<p>fresh</p>\n```");
        let mut store = ArtifactStore::new();
        let mut ui = UiState::default();

        // A second cycle starts before the first commits.
        let slow_ticket = store.begin();
        run_generation(&request("x"), &fast, &mut store, &mut ui, &Config::default(), false)
            .await
            .unwrap();
        let slow_reply = slow.send(&prompt::build_request(&request("x"), &Config::default()), false)
            .await
            .unwrap();
        assert!(!store.commit(slow_ticket, extract(&slow_reply.text)));

        assert_eq!(store.get(), Some("<p>fresh</p>"));
    }
}
