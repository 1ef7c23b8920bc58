use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cli::Framework;
use crate::errors::GenError;

/// ========================================
/// Request/Response wire types
/// ========================================

/// What the user submitted: free-text description plus target framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt_text: String,
    pub framework: Framework,
}

impl GenerationRequest {
    /// Blank prompts are rejected here, before any network I/O happens.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.prompt_text.trim().is_empty() {
            return Err(GenError::EmptyPrompt);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tx {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl Tx {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), timestamp: Utc::now() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub system: String,
    pub user: String,
}

/// The fully assembled request a provider adapter sends, one per transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub schema_version: String,
    pub transaction: Tx,
    pub framework: String,
    pub task: String,
    pub instruction: Instruction,
}

/// Raw model text. Untyped and unbounded; may or may not contain a fenced
/// code block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReply {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompts_are_rejected() {
        for bad in ["", "   ", "\n\t  \n"] {
            let req = GenerationRequest {
                prompt_text: bad.into(),
                framework: Framework::HtmlCss,
            };
            assert!(matches!(req.validate(), Err(GenError::EmptyPrompt)));
        }
    }

    #[test]
    fn non_blank_prompt_passes_validation() {
        let req = GenerationRequest {
            prompt_text: "  a login form  ".into(),
            framework: Framework::HtmlTailwind,
        };
        assert!(req.validate().is_ok());
    }
}
