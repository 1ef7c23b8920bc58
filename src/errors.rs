use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("describe your component before generating")] EmptyPrompt,
    #[error("provider error: {0}")] Provider(String),
    #[error("clipboard error: {0}")] Clipboard(String),
    #[error("delivery failed: {0}")] Deliver(String),
}
