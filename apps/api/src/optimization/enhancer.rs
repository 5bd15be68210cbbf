//! Text enhancement: the pluggable prose-rewriting capability used by the optimizer.
//!
//! The optimizer holds an `Arc<dyn TextEnhancer>`. Production wires an
//! `LlmEnhancer` wrapped in a `TimedEnhancer`; without an API key the
//! `UnavailableEnhancer` is injected and every call site falls back.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("text enhancement is not configured")]
    Unavailable,

    #[error("text enhancement timed out after {0:?}")]
    Timeout(Duration),

    #[error("text enhancement returned empty output")]
    Empty,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

/// Rewrites prose from a prompt. Implementations may fail; callers never
/// propagate the failure.
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    async fn enhance(&self, prompt: &str) -> Result<String, EnhanceError>;
}

/// Claude-backed enhancer.
pub struct LlmEnhancer(pub LlmClient);

#[async_trait]
impl TextEnhancer for LlmEnhancer {
    async fn enhance(&self, prompt: &str) -> Result<String, EnhanceError> {
        Ok(self.0.call_text(prompt, PLAIN_TEXT_SYSTEM).await?)
    }
}

/// Always fails, forcing the deterministic fallback at every call site.
pub struct UnavailableEnhancer;

#[async_trait]
impl TextEnhancer for UnavailableEnhancer {
    async fn enhance(&self, _prompt: &str) -> Result<String, EnhanceError> {
        Err(EnhanceError::Unavailable)
    }
}

/// Bounds every call of the inner enhancer; an elapsed timeout is a failure.
pub struct TimedEnhancer<E> {
    inner: E,
    timeout: Duration,
}

impl<E: TextEnhancer> TimedEnhancer<E> {
    pub fn new(inner: E, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<E: TextEnhancer> TextEnhancer for TimedEnhancer<E> {
    async fn enhance(&self, prompt: &str) -> Result<String, EnhanceError> {
        tokio::time::timeout(self.timeout, self.inner.enhance(prompt))
            .await
            .map_err(|_| EnhanceError::Timeout(self.timeout))?
    }
}

/// Runs the enhancer and returns its output, or `fallback()` when it fails
/// or returns blank text. `what` names the field in logs.
pub async fn enhance_or_else<F>(
    enhancer: &dyn TextEnhancer,
    prompt: &str,
    what: &str,
    fallback: F,
) -> String
where
    F: FnOnce() -> String,
{
    let result = match enhancer.enhance(prompt).await {
        Ok(text) if text.trim().is_empty() => Err(EnhanceError::Empty),
        other => other,
    };
    match result {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Enhancement of {what} failed, using fallback: {e}");
            fallback()
        }
    }
}
