//! AI provider abstraction
//!
//! The wardrobe relies on a multimodal model for three things: describing an
//! uploaded garment photo, rendering an image from a prompt, and writing free
//! text such as fusion design briefs. Providers only report failures; the
//! fallback behavior lives in [`Stylist`].
use crate::error::{AppError, AppResult};

pub mod openai;
pub mod stylist;

pub use openai::OpenAiProvider;
pub use stylist::{ProviderStatus, Stylist};

/// Trait for AI providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StyleProvider: Send + Sync {
    /// Short catalog-style description of the garment in an image
    async fn describe_garment(&self, image: &[u8]) -> AppResult<String>;

    /// Renders an image for the prompt and returns its URL
    async fn generate_image(&self, prompt: &str) -> AppResult<String>;

    /// Free-form text completion
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Minimal round trip proving the credentials and quota work
    async fn check_status(&self) -> AppResult<()>;

    /// Provider name for logging and health reporting
    fn name(&self) -> &'static str;
}

/// Provider used when no API key is configured; every call fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineProvider;

impl OfflineProvider {
    fn unavailable<T>() -> AppResult<T> {
        Err(AppError::ExternalApi(
            "AI provider not configured".to_string(),
        ))
    }
}

#[async_trait::async_trait]
impl StyleProvider for OfflineProvider {
    async fn describe_garment(&self, _image: &[u8]) -> AppResult<String> {
        Self::unavailable()
    }

    async fn generate_image(&self, _prompt: &str) -> AppResult<String> {
        Self::unavailable()
    }

    async fn complete(&self, _prompt: &str) -> AppResult<String> {
        Self::unavailable()
    }

    async fn check_status(&self) -> AppResult<()> {
        Self::unavailable()
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}
