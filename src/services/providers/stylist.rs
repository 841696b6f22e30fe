use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::Serialize;

use super::StyleProvider;

/// Descriptions handed out when garment analysis fails
pub const CANNED_GARMENT_DESCRIPTIONS: [&str; 5] = [
    "blue denim jeans with straight fit",
    "white cotton dress shirt with long sleeves",
    "black leather dress shoes with laces",
    "gray wool sweater with crew neck",
    "navy blue blazer with two buttons",
];

const PLACEHOLDER_IMAGE_HOST: &str = "https://mock-ai-image.com";

/// Deterministic stand-in URL for an image that could not be generated
pub fn placeholder_image_url(kind: &str, prompt: &str) -> String {
    let mut hasher = DefaultHasher::new();
    prompt.hash(&mut hasher);
    format!("{}/{}/{:x}.jpg", PLACEHOLDER_IMAGE_HOST, kind, hasher.finish())
}

/// Outcome of a provider status check, with a remedy for known failures
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProviderStatus {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<&'static str>,
    pub vision_available: bool,
    pub dalle_available: bool,
}

impl ProviderStatus {
    fn working() -> Self {
        Self {
            status: "working",
            message: "OpenAI API is working correctly".to_string(),
            error: None,
            solution: None,
            vision_available: true,
            dalle_available: true,
        }
    }

    /// Matches the provider error text against known account problems
    fn failed(error: String) -> Self {
        let (message, solution) = if error.contains("insufficient_quota") {
            (
                "API quota exceeded - need to add credits to OpenAI account".to_string(),
                "Go to https://platform.openai.com/account/billing to add credits",
            )
        } else if error.contains("billing_hard_limit") {
            (
                "Billing limit reached - need to increase billing limit".to_string(),
                "Go to https://platform.openai.com/account/billing to increase limit",
            )
        } else if error.contains("invalid_api_key") {
            (
                "Invalid API key".to_string(),
                "Check your OpenAI API key at https://platform.openai.com/api-keys",
            )
        } else {
            (
                format!("API Error: {}", error),
                "Check OpenAI status at https://status.openai.com/",
            )
        };

        Self {
            status: "error",
            message,
            error: Some(error),
            solution: Some(solution),
            vision_available: false,
            dalle_available: false,
        }
    }
}

/// Fallback boundary around an AI provider
///
/// Garment descriptions fall back to a random canned description, images to
/// a placeholder URL derived from the prompt. Text completions have no
/// generic fallback, so failures surface as `None`.
#[derive(Clone)]
pub struct Stylist {
    provider: Arc<dyn StyleProvider>,
}

impl Stylist {
    pub fn new(provider: Arc<dyn StyleProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn describe_garment(&self, image: &[u8]) -> String {
        match self.provider.describe_garment(image).await {
            Ok(description) => description,
            Err(e) => {
                let fallback = CANNED_GARMENT_DESCRIPTIONS
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or(CANNED_GARMENT_DESCRIPTIONS[0]);
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    fallback,
                    "Garment analysis failed, using canned description"
                );
                fallback.to_string()
            }
        }
    }

    /// Renders `prompt`, labelling any placeholder with `kind`
    pub async fn render(&self, kind: &str, prompt: &str) -> String {
        match self.provider.generate_image(prompt).await {
            Ok(url) => url,
            Err(e) => {
                let fallback = placeholder_image_url(kind, prompt);
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    fallback = %fallback,
                    "Image generation failed, using placeholder"
                );
                fallback
            }
        }
    }

    /// Probes the provider; failures are reported, never raised
    pub async fn status(&self) -> ProviderStatus {
        match self.provider.check_status().await {
            Ok(()) => ProviderStatus::working(),
            Err(e) => {
                tracing::warn!(error = %e, provider = self.provider.name(), "Provider status check failed");
                ProviderStatus::failed(e.to_string())
            }
        }
    }

    pub async fn complete(&self, prompt: &str) -> Option<String> {
        match self.provider.complete(prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    "Text completion failed"
                );
                None
            }
        }
    }
}
