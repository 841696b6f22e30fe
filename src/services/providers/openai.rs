//! OpenAI provider
//!
//! Garment descriptions go through the vision-capable chat model with the
//! photo inlined as a base64 data URI, design briefs through the text model,
//! and images through the image-generation endpoint.
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    services::providers::StyleProvider,
};

const GARMENT_PROMPT: &str = "Analyze this clothing item and provide a brief, accurate description. Include the type of clothing, color, material if visible, and style details. Keep it concise and suitable for a wardrobe catalog. Format: '[color] [material] [clothing type] with [style details]'. Example: 'blue cotton dress shirt with long sleeves'";
const GARMENT_MAX_TOKENS: u32 = 100;
const COMPLETION_MAX_TOKENS: u32 = 800;
const STATUS_MAX_TOKENS: u32 = 5;
const IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

/// Model names used for each kind of request
#[derive(Debug, Clone)]
pub struct OpenAiModels {
    pub vision: String,
    pub text: String,
    pub image: String,
}

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    models: OpenAiModels,
}

impl OpenAiProvider {
    pub fn new(api_key: String, api_url: String, models: OpenAiModels) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            models,
        }
    }

    /// Posts a JSON body and returns the decoded response, mapping non-2xx to ExternalApi
    async fn post<T: serde::de::DeserializeOwned>(&self, path: &str, body: Value) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenAI API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn chat(&self, body: Value) -> AppResult<String> {
        let response: ChatResponse = self.post("/v1/chat/completions", body).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::ExternalApi("OpenAI returned an empty completion".to_string()))
    }
}

#[async_trait::async_trait]
impl StyleProvider for OpenAiProvider {
    async fn describe_garment(&self, image: &[u8]) -> AppResult<String> {
        let data_uri = format!("data:image/jpeg;base64,{}", STANDARD.encode(image));

        let description = self
            .chat(json!({
                "model": self.models.vision,
                "max_tokens": GARMENT_MAX_TOKENS,
                "messages": [{
                    "role": "user",
                    "content": [
                        { "type": "text", "text": GARMENT_PROMPT },
                        { "type": "image_url", "image_url": { "url": data_uri } }
                    ]
                }]
            }))
            .await?;

        tracing::info!(description = %description, "Garment described");
        Ok(description)
    }

    async fn generate_image(&self, prompt: &str) -> AppResult<String> {
        let response: ImageResponse = self
            .post(
                "/v1/images/generations",
                json!({
                    "model": self.models.image,
                    "prompt": prompt,
                    "size": IMAGE_SIZE,
                    "quality": "standard",
                    "n": 1
                }),
            )
            .await?;

        let url = response
            .data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or_else(|| AppError::ExternalApi("OpenAI returned no image URL".to_string()))?;

        tracing::info!(url = %url, "Image generated");
        Ok(url)
    }

    async fn complete(&self, prompt: &str) -> AppResult<String> {
        self.chat(json!({
            "model": self.models.text,
            "max_tokens": COMPLETION_MAX_TOKENS,
            "messages": [{ "role": "user", "content": prompt }]
        }))
        .await
    }

    async fn check_status(&self) -> AppResult<()> {
        self.chat(json!({
            "model": self.models.text,
            "max_tokens": STATUS_MAX_TOKENS,
            "messages": [{ "role": "user", "content": "Hello" }]
        }))
        .await
        .map(|_| ())
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
