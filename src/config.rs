use serde::Deserialize;

use crate::services::providers::openai::OpenAiModels;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenAI API key; without one every AI call takes its fallback
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Comma-separated list of allowed browser origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,

    /// Start with the demo shirt, jeans and shoes in the wardrobe
    #[serde(default = "default_true")]
    pub seed_sample_collection: bool,

    /// Answer the scripted demo inputs with canned results
    #[serde(default = "default_true")]
    pub demo_fixtures: bool,

    /// JSON file replacing the built-in marketplace products
    #[serde(default)]
    pub marketplace_catalog: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_openai_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_text_model() -> String {
    "gpt-4".to_string()
}

fn default_image_model() -> String {
    "dall-e-3".to_string()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            openai_api_key: None,
            openai_api_url: default_openai_api_url(),
            vision_model: default_vision_model(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            cors_origins: default_cors_origins(),
            seed_sample_collection: true,
            demo_fixtures: true,
            marketplace_catalog: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// The API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn openai_models(&self) -> OpenAiModels {
        OpenAiModels {
            vision: self.vision_model.clone(),
            text: self.text_model.clone(),
            image: self.image_model.clone(),
        }
    }

    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
