use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured description of a cultural fusion garment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FusionSpec {
    pub fusion_name: String,
    pub detailed_description: String,
    /// Lower-cased aspect (silhouette, construction, ...) to detail
    pub design_specifications: BTreeMap<String, String>,
    pub key_features: Vec<String>,
    pub color_palette: String,
    pub materials: String,
    pub patterns: String,
    pub sustainability_score: f64,
}

/// A fusion design returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct FusionDesign {
    pub success: bool,
    #[serde(flatten)]
    pub spec: FusionSpec,
    pub fusion_image_url: String,
    pub trendy_input: String,
    pub traditional_input: String,
    pub generated_at: DateTime<Utc>,
    pub is_demo: bool,
}
