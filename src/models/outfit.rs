use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendering style for generated outfit images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Realistic,
    Ghibli,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Realistic => "realistic",
            ImageStyle::Ghibli => "ghibli",
        }
    }

    /// Builds the image-generation prompt for an outfit description
    pub fn prompt(&self, style_description: &str) -> String {
        match self {
            ImageStyle::Ghibli => format!(
                "Studio Ghibli anime style illustration of a person wearing: {}. Beautiful anime art style, detailed clothing, soft colors, high quality animation style, masterpiece.",
                style_description
            ),
            ImageStyle::Realistic => format!(
                "Professional fashion photography of a person wearing: {}. Clean white background, good lighting, fashion catalog style, high quality, realistic, professional model.",
                style_description
            ),
        }
    }
}

/// Request to put together an outfit for an event
#[derive(Debug, Clone, Deserialize)]
pub struct OutfitRequest {
    pub event: String,
    pub location: String,
    pub time: String,
    #[serde(default)]
    pub image_type: ImageStyle,
    /// When set, empty wardrobe slots stay empty instead of getting a stock piece
    #[serde(default)]
    pub use_collection_only: bool,
}

/// Position of a piece within an outfit, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutfitSlot {
    Shirt,
    Pants,
    Shoes,
    Watch,
    Accessory,
}

/// A single piece chosen for an outfit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedPiece {
    pub name: String,
    pub image: Option<String>,
    /// `None` for stock pieces that are not in the wardrobe
    pub id: Option<String>,
}

impl SelectedPiece {
    /// A stock piece used when the wardrobe has nothing for a slot
    pub fn stock(name: &str) -> Self {
        Self {
            name: name.to_string(),
            image: None,
            id: None,
        }
    }
}

/// A generated outfit with its rendered image
#[derive(Debug, Clone, Serialize)]
pub struct Outfit {
    pub success: bool,
    pub event: String,
    pub location: String,
    pub time: String,
    pub selected_outfit: BTreeMap<OutfitSlot, SelectedPiece>,
    pub style_description: String,
    pub image_url: String,
    pub image_type: ImageStyle,
    pub generated_at: DateTime<Utc>,
    pub is_demo: bool,
}
