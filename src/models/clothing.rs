use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

/// Raised when a category name is not one of the fixed wardrobe categories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid category: {0}")]
pub struct InvalidCategory(pub String);

/// Fixed set of wardrobe categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shirts,
    Pants,
    Shoes,
    Socks,
    Watches,
    Accessories,
    Others,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Shirts,
        Category::Pants,
        Category::Shoes,
        Category::Socks,
        Category::Watches,
        Category::Accessories,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shirts => "shirts",
            Category::Pants => "pants",
            Category::Shoes => "shoes",
            Category::Socks => "socks",
            Category::Watches => "watches",
            Category::Accessories => "accessories",
            Category::Others => "others",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    /// Category names are matched exactly; "Shirts" is not "shirts"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}

/// A garment stored in the wardrobe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    /// Unique across the whole wardrobe, not only within the category
    pub id: String,
    pub name: String,
    /// Base64 payload or data URI of the uploaded photo
    pub image: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    /// Marks items seeded at startup for the demo
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_sample: bool,
}

impl ClothingItem {
    /// Creates a new item with a fresh identifier
    pub fn new(name: String, image: String, category: Category) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            image,
            category,
            created_at: Utc::now(),
            is_sample: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "hats".parse::<Category>().unwrap_err();
        assert_eq!(err, InvalidCategory("hats".to_string()));
        assert_eq!(err.to_string(), "Invalid category: hats");
    }

    #[test]
    fn test_category_parse_is_case_sensitive() {
        assert!("Shirts".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Accessories).unwrap();
        assert_eq!(json, "\"accessories\"");
    }

    #[test]
    fn test_new_item_gets_fresh_id() {
        let a = ClothingItem::new("Red scarf".to_string(), String::new(), Category::Accessories);
        let b = ClothingItem::new("Red scarf".to_string(), String::new(), Category::Accessories);
        assert_ne!(a.id, b.id);
        assert!(!a.is_sample);
    }

    #[test]
    fn test_sample_flag_skipped_when_false() {
        let item = ClothingItem::new("Grey socks".to_string(), String::new(), Category::Socks);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("is_sample").is_none());
        assert_eq!(json["category"], "socks");
    }
}
