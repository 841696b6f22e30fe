use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_match_percentage() -> f64 {
    85.0
}

/// A marketplace product that can be ranked against a fusion design
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Discount in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    /// Rated 0 to 5
    pub sustainability_score: f64,
    /// Precomputed visual-similarity baseline standing in for image comparison
    #[serde(default = "default_match_percentage")]
    pub match_percentage: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    /// Marketplace name to product URL
    #[serde(default)]
    pub purchase_links: BTreeMap<String, String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub eco_features: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
}

/// Weighted contribution of each ranking factor
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankingBreakdown {
    pub visual_similarity: f64,
    pub description_match: f64,
    pub sustainability: f64,
}

/// A product scored against one fusion query
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub final_ranking_score: f64,
    pub ranking_breakdown: RankingBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_defaults_from_minimal_json() {
        let product: Product = serde_json::from_value(json!({
            "name": "Linen Kurta",
            "brand": "Loom",
            "price": 49.0,
            "sustainability_score": 4.1
        }))
        .unwrap();

        assert_eq!(product.match_percentage, 85.0);
        assert!(product.colors.is_empty());
        assert!(product.purchase_links.is_empty());
        assert_eq!(product.original_price, None);
    }

    #[test]
    fn test_ranked_product_flattens_product_fields() {
        let product: Product = serde_json::from_value(json!({
            "name": "Linen Kurta",
            "brand": "Loom",
            "price": 49.0,
            "sustainability_score": 4.0
        }))
        .unwrap();
        let ranked = RankedProduct {
            product,
            final_ranking_score: 50.5,
            ranking_breakdown: RankingBreakdown {
                visual_similarity: 42.5,
                description_match: 0.0,
                sustainability: 8.0,
            },
        };

        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["name"], "Linen Kurta");
        assert_eq!(value["final_ranking_score"], 50.5);
        assert_eq!(value["ranking_breakdown"]["sustainability"], 8.0);
    }
}
