use serde_json::{Map, Value};

use super::RankerError;
use crate::models::Product;

/// User-supplied narrowing of the candidate list
///
/// Every field is optional; an absent filter lets all products through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketplaceFilters {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_sustainability: Option<f64>,
    /// Only applied when non-empty
    pub brands: Vec<String>,
    /// Only applied when non-empty; a product passes if it has any of them
    pub colors: Vec<String>,
}

impl MarketplaceFilters {
    /// Parses filters from a loosely-typed JSON object
    ///
    /// `null` and `{}` mean "no filters". Unknown keys are ignored. Numeric
    /// bounds accept JSON numbers or numeric strings; anything else fails
    /// with [`RankerError::InvalidFilter`].
    pub fn from_value(value: &Value) -> Result<Self, RankerError> {
        let object = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(object) => object,
            other => {
                return Err(RankerError::InvalidFilter {
                    field: "filters".to_string(),
                    reason: format!("expected an object, got {}", other),
                })
            }
        };

        Ok(Self {
            min_price: number(object, "min_price")?,
            max_price: number(object, "max_price")?,
            min_sustainability: number(object, "min_sustainability")?,
            brands: strings(object, "brands")?,
            colors: strings(object, "colors")?,
        })
    }

    /// Whether a product passes every present filter
    pub fn matches(&self, product: &Product) -> bool {
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self
            .min_sustainability
            .is_some_and(|min| product.sustainability_score < min)
        {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }
        if !self.colors.is_empty() && !self.colors.iter().any(|c| product.colors.contains(c)) {
            return false;
        }
        true
    }
}

fn number(object: &Map<String, Value>, field: &str) -> Result<Option<f64>, RankerError> {
    let parsed = match object.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(RankerError::InvalidFilter {
            field: field.to_string(),
            reason: format!("expected a number, got {}", object[field]),
        }),
    }
}

fn strings(object: &Map<String, Value>, field: &str) -> Result<Vec<String>, RankerError> {
    let invalid = || RankerError::InvalidFilter {
        field: field.to_string(),
        reason: "expected a list of strings".to_string(),
    };

    match object.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
            .collect(),
        Some(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(brand: &str, price: f64, sustainability: f64, colors: &[&str]) -> Product {
        serde_json::from_value(json!({
            "name": "Test product",
            "brand": brand,
            "price": price,
            "sustainability_score": sustainability,
            "colors": colors,
        }))
        .unwrap()
    }

    #[test]
    fn test_null_and_empty_mean_no_filters() {
        assert_eq!(MarketplaceFilters::from_value(&Value::Null).unwrap(), MarketplaceFilters::default());
        assert_eq!(MarketplaceFilters::from_value(&json!({})).unwrap(), MarketplaceFilters::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let filters = MarketplaceFilters::from_value(&json!({
            "min_price": 50,
            "max_price": "150.5",
            "min_sustainability": 4.2,
            "brands": ["EcoLux Designs"],
            "colors": ["Forest Green", "Indigo"],
            "sizes": ["M"]
        }))
        .unwrap();

        assert_eq!(filters.min_price, Some(50.0));
        assert_eq!(filters.max_price, Some(150.5));
        assert_eq!(filters.min_sustainability, Some(4.2));
        assert_eq!(filters.brands, vec!["EcoLux Designs"]);
        assert_eq!(filters.colors.len(), 2);
    }

    #[test]
    fn test_non_numeric_bound_is_invalid() {
        let err = MarketplaceFilters::from_value(&json!({ "min_price": "cheap" })).unwrap_err();
        assert!(matches!(err, RankerError::InvalidFilter { ref field, .. } if field == "min_price"));

        let err = MarketplaceFilters::from_value(&json!({ "max_price": [10] })).unwrap_err();
        assert!(matches!(err, RankerError::InvalidFilter { ref field, .. } if field == "max_price"));

        let err = MarketplaceFilters::from_value(&json!({ "min_sustainability": "NaN" })).unwrap_err();
        assert!(matches!(err, RankerError::InvalidFilter { .. }));
    }

    #[test]
    fn test_malformed_lists_are_invalid() {
        assert!(MarketplaceFilters::from_value(&json!({ "brands": "EcoLux" })).is_err());
        assert!(MarketplaceFilters::from_value(&json!({ "colors": [1, 2] })).is_err());
    }

    #[test]
    fn test_non_object_is_invalid() {
        let err = MarketplaceFilters::from_value(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, RankerError::InvalidFilter { ref field, .. } if field == "filters"));
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let filters = MarketplaceFilters {
            min_price: Some(100.0),
            max_price: Some(200.0),
            ..Default::default()
        };
        assert!(filters.matches(&product("A", 100.0, 4.0, &[])));
        assert!(filters.matches(&product("A", 200.0, 4.0, &[])));
        assert!(!filters.matches(&product("A", 99.99, 4.0, &[])));
        assert!(!filters.matches(&product("A", 200.01, 4.0, &[])));
    }

    #[test]
    fn test_sustainability_brand_and_color_filters() {
        let filters = MarketplaceFilters {
            min_sustainability: Some(4.5),
            brands: vec!["Loom".to_string()],
            colors: vec!["Indigo".to_string()],
            ..Default::default()
        };
        assert!(filters.matches(&product("Loom", 10.0, 4.5, &["Indigo", "White"])));
        assert!(!filters.matches(&product("Loom", 10.0, 4.4, &["Indigo"])));
        assert!(!filters.matches(&product("Other", 10.0, 4.9, &["Indigo"])));
        assert!(!filters.matches(&product("Loom", 10.0, 4.9, &["White"])));
    }

    #[test]
    fn test_empty_lists_are_no_ops() {
        let filters = MarketplaceFilters::default();
        assert!(filters.matches(&product("Anyone", 1.0, 0.0, &[])));
    }
}
