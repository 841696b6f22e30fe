use chrono::{TimeZone, Utc};

use crate::models::{Category, ClothingItem};

const WHITE_SHIRT_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgZmlsbD0iI2Y4ZjhmOCIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMTYiIGZpbGw9IiM2NjYiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGR5PSIuM2VtIj7wn5GVIFdoaXRlIFNoaXJ0PC90ZXh0Pjwvc3ZnPg==";
const BLUE_JEANS_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgZmlsbD0iIzRhNjliZCIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMTYiIGZpbGw9IiNmZmYiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGR5PSIuM2VtIj7wn5GWIEJsdWUgSmVhbnM8L3RleHQ+PC9zdmc+";
const BROWN_SHOES_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCIgZmlsbD0iIzhhNjI0YSIvPjx0ZXh0IHg9IjUwJSIgeT0iNTAlIiBmb250LWZhbWlseT0iQXJpYWwiIGZvbnQtc2l6ZT0iMTYiIGZpbGw9IiNmZmYiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGR5PSIuM2VtIj7wn5GfIEJyb3duIFNob2VzPC90ZXh0Pjwvc3ZnPg==";

fn sample(id: &str, name: &str, image: &str, category: Category) -> ClothingItem {
    ClothingItem {
        id: id.to_string(),
        name: name.to_string(),
        image: image.to_string(),
        category,
        created_at: Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 0, 0)
            .single()
            .unwrap_or_default(),
        is_sample: true,
    }
}

/// Demo wardrobe shown on a fresh start
pub(crate) fn sample_items() -> Vec<ClothingItem> {
    vec![
        sample(
            "sample-shirt-001",
            "White cotton dress shirt with long sleeves",
            WHITE_SHIRT_IMAGE,
            Category::Shirts,
        ),
        sample(
            "sample-pants-001",
            "Blue denim jeans with straight fit",
            BLUE_JEANS_IMAGE,
            Category::Pants,
        ),
        sample(
            "sample-shoes-001",
            "Brown leather casual shoes",
            BROWN_SHOES_IMAGE,
            Category::Shoes,
        ),
    ]
}
