use std::collections::BTreeMap;

use chrono::Utc;
use rand::{seq::SliceRandom, Rng};

use crate::{
    models::{Category, ClothingItem, Outfit, OutfitRequest, OutfitSlot, SelectedPiece},
    services::{
        catalog::{Catalog, CatalogStore},
        fixtures::FixtureResolver,
        providers::Stylist,
    },
};

/// Wardrobe category each slot draws from, and the stock piece used when the
/// category is empty. Accessories have no stock piece.
const SLOTS: [(OutfitSlot, Category, Option<&str>); 5] = [
    (OutfitSlot::Shirt, Category::Shirts, Some("white dress shirt")),
    (OutfitSlot::Pants, Category::Pants, Some("black dress pants")),
    (OutfitSlot::Shoes, Category::Shoes, Some("black dress shoes")),
    (OutfitSlot::Watch, Category::Watches, Some("silver watch")),
    (OutfitSlot::Accessory, Category::Accessories, None),
];

impl From<&ClothingItem> for SelectedPiece {
    fn from(item: &ClothingItem) -> Self {
        Self {
            name: item.name.clone(),
            image: Some(item.image.clone()),
            id: Some(item.id.clone()),
        }
    }
}

/// Picks one random wardrobe item per slot
pub fn select_pieces<R: Rng + ?Sized>(
    catalog: &Catalog,
    use_collection_only: bool,
    rng: &mut R,
) -> BTreeMap<OutfitSlot, SelectedPiece> {
    let mut selected = BTreeMap::new();

    for (slot, category, stock) in SLOTS {
        let piece = match catalog.items(category).choose(rng) {
            Some(item) => Some(SelectedPiece::from(item)),
            None if !use_collection_only => stock.map(SelectedPiece::stock),
            None => None,
        };
        if let Some(piece) = piece {
            selected.insert(slot, piece);
        }
    }

    selected
}

/// Text used both for the response and as the image prompt subject
pub fn describe_outfit(
    request: &OutfitRequest,
    pieces: &BTreeMap<OutfitSlot, SelectedPiece>,
) -> String {
    let names: Vec<&str> = pieces
        .values()
        .map(|piece| piece.name.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    format!(
        "Outfit for a {} at {} at {}. The outfit includes: {}. Event: {}.",
        request.event,
        request.location,
        request.time,
        names.join(", "),
        request.event
    )
}

/// Generates an outfit for an event
///
/// Demo fixtures win when they match. Otherwise pieces are drawn from the
/// wardrobe and the outfit is rendered in the requested image style.
pub async fn generate_outfit(
    catalog: &CatalogStore,
    stylist: &Stylist,
    fixtures: &dyn FixtureResolver,
    request: OutfitRequest,
) -> Outfit {
    if let Some(outfit) = fixtures.resolve_outfit(&request) {
        tracing::info!(event = %request.event, "Using demo outfit fixture");
        return outfit;
    }

    let selected_outfit = {
        let catalog = catalog.lock().await;
        select_pieces(&catalog, request.use_collection_only, &mut rand::thread_rng())
    };

    let style_description = describe_outfit(&request, &selected_outfit);
    let image_url = stylist
        .render(
            request.image_type.as_str(),
            &request.image_type.prompt(&style_description),
        )
        .await;

    tracing::info!(
        event = %request.event,
        pieces = selected_outfit.len(),
        "Outfit generated"
    );

    Outfit {
        success: true,
        event: request.event,
        location: request.location,
        time: request.time,
        selected_outfit,
        style_description,
        image_url,
        image_type: request.image_type,
        generated_at: Utc::now(),
        is_demo: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageStyle;
    use crate::services::fixtures::{DemoFixtures, NoFixtures};
    use crate::services::providers::MockStyleProvider;
    use rand::{rngs::StdRng, SeedableRng};
    use std::sync::Arc;

    fn request(use_collection_only: bool) -> OutfitRequest {
        OutfitRequest {
            event: "book launch".to_string(),
            location: "City Library".to_string(),
            time: "6:00 PM".to_string(),
            image_type: ImageStyle::Realistic,
            use_collection_only,
        }
    }

    fn stylist_returning(url: &'static str) -> Stylist {
        let mut provider = MockStyleProvider::new();
        provider
            .expect_generate_image()
            .returning(move |_| Ok(url.to_string()));
        provider.expect_name().return_const("mock");
        Stylist::new(Arc::new(provider))
    }

    #[test]
    fn test_empty_wardrobe_uses_stock_pieces() {
        let catalog = Catalog::new();
        let pieces = select_pieces(&catalog, false, &mut StdRng::seed_from_u64(7));

        assert_eq!(pieces.len(), 4);
        assert_eq!(pieces[&OutfitSlot::Shirt].name, "white dress shirt");
        assert_eq!(pieces[&OutfitSlot::Watch].name, "silver watch");
        assert!(pieces[&OutfitSlot::Shoes].id.is_none());
        assert!(!pieces.contains_key(&OutfitSlot::Accessory));
    }

    #[test]
    fn test_collection_only_leaves_gaps() {
        let catalog = Catalog::with_samples();
        let pieces = select_pieces(&catalog, true, &mut StdRng::seed_from_u64(7));

        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[&OutfitSlot::Shirt].id.as_deref(), Some("sample-shirt-001"));
        assert!(!pieces.contains_key(&OutfitSlot::Watch));
    }

    #[test]
    fn test_selection_comes_from_category() {
        let mut catalog = Catalog::new();
        for name in ["Gold watch", "Steel watch", "Smart watch"] {
            catalog.add(String::new(), name.to_string(), None).unwrap();
        }
        let ids: Vec<String> = catalog
            .items(Category::Watches)
            .iter()
            .map(|item| item.id.clone())
            .collect();

        let pieces = select_pieces(&catalog, true, &mut StdRng::seed_from_u64(42));
        let chosen = pieces[&OutfitSlot::Watch].id.clone().unwrap();
        assert!(ids.contains(&chosen));
    }

    #[test]
    fn test_describe_outfit() {
        let mut pieces = BTreeMap::new();
        pieces.insert(OutfitSlot::Pants, SelectedPiece::stock("black dress pants"));
        pieces.insert(OutfitSlot::Shirt, SelectedPiece::stock("white dress shirt"));

        assert_eq!(
            describe_outfit(&request(false), &pieces),
            "Outfit for a book launch at City Library at 6:00 PM. The outfit includes: white dress shirt, black dress pants. Event: book launch."
        );
    }

    #[tokio::test]
    async fn test_generate_outfit_renders_image() {
        let store = CatalogStore::new(Catalog::with_samples());
        let stylist = stylist_returning("https://img.example/outfit.png");

        let outfit = generate_outfit(&store, &stylist, &NoFixtures, request(false)).await;

        assert!(outfit.success);
        assert!(!outfit.is_demo);
        assert_eq!(outfit.image_url, "https://img.example/outfit.png");
        assert_eq!(outfit.selected_outfit[&OutfitSlot::Pants].name, "Blue denim jeans with straight fit");
        assert!(outfit.style_description.contains("silver watch"));
    }

    #[tokio::test]
    async fn test_generate_outfit_prefers_fixture() {
        let store = CatalogStore::new(Catalog::new());
        // No expectations: the provider must not be called
        let mut provider = MockStyleProvider::new();
        provider.expect_name().return_const("mock");
        let stylist = Stylist::new(Arc::new(provider));

        let wedding = OutfitRequest {
            event: "wedding".to_string(),
            location: "Marriott".to_string(),
            ..request(false)
        };
        let outfit = generate_outfit(&store, &stylist, &DemoFixtures, wedding).await;
        assert!(outfit.is_demo);
    }
}
