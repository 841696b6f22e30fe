use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::{
    models::{
        Category, FusionDesign, FusionSpec, ImageStyle, Outfit, OutfitRequest, OutfitSlot, Product,
        SelectedPiece,
    },
    services::{catalog::sample_items, marketplace::builtin_candidates},
};

/// Supplies canned results for recognised demo inputs
///
/// Consulted before the real outfit and fusion pipelines; returning `None`
/// lets the request continue normally.
pub trait FixtureResolver: Send + Sync {
    fn resolve_outfit(&self, request: &OutfitRequest) -> Option<Outfit>;

    fn resolve_fusion(&self, trendy: &str, traditional: &str) -> Option<FusionDesign>;

    /// Reference data behind the demo scenarios, `None` when demos are off
    fn demo_data(&self) -> Option<DemoData>;
}

/// Resolver that never matches
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFixtures;

impl FixtureResolver for NoFixtures {
    fn resolve_outfit(&self, _request: &OutfitRequest) -> Option<Outfit> {
        None
    }

    fn resolve_fusion(&self, _trendy: &str, _traditional: &str) -> Option<FusionDesign> {
        None
    }

    fn demo_data(&self) -> Option<DemoData> {
        None
    }
}

/// The scripted demo scenarios
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoFixtures;

struct OutfitFixture {
    key: &'static str,
    pieces: [(OutfitSlot, &'static str, &'static str); 3],
    description: &'static str,
    image_url: &'static str,
}

const WEDDING: OutfitFixture = OutfitFixture {
    key: "wedding_formal",
    pieces: [
        (OutfitSlot::Shirt, "White Cotton Dress Shirt", "demo_shirt_1"),
        (OutfitSlot::Pants, "Black Dress Pants", "demo_pants_1"),
        (OutfitSlot::Shoes, "Brown Leather Shoes", "demo_shoes_1"),
    ],
    description: "Formal wedding outfit with white shirt, black pants, brown shoes",
    image_url: "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=800&q=80",
};

const CASUAL_MEETUP: OutfitFixture = OutfitFixture {
    key: "casual_meetup",
    pieces: [
        (OutfitSlot::Shirt, "Blue Casual Shirt", "demo_shirt_2"),
        (OutfitSlot::Pants, "Blue Denim Jeans", "demo_pants_2"),
        (OutfitSlot::Shoes, "Brown Leather Shoes", "demo_shoes_1"),
    ],
    description: "Casual meetup outfit with white shirt, jeans, brown shoes",
    image_url: "https://raw.githubusercontent.com/KRISHTHICK/SAI-demo-photos/main/Gemini_Generated_Image_5yzpsl5yzpsl5yzp.png",
};

struct FusionFixture {
    key: &'static str,
    trendy: &'static [&'static str],
    traditional: &'static [&'static str],
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    silhouette: &'static str,
    construction: &'static str,
    functionality: &'static str,
    key_features: [&'static str; 5],
    color_palette: &'static str,
    materials: &'static str,
    patterns: &'static str,
    sustainability_score: f64,
}

const FUSION_FIXTURES: [FusionFixture; 2] = [
    FusionFixture {
        key: "shrewani_dosti",
        trendy: &["shrewani", "sherwani"],
        traditional: &["dosti", "traditional"],
        name: "Urban dosti Fusion",
        description: "Modern shrewani elements combined with traditional dosti aesthetics",
        image_url: "https://raw.githubusercontent.com/KRISHTHICK/SAI-demo-photos/main/Gemini_Generated_Image_1mwlwy1mwlwy1mwl.png",
        silhouette: "Modern shrewani fit with traditional dosti elements",
        construction: "Machine stitching with traditional hand-finished details",
        functionality: "Formal elegance with cultural heritage",
        key_features: [
            "Shrewani collar design",
            "Traditional dosti patterns",
            "Cultural embroidery",
            "Modern tailoring",
            "Formal functionality",
        ],
        color_palette: "Rich traditional colors with modern accents",
        materials: "Premium cotton blend with traditional Indian textiles",
        patterns: "Traditional Indian motifs with contemporary styling",
        sustainability_score: 4.7,
    },
    FusionFixture {
        key: "minimalist_sari",
        trendy: &["minimalist", "clean"],
        traditional: &["sari", "indian"],
        name: "Contemporary Sari Fusion",
        description: "Minimalist design principles merged with traditional sari draping",
        image_url: "https://images.unsplash.com/photo-1610030469983-98e550d6193c?w=800&q=80",
        silhouette: "Clean minimalist lines with sari-inspired draping",
        construction: "Precision tailoring with traditional draping techniques",
        functionality: "Contemporary elegance with cultural heritage",
        key_features: [
            "Minimalist design",
            "Sari draping elements",
            "Clean lines",
            "Cultural patterns",
            "Modern functionality",
        ],
        color_palette: "Neutral minimalist tones with traditional Indian colors",
        materials: "Sustainable silk blends with organic cotton",
        patterns: "Subtle traditional motifs on minimalist base",
        sustainability_score: 4.7,
    },
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

impl DemoFixtures {
    fn outfit(request: &OutfitRequest, fixture: &OutfitFixture) -> Outfit {
        let selected_outfit: BTreeMap<OutfitSlot, SelectedPiece> = fixture
            .pieces
            .iter()
            .map(|(slot, name, id)| {
                (
                    *slot,
                    SelectedPiece {
                        name: name.to_string(),
                        image: None,
                        id: Some(id.to_string()),
                    },
                )
            })
            .collect();

        Outfit {
            success: true,
            event: request.event.clone(),
            location: request.location.clone(),
            time: request.time.clone(),
            selected_outfit,
            style_description: fixture.description.to_string(),
            image_url: fixture.image_url.to_string(),
            image_type: request.image_type,
            generated_at: Utc::now(),
            is_demo: true,
        }
    }

    fn fusion(fixture: &FusionFixture, trendy: &str, traditional: &str) -> FusionDesign {
        let design_specifications = [
            ("silhouette", fixture.silhouette),
            ("construction", fixture.construction),
            ("functionality", fixture.functionality),
        ]
        .into_iter()
        .map(|(aspect, detail)| (aspect.to_string(), detail.to_string()))
        .collect();

        FusionDesign {
            success: true,
            spec: FusionSpec {
                fusion_name: fixture.name.to_string(),
                detailed_description: fixture.description.to_string(),
                design_specifications,
                key_features: fixture.key_features.iter().map(|f| f.to_string()).collect(),
                color_palette: fixture.color_palette.to_string(),
                materials: fixture.materials.to_string(),
                patterns: fixture.patterns.to_string(),
                sustainability_score: fixture.sustainability_score,
            },
            fusion_image_url: fixture.image_url.to_string(),
            trendy_input: trendy.to_string(),
            traditional_input: traditional.to_string(),
            generated_at: Utc::now(),
            is_demo: true,
        }
    }
}

impl FixtureResolver for DemoFixtures {
    fn resolve_outfit(&self, request: &OutfitRequest) -> Option<Outfit> {
        let event = request.event.to_lowercase();
        let location = request.location.to_lowercase();

        if event.contains("wedding") && location.contains("marriott") {
            return Some(Self::outfit(request, &WEDDING));
        }
        if (event.contains("meetup") || location.contains("coffee")) && request.time.contains("10") {
            return Some(Self::outfit(request, &CASUAL_MEETUP));
        }
        None
    }

    fn resolve_fusion(&self, trendy: &str, traditional: &str) -> Option<FusionDesign> {
        let trendy_lower = trendy.to_lowercase();
        let traditional_lower = traditional.to_lowercase();

        FUSION_FIXTURES
            .iter()
            .find(|fixture| {
                contains_any(&trendy_lower, fixture.trendy)
                    && contains_any(&traditional_lower, fixture.traditional)
            })
            .map(|fixture| Self::fusion(fixture, trendy, traditional))
    }

    fn demo_data(&self) -> Option<DemoData> {
        Some(DemoData::build())
    }
}

// Demo reference data

const DEMO_PHOTOS: &str = "https://raw.githubusercontent.com/KRISHTHICK/SAI-demo-photos/main";

/// Stock photos matching the sample wardrobe
pub const SAMPLE_IMAGE_URLS: [(&str, &str); 4] = [
    ("white_shirt", "https://images.unsplash.com/photo-1602810318383-e386cc2a3ccf?w=400&q=80"),
    ("blue_jeans", "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400&q=80"),
    ("brown_shoes", "https://images.unsplash.com/photo-1533867617858-e7b97e060509?w=400&q=80"),
    ("outfit_result", "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=800&q=80"),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemoUser {
    pub name: &'static str,
    pub email: &'static str,
    pub avatar: &'static str,
}

/// A garment photographed for the demo; `image_url` is `None` until uploaded
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemoGarment {
    pub name: &'static str,
    pub image_url: Option<String>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemoOutfitResult {
    pub image_url: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemoStyle {
    pub image_url: Option<String>,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DemoFusionResult {
    pub image_url: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// A scripted walkthrough and the fixture it should produce
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DemoScenario {
    Outfit {
        event: &'static str,
        location: &'static str,
        time: &'static str,
        expected_result: &'static str,
    },
    Fusion {
        trendy_style: &'static str,
        traditional_style: &'static str,
        expected_result: &'static str,
    },
}

/// Everything the demo endpoints serve
#[derive(Debug, Clone, Serialize)]
pub struct DemoData {
    pub user: DemoUser,
    pub clothing_collection: BTreeMap<Category, Vec<DemoGarment>>,
    pub outfit_results: BTreeMap<&'static str, DemoOutfitResult>,
    pub trendy_styles: BTreeMap<&'static str, DemoStyle>,
    pub traditional_styles: BTreeMap<&'static str, DemoStyle>,
    pub fusion_results: BTreeMap<&'static str, DemoFusionResult>,
    pub marketplace: Vec<Product>,
    pub scenarios: BTreeMap<&'static str, DemoScenario>,
}

fn demo_photo(file: &str) -> Option<String> {
    Some(format!("{}/{}", DEMO_PHOTOS, file))
}

fn garment(name: &'static str, photo: Option<&str>, description: &'static str) -> DemoGarment {
    DemoGarment {
        name,
        image_url: photo.and_then(demo_photo),
        description,
    }
}

fn style(photo: Option<&str>, description: &'static str) -> DemoStyle {
    DemoStyle {
        image_url: photo.and_then(demo_photo),
        description,
    }
}

impl DemoData {
    fn build() -> Self {
        let clothing_collection = BTreeMap::from([
            (
                Category::Shirts,
                vec![
                    garment(
                        "White Cotton Dress Shirt",
                        Some("whiteshirt.png"),
                        "Classic white cotton dress shirt with long sleeves",
                    ),
                    garment("Blue Casual Shirt", None, "Light blue casual cotton shirt"),
                ],
            ),
            (
                Category::Pants,
                vec![
                    garment("Black Dress Pants", None, "Formal black dress pants with slim fit"),
                    garment(
                        "Blue Denim Jeans",
                        Some("pant.png"),
                        "Classic blue denim jeans with regular fit",
                    ),
                ],
            ),
            (
                Category::Shoes,
                vec![garment(
                    "Brown Leather Shoes",
                    None,
                    "Brown leather formal shoes with laces",
                )],
            ),
        ]);

        let outfit_results = [&WEDDING, &CASUAL_MEETUP]
            .into_iter()
            .map(|fixture| {
                (
                    fixture.key,
                    DemoOutfitResult {
                        image_url: fixture.image_url,
                        description: fixture.description,
                    },
                )
            })
            .collect();

        let fusion_results = FUSION_FIXTURES
            .iter()
            .map(|fixture| {
                (
                    fixture.key,
                    DemoFusionResult {
                        image_url: fixture.image_url,
                        name: fixture.name,
                        description: fixture.description,
                    },
                )
            })
            .collect();

        let scenarios = BTreeMap::from([
            (
                "best_in_me_wedding",
                DemoScenario::Outfit {
                    event: "wedding",
                    location: "Marriott Hotel Bangalore",
                    time: "7:00 PM",
                    expected_result: WEDDING.key,
                },
            ),
            (
                "best_in_me_casual",
                DemoScenario::Outfit {
                    event: "friends meetup",
                    location: "Coffee shop",
                    time: "10:00 AM",
                    expected_result: CASUAL_MEETUP.key,
                },
            ),
            (
                "fusion_shrewani_dosti",
                DemoScenario::Fusion {
                    trendy_style: "shrewani",
                    traditional_style: "dosti",
                    expected_result: FUSION_FIXTURES[0].key,
                },
            ),
            (
                "fusion_minimalist_sari",
                DemoScenario::Fusion {
                    trendy_style: "minimalist",
                    traditional_style: "sari",
                    expected_result: FUSION_FIXTURES[1].key,
                },
            ),
        ]);

        Self {
            user: DemoUser {
                name: "Test User",
                email: "test.user@example.com",
                avatar: "https://via.placeholder.com/100x100?text=TU",
            },
            clothing_collection,
            outfit_results,
            trendy_styles: BTreeMap::from([
                ("shrewani", style(Some("sharwama.png"), "Modern shrewani style with urban elements")),
                ("minimalist", style(None, "Clean minimalist modern style")),
            ]),
            traditional_styles: BTreeMap::from([
                ("Dosti", style(Some("white%20shirt.png"), "Traditional Indian dosti design")),
                ("sari", style(None, "Traditional Indian sari with cultural patterns")),
            ]),
            fusion_results,
            marketplace: builtin_candidates(),
            scenarios,
        }
    }
}

/// A finished outfit assembled from the sample wardrobe
pub fn sample_outfit() -> Outfit {
    let selected_outfit: BTreeMap<OutfitSlot, SelectedPiece> = sample_items()
        .into_iter()
        .filter_map(|item| {
            let slot = match item.category {
                Category::Shirts => OutfitSlot::Shirt,
                Category::Pants => OutfitSlot::Pants,
                Category::Shoes => OutfitSlot::Shoes,
                _ => return None,
            };
            let piece = SelectedPiece {
                name: item.name,
                image: Some(item.image),
                id: Some(item.id),
            };
            Some((slot, piece))
        })
        .collect();

    let names: Vec<&str> = selected_outfit.values().map(|piece| piece.name.as_str()).collect();
    let style_description = format!(
        "Outfit for a Friends meetup at Marriott Hotel at 10:00 AM. The outfit includes: {}. Perfect for a casual yet smart look.",
        names.join(", ")
    );

    Outfit {
        success: true,
        event: "Friends meetup".to_string(),
        location: "Marriott Hotel".to_string(),
        time: "10:00 AM".to_string(),
        selected_outfit,
        style_description,
        image_url: SAMPLE_IMAGE_URLS[3].1.to_string(),
        image_type: ImageStyle::Realistic,
        generated_at: Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 0, 0)
            .single()
            .unwrap_or_default(),
        is_demo: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(event: &str, location: &str, time: &str) -> OutfitRequest {
        OutfitRequest {
            event: event.to_string(),
            location: location.to_string(),
            time: time.to_string(),
            image_type: ImageStyle::Ghibli,
            use_collection_only: false,
        }
    }

    #[test]
    fn test_wedding_fixture() {
        let outfit = DemoFixtures
            .resolve_outfit(&request("Cousin's Wedding", "Marriott Hotel Bangalore", "7:00 PM"))
            .unwrap();
        assert!(outfit.is_demo);
        assert_eq!(outfit.image_type, ImageStyle::Ghibli);
        assert_eq!(outfit.selected_outfit[&OutfitSlot::Pants].name, "Black Dress Pants");
        assert_eq!(outfit.selected_outfit.len(), 3);
    }

    #[test]
    fn test_meetup_fixture_requires_morning_time() {
        assert!(DemoFixtures
            .resolve_outfit(&request("friends meetup", "Park", "10:00 AM"))
            .is_some());
        assert!(DemoFixtures
            .resolve_outfit(&request("brunch", "Coffee shop", "10:30 AM"))
            .is_some());
        assert!(DemoFixtures
            .resolve_outfit(&request("friends meetup", "Park", "7:00 PM"))
            .is_none());
    }

    #[test]
    fn test_wedding_elsewhere_is_not_a_fixture() {
        assert!(DemoFixtures
            .resolve_outfit(&request("wedding", "Beach resort", "4:00 PM"))
            .is_none());
    }

    #[test]
    fn test_fusion_fixtures() {
        let design = DemoFixtures
            .resolve_fusion("Text description: Sherwani with urban cuts", "Dosti weave")
            .unwrap();
        assert_eq!(design.spec.fusion_name, "Urban dosti Fusion");
        assert_eq!(design.spec.key_features.len(), 5);
        assert_eq!(design.spec.design_specifications["silhouette"], "Modern shrewani fit with traditional dosti elements");
        assert!(design.is_demo);

        let design = DemoFixtures.resolve_fusion("Clean lines", "Indian sari").unwrap();
        assert_eq!(design.spec.fusion_name, "Contemporary Sari Fusion");
    }

    #[test]
    fn test_streetwear_kimono_has_no_fixture() {
        assert!(DemoFixtures
            .resolve_fusion("urban streetwear hoodie", "japanese kimono")
            .is_none());
    }

    #[test]
    fn test_fusion_needs_both_sides() {
        assert!(DemoFixtures.resolve_fusion("sherwani", "kimono").is_none());
        assert!(DemoFixtures.resolve_fusion("grunge", "dosti").is_none());
    }

    #[test]
    fn test_no_fixtures_never_matches() {
        assert!(NoFixtures
            .resolve_outfit(&request("wedding", "Marriott", "7 PM"))
            .is_none());
        assert!(NoFixtures.resolve_fusion("sherwani", "dosti").is_none());
    }

    #[test]
    fn test_demo_data_mirrors_fixtures() {
        let data = DemoFixtures.demo_data().unwrap();
        assert_eq!(data.fusion_results.len(), FUSION_FIXTURES.len());
        assert_eq!(data.fusion_results["shrewani_dosti"].name, "Urban dosti Fusion");
        assert_eq!(data.outfit_results["wedding_formal"].image_url, WEDDING.image_url);
        assert_eq!(data.marketplace.len(), 3);
        assert_eq!(data.clothing_collection[&Category::Pants].len(), 2);
        assert_eq!(data.clothing_collection[&Category::Shoes][0].image_url, None);

        for scenario in data.scenarios.values() {
            let expected = match scenario {
                DemoScenario::Outfit { expected_result, .. } => {
                    data.outfit_results.contains_key(expected_result)
                }
                DemoScenario::Fusion { expected_result, .. } => {
                    data.fusion_results.contains_key(expected_result)
                }
            };
            assert!(expected, "scenario points at a missing result");
        }

        assert!(NoFixtures.demo_data().is_none());
    }

    #[test]
    fn test_demo_scenarios_resolve_to_their_fixtures() {
        let outfit = DemoFixtures
            .resolve_outfit(&request("friends meetup", "Coffee shop", "10:00 AM"))
            .unwrap();
        assert_eq!(outfit.image_url, CASUAL_MEETUP.image_url);

        let design = DemoFixtures.resolve_fusion("minimalist", "sari").unwrap();
        assert_eq!(design.spec.fusion_name, FUSION_FIXTURES[1].name);
    }

    #[test]
    fn test_sample_outfit_uses_sample_wardrobe() {
        let outfit = sample_outfit();
        assert!(outfit.is_demo);
        assert_eq!(outfit.selected_outfit.len(), 3);
        assert_eq!(
            outfit.selected_outfit[&OutfitSlot::Shirt].id.as_deref(),
            Some("sample-shirt-001")
        );
        assert!(outfit
            .style_description
            .contains("White cotton dress shirt with long sleeves, Blue denim jeans with straight fit, Brown leather casual shoes"));
        assert_eq!(outfit.generated_at.to_rfc3339(), "2024-01-15T10:00:00+00:00");
    }
}
