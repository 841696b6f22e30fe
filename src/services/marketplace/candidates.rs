use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::models::Product;

const DEMO_MATCH_PERCENTAGE: f64 = 94.0;
const DEMO_MARKUP: f64 = 30.0;
const DEMO_DISCOUNT: u32 = 19;

fn links(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(market, url)| (market.to_string(), url.to_string()))
        .collect()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn demo_product(
    name: &str,
    brand: &str,
    price: f64,
    sustainability_score: f64,
    description: &str,
    image_url: &str,
    purchase_links: BTreeMap<String, String>,
) -> Product {
    Product {
        name: name.to_string(),
        brand: brand.to_string(),
        price,
        original_price: Some(price + DEMO_MARKUP),
        discount: Some(DEMO_DISCOUNT),
        sustainability_score,
        match_percentage: DEMO_MATCH_PERCENTAGE,
        description: description.to_string(),
        image_url: image_url.to_string(),
        purchase_links,
        colors: owned(&["Earth Brown", "Natural Beige", "Forest Green"]),
        eco_features: owned(&["Organic Cotton", "Fair Trade", "Carbon Neutral", "Handwoven"]),
        sizes: owned(&["XS", "S", "M", "L", "XL"]),
        rating: Some(4.7),
        reviews: Some(234),
    }
}

/// The built-in sustainable marketplace products
pub fn builtin_candidates() -> Vec<Product> {
    vec![
        demo_product(
            "Eco-Fusion Cultural Dress",
            "Sustainable Threads",
            129.0,
            4.8,
            "Beautiful fusion of traditional and modern elements",
            "https://example.com/products/eco-fusion-cultural-dress.jpg",
            links(&[
                ("amazon", "https://amazon.in/sustainable-fusion-dress"),
                ("myntra", "https://myntra.com/sustainable-threads/dress"),
                ("trent", "https://trent.com/eco-fusion-collection"),
            ]),
        ),
        demo_product(
            "Traditional-Modern Fusion Top",
            "Cultural Heritage Co.",
            89.0,
            4.5,
            "Elegant fusion top with contemporary silhouette",
            "https://example.com/products/traditional-modern-fusion-top.jpg",
            links(&[
                ("amazon", "https://amazon.in/cultural-heritage-fusion-top"),
                ("myntra", "https://myntra.com/cultural-heritage/fusion-top"),
                ("trent", "https://trent.com/fusion-tops"),
            ]),
        ),
        demo_product(
            "Sustainable Fusion Accessories",
            "EcoLux Designs",
            65.0,
            4.3,
            "Complete accessories set from sustainable materials",
            "https://example.com/products/sustainable-fusion-accessories.jpg",
            links(&[
                ("amazon", "https://www.amazon.com/dp/B0F1MMW7JC"),
                (
                    "andaazfashion",
                    "https://www.andaazfashion.com/black-jacquard-embroidered-men-sherwani-mstv02000.html",
                ),
                (
                    "ajio",
                    "https://www.ajio.com/kisah-men-embossed-indowestern-sherwani-dhoti-with-dupatta-set/p/466267497_black",
                ),
            ]),
        ),
    ]
}

/// Loads a candidate list from a JSON array of products
pub fn load_candidates(path: impl AsRef<Path>) -> anyhow::Result<Vec<Product>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read marketplace catalog {}", path.display()))?;
    let products: Vec<Product> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse marketplace catalog {}", path.display()))?;

    if let Some(bad) = products.iter().find(|p| p.price <= 0.0) {
        anyhow::bail!("Product '{}' has a non-positive price", bad.name);
    }
    if let Some(bad) = products
        .iter()
        .find(|p| !(0.0..=5.0).contains(&p.sustainability_score))
    {
        anyhow::bail!("Product '{}' has a sustainability score outside 0-5", bad.name);
    }

    Ok(products)
}
