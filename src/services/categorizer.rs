use crate::models::Category;

/// Keyword sets checked in priority order; the first category with a hit wins
const KEYWORDS: [(Category, &[&str]); 6] = [
    (Category::Shirts, &["shirt", "blouse", "top", "tshirt", "t-shirt"]),
    (Category::Pants, &["pants", "jeans", "trousers", "shorts"]),
    (Category::Shoes, &["shoes", "sneakers", "boots", "sandals", "heels"]),
    (Category::Socks, &["socks", "stockings"]),
    (Category::Watches, &["watch", "watches"]),
    (
        Category::Accessories,
        &["belt", "hat", "cap", "scarf", "jewelry", "necklace", "bracelet"],
    ),
];

/// Guesses the wardrobe category of an item from its name
///
/// Keywords match as substrings of the lower-cased name, so "Shirtdress"
/// lands in shirts. Names matching nothing fall into `Category::Others`.
pub fn categorize(name: &str) -> Category {
    let name = name.to_lowercase();

    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Others)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_known_items() {
        assert_eq!(categorize("Blue Denim Jeans"), Category::Pants);
        assert_eq!(categorize("Brown Leather Shoes"), Category::Shoes);
        assert_eq!(categorize("White cotton dress shirt"), Category::Shirts);
        assert_eq!(categorize("Wool stockings"), Category::Socks);
        assert_eq!(categorize("Silver wrist watch"), Category::Watches);
        assert_eq!(categorize("Pearl necklace"), Category::Accessories);
    }

    #[test]
    fn test_categorize_unknown_item() {
        assert_eq!(categorize("Mystery Item"), Category::Others);
        assert_eq!(categorize(""), Category::Others);
    }

    #[test]
    fn test_categorize_is_case_insensitive() {
        assert_eq!(categorize("RUNNING SNEAKERS"), Category::Shoes);
    }

    #[test]
    fn test_categorize_priority_order() {
        // Both a shirt and a shoe keyword: shirts are checked first
        assert_eq!(categorize("Shirt and shoes combo"), Category::Shirts);
        // "watch" inside a pants name still resolves to pants
        assert_eq!(categorize("Watch-pocket trousers"), Category::Pants);
    }

    #[test]
    fn test_categorize_matches_substrings() {
        assert_eq!(categorize("Crop-top"), Category::Shirts);
        assert_eq!(categorize("Baseball cap"), Category::Accessories);
    }
}
