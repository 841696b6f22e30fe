use thiserror::Error;

use crate::models::{Product, RankedProduct, RankingBreakdown};

pub mod candidates;
pub mod filters;

pub use candidates::{builtin_candidates, load_candidates};
pub use filters::MarketplaceFilters;

/// Maximum number of products returned by a search
pub const MAX_RESULTS: usize = 6;

const VISUAL_WEIGHT: f64 = 0.5;
const DESCRIPTION_WEIGHT: f64 = 0.3;
const SUSTAINABILITY_WEIGHT: f64 = 0.2;

/// Points per description word found in the product description
const DESCRIPTION_WORD_POINTS: f64 = 3.0;
/// Points per key feature found in the product description
const FEATURE_POINTS: f64 = 5.0;
/// Scales a 0-5 sustainability score onto a 0-50 range
const SUSTAINABILITY_SCALE: f64 = 10.0;
/// Description words this short or shorter are ignored
const MIN_WORD_CHARS: usize = 3;

/// Error types for marketplace search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankerError {
    #[error("Invalid filter '{field}': {reason}")]
    InvalidFilter { field: String, reason: String },
}

/// A generated fusion design to find products for
#[derive(Debug, Clone, Default)]
pub struct FusionQuery {
    pub description: String,
    pub key_features: Vec<String>,
    pub filters: MarketplaceFilters,
    /// Reference to the design image; any non-empty value enables the visual factor
    pub image_reference: Option<String>,
}

impl FusionQuery {
    fn has_image(&self) -> bool {
        self.image_reference
            .as_deref()
            .is_some_and(|reference| !reference.is_empty())
    }
}

/// Ranks a fixed list of marketplace products against fusion designs
///
/// The candidate list is read-only for the ranker's lifetime, so a single
/// instance can be shared between requests without locking.
#[derive(Debug, Clone)]
pub struct Ranker {
    candidates: Vec<Product>,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(builtin_candidates())
    }
}

impl Ranker {
    /// Creates a ranker over the given candidate products
    pub fn new(candidates: Vec<Product>) -> Self {
        Self { candidates }
    }

    /// The full candidate list in its original order
    pub fn candidates(&self) -> &[Product] {
        &self.candidates
    }

    /// Filters, scores and sorts the candidates for a query
    ///
    /// Ranking factors:
    /// - visual similarity (50%): the product's precomputed match percentage,
    ///   only when the query carries an image reference
    /// - description match (30%): 3 points per description word (longer than
    ///   three characters) found in the product description, plus 5 points
    ///   per key feature found there
    /// - sustainability (20%): the 0-5 score scaled by ten
    ///
    /// Ties keep the candidate list order. At most [`MAX_RESULTS`] products
    /// are returned.
    pub fn rank(&self, query: &FusionQuery) -> Vec<RankedProduct> {
        let words: Vec<String> = query
            .description
            .to_lowercase()
            .split_whitespace()
            .filter(|word| word.chars().count() > MIN_WORD_CHARS)
            .map(str::to_string)
            .collect();
        let features: Vec<String> = query
            .key_features
            .iter()
            .map(|feature| feature.to_lowercase())
            .collect();
        let has_image = query.has_image();

        let mut ranked: Vec<RankedProduct> = self
            .candidates
            .iter()
            .filter(|product| query.filters.matches(product))
            .map(|product| score(product, &words, &features, has_image))
            .collect();

        ranked.sort_by(|a, b| {
            b.final_ranking_score
                .partial_cmp(&a.final_ranking_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(MAX_RESULTS);

        tracing::debug!(
            candidates = self.candidates.len(),
            returned = ranked.len(),
            has_image,
            "Ranked marketplace products"
        );

        ranked
    }
}

fn score(product: &Product, words: &[String], features: &[String], has_image: bool) -> RankedProduct {
    let product_description = product.description.to_lowercase();

    let visual = if has_image {
        product.match_percentage
    } else {
        0.0
    };

    let matching_words = words
        .iter()
        .filter(|word| product_description.contains(word.as_str()))
        .count();
    let matching_features = features
        .iter()
        .filter(|feature| product_description.contains(feature.as_str()))
        .count();
    let description = matching_words as f64 * DESCRIPTION_WORD_POINTS
        + matching_features as f64 * FEATURE_POINTS;

    let sustainability = product.sustainability_score * SUSTAINABILITY_SCALE;

    let final_score =
        visual * VISUAL_WEIGHT + description * DESCRIPTION_WEIGHT + sustainability * SUSTAINABILITY_WEIGHT;

    RankedProduct {
        product: product.clone(),
        final_ranking_score: round2(final_score),
        ranking_breakdown: RankingBreakdown {
            visual_similarity: round2(visual * VISUAL_WEIGHT),
            description_match: round2(description * DESCRIPTION_WEIGHT),
            sustainability: round2(sustainability * SUSTAINABILITY_WEIGHT),
        },
    }
}

/// Two decimals, ties to even
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
