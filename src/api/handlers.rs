use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::{Category, ClothingItem, FusionDesign, Outfit, OutfitRequest, Product, RankedProduct},
    services::{
        categorizer::categorize,
        fixtures::{
            self, DemoData, DemoFusionResult, DemoGarment, DemoOutfitResult, DemoScenario,
            DemoStyle, DemoUser, SAMPLE_IMAGE_URLS,
        },
        fusion::{generate_fusion, StyleInput},
        marketplace::{FusionQuery, MarketplaceFilters},
        outfit::generate_outfit,
        providers::ProviderStatus,
    },
};

use super::{
    extract::{required, AppJson, AppQuery, FormFields, FormShape, JsonOrForm},
    AppState,
};

// Request/Response types

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub features: [&'static str; 5],
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_provider: &'static str,
    pub clothing_items: usize,
    pub sample_items: usize,
    pub user_items: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub success: bool,
    pub collection: BTreeMap<Category, Vec<ClothingItem>>,
    pub total_items: usize,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub success: bool,
    pub message: String,
    pub item_id: String,
    pub category: Category,
    pub total_items: usize,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub item_id: String,
    pub new_name: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateItemResponse {
    pub success: bool,
    pub message: String,
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct DeleteItemQuery {
    pub item_id: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteItemResponse {
    pub success: bool,
    pub message: String,
    pub category: Category,
    pub remaining_items: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeImageResponse {
    pub success: bool,
    pub ai_description: String,
    pub suggested_category: Category,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SearchFusionRequest {
    #[serde(default)]
    pub fusion_image_url: Option<String>,
    pub detailed_description: String,
    #[serde(default)]
    pub fusion_name: String,
    #[serde(default)]
    pub key_features: Vec<String>,
    #[serde(default)]
    pub filters: Value,
}

/// Flat form rendition of [`SearchFusionRequest`]
///
/// `key_features` and `filters` carry JSON text; blank means empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchFusionForm {
    #[serde(default)]
    pub fusion_image_url: Option<String>,
    pub detailed_description: String,
    #[serde(default)]
    pub fusion_name: String,
    #[serde(default)]
    pub key_features: String,
    #[serde(default)]
    pub filters: String,
}

impl FormShape for SearchFusionRequest {
    type Form = SearchFusionForm;

    fn from_form(form: SearchFusionForm) -> AppResult<Self> {
        let key_features = match form.key_features.trim() {
            "" => Vec::new(),
            text => serde_json::from_str(text).map_err(|e| {
                AppError::InvalidInput(format!("key_features must be a JSON array of strings: {}", e))
            })?,
        };
        let filters = match form.filters.trim() {
            "" => Value::Null,
            text => serde_json::from_str(text)
                .map_err(|e| AppError::InvalidFilter(format!("filters must be a JSON object: {}", e)))?,
        };

        Ok(Self {
            fusion_image_url: form.fusion_image_url,
            detailed_description: form.detailed_description,
            fusion_name: form.fusion_name,
            key_features,
            filters,
        })
    }

    fn form_from_fields(fields: &FormFields) -> AppResult<SearchFusionForm> {
        Ok(SearchFusionForm {
            fusion_image_url: fields.text("fusion_image_url")?,
            detailed_description: required(
                fields.text("detailed_description")?,
                "detailed_description",
            )?,
            fusion_name: fields.text("fusion_name")?.unwrap_or_default(),
            key_features: fields.text("key_features")?.unwrap_or_default(),
            filters: fields.text("filters")?.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SearchQuerySummary {
    pub fusion_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub key_features: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RankingInfo {
    pub primary_factor: &'static str,
    pub secondary_factor: &'static str,
    pub tertiary_factor: &'static str,
}

const RANKING_INFO: RankingInfo = RankingInfo {
    primary_factor: "Visual similarity to fusion image",
    secondary_factor: "Description keyword matching",
    tertiary_factor: "Sustainability score",
};

#[derive(Debug, Serialize)]
pub struct SearchFusionResponse {
    pub success: bool,
    pub search_query: SearchQuerySummary,
    pub total_matches: usize,
    pub products: Vec<RankedProduct>,
    pub ranking_info: RankingInfo,
    pub searched_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub total_products: usize,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct SampleImagesResponse {
    pub success: bool,
    pub sample_images: BTreeMap<&'static str, &'static str>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoUserResponse {
    pub success: bool,
    pub user: DemoUser,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoCollectionResponse {
    pub success: bool,
    pub collection: BTreeMap<Category, Vec<DemoGarment>>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoOutfitResultsResponse {
    pub success: bool,
    pub results: BTreeMap<&'static str, DemoOutfitResult>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoFusionStylesResponse {
    pub success: bool,
    pub trendy_styles: BTreeMap<&'static str, DemoStyle>,
    pub traditional_styles: BTreeMap<&'static str, DemoStyle>,
    pub fusion_results: BTreeMap<&'static str, DemoFusionResult>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoMarketplaceResponse {
    pub success: bool,
    pub products: Vec<Product>,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoScenariosResponse {
    pub success: bool,
    pub scenarios: BTreeMap<&'static str, DemoScenario>,
    pub message: &'static str,
}

fn demo_data(state: &AppState) -> AppResult<DemoData> {
    state.fixtures.demo_data().ok_or(AppError::DemoUnavailable)
}

// Handlers

/// Service banner
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Wardrobe API - Clothing Collection Manager",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        features: [
            "Clothing Collection Management",
            "Auto Categorization",
            "Event-Based Outfit Generation",
            "Cultural Fusion Design",
            "Sustainable Marketplace Search",
        ],
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (clothing_items, sample_items) = {
        let catalog = state.catalog.lock().await;
        let samples = catalog
            .list()
            .values()
            .flatten()
            .filter(|item| item.is_sample)
            .count();
        (catalog.total_items(), samples)
    };

    Json(HealthResponse {
        status: "healthy",
        ai_provider: state.stylist.provider_name(),
        clothing_items,
        sample_items,
        user_items: clothing_items - sample_items,
        timestamp: Utc::now(),
    })
}

/// Full wardrobe, every category included
pub async fn get_collection(State(state): State<AppState>) -> Json<CollectionResponse> {
    let catalog = state.catalog.lock().await;

    Json(CollectionResponse {
        success: true,
        collection: catalog.list().clone(),
        total_items: catalog.total_items(),
        categories: Category::ALL.to_vec(),
    })
}

/// Adds a photographed item; the category is derived from the name when omitted
pub async fn add_item(
    State(state): State<AppState>,
    fields: FormFields,
) -> AppResult<(StatusCode, Json<AddItemResponse>)> {
    let image = required(fields.file("image"), "image")?;
    let name = required(fields.text("name")?, "name")?;
    let category = fields.text("category")?;

    let added = state
        .catalog
        .lock()
        .await
        .add(STANDARD.encode(&image), name.clone(), category.as_deref())?;

    tracing::info!(
        item_id = %added.item_id,
        category = %added.category,
        total_items = added.total_items,
        "Added clothing item"
    );

    Ok((
        StatusCode::CREATED,
        Json(AddItemResponse {
            success: true,
            message: format!("Added '{}' to {}", name, added.category),
            item_id: added.item_id,
            category: added.category,
            total_items: added.total_items,
        }),
    ))
}

/// Renames an item within its category
pub async fn update_item(
    State(state): State<AppState>,
    AppJson(request): AppJson<UpdateItemRequest>,
) -> AppResult<Json<UpdateItemResponse>> {
    let category = state.catalog.lock().await.update(
        &request.item_id,
        request.new_name.clone(),
        &request.category,
    )?;

    tracing::info!(item_id = %request.item_id, category = %category, "Renamed clothing item");

    Ok(Json(UpdateItemResponse {
        success: true,
        message: format!("Updated item name to '{}' in {}", request.new_name, category),
        category,
    }))
}

/// Removes an item from its category
pub async fn delete_item(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<DeleteItemQuery>,
) -> AppResult<Json<DeleteItemResponse>> {
    let deleted = state
        .catalog
        .lock()
        .await
        .delete(&params.item_id, &params.category)?;

    tracing::info!(
        item_id = %params.item_id,
        category = %deleted.item.category,
        remaining_items = deleted.remaining_items,
        "Deleted clothing item"
    );

    Ok(Json(DeleteItemResponse {
        success: true,
        message: format!("Deleted '{}' from {}", deleted.item.name, deleted.item.category),
        category: deleted.item.category,
        remaining_items: deleted.remaining_items,
    }))
}

/// Describes an uploaded garment photo and suggests a category for it
pub async fn analyze_image(
    State(state): State<AppState>,
    fields: FormFields,
) -> AppResult<Json<AnalyzeImageResponse>> {
    let image = required(fields.file("image"), "image")?;

    let ai_description = state.stylist.describe_garment(&image).await;
    let suggested_category = categorize(&ai_description);

    tracing::info!(
        description = %ai_description,
        category = %suggested_category,
        "Analyzed garment image"
    );

    Ok(Json(AnalyzeImageResponse {
        success: true,
        ai_description,
        suggested_category,
        message: "Image analyzed successfully",
    }))
}

/// Outfit for an event, drawn from the wardrobe
pub async fn generate_outfit_for_event(
    State(state): State<AppState>,
    AppJson(request): AppJson<OutfitRequest>,
) -> AppResult<Json<Outfit>> {
    let outfit = generate_outfit(
        &state.catalog,
        &state.stylist,
        state.fixtures.as_ref(),
        request,
    )
    .await;
    Ok(Json(outfit))
}

/// Fusion design from a trendy and a traditional style, each photo and/or text
pub async fn generate_fusion_design(
    State(state): State<AppState>,
    fields: FormFields,
) -> AppResult<Json<FusionDesign>> {
    let trendy = StyleInput {
        image: fields.file("trendy_image"),
        text: fields.text("trendy_text")?.unwrap_or_default(),
    };
    let traditional = StyleInput {
        image: fields.file("traditional_image"),
        text: fields.text("traditional_text")?.unwrap_or_default(),
    };

    let design = generate_fusion(
        &state.stylist,
        state.fixtures.as_ref(),
        &trendy,
        &traditional,
    )
    .await;
    Ok(Json(design))
}

/// Ranks marketplace products against a fusion design
pub async fn search_fusion_marketplace(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<SearchFusionRequest>,
) -> AppResult<Json<SearchFusionResponse>> {
    let query = FusionQuery {
        description: request.detailed_description,
        key_features: request.key_features,
        filters: MarketplaceFilters::from_value(&request.filters)?,
        image_reference: request.fusion_image_url,
    };

    let products = state.ranker.rank(&query);

    tracing::info!(
        fusion_name = %request.fusion_name,
        matches = products.len(),
        "Marketplace search completed"
    );

    Ok(Json(SearchFusionResponse {
        success: true,
        search_query: SearchQuerySummary {
            fusion_name: request.fusion_name,
            description: query.description,
            image_url: query.image_reference,
            key_features: query.key_features,
        },
        total_matches: products.len(),
        products,
        ranking_info: RANKING_INFO,
        searched_at: Utc::now(),
    }))
}

/// The marketplace candidate list
pub async fn list_products(State(state): State<AppState>) -> Json<ProductsResponse> {
    let products = state.ranker.candidates().to_vec();
    Json(ProductsResponse {
        success: true,
        total_products: products.len(),
        products,
    })
}

/// Probes the AI provider and explains known account problems
pub async fn provider_status(State(state): State<AppState>) -> Json<ProviderStatus> {
    Json(state.stylist.status().await)
}

/// A finished outfit built from the sample wardrobe
pub async fn sample_outfit() -> Json<Outfit> {
    Json(fixtures::sample_outfit())
}

pub async fn sample_images() -> Json<SampleImagesResponse> {
    Json(SampleImagesResponse {
        success: true,
        sample_images: SAMPLE_IMAGE_URLS.into_iter().collect(),
        message: "Sample image URLs for demonstration",
    })
}

pub async fn demo_user(State(state): State<AppState>) -> AppResult<Json<DemoUserResponse>> {
    let data = demo_data(&state)?;
    Ok(Json(DemoUserResponse {
        success: true,
        user: data.user,
        message: "Demo user data",
    }))
}

pub async fn demo_clothing_collection(
    State(state): State<AppState>,
) -> AppResult<Json<DemoCollectionResponse>> {
    let data = demo_data(&state)?;
    Ok(Json(DemoCollectionResponse {
        success: true,
        collection: data.clothing_collection,
        message: "Demo clothing collection with uploaded photos",
    }))
}

pub async fn demo_outfit_results(
    State(state): State<AppState>,
) -> AppResult<Json<DemoOutfitResultsResponse>> {
    let data = demo_data(&state)?;
    Ok(Json(DemoOutfitResultsResponse {
        success: true,
        results: data.outfit_results,
        message: "Demo outfit results with expected photos",
    }))
}

pub async fn demo_fusion_styles(
    State(state): State<AppState>,
) -> AppResult<Json<DemoFusionStylesResponse>> {
    let data = demo_data(&state)?;
    Ok(Json(DemoFusionStylesResponse {
        success: true,
        trendy_styles: data.trendy_styles,
        traditional_styles: data.traditional_styles,
        fusion_results: data.fusion_results,
        message: "Demo fusion styles with uploaded photos",
    }))
}

pub async fn demo_marketplace(
    State(state): State<AppState>,
) -> AppResult<Json<DemoMarketplaceResponse>> {
    let data = demo_data(&state)?;
    Ok(Json(DemoMarketplaceResponse {
        success: true,
        products: data.marketplace,
        message: "Demo marketplace with real product links",
    }))
}

pub async fn demo_scenarios(
    State(state): State<AppState>,
) -> AppResult<Json<DemoScenariosResponse>> {
    let data = demo_data(&state)?;
    Ok(Json(DemoScenariosResponse {
        success: true,
        scenarios: data.scenarios,
        message: "Predefined demo scenarios",
    }))
}
