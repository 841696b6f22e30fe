use std::collections::BTreeMap;

use chrono::Utc;

use crate::{
    models::{FusionDesign, FusionSpec},
    services::{fixtures::FixtureResolver, providers::Stylist},
};

const DEFAULT_FUSION_NAME: &str = "Cultural Fusion Design";
const DEFAULT_SUSTAINABILITY: f64 = 4.0;

/// Which side of the fusion an input describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Trendy,
    Traditional,
}

impl StyleRole {
    fn fallback(&self) -> &'static str {
        match self {
            StyleRole::Trendy => "modern casual style",
            StyleRole::Traditional => "traditional cultural garment",
        }
    }
}

/// One side of a fusion request: an optional photo and optional free text
#[derive(Debug, Clone, Default)]
pub struct StyleInput {
    pub image: Option<Vec<u8>>,
    pub text: String,
}

/// Turns a style input into text, analysing the photo when one was sent
pub async fn describe_style(stylist: &Stylist, input: &StyleInput, role: StyleRole) -> String {
    let mut parts = Vec::new();

    if let Some(image) = input.image.as_deref().filter(|image| !image.is_empty()) {
        let analysis = stylist.describe_garment(image).await;
        parts.push(format!("Image analysis: {}", analysis));
    }

    let text = input.text.trim();
    if !text.is_empty() {
        parts.push(format!("Text description: {}", text));
    }

    if parts.is_empty() {
        role.fallback().to_string()
    } else {
        parts.join(" | ")
    }
}

/// Prompt asking the model for a structured fusion brief
pub fn fusion_prompt(trendy: &str, traditional: &str) -> String {
    format!(
        r#"You are a world-renowned fashion designer specializing in cultural fusion and sustainable fashion.

Create a comprehensive fusion design combining:
TRENDY STYLE: {trendy}
TRADITIONAL STYLE: {traditional}

Provide a detailed response in this exact format:

FUSION NAME: [Creative name for the fusion]

DETAILED DESCRIPTION: [3-4 sentences describing the complete fusion design, including how elements blend, overall aesthetic, and cultural respect]

DESIGN SPECIFICATIONS:
- Silhouette: [Specific shape and fit details]
- Construction: [How it's made, techniques used]
- Functionality: [Practical aspects and wearability]

KEY FEATURES: [List 4-5 standout design elements]

COLOR PALETTE: [Specific colors and their cultural/modern significance]

MATERIALS: [Sustainable fabrics and traditional materials used]

PATTERNS: [Traditional patterns adapted for modern use]

SUSTAINABILITY SCORE: [Rate 1-5 with explanation]

Be specific, detailed, and culturally respectful. Focus on sustainable and ethical fashion practices."#
    )
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Specifications,
    Features,
}

fn leading_number(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?;
    let token = token.split('/').next()?;
    token.trim_end_matches(|c: char| !c.is_ascii_digit()).parse().ok()
}

impl FusionSpec {
    /// Parses a model reply written in the format requested by [`fusion_prompt`]
    ///
    /// Headings are matched at the start of trimmed lines. Bullet lines
    /// (`- ...`) are collected under the most recent list heading. Missing
    /// sections keep their defaults.
    pub fn parse(reply: &str) -> Self {
        let mut spec = FusionSpec {
            fusion_name: DEFAULT_FUSION_NAME.to_string(),
            detailed_description: String::new(),
            design_specifications: BTreeMap::new(),
            key_features: Vec::new(),
            color_palette: String::new(),
            materials: String::new(),
            patterns: String::new(),
            sustainability_score: DEFAULT_SUSTAINABILITY,
        };
        let mut section = None;

        for line in reply.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(rest) = line.strip_prefix("FUSION NAME:") {
                spec.fusion_name = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("DETAILED DESCRIPTION:") {
                spec.detailed_description = rest.trim().to_string();
            } else if line.starts_with("DESIGN SPECIFICATIONS:") {
                section = Some(Section::Specifications);
            } else if line.starts_with("KEY FEATURES:") {
                section = Some(Section::Features);
            } else if let Some(rest) = line.strip_prefix("COLOR PALETTE:") {
                spec.color_palette = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("MATERIALS:") {
                spec.materials = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("PATTERNS:") {
                spec.patterns = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("SUSTAINABILITY SCORE:") {
                spec.sustainability_score = leading_number(rest)
                    .filter(|score| (0.0..=5.0).contains(score))
                    .unwrap_or(DEFAULT_SUSTAINABILITY);
            } else if let Some(bullet) = line.strip_prefix('-') {
                match section {
                    Some(Section::Specifications) => {
                        if let Some((aspect, detail)) = bullet.split_once(':') {
                            spec.design_specifications
                                .insert(aspect.trim().to_lowercase(), detail.trim().to_string());
                        }
                    }
                    Some(Section::Features) => spec.key_features.push(bullet.trim().to_string()),
                    None => {}
                }
            }
        }

        spec
    }

    /// Design used when the model cannot be reached
    pub fn fallback(trendy: &str, traditional: &str) -> Self {
        let design_specifications = [
            ("silhouette", "Modern fit with traditional proportions"),
            ("construction", "Blend of machine and hand-crafted techniques"),
            ("functionality", "Versatile for both casual and formal occasions"),
        ]
        .into_iter()
        .map(|(aspect, detail)| (aspect.to_string(), detail.to_string()))
        .collect();

        FusionSpec {
            fusion_name: "Cultural Modern Fusion".to_string(),
            detailed_description: format!(
                "A beautiful fusion combining {} with {}, creating a harmonious blend of contemporary style and cultural heritage through sustainable design practices.",
                trendy, traditional
            ),
            design_specifications,
            key_features: [
                "Cultural pattern integration",
                "Modern silhouette",
                "Sustainable materials",
                "Versatile styling",
                "Ethical production",
            ]
            .iter()
            .map(|feature| feature.to_string())
            .collect(),
            color_palette: "Earth tones with cultural accent colors".to_string(),
            materials: "Organic cotton, traditional handwoven fabrics, recycled fibers".to_string(),
            patterns: "Traditional motifs adapted for contemporary use".to_string(),
            sustainability_score: 4.2,
        }
    }
}

/// Prompt for rendering the finished design
pub fn design_image_prompt(detailed_description: &str) -> String {
    format!(
        "Professional fashion design illustration: {}. High-quality fashion sketch style, detailed clothing design, cultural fusion elements, sustainable fashion focus, clean white background, professional presentation.",
        detailed_description
    )
}

/// Generates a fusion design from a trendy and a traditional style
pub async fn generate_fusion(
    stylist: &Stylist,
    fixtures: &dyn FixtureResolver,
    trendy: &StyleInput,
    traditional: &StyleInput,
) -> FusionDesign {
    let trendy_input = describe_style(stylist, trendy, StyleRole::Trendy).await;
    let traditional_input = describe_style(stylist, traditional, StyleRole::Traditional).await;

    if let Some(design) = fixtures.resolve_fusion(&trendy_input, &traditional_input) {
        tracing::info!(fusion_name = %design.spec.fusion_name, "Using demo fusion fixture");
        return design;
    }

    let spec = match stylist
        .complete(&fusion_prompt(&trendy_input, &traditional_input))
        .await
    {
        Some(reply) => FusionSpec::parse(&reply),
        None => FusionSpec::fallback(&trendy_input, &traditional_input),
    };

    let fusion_image_url = stylist
        .render("fusion", &design_image_prompt(&spec.detailed_description))
        .await;

    tracing::info!(
        fusion_name = %spec.fusion_name,
        key_features = spec.key_features.len(),
        "Fusion design generated"
    );

    FusionDesign {
        success: true,
        spec,
        fusion_image_url,
        trendy_input,
        traditional_input,
        generated_at: Utc::now(),
        is_demo: false,
    }
}
