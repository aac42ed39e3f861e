use lazy_static::lazy_static;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use shared::{
    AnalysisMetadata, AnalysisResponse, DetailedAnalysisResponse, DetailedMetrics,
};
use std::collections::HashMap;

pub const ANALYSIS_VERSION: &str = "1.0.0";

const SKIN_TYPES: [&str; 5] = ["Oily", "Dry", "Combination", "Normal", "Sensitive"];

const POSSIBLE_ISSUES: [&str; 10] = [
    "Hyperpigmentation",
    "Acne",
    "Fine lines",
    "Dark circles",
    "Uneven skin tone",
    "Enlarged pores",
    "Dehydration",
    "Sun damage",
    "Redness",
    "Texture irregularities",
];

lazy_static! {
    static ref SKIN_TYPE_RECOMMENDATIONS: HashMap<&'static str, &'static str> = HashMap::from([
        ("Oily", "Use oil-free moisturizers and gentle cleansers"),
        ("Dry", "Apply rich moisturizers and hydrating serums"),
        ("Combination", "Use zone-specific products for different areas"),
        ("Normal", "Maintain current routine with SPF protection"),
        ("Sensitive", "Choose fragrance-free, hypoallergenic products"),
    ]);
    static ref ISSUE_RECOMMENDATIONS: HashMap<&'static str, &'static str> = HashMap::from([
        ("Hyperpigmentation", "Consider vitamin C serums and chemical exfoliants"),
        ("Acne", "Try salicylic acid or benzoyl peroxide treatments"),
        ("Fine lines", "Use retinol products and stay hydrated"),
        ("Dark circles", "Get adequate sleep and try caffeine eye creams"),
    ]);
}

/// Mock analysis generator. Results are fabricated but reproducible: every
/// call seeds its own generator from (image_id, file_size_bytes), so the same
/// image always yields the same report across calls and restarts.
#[derive(Clone)]
pub struct AnalysisService;

impl AnalysisService {
    pub fn new() -> Self {
        Self
    }

    /// Draw order is fixed: skin type, issue count, issues, confidence.
    pub fn analyze(
        &self,
        image_id: &str,
        file_size_bytes: u64,
        extension: &str,
    ) -> AnalysisResponse {
        info!("Starting analysis for image: {}", image_id);

        let mut rng = StdRng::seed_from_u64(derive_seed(image_id, file_size_bytes));

        let skin_type = SKIN_TYPES[rng.random_range(0..SKIN_TYPES.len())].to_string();
        let num_issues = rng.random_range(1..=3);
        let issues: Vec<String> =
            rand::seq::index::sample(&mut rng, POSSIBLE_ISSUES.len(), num_issues)
                .iter()
                .map(|index| POSSIBLE_ISSUES[index].to_string())
                .collect();
        let confidence = round2(rng.random_range(0.70..=0.98));

        info!(
            "Analysis complete for {}: skin_type={}, issues={}, confidence={}",
            image_id,
            skin_type,
            issues.len(),
            confidence
        );

        AnalysisResponse {
            image_id: image_id.to_string(),
            skin_type,
            issues,
            confidence,
            metadata: AnalysisMetadata {
                file_extension: extension.to_string(),
                file_size_bytes,
                analysis_version: ANALYSIS_VERSION.to_string(),
            },
        }
    }

    /// Metric draw order from the offset seed: hydration, oil, elasticity,
    /// texture. Recommendations are looked up, not drawn.
    pub fn analyze_detailed(
        &self,
        image_id: &str,
        file_size_bytes: u64,
        extension: &str,
    ) -> DetailedAnalysisResponse {
        let base = self.analyze(image_id, file_size_bytes, extension);

        // Offset seed keeps the metric draws distinct from the base draws.
        let mut rng =
            StdRng::seed_from_u64(derive_seed(image_id, file_size_bytes).wrapping_add(1));

        let hydration_level = round1(rng.random_range(30.0..=90.0));
        let oil_index = round1(rng.random_range(20.0..=80.0));
        let elasticity_score = round1(rng.random_range(50.0..=95.0));
        let texture_score = round1(rng.random_range(40.0..=90.0));
        let recommendations = recommendations_for(&base.skin_type, &base.issues);

        info!("Detailed analysis complete for {}", image_id);

        DetailedAnalysisResponse {
            base,
            detailed_metrics: DetailedMetrics {
                hydration_level,
                oil_index,
                elasticity_score,
                texture_score,
                recommendations,
            },
        }
    }
}

fn derive_seed(image_id: &str, file_size_bytes: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(image_id.as_bytes());
    hasher.update(file_size_bytes.to_be_bytes());
    let digest = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(seed)
}

fn recommendations_for(skin_type: &str, issues: &[String]) -> Vec<String> {
    let mut recommendations = vec![
        SKIN_TYPE_RECOMMENDATIONS
            .get(skin_type)
            .copied()
            .unwrap_or("Consult a dermatologist")
            .to_string(),
    ];

    // Only the first two issues carry advice; unmapped issues are skipped.
    for issue in issues.iter().take(2) {
        if let Some(advice) = ISSUE_RECOMMENDATIONS.get(issue.as_str()) {
            recommendations.push((*advice).to_string());
        }
    }

    recommendations
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
