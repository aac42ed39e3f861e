use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadResponse {
    pub image_id: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalyzeRequest {
    pub image_id: String,
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisMetadata {
    pub file_extension: String,
    pub file_size_bytes: u64,
    pub analysis_version: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisResponse {
    pub image_id: String,
    pub skin_type: String,
    pub issues: Vec<String>,
    pub confidence: f64,
    pub metadata: AnalysisMetadata,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetailedMetrics {
    pub hydration_level: f64,
    pub oil_index: f64,
    pub elasticity_score: f64,
    pub texture_score: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DetailedAnalysisResponse {
    #[serde(flatten)]
    pub base: AnalysisResponse,
    pub detailed_metrics: DetailedMetrics,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageInfo {
    pub image_id: String,
    pub filename: String,
    pub size_bytes: u64,
    pub extension: String,
    pub created_at: DateTime<Utc>,
}
