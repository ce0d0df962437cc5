use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::{Scalar, Summary};
use crate::error::{AppError, AppResult};

/// Which record shape (and display layout) a result list uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Beauty & health product records (price, tags, category breadcrumb)
    Beauty,
    /// Older, simpler title/similarity records
    #[default]
    Legacy,
}

/// A beauty & health product suggested by the recommender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeautyRecommendation {
    #[serde(default)]
    pub id: Option<Scalar>,
    pub name: String,
    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub score: f64,
}

/// A record in the legacy title-based shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRecommendation {
    pub title: String,
    #[serde(default)]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    pub score: f64,
    #[serde(default)]
    pub similarity: Option<f64>,
}

/// A result list, tagged by the shape its records were decoded as
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendations {
    Beauty(Vec<BeautyRecommendation>),
    Legacy(Vec<LegacyRecommendation>),
}

fn decode_records<T: DeserializeOwned>(records: Vec<Value>) -> AppResult<Vec<T>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record).map_err(|e| {
                AppError::RequestFailed(format!("Invalid recommendation #{}: {}", index + 1, e))
            })
        })
        .collect()
}

impl Recommendations {
    /// Decodes raw records in the given mode, preserving their order
    pub fn decode(mode: DisplayMode, records: Vec<Value>) -> AppResult<Self> {
        Ok(match mode {
            DisplayMode::Beauty => Recommendations::Beauty(decode_records(records)?),
            DisplayMode::Legacy => Recommendations::Legacy(decode_records(records)?),
        })
    }

    pub fn mode(&self) -> DisplayMode {
        match self {
            Recommendations::Beauty(_) => DisplayMode::Beauty,
            Recommendations::Legacy(_) => DisplayMode::Legacy,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Recommendations::Beauty(records) => records.len(),
            Recommendations::Legacy(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body of `POST /recommend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub summary: Summary,
    pub top_k: u32,
    pub language: String,
}

/// Response of `POST /recommend`.
///
/// Records are kept raw here; the caller decides which shape to decode them as.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendResponse {
    #[serde(default)]
    pub recommendations: Option<Vec<Value>>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RecommendResponse {
    /// Takes the records, treating an absent list as empty
    pub fn into_records(self) -> Vec<Value> {
        self.recommendations.unwrap_or_default()
    }
}
