use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A loosely typed value the recommender accepts as either a number or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Parses trimmed text as a finite number, keeping the text otherwise.
    ///
    /// `"inf"` and `"NaN"` parse as floats but are not numbers a JSON body can carry,
    /// so they stay text.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Scalar::Number(value),
            _ => Scalar::Text(trimmed.to_string()),
        }
    }

    /// `0` or the empty string, the values a display treats as "not given"
    pub fn is_zero_or_empty(&self) -> bool {
        match self {
            Scalar::Number(value) => *value == 0.0,
            Scalar::Text(text) => text.is_empty(),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // f64's Display drops the fraction of whole numbers (500.0 -> "500")
            Scalar::Number(value) => write!(f, "{}", value),
            Scalar::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Sparse description of the user's stated preferences.
///
/// Only attributes whose form field was filled in are serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Summary {
    /// True when no attribute was provided
    pub fn is_empty(&self) -> bool {
        *self == Summary::default()
    }
}

/// Raw form fields as posted by the page, keyed by their input names
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    #[serde(rename = "skin-type", default)]
    pub skin_type: Option<String>,
    #[serde(rename = "hair-type", default)]
    pub hair_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "top-k", default)]
    pub top_k: Option<String>,
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl FormInput {
    /// Builds the summary, omitting every field left blank
    pub fn summary(&self) -> Summary {
        Summary {
            skin_type: non_empty(&self.skin_type),
            hair_type: non_empty(&self.hair_type),
            category: non_empty(&self.category),
            problem: non_empty(&self.problem),
            budget: non_empty(&self.budget).map(|budget| Scalar::parse(&budget)),
            age: non_empty(&self.age),
            gender: non_empty(&self.gender),
        }
    }

    /// Requested result count, or `default` when missing or not an integer
    pub fn top_k(&self, default: u32) -> u32 {
        non_empty(&self.top_k)
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(default)
    }

    /// Selected language code, or `default` when blank
    pub fn language(&self, default: &str) -> String {
        non_empty(&self.language).unwrap_or_else(|| default.to_string())
    }
}
