//! Best-effort calorie lookup against the Open Food Facts product search.
//!
//! Failures never propagate: every outcome collapses into a [`CalorieInfo`].

use crate::config::NutritionConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::{fmt, time::Duration};
use thiserror::Error;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum NutritionError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalorieInfo {
    /// Energy per 100g, already formatted.
    Found(String),
    NotFound,
    Error,
}

impl CalorieInfo {
    pub fn outcome(&self) -> &'static str {
        match self {
            CalorieInfo::Found(_) => "found",
            CalorieInfo::NotFound => "not_found",
            CalorieInfo::Error => "error",
        }
    }
}

impl fmt::Display for CalorieInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalorieInfo::Found(value) => write!(f, "{} calories", value),
            CalorieInfo::NotFound => f.write_str("Calories not found"),
            CalorieInfo::Error => f.write_str("Error fetching calories"),
        }
    }
}

#[async_trait]
pub trait CalorieLookup: Send + Sync + 'static {
    async fn lookup(&self, label: &str) -> CalorieInfo;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(default)]
    nutriments: Option<Nutriments>,
}

#[derive(Debug, Deserialize)]
struct Nutriments {
    #[serde(rename = "energy-kcal_100g", default)]
    energy_kcal_100g: Option<Value>,
}

/// Calories per 100g of the first product in a search response.
pub fn calories_from_search(body: &Value) -> CalorieInfo {
    let response = match SearchResponse::deserialize(body) {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Malformed nutrition search response: {}", e);
            return CalorieInfo::Error;
        }
    };

    response
        .products
        .into_iter()
        .next()
        .and_then(|product| product.nutriments)
        .and_then(|nutriments| nutriments.energy_kcal_100g)
        .and_then(|energy| format_energy(&energy))
        .map(CalorieInfo::Found)
        .unwrap_or(CalorieInfo::NotFound)
}

fn format_energy(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Some(integer.to_string())
            } else if let Some(integer) = number.as_u64() {
                Some(integer.to_string())
            } else {
                let float = number.as_f64()?;
                if float.fract() == 0.0 {
                    Some(format!("{:.0}", float))
                } else {
                    Some(float.to_string())
                }
            }
        }
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

pub struct NutritionClient {
    client: reqwest::Client,
    search_url: String,
}

impl NutritionClient {
    pub fn new(nutrition_config: &NutritionConfig) -> Result<Self, NutritionError> {
        let mut builder = reqwest::Client::builder().user_agent(&nutrition_config.user_agent);
        if let Some(timeout_ms) = nutrition_config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(NutritionError::ClientBuild)?;

        Ok(Self {
            client,
            search_url: nutrition_config.search_url.clone(),
        })
    }

    async fn search(&self, label: &str) -> Result<Value, NutritionError> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("search_terms", label),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl CalorieLookup for NutritionClient {
    #[instrument(skip(self))]
    async fn lookup(&self, label: &str) -> CalorieInfo {
        match self.search(label).await {
            Ok(body) => calories_from_search(&body),
            Err(e) => {
                tracing::warn!("Nutrition lookup for {} failed: {}", label, e);
                CalorieInfo::Error
            }
        }
    }
}
