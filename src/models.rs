use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use sqlx::FromRow;

/// A property listing, as stored in the `properties` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub unique_property_id: String,
    pub project_name: Option<String>,
    pub location: Option<String>,
    /// Price in INR
    pub price: Option<i64>,
    pub area: Option<String>,
    /// Bedroom category, e.g. "3BHK"
    pub property_type: Option<String>,
    pub pincode: Option<String>,
    pub landmark: Option<String>,
    pub amenities: Option<String>,
}

/// Sort preference inferred from the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            _ => None,
        }
    }
}

/// Price bounds and ordering applied by the relational filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceFilter {
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: Option<SortOrder>,
}

impl PriceFilter {
    /// Fails when both bounds are present and inverted.
    pub fn check(&self) -> crate::Result<()> {
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(crate::EstateRagError::InvalidFilter { min, max });
            }
        }
        Ok(())
    }
}

/// One property the model considers a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMatch {
    #[serde(deserialize_with = "lenient_required_string")]
    pub id: String,
    #[serde(
        rename = "projectName",
        default,
        deserialize_with = "lenient_string"
    )]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub area: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pincode: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub landmark: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub amenities: Option<String>,
}

/// Parsed output of the generation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAnswer {
    #[serde(default)]
    pub matching_projects: Vec<PropertyMatch>,
    #[serde(default)]
    pub unmatched_points: Vec<String>,
    pub explanation: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub min_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub max_price: Option<i64>,
    #[serde(default, deserialize_with = "lenient_sort")]
    pub sort_by: Option<SortOrder>,
}

impl StructuredAnswer {
    pub const fn price_filter(&self) -> PriceFilter {
        PriceFilter {
            min_price: self.min_price,
            max_price: self.max_price,
            sort_by: self.sort_by,
        }
    }
}

/// Retrieval metadata echoed back with a search response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub rank: usize,
    pub property_id: String,
    pub score: f32,
}

/// Final payload of `POST /search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub matching_projects: Vec<PropertyMatch>,
    pub unmatched_points: Vec<String>,
    pub explanation: String,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: Option<SortOrder>,
    /// Matches left after the price filter
    pub total_results: usize,
    pub total_retrieved: usize,
    pub retrieved_candidates: Vec<CandidateSummary>,
}

/// Count of listings per property type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTypeCount {
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub count: i64,
}

/// Aggregate statistics over the property store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyStats {
    pub total_properties: i64,
    pub average_price: Option<f64>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub property_types: Vec<PropertyTypeCount>,
}

/// Browse query for `GET /properties`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyListQuery {
    pub limit: i64,
    pub offset: i64,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

// Models answer with loosely typed JSON: pincodes as numbers, prices as
// "95 Lakh", sort keys in other casings. These accept what is unambiguous.

fn value_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value))
}

fn lenient_required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value_to_string(value) {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(serde::de::Error::custom("property id must be a non-empty value")),
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(Some(v))
            } else if let Some(v) = n.as_f64().filter(|v| v.fract() == 0.0 && v.is_finite()) {
                Ok(Some(v as i64))
            } else {
                Err(serde::de::Error::custom(format!(
                    "price must be a whole number, got {n}"
                )))
            }
        }
        serde_json::Value::String(s) if s.trim().is_empty() => Ok(None),
        serde_json::Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("price is not an integer: {s:?}"))),
        other => Err(serde::de::Error::custom(format!(
            "price must be a number, got {other}"
        ))),
    }
}

fn lenient_sort<'de, D>(deserializer: D) -> Result<Option<SortOrder>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(SortOrder::parse))
}
