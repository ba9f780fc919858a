// Typed records
//
// Accessors return any `DeserializeOwned` type, `serde_json::Value` included.
// These structs cover the fields most callers read on the core resources;
// everything else lands in `extra`. The API is loose about flag encodings
// (`true`, `1`, `"1"`), so booleans go through `flag`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ── Account & users ──────────────────────────────────────────────────

/// Record from `account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub active: bool,
    #[serde(default)]
    pub alternative_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Record from `user`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Operations ───────────────────────────────────────────────────────

/// Record from `advertiser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advertiser {
    pub advertiser_id: i64,
    #[serde(default)]
    pub advertiser_name: Option<String>,
    #[serde(default)]
    pub conversion_method_id: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Record from `campaign`.
///
/// Dates are kept as the API's `YYYY-MM-DD HH:MM:SS` strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub campaign_id: i64,
    #[serde(default)]
    pub advertiser_id: Option<i64>,
    #[serde(default)]
    pub campaign_name: Option<String>,
    #[serde(default)]
    pub campaign_budget: Option<f64>,
    /// 0 = spend, 1 = impressions, 2 = multiplier on spend
    #[serde(default)]
    pub budget_type: Option<i32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Record from `line_item`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub line_item_id: i64,
    #[serde(default)]
    pub campaign_id: Option<i64>,
    #[serde(default)]
    pub advertiser_id: Option<i64>,
    #[serde(default)]
    pub line_item_type_id: Option<i64>,
    #[serde(default)]
    pub line_item_name: Option<String>,
    #[serde(default)]
    pub line_item_budget: Option<f64>,
    #[serde(default)]
    pub budget_type: Option<i32>,
    #[serde(default)]
    pub bidding: Option<Value>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Creatives & segments ─────────────────────────────────────────────

/// Record from `creative`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creative {
    pub creative_id: i64,
    #[serde(default)]
    pub advertiser_id: Option<i64>,
    #[serde(default)]
    pub creative_name: Option<String>,
    #[serde(default)]
    pub creative_type: Option<i32>,
    #[serde(default)]
    pub creative_template_id: Option<i64>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default, deserialize_with = "flag")]
    pub secure: bool,
    #[serde(default, deserialize_with = "flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Record from `segment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub segment_id: i64,
    #[serde(default)]
    pub segment_key: Option<String>,
    #[serde(default)]
    pub segment_name: Option<String>,
    #[serde(default)]
    pub segment_description: Option<String>,
    #[serde(default)]
    pub cpm_cost: Option<f64>,
    /// Days a user stays in the segment.
    #[serde(default)]
    pub ttl_days: Option<i32>,
    #[serde(default, deserialize_with = "flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Helpers ──────────────────────────────────────────────────────────

/// Accept `true`/`false`, `0`/`1`, `"true"`/`"1"` and `null` (false).
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    use serde::de::Error as _;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v.abs() > f64::EPSILON)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag value '{other}'"))),
        },
        other => Err(D::Error::custom(format!("invalid flag value {other}"))),
    }
}
