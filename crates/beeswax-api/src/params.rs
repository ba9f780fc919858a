// Request parameters
//
// Accessors build a single flat mapping of field name -> value and hand it to
// the session either as a query string (GET / PUT / DELETE) or as a JSON body
// (POST). `Params` is that mapping.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Error;

/// Flat field-name -> value mapping sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build params from any serializable struct or map.
    ///
    /// Fails if `value` does not serialize to a JSON object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        match serde_json::to_value(value) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(Error::protocol(format!(
                "request parameters must be an object, got {other}"
            ))),
            Err(e) => Err(Error::protocol(format!(
                "failed to serialize request parameters: {e}"
            ))),
        }
    }

    /// Set `key`, replacing any previous value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` only when `value` is `Some`.
    pub fn with_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Move the value stored under `from` to `to`, if present.
    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.0.remove(from) {
            self.0.insert(to.to_owned(), value);
        }
    }

    /// Merge `other` into `self`; keys already in `self` win.
    pub(crate) fn merge_under(mut self, other: Params) -> Self {
        for (key, value) in other.0 {
            self.0.entry(key).or_insert(value);
        }
        self
    }

    /// Flatten into query-string pairs.
    ///
    /// `null` values are dropped, arrays repeat their key once per element,
    /// nested objects are sent as JSON text.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    pairs.extend(
                        items
                            .iter()
                            .filter(|item| !item.is_null())
                            .map(|item| (key.clone(), query_value(item))),
                    );
                }
                other => pairs.push((key.clone(), query_value(other))),
            }
        }
        pairs
    }

    /// The JSON object sent as a POST body.
    pub fn into_body(self) -> Value {
        Value::Object(self.0)
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn scalars_flatten_to_strings() {
        let params = Params::new()
            .with("campaign_id", 62)
            .with("active", true)
            .with("campaign_name", "Spring");
        let mut query = params.to_query();
        query.sort();
        assert_eq!(
            query,
            pairs(&[("active", "true"), ("campaign_id", "62"), ("campaign_name", "Spring")])
        );
    }

    #[test]
    fn nulls_are_dropped_and_arrays_repeat() {
        let params = Params::new()
            .with("end_date", Value::Null)
            .with("continents", json!(["NAM", null, "EUR"]));
        assert_eq!(params.to_query(), pairs(&[("continents", "NAM"), ("continents", "EUR")]));
    }

    #[test]
    fn nested_objects_are_json_text() {
        let params = Params::new().with("frequency_cap", json!({ "impressions": 3 }));
        assert_eq!(params.to_query(), pairs(&[("frequency_cap", r#"{"impressions":3}"#)]));
    }

    #[test]
    fn with_opt_skips_none() {
        let params = Params::new()
            .with_opt("notes", None::<&str>)
            .with_opt("alternative_id", Some("ext-1"));
        assert!(!params.contains("notes"));
        assert_eq!(params.get("alternative_id"), Some(&json!("ext-1")));
    }

    #[test]
    fn rename_moves_value() {
        let mut params = Params::new().with("is_global", false);
        params.rename("is_global", "global");
        assert_eq!(params.into_body(), json!({ "global": false }));
    }

    #[test]
    fn merge_under_keeps_existing_keys() {
        let params = Params::new()
            .with("account_id", 4)
            .merge_under(Params::new().with("account_id", 9).with("active", true));
        assert_eq!(params.into_body(), json!({ "account_id": 4, "active": true }));
    }

    #[test]
    fn from_serialize_requires_an_object() {
        #[derive(Serialize)]
        struct Filter {
            advertiser_id: i64,
        }
        let params = Params::from_serialize(&Filter { advertiser_id: 7 }).unwrap();
        assert_eq!(params.get("advertiser_id"), Some(&json!(7)));
        assert!(Params::from_serialize(&[1, 2]).is_err());
    }
}
