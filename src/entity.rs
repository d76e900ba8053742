//! Shared behaviour of JSON-backed entities.

use crate::error::Result;
use serde_json::{Map, Value};

/// An entity built once from a JSON object and kept alongside its raw payload.
///
/// Besides the typed accessors each entity offers, the raw payload can be
/// queried by key, so fields added to the API later are still reachable.
///
/// ```
/// use semanticscholar::{JsonEntity, Paper};
/// use serde_json::json;
///
/// let paper = Paper::from_json(json!({
///     "paperId": "abc",
///     "title": "Computing Machinery and Intelligence",
///     "newApiField": 42
/// })).unwrap();
///
/// assert_eq!(paper.title(), Some("Computing Machinery and Intelligence"));
/// assert_eq!(paper["title"], "Computing Machinery and Intelligence");
/// assert_eq!(paper.get("newApiField"), Some(&json!(42)));
/// assert_eq!(paper.keys().count(), 3);
/// ```
pub trait JsonEntity: Sized {
    /// Build the entity from a decoded JSON value.
    ///
    /// Fails with [`SemanticScholarError::Parse`](crate::SemanticScholarError::Parse)
    /// when the value is not an object, a required key is missing, or a field
    /// has an unexpected type or format.
    fn from_json(value: Value) -> Result<Self>;

    /// The payload this entity was built from.
    fn raw_data(&self) -> &Map<String, Value>;

    /// Look up a raw field by its API name.
    fn get(&self, key: &str) -> Option<&Value> {
        self.raw_data().get(key)
    }

    /// API field names present in the payload, in response order.
    fn keys(&self) -> serde_json::map::Keys<'_> {
        self.raw_data().keys()
    }

    /// True when the payload carries `key`, even with a `null` value.
    fn contains_key(&self, key: &str) -> bool {
        self.raw_data().contains_key(key)
    }
}
