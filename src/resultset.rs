//! Result wrappers for parsed API responses.
//!
//! The API returns either a bare entity (possibly nested under a `response`
//! key) or a paged collection wrapped in a `_embedded.<resourceType>`
//! envelope with a sibling `page` block. [`ResultSet`] is a single type
//! that always carries the data payload and an optional paging block.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination metadata from a paged collection envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Zero-based page index.
    #[serde(default)]
    pub number: u64,
    /// Requested page size.
    #[serde(default)]
    pub size: u64,
    /// Total elements across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u64,
}

/// A parsed API response: the data payload plus optional paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    data: Value,
    page: Option<PageInfo>,
}

impl ResultSet {
    /// Wraps a single-entity response.
    ///
    /// When the raw envelope nests the payload under a `response` key,
    /// that inner value carries the data.
    pub fn simple(response: Value) -> Self {
        let data = match response {
            Value::Object(mut map) if map.contains_key("response") => {
                map.remove("response").unwrap_or(Value::Null)
            }
            other => other,
        };
        Self { data, page: None }
    }

    /// Unwraps a paged collection response.
    ///
    /// The data payload is `_embedded.<kind>`; an enveloped response
    /// lacking the `_embedded` key yields an empty collection rather than
    /// an error. A bare array response is taken as the data directly (some
    /// list endpoints skip the envelope). The `page` block is parsed when
    /// present.
    pub fn paged(response: Value, kind: &str) -> Self {
        if let Value::Array(items) = response {
            return Self {
                data: Value::Array(items),
                page: None,
            };
        }
        let page = response
            .get("page")
            .and_then(|p| serde_json::from_value(p.clone()).ok());
        let data = response
            .get("_embedded")
            .and_then(|embedded| embedded.get(kind))
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        Self { data, page }
    }

    /// Returns the data payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Returns the paging block, if this was a paged response.
    pub fn page(&self) -> Option<&PageInfo> {
        self.page.as_ref()
    }

    /// Number of items: array length for collections, 0 for null,
    /// 1 for a single entity.
    pub fn len(&self) -> usize {
        match &self.data {
            Value::Array(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        }
    }

    /// Returns true if the payload holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the items of a collection payload.
    ///
    /// Non-array payloads yield an empty iterator; use [`data`](Self::data)
    /// for single-entity access.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        match &self.data {
            Value::Array(items) => items.iter(),
            _ => [].iter(),
        }
    }

    /// Consumes the wrapper and returns the data payload.
    pub fn into_inner(self) -> Value {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn paged_unwraps_embedded_collection() {
        let response = json!({
            "_embedded": {
                "webinars": [
                    {"webinarKey": "1"},
                    {"webinarKey": "2"}
                ]
            },
            "page": {"size": 100, "totalElements": 2, "totalPages": 1, "number": 0}
        });

        let set = ResultSet::paged(response, "webinars");
        assert_eq!(set.len(), 2);
        let page = set.page().unwrap();
        assert_eq!(page.number, 0);
        assert_eq!(page.size, 100);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn paged_without_embedded_is_empty_not_error() {
        let response = json!({
            "page": {"size": 100, "totalElements": 0, "totalPages": 0, "number": 0}
        });

        let set = ResultSet::paged(response, "webinars");
        assert!(set.is_empty());
        assert_eq!(set.data(), &json!([]));
        assert!(set.page().is_some());
    }

    #[test]
    fn paged_accepts_bare_array_response() {
        let set = ResultSet::paged(json!([{"registrantKey": "1"}]), "registrants");
        assert_eq!(set.len(), 1);
        assert!(set.page().is_none());
    }

    #[test]
    fn paged_with_wrong_kind_is_empty() {
        let response = json!({"_embedded": {"sessions": [{"sessionKey": "9"}]}});
        let set = ResultSet::paged(response, "webinars");
        assert!(set.is_empty());
    }

    #[test]
    fn simple_keeps_bare_entity() {
        let set = ResultSet::simple(json!({"webinarKey": "1", "subject": "intro"}));
        assert_eq!(set.len(), 1);
        assert_eq!(set.data()["subject"], "intro");
        assert!(set.page().is_none());
    }

    #[test]
    fn simple_unwraps_response_key() {
        let set = ResultSet::simple(json!({"response": {"registrantKey": "7"}}));
        assert_eq!(set.data()["registrantKey"], "7");
    }

    #[test]
    fn simple_null_is_empty() {
        let set = ResultSet::simple(Value::Null);
        assert!(set.is_empty());
    }

    #[test]
    fn iter_walks_collection_items() {
        let response = json!({"_embedded": {"webhooks": [{"webhookKey": "a"}, {"webhookKey": "b"}]}});
        let set = ResultSet::paged(response, "webhooks");
        let keys: Vec<&str> = set
            .iter()
            .filter_map(|item| item["webhookKey"].as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
