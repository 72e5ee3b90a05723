//! Goods listing domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value::{is_truthy, to_plain_string};

/// Keys owned by the service; caller-supplied values for them are dropped.
pub const SYSTEM_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// GoodsItem is a product listing: caller-defined fields plus system fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsItem {
    /// Unique identifier, assigned at creation and never changed.
    pub id: String,
    /// ISO-8601 creation time.
    #[serde(default)]
    pub created_at: String,
    /// ISO-8601 time of the last update, absent until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Everything else the caller sent.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GoodsItem {
    /// Creates an item from caller fields, ignoring any system keys among them.
    pub fn new(id: String, fields: Map<String, Value>, created_at: String) -> Self {
        Self {
            id,
            created_at,
            updated_at: None,
            fields: strip_system_fields(fields),
        }
    }

    /// Shallow-merges `patch` over the caller fields and stamps `updated_at`.
    pub fn apply(&mut self, patch: Map<String, Value>, updated_at: String) {
        for (key, value) in strip_system_fields(patch) {
            self.fields.insert(key, value);
        }
        self.updated_at = Some(updated_at);
    }

    /// Returns true when the `isHot` field is truthy.
    pub fn is_hot(&self) -> bool {
        self.fields.get("isHot").is_some_and(is_truthy)
    }
}

fn strip_system_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    for key in SYSTEM_FIELDS {
        fields.remove(key);
    }
    fields
}

/// GoodsEntry is one element of the stored collection.
///
/// Elements that do not have the shape of a [`GoodsItem`] (a numeric id, a
/// non-string timestamp) are carried as raw JSON and written back as they were.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GoodsEntry {
    Item(GoodsItem),
    Raw(Value),
}

impl GoodsEntry {
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<GoodsItem>(value.clone()) {
            Ok(item) => Self::Item(item),
            Err(_) => Self::Raw(value),
        }
    }

    /// Returns the id as text; raw entries without one have none.
    pub fn id(&self) -> Option<String> {
        match self {
            Self::Item(item) => Some(item.id.clone()),
            Self::Raw(value) => value
                .get("id")
                .filter(|id| !id.is_null())
                .map(to_plain_string),
        }
    }

    /// Returns a caller field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Item(item) => item.fields.get(key),
            Self::Raw(value) => value.get(key),
        }
    }

    pub fn is_hot(&self) -> bool {
        self.get("isHot").is_some_and(is_truthy)
    }

    /// Merges `patch` like [`GoodsItem::apply`].
    ///
    /// Returns false for raw entries that are not JSON objects.
    pub fn apply(&mut self, patch: Map<String, Value>, updated_at: String) -> bool {
        match self {
            Self::Item(item) => {
                item.apply(patch, updated_at);
                true
            }
            Self::Raw(Value::Object(fields)) => {
                for (key, value) in strip_system_fields(patch) {
                    fields.insert(key, value);
                }
                fields.insert("updatedAt".to_string(), Value::String(updated_at));
                true
            }
            Self::Raw(_) => false,
        }
    }
}

impl From<GoodsItem> for GoodsEntry {
    fn from(item: GoodsItem) -> Self {
        Self::Item(item)
    }
}

/// GoodsPage is one pagination window over a goods collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsPage<T = GoodsEntry> {
    /// Entries inside the window.
    pub list: Vec<T>,
    /// Size of the whole (filtered) collection.
    pub total: usize,
    /// Requested page, 1-based.
    pub page: i64,
    /// Requested window size.
    pub page_size: i64,
}

impl<T> GoodsPage<T> {
    /// Cuts the window `[(page-1)*page_size, page*page_size)` out of `items`.
    ///
    /// A page or page size below 1 yields an empty window.
    pub fn slice(items: Vec<T>, page: i64, page_size: i64) -> Self {
        let total = items.len();

        let list = if page < 1 || page_size < 1 {
            Vec::new()
        } else {
            let start = (page - 1).saturating_mul(page_size);
            let start = usize::try_from(start).unwrap_or(usize::MAX);
            let take = usize::try_from(page_size).unwrap_or(usize::MAX);
            items.into_iter().skip(start).take(take).collect()
        };

        Self {
            list,
            total,
            page,
            page_size,
        }
    }
}
