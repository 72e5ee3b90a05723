//! Normalized affiliate quote.

use serde::Serialize;
use serde_json::Value;

/// Quote is the simplified view of one product returned by an affiliate search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Item id as reported by the gateway (number or string).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// Main picture URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    /// Current selling price.
    pub price: f64,
    /// List price before discounts.
    pub original_price: f64,
    /// Price after applying the coupon, two decimals.
    pub coupon_price: f64,
    pub coupon_amount: f64,
    /// Recent sales volume.
    pub sales: i64,
    /// Item page, falling back to the detail page built from the id.
    pub taobao_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_info: Option<Value>,
}
