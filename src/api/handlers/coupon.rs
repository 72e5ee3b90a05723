//! Coupon search handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;

use crate::affiliate::{AffiliateError, SearchError, SearchKind};
use crate::api::{AppState, Envelope, Payload};
use crate::domain::Quote;
use crate::domain::value::to_plain_string;

const CONFIG_REQUIRED: &str = "请先配置淘宝API";
const NO_MATCH: &str = "未找到相关商品";
const SEARCH_FAILED: &str = "查询失败，请检查API配置";

/// Search request body.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// "link" for an item id lookup, anything else for a keyword search.
    #[serde(default, rename = "type")]
    pub kind: Value,
    /// Item id or query text; numbers are accepted as well.
    #[serde(default)]
    pub keyword: Value,
}

/// POST /api/coupon/search - Look up one product and its coupon.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Payload(req): Payload<SearchRequest>,
) -> Json<Envelope<Quote>> {
    let kind = SearchKind::parse(&to_plain_string(&req.kind));
    let keyword = to_plain_string(&req.keyword);

    match state.search.search(kind, &keyword).await {
        Ok(quote) => Json(Envelope::ok(quote)),
        Err(SearchError::MissingCredentials) => Json(Envelope::failure(CONFIG_REQUIRED)),
        Err(SearchError::NotFound) => Json(Envelope::failure(NO_MATCH)),
        Err(SearchError::Affiliate(e)) => Json(Envelope::failure(failure_message(&e))),
    }
}

/// Returns the underlying message of a remote failure, or a generic hint.
fn failure_message(err: &AffiliateError) -> String {
    let message = match err {
        AffiliateError::Api(api) => api.message.clone(),
        other => other.to_string(),
    };

    if message.trim().is_empty() {
        SEARCH_FAILED.to_string()
    } else {
        message
    }
}
