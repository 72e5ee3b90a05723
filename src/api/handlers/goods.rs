//! Goods handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::{AppState, Envelope, Payload};
use crate::domain::{GoodsEntry, GoodsItem, GoodsPage};
use crate::goods::GoodsError;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;

const CREATED: &str = "添加成功";
const CREATE_FAILED: &str = "添加失败";
const UPDATED: &str = "更新成功";
const UPDATE_FAILED: &str = "更新失败";
const DELETED: &str = "删除成功";
const DELETE_FAILED: &str = "删除失败";
const NOT_FOUND: &str = "商品不存在";
const NOT_AN_OBJECT: &str = "请求体必须是JSON对象";

/// Pagination query, kept as text so malformed values fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        parse_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

fn into_fields(body: Value) -> Option<Map<String, Value>> {
    match body {
        Value::Object(fields) => Some(fields),
        _ => None,
    }
}

/// GET /api/goods - Paginated full list.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Json<Envelope<GoodsPage>> {
    Json(Envelope::ok(state.goods.list(query.page(), query.page_size()).await))
}

/// GET /api/goods/hot - Paginated list of entries flagged `isHot`.
pub async fn list_hot(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Json<Envelope<GoodsPage>> {
    Json(Envelope::ok(
        state.goods.list_hot(query.page(), query.page_size()).await,
    ))
}

/// POST /api/goods - Create an item.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Payload(body): Payload<Value>,
) -> Json<Envelope<GoodsItem>> {
    let Some(fields) = into_fields(body) else {
        return Json(Envelope::failure(NOT_AN_OBJECT));
    };

    match state.goods.create(fields).await {
        Ok(item) => Json(Envelope::ok_with(CREATED, item)),
        Err(_) => Json(Envelope::failure(CREATE_FAILED)),
    }
}

/// PUT /api/goods/{id} - Merge fields into an item.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Payload(body): Payload<Value>,
) -> Json<Envelope<GoodsEntry>> {
    let Some(patch) = into_fields(body) else {
        return Json(Envelope::failure(NOT_AN_OBJECT));
    };

    match state.goods.update(&id, patch).await {
        Ok(entry) => Json(Envelope::ok_with(UPDATED, entry)),
        Err(GoodsError::NotFound(_)) => Json(Envelope::failure(NOT_FOUND)),
        Err(GoodsError::Storage(_)) => Json(Envelope::failure(UPDATE_FAILED)),
    }
}

/// DELETE /api/goods/{id} - Remove an item.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<Envelope<()>> {
    match state.goods.delete(&id).await {
        Ok(()) => Json(Envelope::message(DELETED)),
        Err(GoodsError::NotFound(_)) => Json(Envelope::failure(NOT_FOUND)),
        Err(GoodsError::Storage(_)) => Json(Envelope::failure(DELETE_FAILED)),
    }
}
