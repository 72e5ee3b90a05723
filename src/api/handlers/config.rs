//! Settings handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::api::{AppState, Envelope, Payload};
use crate::domain::{ApiSettings, SettingsPatch};

const SAVED: &str = "保存成功";
const SAVE_FAILED: &str = "保存失败";

/// GET /api/config - Masked affiliate settings.
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<Envelope<ApiSettings>> {
    Json(Envelope::ok(state.settings.get().await))
}

/// POST /api/config - Partial settings update.
pub async fn set_config(
    State(state): State<Arc<AppState>>,
    Payload(patch): Payload<SettingsPatch>,
) -> Json<Envelope<()>> {
    match state.settings.update(&patch).await {
        Ok(()) => Json(Envelope::message(SAVED)),
        Err(_) => Json(Envelope::failure(SAVE_FAILED)),
    }
}
