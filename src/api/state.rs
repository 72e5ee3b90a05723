//! Shared state for the API server.

use std::sync::Arc;

use crate::affiliate::{AffiliateApi, CouponSearch};
use crate::goods::GoodsRepository;
use crate::settings::SettingsManager;
use crate::storage::DocumentStore;

/// Shared state for the API server.
pub struct AppState {
    /// Affiliate credentials.
    pub settings: SettingsManager,
    /// Goods collection.
    pub goods: GoodsRepository,
    /// Remote coupon lookups.
    pub search: CouponSearch,
}

impl AppState {
    /// Wires the services over one document store and one affiliate client.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        api: Arc<dyn AffiliateApi>,
        default_gateway_url: String,
    ) -> Self {
        let settings = SettingsManager::new(store.clone());

        Self {
            goods: GoodsRepository::new(store),
            search: CouponSearch::new(settings.clone(), api, default_gateway_url),
            settings,
        }
    }
}
