//! Coupon search: dispatches a keyword or item link to the gateway and
//! normalizes the first hit.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::affiliate::{AffiliateApi, AffiliateError, Credentials, find_item, normalize_item};
use crate::domain::Quote;
use crate::settings::SettingsManager;

/// Item lookup by id.
const ITEM_INFO_METHOD: &str = "taobao.tbk.item.info.get";

/// Item search by free-text query.
const ITEM_SEARCH_METHOD: &str = "taobao.tbk.item.get";

/// Response fields requested from both operations.
pub const ITEM_FIELDS: &str = "num_iid,title,pict_url,small_images,reserve_price,zk_final_price,user_type,provcity,item_url,volume,coupon_id,coupon_amount,coupon_start_time,coupon_end_time,coupon_remain_count,coupon_total_count,coupon_info";

const SEARCH_PAGE_NO: &str = "1";
const SEARCH_PAGE_SIZE: &str = "10";
const SEARCH_SORT: &str = "tk_total_sales_des";

/// Search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// App key or secret has not been stored yet.
    #[error("affiliate credentials are not configured")]
    MissingCredentials,

    /// The gateway answered without any item.
    #[error("no matching item found")]
    NotFound,

    #[error(transparent)]
    Affiliate(#[from] AffiliateError),
}

/// SearchKind selects the remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// The keyword is an item id.
    Link,
    /// The keyword is a free-text query.
    Keyword,
}

impl SearchKind {
    /// "link" selects item lookup; anything else is a keyword search.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "link" => SearchKind::Link,
            _ => SearchKind::Keyword,
        }
    }

    /// Returns the remote method and its business parameters.
    pub fn request(&self, keyword: &str) -> (&'static str, BTreeMap<String, String>) {
        let mut params = BTreeMap::new();
        params.insert("fields".to_string(), ITEM_FIELDS.to_string());

        match self {
            SearchKind::Link => {
                params.insert("num_iids".to_string(), keyword.to_string());
                (ITEM_INFO_METHOD, params)
            }
            SearchKind::Keyword => {
                params.insert("q".to_string(), keyword.to_string());
                params.insert("page_no".to_string(), SEARCH_PAGE_NO.to_string());
                params.insert("page_size".to_string(), SEARCH_PAGE_SIZE.to_string());
                params.insert("sort".to_string(), SEARCH_SORT.to_string());
                (ITEM_SEARCH_METHOD, params)
            }
        }
    }
}

/// CouponSearch runs single-shot searches against the affiliate gateway.
pub struct CouponSearch {
    settings: SettingsManager,
    api: Arc<dyn AffiliateApi>,
    default_url: String,
}

impl CouponSearch {
    pub fn new(settings: SettingsManager, api: Arc<dyn AffiliateApi>, default_url: String) -> Self {
        Self {
            settings,
            api,
            default_url,
        }
    }

    /// Searches once and returns the first matching item as a quote.
    pub async fn search(&self, kind: SearchKind, keyword: &str) -> Result<Quote, SearchError> {
        let settings = self.settings.load().await;
        if !settings.has_credentials() {
            return Err(SearchError::MissingCredentials);
        }

        let credentials = Credentials::from_settings(&settings, &self.default_url);
        let (method, params) = kind.request(keyword);

        let response = self
            .api
            .execute(&credentials, method, &params)
            .await
            .inspect_err(|e| error!(method = %method, error = %e, "Coupon search failed"))?;

        let item = find_item(&response).ok_or(SearchError::NotFound)?;
        let quote = normalize_item(item);

        info!(
            method = %method,
            id = ?quote.id,
            coupon_price = quote.coupon_price,
            "Coupon search matched"
        );
        Ok(quote)
    }
}
