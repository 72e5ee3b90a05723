//! HTTP client for the Taobao Open Platform (TOP) router.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{FixedOffset, Utc};
use hmac::{Hmac, Mac};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, warn};

use crate::affiliate::{AffiliateApi, AffiliateError, ApiError, Credentials, Result};

/// Protocol version sent with every call.
const API_VERSION: &str = "2.0";

const SIGN_METHOD: &str = "hmac-sha256";

/// The router reports timestamps in China Standard Time.
const GATEWAY_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// HTTP client for the TOP router.
/// Handles request signing, response unwrapping, and error handling.
pub struct TopClient {
    http_client: HttpClient,
}

impl TopClient {
    /// Creates a new client; `timeout` of `None` leaves calls unbounded.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
        })
    }

    /// Creates an HMAC-SHA256 signature over the sorted parameters.
    ///
    /// Signature payload: key1value1key2value2... with keys in ASCII order,
    /// encoded as uppercase hex.
    pub(crate) fn sign(secret: &str, params: &BTreeMap<String, String>) -> String {
        let payload: String = params
            .iter()
            .map(|(k, v)| format!("{}{}", k, v))
            .collect();

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());

        hex::encode_upper(mac.finalize().into_bytes())
    }

    /// Returns the key under which the router wraps the result of `method`.
    ///
    /// "taobao.tbk.item.get" -> "tbk_item_get_response"
    pub(crate) fn response_key(method: &str) -> String {
        let name = method.strip_prefix("taobao.").unwrap_or(method);
        format!("{}_response", name.replace('.', "_"))
    }

    fn timestamp() -> String {
        const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

        let now = Utc::now();
        match FixedOffset::east_opt(GATEWAY_UTC_OFFSET_SECS) {
            Some(offset) => now.with_timezone(&offset).format(FORMAT).to_string(),
            None => now.format(FORMAT).to_string(),
        }
    }

    /// Builds the signed, form-encoded request body.
    fn signed_body(
        credentials: &Credentials,
        method: &str,
        params: &BTreeMap<String, String>,
    ) -> String {
        let mut all = params.clone();
        all.insert("method".to_string(), method.to_string());
        all.insert("app_key".to_string(), credentials.app_key.clone());
        all.insert("timestamp".to_string(), Self::timestamp());
        all.insert("format".to_string(), "json".to_string());
        all.insert("v".to_string(), API_VERSION.to_string());
        all.insert("sign_method".to_string(), SIGN_METHOD.to_string());

        let signature = Self::sign(&credentials.app_secret, &all);
        all.insert("sign".to_string(), signature);

        all.iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Creates an AffiliateError from a failed HTTP exchange.
    fn parse_error_response(&self, status: StatusCode, body: &[u8]) -> AffiliateError {
        let api_err = match serde_json::from_slice::<Value>(body)
            .ok()
            .as_ref()
            .and_then(parse_gateway_error)
        {
            Some(err) => err,
            None => ApiError {
                code: status.as_u16().to_string(),
                message: String::from_utf8_lossy(body).to_string(),
            },
        };

        warn!(code = %api_err.code, message = %api_err.message, "affiliate api error");

        AffiliateError::Api(api_err)
    }
}

/// Reads an `error_response` envelope, preferring the detailed sub message.
fn parse_gateway_error(body: &Value) -> Option<ApiError> {
    #[derive(Deserialize)]
    struct ErrorResponse {
        code: Option<Value>,
        msg: Option<String>,
        sub_code: Option<String>,
        sub_msg: Option<String>,
    }

    let raw = body.get("error_response")?;
    let resp: ErrorResponse = serde_json::from_value(raw.clone()).ok()?;

    let code = resp
        .sub_code
        .or_else(|| resp.code.map(|c| crate::domain::value::to_plain_string(&c)))
        .unwrap_or_default();
    let message = resp
        .sub_msg
        .filter(|m| !m.is_empty())
        .or(resp.msg)
        .unwrap_or_else(|| raw.to_string());

    Some(ApiError { code, message })
}

#[async_trait]
impl AffiliateApi for TopClient {
    async fn execute(
        &self,
        credentials: &Credentials,
        method: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Value> {
        let body = Self::signed_body(credentials, method, params);

        debug!(method = %method, gateway = %credentials.gateway_url, "sending request");

        let response = self
            .http_client
            .post(&credentials.gateway_url)
            .header(
                "Content-Type",
                "application/x-www-form-urlencoded;charset=utf-8",
            )
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status.is_client_error() || status.is_server_error() {
            return Err(self.parse_error_response(status, &body));
        }

        let mut value: Value = serde_json::from_slice(&body)?;

        if let Some(err) = parse_gateway_error(&value) {
            warn!(code = %err.code, message = %err.message, "affiliate api error");
            return Err(err.into());
        }

        let key = Self::response_key(method);
        match value.get_mut(&key) {
            Some(inner) => Ok(inner.take()),
            None => Err(AffiliateError::MissingResponse(key)),
        }
    }
}
