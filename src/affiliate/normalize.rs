//! Maps gateway item payloads onto the simplified quote shape.

use serde_json::Value;

use crate::domain::Quote;
use crate::domain::value::{first_truthy, is_truthy, to_float, to_integer, to_plain_string};

/// Field carrying the item (or item list) in both search and lookup responses.
const ITEM_FIELD: &str = "n_tbk_item";

/// Field the router nests the item field under.
const RESULTS_FIELD: &str = "results";

const DETAIL_URL_PREFIX: &str = "https://detail.tmall.com/item.htm?id=";

/// Locates the first item in an unwrapped gateway response.
///
/// The item field may sit at the top level or under `results`, and may hold
/// a single object or a list.
pub fn find_item(response: &Value) -> Option<&Value> {
    let node = response
        .get(ITEM_FIELD)
        .filter(|v| is_truthy(v))
        .or_else(|| {
            response
                .get(RESULTS_FIELD)
                .and_then(|results| results.get(ITEM_FIELD))
                .filter(|v| is_truthy(v))
        })?;

    match node {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

/// Builds a quote from one gateway item. Missing numbers become zero.
pub fn normalize_item(item: &Value) -> Quote {
    let num_iid = item.get("num_iid");
    let final_price = item.get("zk_final_price");
    let reserve_price = item.get("reserve_price");
    let coupon_amount = item.get("coupon_amount");

    let coupon_price = match final_price.filter(|v| is_truthy(v)) {
        Some(final_price) => {
            let amount = first_truthy([coupon_amount]).and_then(to_float).unwrap_or(0.0);
            to_float(final_price)
                .map(|price| round_to_cents(price - amount))
                .unwrap_or(0.0)
        }
        None => 0.0,
    };

    let taobao_url = match first_truthy([item.get("item_url")]) {
        Some(url) => to_plain_string(url),
        None => format!(
            "{}{}",
            DETAIL_URL_PREFIX,
            num_iid.map(to_plain_string).unwrap_or_default()
        ),
    };

    Quote {
        id: num_iid.cloned(),
        title: item.get("title").cloned(),
        image: item.get("pict_url").cloned(),
        price: first_truthy([final_price, reserve_price])
            .and_then(to_float)
            .unwrap_or(0.0),
        original_price: first_truthy([reserve_price]).and_then(to_float).unwrap_or(0.0),
        coupon_price,
        coupon_amount: first_truthy([coupon_amount]).and_then(to_float).unwrap_or(0.0),
        sales: first_truthy([item.get("volume")])
            .and_then(to_integer)
            .unwrap_or(0),
        taobao_url,
        coupon_info: item.get("coupon_info").cloned(),
    }
}

/// Formats to two decimals, then reads the text back as a float.
fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(0.0)
}
