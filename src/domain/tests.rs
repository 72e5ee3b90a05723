//! Tests for domain models.

use super::value::{first_truthy, is_truthy, to_float, to_integer, to_plain_string};
use super::*;
use serde_json::{Map, Value, json};

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn item(id: &str, extra: Value) -> GoodsItem {
    GoodsItem::new(id.to_string(), fields(extra), "2024-01-01T00:00:00.000Z".to_string())
}

// ==================== Value coercion tests ====================

#[test]
fn test_truthiness() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!(0.0)));
    assert!(!is_truthy(&json!("")));

    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!("0")));
    assert!(is_truthy(&json!("false")));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
}

#[test]
fn test_first_truthy_skips_empty_values() {
    let empty = json!("");
    let price = json!("12.50");
    let picked = first_truthy([Some(&empty), None, Some(&price)]);
    assert_eq!(picked, Some(&price));

    assert_eq!(first_truthy([None, Some(&empty)]), None);
}

#[test]
fn test_to_float_from_strings_and_numbers() {
    assert_eq!(to_float(&json!("100.00")), Some(100.0));
    assert_eq!(to_float(&json!(" 19.9元")), Some(19.9));
    assert_eq!(to_float(&json!("-3")), Some(-3.0));
    assert_eq!(to_float(&json!("1e2")), Some(100.0));
    assert_eq!(to_float(&json!(42.5)), Some(42.5));
    assert_eq!(to_float(&json!("abc")), None);
    assert_eq!(to_float(&json!(".")), None);
    assert_eq!(to_float(&json!(true)), None);
}

#[test]
fn test_to_integer_truncates() {
    assert_eq!(to_integer(&json!("1234")), Some(1234));
    assert_eq!(to_integer(&json!("12.9")), Some(12));
    assert_eq!(to_integer(&json!(99.99)), Some(99));
    assert_eq!(to_integer(&json!(7)), Some(7));
    assert_eq!(to_integer(&json!("x1")), None);
}

#[test]
fn test_to_plain_string() {
    assert_eq!(to_plain_string(&json!(123456)), "123456");
    assert_eq!(to_plain_string(&json!("abc")), "abc");
    assert_eq!(to_plain_string(&json!(null)), "");
}

// ==================== Settings tests ====================

#[test]
fn test_masked_hides_secret() {
    let settings = ApiSettings {
        api_url: "https://gw.example".to_string(),
        app_key: "key".to_string(),
        app_secret: "top-secret".to_string(),
    };

    let masked = settings.masked();
    assert_eq!(masked.app_secret, SECRET_MASK);
    assert_eq!(masked.app_key, "key");
    assert_eq!(masked.api_url, "https://gw.example");
}

#[test]
fn test_merge_keeps_values_for_empty_or_missing_fields() {
    let current = ApiSettings {
        api_url: "u".to_string(),
        app_key: "k".to_string(),
        app_secret: "s".to_string(),
    };
    let patch = SettingsPatch {
        api_url: None,
        app_key: Some(String::new()),
        app_secret: Some("s2".to_string()),
    };

    let merged = current.merge(&patch);
    assert_eq!(merged.api_url, "u");
    assert_eq!(merged.app_key, "k");
    assert_eq!(merged.app_secret, "s2");
}

#[test]
fn test_settings_accept_legacy_field_names() {
    let settings: ApiSettings = serde_json::from_value(json!({
        "taobaoApiUrl": "http://gw",
        "taobaoAppKey": "k",
        "taobaoAppSecret": "s"
    }))
    .unwrap();

    assert_eq!(settings.api_url, "http://gw");
    assert!(settings.has_credentials());

    let serialized = serde_json::to_value(&settings).unwrap();
    assert_eq!(serialized, json!({"apiUrl": "http://gw", "appKey": "k", "appSecret": "s"}));
}

#[test]
fn test_patch_reads_numbers_as_text() {
    let patch: SettingsPatch =
        serde_json::from_value(json!({"appKey": 123, "appSecret": null, "apiUrl": ["x"]})).unwrap();

    assert_eq!(patch.app_key.as_deref(), Some("123"));
    assert_eq!(patch.app_secret, None);
    assert_eq!(patch.api_url, None);
}

#[test]
fn test_has_credentials_requires_both() {
    let mut settings = ApiSettings::default();
    settings.app_key = "k".to_string();
    assert!(!settings.has_credentials());
    settings.app_secret = "s".to_string();
    assert!(settings.has_credentials());
}

// ==================== Goods item tests ====================

#[test]
fn test_new_item_drops_system_fields() {
    let goods = item(
        "1",
        json!({"id": "forged", "createdAt": "x", "updatedAt": "y", "name": "Widget"}),
    );

    assert_eq!(goods.id, "1");
    assert_eq!(goods.created_at, "2024-01-01T00:00:00.000Z");
    assert_eq!(goods.updated_at, None);
    assert_eq!(goods.fields.len(), 1);
    assert_eq!(goods.fields["name"], json!("Widget"));
}

#[test]
fn test_apply_merges_and_stamps_update() {
    let mut goods = item("1", json!({"name": "Widget", "price": 10}));
    goods.apply(
        fields(json!({"price": 12, "id": "other"})),
        "2024-02-01T00:00:00.000Z".to_string(),
    );

    assert_eq!(goods.id, "1");
    assert_eq!(goods.fields["name"], json!("Widget"));
    assert_eq!(goods.fields["price"], json!(12));
    assert_eq!(goods.updated_at.as_deref(), Some("2024-02-01T00:00:00.000Z"));
}

#[test]
fn test_item_serializes_flat() {
    let goods = item("1", json!({"name": "Widget", "isHot": true}));
    let value = serde_json::to_value(&goods).unwrap();

    assert_eq!(
        value,
        json!({
            "id": "1",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "name": "Widget",
            "isHot": true
        })
    );

    let back: GoodsItem = serde_json::from_value(value).unwrap();
    assert_eq!(back, goods);
}

#[test]
fn test_is_hot() {
    assert!(item("1", json!({"isHot": true})).is_hot());
    assert!(item("1", json!({"isHot": 1})).is_hot());
    assert!(item("1", json!({"isHot": "yes"})).is_hot());
    assert!(!item("1", json!({"isHot": false})).is_hot());
    assert!(!item("1", json!({"isHot": 0})).is_hot());
    assert!(!item("1", json!({"name": "plain"})).is_hot());
}

// ==================== Goods entry tests ====================

#[test]
fn test_entry_parses_well_formed_item() {
    let entry = GoodsEntry::from_value(json!({
        "id": "1",
        "createdAt": "2024-01-01T00:00:00.000Z",
        "name": "Widget"
    }));

    assert_eq!(entry, GoodsEntry::Item(item("1", json!({"name": "Widget"}))));
    assert_eq!(entry.id().as_deref(), Some("1"));
}

#[test]
fn test_entry_keeps_unrecognized_shape_verbatim() {
    let raw = json!({"id": 42, "createdAt": 1700000000, "name": "numeric id", "isHot": 1});
    let entry = GoodsEntry::from_value(raw.clone());

    assert_eq!(entry, GoodsEntry::Raw(raw.clone()));
    assert_eq!(entry.id().as_deref(), Some("42"));
    assert_eq!(entry.get("name"), Some(&json!("numeric id")));
    assert!(entry.is_hot());
    assert_eq!(serde_json::to_value(&entry).unwrap(), raw);

    let scalar = GoodsEntry::from_value(json!("not an object"));
    assert_eq!(scalar.id(), None);
    assert!(!scalar.is_hot());
}

#[test]
fn test_entry_apply_on_raw_object() {
    let mut entry = GoodsEntry::from_value(json!({"id": 42, "price": 1}));

    assert!(entry.apply(
        fields(json!({"price": 2, "id": "forged"})),
        "2024-02-01T00:00:00.000Z".to_string()
    ));

    assert_eq!(
        serde_json::to_value(&entry).unwrap(),
        json!({"id": 42, "price": 2, "updatedAt": "2024-02-01T00:00:00.000Z"})
    );

    let mut scalar = GoodsEntry::from_value(json!(7));
    assert!(!scalar.apply(Map::new(), String::new()));
    assert_eq!(scalar, GoodsEntry::Raw(json!(7)));
}

// ==================== Pagination tests ====================

fn collection(n: usize) -> Vec<GoodsItem> {
    (0..n).map(|i| item(&i.to_string(), json!({}))).collect()
}

#[test]
fn test_slice_first_page() {
    let page = GoodsPage::slice(collection(25), 1, 10);
    assert_eq!(page.list.len(), 10);
    assert_eq!(page.list[0].id, "0");
    assert_eq!(page.total, 25);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
}

#[test]
fn test_slice_last_partial_page() {
    let page = GoodsPage::slice(collection(25), 3, 10);
    assert_eq!(page.list.len(), 5);
    assert_eq!(page.list[0].id, "20");
    assert_eq!(page.total, 25);
}

#[test]
fn test_slice_never_exceeds_page_size() {
    for page_no in 1..5 {
        for size in 1..12 {
            let page = GoodsPage::slice(collection(17), page_no, size);
            assert!(page.list.len() <= size as usize);
            assert_eq!(page.total, 17);
        }
    }
}

#[test]
fn test_slice_out_of_range_is_empty() {
    let page = GoodsPage::slice(collection(5), 4, 10);
    assert!(page.list.is_empty());
    assert_eq!(page.total, 5);
}

#[test]
fn test_slice_non_positive_inputs_are_empty() {
    assert!(GoodsPage::slice(collection(5), 0, 10).list.is_empty());
    assert!(GoodsPage::slice(collection(5), -1, 10).list.is_empty());
    assert!(GoodsPage::slice(collection(5), 1, 0).list.is_empty());
    assert!(GoodsPage::slice(collection(5), 1, -5).list.is_empty());

    let page = GoodsPage::slice(collection(5), -2, -3);
    assert_eq!(page.total, 5);
    assert_eq!(page.page, -2);
    assert_eq!(page.page_size, -3);
}

#[test]
fn test_slice_huge_page_does_not_overflow() {
    let page = GoodsPage::slice(collection(5), i64::MAX, i64::MAX);
    assert!(page.list.is_empty());
}
