//! Tests for config module.

use super::*;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

// ==================== Duration parsing tests ====================

#[test]
fn test_parse_duration_seconds() {
    let d = duration::parse_duration("30s").unwrap();
    assert_eq!(d, Duration::from_secs(30));
}

#[test]
fn test_parse_duration_bare_number_is_seconds() {
    let d = duration::parse_duration("15").unwrap();
    assert_eq!(d, Duration::from_secs(15));
}

#[test]
fn test_parse_duration_milliseconds() {
    let d = duration::parse_duration("250ms").unwrap();
    assert_eq!(d, Duration::from_millis(250));
}

#[test]
fn test_parse_duration_empty() {
    let d = duration::parse_duration("").unwrap();
    assert_eq!(d, Duration::ZERO);
}

#[test]
fn test_parse_duration_minutes_hours_and_fractions() {
    assert_eq!(duration::parse_duration("2m").unwrap(), Duration::from_secs(120));
    assert_eq!(duration::parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
    assert_eq!(duration::parse_duration(" 5 s ").unwrap(), Duration::from_secs(5));
}

#[test]
fn test_parse_duration_invalid_unit() {
    let result = duration::parse_duration("10x");
    assert_eq!(result, Err(duration::DurationError::Unit("10x".to_string())));
}

#[test]
fn test_parse_duration_invalid_number() {
    assert!(matches!(
        duration::parse_duration("-5s"),
        Err(duration::DurationError::Number(_))
    ));
    assert!(matches!(
        duration::parse_duration(".s"),
        Err(duration::DurationError::Number(_))
    ));
}

#[test]
fn test_parse_duration_overflow_is_an_error() {
    let result = duration::parse_duration("99999999999999999999h");
    assert!(matches!(result, Err(duration::DurationError::OutOfRange(_))));
}

#[test]
fn test_timeout_accepts_plain_number() {
    let yaml = r#"
app:
  name: coupon-admin
affiliate:
  timeout: 7
"#;
    let cfg = from_yaml(yaml).unwrap();
    assert_eq!(cfg.affiliate.request_timeout(), Some(Duration::from_secs(7)));
}

#[test]
fn test_timeout_out_of_range_fails_to_parse() {
    let yaml = r#"
app:
  name: coupon-admin
affiliate:
  timeout: 99999999999999999999h
"#;
    assert!(matches!(from_yaml(yaml), Err(ConfigError::Parse(_))));
}

// ==================== YAML field loading tests ====================

/// Parse config from YAML string (for testing).
fn from_yaml(yaml: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

#[test]
fn test_minimal_yaml_uses_defaults() {
    let yaml = r#"
app:
  name: coupon-admin
"#;
    let cfg = from_yaml(yaml).unwrap();

    assert_eq!(cfg.app.name, "coupon-admin");
    assert_eq!(cfg.app.env, "development");
    assert_eq!(cfg.app.log_level, None);
    assert_eq!(cfg.server.host, "0.0.0.0");
    assert_eq!(cfg.server.port, 3000);
    assert_eq!(cfg.server.static_dir.as_deref(), Some("public"));
    assert!(cfg.server.cors);
    assert_eq!(cfg.storage.data_dir, "data");
    assert_eq!(cfg.affiliate.default_url, affiliate::DEFAULT_GATEWAY_URL);
    assert_eq!(cfg.affiliate.request_timeout(), None);
}

#[test]
fn test_load_all_fields() {
    let yaml = r#"
app:
  name: admin
  env: production
  log_level: debug

server:
  host: 127.0.0.1
  port: 8080
  static_dir: null
  cors: false

storage:
  data_dir: /var/lib/coupon-admin

affiliate:
  default_url: https://eco.taobao.com/router/rest
  timeout: 5s
"#;
    let cfg = from_yaml(yaml).unwrap();

    assert_eq!(cfg.app.env, "production");
    assert_eq!(cfg.app.log_level, Some("debug".to_string()));
    assert_eq!(cfg.server.bind_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.server.static_dir, None);
    assert!(!cfg.server.cors);
    assert_eq!(cfg.storage.data_dir, "/var/lib/coupon-admin");
    assert_eq!(cfg.affiliate.default_url, "https://eco.taobao.com/router/rest");
    assert_eq!(cfg.affiliate.request_timeout(), Some(Duration::from_secs(5)));
}

// ==================== Validation tests ====================

#[test]
fn test_validate_missing_app_name() {
    let yaml = r#"
app:
  name: ""
"#;
    let cfg = from_yaml(yaml).unwrap();

    let result = cfg.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("app.name is required"));
}

#[test]
fn test_validate_zero_port() {
    let yaml = r#"
app:
  name: admin
server:
  port: 0
"#;
    let cfg = from_yaml(yaml).unwrap();

    let result = cfg.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("server.port must be positive"));
}

#[test]
fn test_validate_empty_data_dir() {
    let yaml = r#"
app:
  name: admin
storage:
  data_dir: "  "
"#;
    let cfg = from_yaml(yaml).unwrap();

    let result = cfg.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("storage.data_dir is required"));
}

// ==================== File loading tests ====================

#[test]
fn test_load_from_file() {
    let yaml = r#"
app:
  name: admin
  env: development
"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(cfg.app.name, "admin");
    assert_eq!(cfg.app.env, "development");
}

#[test]
fn test_load_file_not_found() {
    let result = Config::load("nonexistent_config.yaml");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("failed to read config file"));
}

#[test]
fn test_load_invalid_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"app: [unterminated").unwrap();

    let result = Config::load(file.path().to_str().unwrap());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("failed to parse config"));
}

#[test]
fn test_data_dir_env_override() {
    let yaml = r#"
app:
  name: admin
"#;
    let mut cfg = from_yaml(yaml).unwrap();

    unsafe {
        env::set_var("DATA_DIR", "/tmp/coupon-admin-override");
    }

    cfg.apply_env_overrides().unwrap();

    unsafe {
        env::remove_var("DATA_DIR");
    }

    assert_eq!(cfg.storage.data_dir, "/tmp/coupon-admin-override");
}
