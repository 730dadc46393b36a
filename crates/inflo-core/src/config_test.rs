use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "INFLO_ENV"));
}

#[test]
fn build_app_config_defaults_on_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:5000");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "warn");
    assert_eq!(cfg.session_path.to_str(), Some(".inflo/session.json"));
    assert_eq!(cfg.user_agent, "inflo/0.1 (campaign-workflow)");
    assert!(cfg.request_timeout_secs.is_none());
    assert_eq!(cfg.search_timeout_secs, 45);
    assert_eq!(cfg.navigate_delay_ms, 800);
    assert_eq!(cfg.overlay_failsafe_secs, 60);
    assert_eq!(cfg.toast_ttl_secs, 5);
}

#[test]
fn build_app_config_strips_trailing_slash_from_base_url() {
    let mut map = HashMap::new();
    map.insert("INFLO_API_BASE_URL", "https://campaigns.example.com/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "https://campaigns.example.com");
}

#[test]
fn build_app_config_rejects_relative_base_url() {
    let mut map = HashMap::new();
    map.insert("INFLO_API_BASE_URL", "campaigns.example.com");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLO_API_BASE_URL"),
        "expected InvalidEnvVar(INFLO_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_scheme_without_host() {
    let mut map = HashMap::new();
    map.insert("INFLO_API_BASE_URL", "https://");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn search_timeout_override() {
    let mut map = HashMap::new();
    map.insert("INFLO_SEARCH_TIMEOUT_SECS", "90");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_timeout_secs, 90);
    assert_eq!(cfg.search_timeout().as_secs(), 90);
}

#[test]
fn search_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("INFLO_SEARCH_TIMEOUT_SECS", "forever");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLO_SEARCH_TIMEOUT_SECS"),
        "expected InvalidEnvVar(INFLO_SEARCH_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn search_timeout_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("INFLO_SEARCH_TIMEOUT_SECS", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn request_timeout_is_optional() {
    let mut map = HashMap::new();
    map.insert("INFLO_REQUEST_TIMEOUT_SECS", "20");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, Some(20));
    assert_eq!(cfg.request_timeout().map(|d| d.as_secs()), Some(20));

    let mut blank = HashMap::new();
    blank.insert("INFLO_REQUEST_TIMEOUT_SECS", "  ");
    let cfg = build_app_config(lookup_from_map(&blank)).unwrap();
    assert!(cfg.request_timeout_secs.is_none());
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("INFLO_REQUEST_TIMEOUT_SECS", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLO_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(INFLO_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn navigate_delay_override() {
    let mut map = HashMap::new();
    map.insert("INFLO_NAVIGATE_DELAY_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.navigate_delay().as_millis(), 0);
}

#[test]
fn toast_and_overlay_overrides() {
    let mut map = HashMap::new();
    map.insert("INFLO_TOAST_TTL_SECS", "2");
    map.insert("INFLO_OVERLAY_FAILSAFE_SECS", "10");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.toast_ttl().as_secs(), 2);
    assert_eq!(cfg.overlay_failsafe().as_secs(), 10);
}
