use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
            server_url = "https://delivery.example.org"
            owner_id = 7
            poll_interval_secs = 3
        "#,
    )
    .expect("parse");

    assert_eq!(settings.server_url, "https://delivery.example.org");
    assert_eq!(settings.owner_id, Some(7));
    assert_eq!(settings.poll_interval(), Duration::from_secs(3));
    assert_eq!(settings.request_timeout_secs, 15);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "restaurant = 3").is_err());
}

#[test]
fn dashboard_env_wins_over_app_alias() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[
            ("APP__SERVER_URL", "http://alias:1"),
            ("DASHBOARD_SERVER_URL", "http://primary:2"),
            ("APP__RESTAURANT_ID", "12"),
        ]),
    )
    .expect("env");

    assert_eq!(settings.server_url, "http://primary:2");
    assert_eq!(settings.restaurant_id, Some(12));
}

#[test]
fn malformed_numeric_env_is_an_error() {
    let mut settings = Settings::default();
    let err = apply_env(&mut settings, lookup_from(&[("DASHBOARD_OWNER_ID", "abc")]))
        .expect_err("not a number");
    assert!(err.to_string().contains("OWNER_ID"));
}

#[test]
fn validate_checks_url_and_intervals() {
    assert!(Settings::default().validate().is_ok());

    let bad_url = Settings {
        server_url: "localhost".into(),
        ..Settings::default()
    };
    assert!(bad_url.validate().is_err());

    let zero_poll = Settings {
        poll_interval_secs: 0,
        ..Settings::default()
    };
    assert!(zero_poll.validate().is_err());
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("dashboard_missing_{suffix}.toml"));

    assert!(load_settings(Some(&path)).is_err());
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("dashboard_config_{suffix}.toml"));
    fs::write(&path, "restaurant_id = 42\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.restaurant_id, Some(42));

    fs::remove_file(path).expect("cleanup");
}
