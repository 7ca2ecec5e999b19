use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("ladder_launcher_test_{name}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("launcher.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file",
        r#"
ladder_url = "https://ladder.example.com/api"
request_timeout_secs = 3
default_mode = "hardcore"
"#,
    );

    let file_cfg = read_config_file(Some(path.as_path())).expect("read").expect("file");
    let mut settings = Settings::default();
    settings.apply_file(file_cfg);

    assert_eq!(settings.ladder_url, "https://ladder.example.com/api");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.default_mode, "hardcore");
    assert_eq!(settings.user_agent, None);
    assert_eq!(settings.event_queue_capacity, 256);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let path = env::temp_dir().join("ladder_launcher_definitely_missing.toml");
    let err = load_settings(Some(path.as_path())).expect_err("missing file should fail");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn unknown_keys_are_rejected() {
    let path = temp_config("unknown", "ladder_uri = \"http://typo\"\n");

    let err = read_config_file(Some(path.as_path())).expect_err("typo should fail");
    assert!(err.to_string().contains("invalid config file"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn prefixed_env_wins_over_bare_env() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[
        ("LADDER_URL", "http://bare.example.com"),
        ("APP__LADDER_URL", "http://prefixed.example.com"),
        ("APP__REQUEST_TIMEOUT_SECS", "30"),
        ("APP__DEFAULT_MODE", "2v2"),
        ("APP__USER_AGENT", "launcher-test"),
    ]));

    assert_eq!(settings.ladder_url, "http://prefixed.example.com");
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.default_mode, "2v2");
    assert_eq!(settings.user_agent.as_deref(), Some("launcher-test"));
}

#[test]
fn unparsable_timeout_is_ignored() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]));
    assert_eq!(settings.request_timeout_secs, 10);
}

#[test]
fn empty_env_keeps_defaults() {
    let mut settings = Settings::default();
    settings.apply_env(env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn client_config_validates_url_and_clamps_timeout() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    let config = settings.client_config().expect("config");
    assert_eq!(config.timeout, Duration::from_secs(1));
    assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");

    let broken = Settings {
        ladder_url: "ladder dot example".into(),
        ..Settings::default()
    };
    assert!(matches!(
        broken.client_config(),
        Err(LadderClientError::InvalidUrl { .. })
    ));
}
