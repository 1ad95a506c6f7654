// Config file loading

use mindcare::config::{load_from_path, resolve_config};
use mindcare::providers::create_generator;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"
seed = 42

[generator]
enabled = true
temperature = 0.5
max_tokens = 200

[[generator.providers]]
provider = "ollama"
model = "mistral"

[[generator.providers]]
provider = "custom"
model = "local"
base_url = "http://127.0.0.1:9000"

[server]
bind_address = "0.0.0.0:9999"
max_sessions = 5
"#,
    );

    let config = load_from_path(file.path()).unwrap();
    assert_eq!(config.seed, Some(42));
    assert!(config.generator.enabled);
    assert!((config.generator.temperature - 0.5).abs() < f32::EPSILON);
    // Unspecified fields keep their defaults
    assert!((config.generator.top_p - 0.92).abs() < f32::EPSILON);
    assert_eq!(config.generator.max_tokens, 200);
    assert_eq!(config.generator.timeout_secs, 60);
    assert_eq!(config.generator.providers.len(), 2);
    assert_eq!(config.generator.providers[0].model.as_deref(), Some("mistral"));
    assert_eq!(config.server.bind_address, "0.0.0.0:9999");
    assert_eq!(config.server.max_sessions, 5);
    assert_eq!(config.server.session_timeout_minutes, 30);

    let generator = create_generator(&config.generator).unwrap().unwrap();
    assert_eq!(generator.name(), "ollama");
}

#[test]
fn test_empty_file_is_lite_mode() {
    let file = write_config("");
    let config = load_from_path(file.path()).unwrap();
    assert!(config.seed.is_none());
    assert!(!config.generator.enabled);
    assert!(create_generator(&config.generator).unwrap().is_none());
}

#[test]
fn test_file_wins_over_env_key() {
    let file = write_config("[generator]\nenabled = false\n");
    let config = resolve_config(Some(file.path()), Some("sk-env".to_string())).unwrap();
    assert!(!config.generator.enabled);
}

#[test]
fn test_invalid_toml_reports_path() {
    let file = write_config("[generator\nenabled = true\n");
    let err = load_from_path(file.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Failed to parse config file"));
    assert!(message.contains(&file.path().display().to_string()));
}

#[test]
fn test_provider_without_name_is_rejected() {
    let file = write_config("[[generator.providers]]\nmodel = \"x\"\n");
    assert!(load_from_path(file.path()).is_err());
}
