use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use carnet_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn render(value: &Value) -> String {
	toml::to_string(value).expect("Failed to render template config.")
}

fn set_store_key(value: &mut Value, key: &str, entry: Value) {
	let store = value
		.as_table_mut()
		.and_then(|root| root.get_mut("store"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [store].");

	store.insert(key.to_string(), entry);
}

fn parse_config(raw: &str) -> Config {
	toml::from_str(raw).expect("Failed to parse config.")
}

fn temp_config_path() -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("Clock must be after the epoch.")
		.as_nanos();
	let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

	env::temp_dir().join(format!("carnet-config-{nanos}-{unique}.toml"))
}

#[test]
fn template_config_is_valid() {
	let cfg = parse_config(&render(&sample_value()));

	carnet_config::validate(&cfg).expect("Template config must validate.");
}

#[test]
fn zero_timeout_is_rejected() {
	let mut value = sample_value();

	set_store_key(&mut value, "timeout_ms", Value::Integer(0));

	let cfg = parse_config(&render(&value));
	let err = carnet_config::validate(&cfg).expect_err("Zero timeout must be rejected.");

	assert!(matches!(err, Error::Validation { message } if message.contains("timeout_ms")));
}

#[test]
fn zero_page_limit_is_rejected() {
	let mut value = sample_value();

	set_store_key(&mut value, "page_limit", Value::Integer(0));

	let cfg = parse_config(&render(&value));
	let err = carnet_config::validate(&cfg).expect_err("Zero page limit must be rejected.");

	assert!(matches!(err, Error::Validation { message } if message.contains("page_limit")));
}

#[test]
fn blank_api_base_is_rejected() {
	let mut value = sample_value();

	set_store_key(&mut value, "api_base", Value::String("  ".to_string()));

	let cfg = parse_config(&render(&value));
	let err = carnet_config::validate(&cfg).expect_err("Blank api_base must be rejected.");

	assert!(matches!(err, Error::Validation { message } if message.contains("api_base")));
}

#[test]
fn missing_optional_sections_take_defaults() {
	let raw = r#"
[store]
api_base   = "http://localhost:3000/api"
timeout_ms = 5000

[service]
log_level = "debug"
"#;
	let cfg = parse_config(raw);

	carnet_config::validate(&cfg).expect("Defaults must validate.");
	assert_eq!(cfg.store.collection, "contacts");
	assert_eq!(cfg.store.page_limit, 20);
	assert_eq!(cfg.export.filename_prefix, "contacts");
}

#[test]
fn load_strips_trailing_slash_from_api_base() {
	let mut value = sample_value();

	set_store_key(&mut value, "api_base", Value::String("http://localhost:3000/api/".to_string()));

	let path = temp_config_path();

	fs::write(&path, render(&value)).expect("Failed to write temp config.");

	let cfg = carnet_config::load(&path).expect("Config must load.");

	fs::remove_file(&path).expect("Failed to remove temp config.");

	assert_eq!(cfg.store.api_base, "http://localhost:3000/api");
}

#[test]
fn load_reports_missing_file() {
	let err = carnet_config::load(&temp_config_path()).expect_err("Missing file must fail.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}
