use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use domsim_config::Config;

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let table = root
		.as_table_mut()
		.expect("Sample config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Sample config must include [{section}]."));

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("domsim_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> domsim_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = domsim_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TOML.to_string()).expect("Sample config must load.");

	assert_eq!(cfg.index.url, "http://127.0.0.1:9200");
	assert!(cfg.index.api_key.is_none(), "Blank api_key must normalize to None.");
	assert_eq!(cfg.similarity.boosts.refined_gpt_tags, 2.0);
	assert_eq!(cfg.similarity.boosts.cb_tags, 1.5);
	assert_eq!(cfg.similarity.boosts.wp_tags, 1.0, "Unset boosts must default to 1.0.");
}

#[test]
fn cache_section_is_optional() {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");

	root.as_table_mut().expect("Sample config must be a table.").remove("cache");

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Config without [cache] must load.");

	assert_eq!(cfg.cache.domain_list_ttl_secs, 3_600);
	assert_eq!(cfg.cache.export_max_entries, 128);
}

#[test]
fn similarity_size_must_be_positive() {
	let err = load_payload(sample_with("similarity", "size", Value::Integer(0)))
		.expect_err("Expected similarity.size validation error.");

	assert!(
		err.to_string().contains("similarity.size must be in the range"),
		"Unexpected error: {err}"
	);
}

#[test]
fn index_url_requires_scheme() {
	let err = load_payload(sample_with("index", "url", Value::String("localhost:9200".into())))
		.expect_err("Expected index.url validation error.");

	assert!(err.to_string().contains("index.url must start with"), "Unexpected error: {err}");
}

#[test]
fn basic_auth_requires_both_parts() {
	let err = load_payload(sample_with("index", "username", Value::String("elastic".into())))
		.expect_err("Expected basic auth validation error.");

	assert!(
		err.to_string().contains("index.username and index.password must be set together."),
		"Unexpected error: {err}"
	);
}

#[test]
fn negative_boost_is_rejected() {
	let mut cfg = base_config();

	cfg.similarity.boosts.li_tags = -1.0;

	let err = domsim_config::validate(&cfg).expect_err("Expected boost validation error.");

	assert_eq!(err.to_string(), "similarity.boosts.li_tags must be zero or greater.");
}

#[test]
fn non_string_default_header_is_rejected() {
	let mut cfg = base_config();

	cfg.index.default_headers.insert("X-Retries".to_string(), serde_json::json!(3));

	assert!(domsim_config::validate(&cfg).is_err());
}

#[test]
fn identical_highlight_tags_are_rejected() {
	let mut cfg = base_config();

	cfg.similarity.post_tag = cfg.similarity.pre_tag.clone();

	let err = domsim_config::validate(&cfg).expect_err("Expected highlight tag validation error.");

	assert!(err.to_string().contains("must differ"), "Unexpected error: {err}");
}

#[test]
fn missing_file_reports_path() {
	let err = domsim_config::load(std::path::Path::new("/nonexistent/domsim.toml"))
		.expect_err("Expected read error.");

	assert!(err.to_string().contains("/nonexistent/domsim.toml"), "Unexpected error: {err}");
}
