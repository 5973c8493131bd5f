use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub index: Index,
	pub similarity: Similarity,
	#[serde(default)]
	pub cache: Cache,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Index {
	pub url: String,
	/// Index (or alias) holding one document per domain.
	pub index: String,
	pub timeout_ms: u64,
	#[serde(default = "default_page_size")]
	pub page_size: u32,
	/// Optional. Sent as `Authorization: ApiKey <key>`.
	pub api_key: Option<String>,
	/// Optional. Basic auth; must be paired with `password`.
	pub username: Option<String>,
	pub password: Option<String>,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Similarity {
	pub size: u32,
	#[serde(default = "default_pre_tag")]
	pub pre_tag: String,
	#[serde(default = "default_post_tag")]
	pub post_tag: String,
	#[serde(default)]
	pub boosts: FieldBoosts,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldBoosts {
	pub refined_gpt_tags: f32,
	pub cb_tags: f32,
	pub li_tags: f32,
	pub wp_tags: f32,
	pub funding_stage: f32,
	pub employees: f32,
	pub total_funding_amount: f32,
}
impl FieldBoosts {
	pub fn entries(&self) -> [(&'static str, f32); 7] {
		[
			("refined_gpt_tags", self.refined_gpt_tags),
			("cb_tags", self.cb_tags),
			("li_tags", self.li_tags),
			("wp_tags", self.wp_tags),
			("funding_stage", self.funding_stage),
			("employees", self.employees),
			("total_funding_amount", self.total_funding_amount),
		]
	}
}
impl Default for FieldBoosts {
	fn default() -> Self {
		Self {
			refined_gpt_tags: 1.0,
			cb_tags: 1.0,
			li_tags: 1.0,
			wp_tags: 1.0,
			funding_stage: 1.0,
			employees: 1.0,
			total_funding_amount: 1.0,
		}
	}
}

/// TTLs are in seconds. Zero disables the cache.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Cache {
	pub domain_list_ttl_secs: u64,
	/// CSV exports live this long unless a fresh similarity report for the domain replaces them.
	pub export_ttl_secs: u64,
	/// Least recently used exports are evicted past this count.
	pub export_max_entries: usize,
}
impl Default for Cache {
	fn default() -> Self {
		Self { domain_list_ttl_secs: 3_600, export_ttl_secs: 600, export_max_entries: 128 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_page_size() -> u32 {
	1_000
}

fn default_pre_tag() -> String {
	"<em>".to_string()
}

fn default_post_tag() -> String {
	"</em>".to_string()
}
