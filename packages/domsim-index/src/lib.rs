pub mod response;

mod error;

pub use error::{Error, Result};
pub use response::{DomainPage, SearchHit};

use std::time::{Duration, Instant};

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde_json::{Map, Value};

use domsim_domain::{DOMAIN_ID_PATH, DomainRecord};

/// Headers sent with every index request: optional `ApiKey` auth plus configured defaults.
pub fn auth_headers(api_key: Option<&str>, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(api_key) = api_key {
		headers.insert(AUTHORIZATION, format!("ApiKey {api_key}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

/// Read-only client for the domain index `_search` endpoint.
pub struct IndexClient {
	http: Client,
	search_url: String,
	basic_auth: Option<(String, String)>,
	page_size: u32,
}
impl IndexClient {
	pub fn new(cfg: &domsim_config::Index) -> Result<Self> {
		let headers = auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?;
		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.default_headers(headers)
			.build()?;
		let basic_auth = match (&cfg.username, &cfg.password) {
			(Some(username), Some(password)) => Some((username.clone(), password.clone())),
			(None, None) => None,
			_ => {
				return Err(Error::InvalidConfig {
					message: "index.username and index.password must be set together.".to_string(),
				});
			},
		};

		Ok(Self {
			http,
			search_url: format!("{}/{}/_search", cfg.url, cfg.index),
			basic_auth,
			page_size: cfg.page_size,
		})
	}

	/// Point lookup by domain identifier.
	pub async fn get_domain(&self, domain: &str) -> Result<Option<DomainRecord>> {
		let body = serde_json::json!({
			"size": 1,
			"query": { "term": { DOMAIN_ID_PATH: { "value": domain } } },
		});
		let json = self.post_search(&body).await?;

		response::parse_record(json)
	}

	/// Runs a prepared similarity search body and returns hits in index order.
	pub async fn search(&self, body: &Value) -> Result<Vec<SearchHit>> {
		let json = self.post_search(body).await?;

		response::parse_hits(json)
	}

	/// Enumerates every domain identifier, paging with `search_after`.
	pub async fn all_domains(&self) -> Result<Vec<String>> {
		let mut domains = Vec::new();
		let mut search_after: Option<Vec<Value>> = None;

		loop {
			let mut body = serde_json::json!({
				"size": self.page_size,
				"_source": ["domain"],
				"track_total_hits": false,
				"query": { "match_all": {} },
				"sort": [{ DOMAIN_ID_PATH: "asc" }],
			});

			if let Some(cursor) = search_after.take() {
				body["search_after"] = Value::Array(cursor);
			}

			let json = self.post_search(&body).await?;
			let page = response::parse_domain_page(json, self.page_size as usize)?;

			domains.extend(page.domains);

			match page.search_after {
				Some(cursor) => search_after = Some(cursor),
				None => break,
			}
		}

		tracing::debug!(count = domains.len(), "Enumerated domains.");

		Ok(domains)
	}

	async fn post_search(&self, body: &Value) -> Result<Value> {
		let started = Instant::now();
		let mut request = self.http.post(&self.search_url).json(body);

		if let Some((username, password)) = &self.basic_auth {
			request = request.basic_auth(username, Some(password));
		}

		let res = request.send().await?;
		let status = res.status();
		let json: Value = res.error_for_status()?.json().await?;

		tracing::debug!(
			url = %self.search_url,
			%status,
			elapsed_ms = started.elapsed().as_millis() as u64,
			"Index search completed."
		);

		Ok(json)
	}
}
