use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use domsim_domain::DomainRecord;

use crate::{Error, Result};

/// One ranked document returned by a similarity search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
	pub domain: String,
	pub score: f64,
	/// Highlight key (as returned by the index) to emphasised fragments.
	#[serde(default)]
	pub highlight: BTreeMap<String, Vec<String>>,
}

/// One page of the identifier enumeration.
#[derive(Debug, Default, PartialEq)]
pub struct DomainPage {
	pub domains: Vec<String>,
	/// Sort values to resume after; `None` on the last page.
	pub search_after: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
	hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
	#[serde(default)]
	hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
	#[serde(rename = "_id")]
	id: Option<String>,
	#[serde(rename = "_score")]
	score: Option<f64>,
	#[serde(rename = "_source")]
	source: Option<Value>,
	#[serde(default)]
	highlight: BTreeMap<String, Vec<String>>,
	#[serde(default)]
	sort: Option<Vec<Value>>,
}
impl RawHit {
	fn domain(&self) -> Result<String> {
		self.source
			.as_ref()
			.and_then(|source| source.get("domain"))
			.and_then(Value::as_str)
			.map(str::to_string)
			.ok_or_else(|| Error::InvalidResponse {
				message: format!(
					"Search hit {} is missing _source.domain.",
					self.id.as_deref().unwrap_or("<unknown>")
				),
			})
	}
}

pub fn parse_record(json: Value) -> Result<Option<DomainRecord>> {
	let response: SearchResponse = serde_json::from_value(json)?;
	let Some(hit) = response.hits.hits.into_iter().next() else {
		return Ok(None);
	};
	let source = hit.source.ok_or_else(|| Error::InvalidResponse {
		message: "Record lookup hit is missing _source.".to_string(),
	})?;
	let mut record: DomainRecord = serde_json::from_value(source)?;

	record.id = hit.id.or(record.id);

	Ok(Some(record))
}

pub fn parse_hits(json: Value) -> Result<Vec<SearchHit>> {
	let response: SearchResponse = serde_json::from_value(json)?;
	let mut hits = Vec::with_capacity(response.hits.hits.len());

	for raw in response.hits.hits {
		let domain = raw.domain()?;

		hits.push(SearchHit { domain, score: raw.score.unwrap_or(0.0), highlight: raw.highlight });
	}

	Ok(hits)
}

pub fn parse_domain_page(json: Value, page_size: usize) -> Result<DomainPage> {
	let response: SearchResponse = serde_json::from_value(json)?;
	let full_page = !response.hits.hits.is_empty() && response.hits.hits.len() >= page_size;
	let mut page =
		DomainPage { domains: Vec::with_capacity(response.hits.hits.len()), search_after: None };

	for raw in response.hits.hits {
		page.domains.push(raw.domain()?);

		if full_page {
			page.search_after = raw.sort;
		}
	}

	if full_page && page.search_after.is_none() {
		return Err(Error::InvalidResponse {
			message: "Domain enumeration page is missing sort values.".to_string(),
		});
	}

	Ok(page)
}
