use std::collections::BTreeMap;

use serde::Serialize;

use domsim_domain::{DomainRecord, Emphasis, Field};
use domsim_index::SearchHit;

/// One similarity table row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultRow {
	pub domain: String,
	pub score: f64,
	/// Every field is present; fields without highlights map to an empty list.
	pub matches: BTreeMap<Field, Vec<String>>,
	/// Highlight keys outside the known field set.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub unrecognized_fields: Vec<String>,
}
impl ResultRow {
	fn empty(domain: String, score: f64) -> Self {
		Self {
			domain,
			score,
			matches: Field::ALL.into_iter().map(|field| (field, Vec::new())).collect(),
			unrecognized_fields: Vec::new(),
		}
	}

	pub fn matched(&self, field: Field) -> &[String] {
		self.matches.get(&field).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Drops matched terms the source record does not hold itself; returns how many were dropped.
	///
	/// Comparison is case-insensitive on trimmed values.
	pub fn retain_overlap(&mut self, source: &DomainRecord) -> usize {
		let mut dropped = 0;

		for (field, terms) in self.matches.iter_mut() {
			let own: Vec<String> =
				source.values(*field).into_iter().map(normalize).collect();
			let before = terms.len();

			terms.retain(|term| own.contains(&normalize(term)));

			dropped += before - terms.len();
		}

		dropped
	}
}

/// [`aggregate_with`] using `<em>`/`</em>` markers.
pub fn aggregate(hits: &[SearchHit]) -> Vec<ResultRow> {
	aggregate_with(hits, &Emphasis::default())
}

/// One row per hit, in hit order.
pub fn aggregate_with(hits: &[SearchHit], emphasis: &Emphasis) -> Vec<ResultRow> {
	hits.iter().map(|hit| aggregate_hit(hit, emphasis)).collect()
}

fn aggregate_hit(hit: &SearchHit, emphasis: &Emphasis) -> ResultRow {
	let mut row = ResultRow::empty(hit.domain.clone(), hit.score);

	for (key, fragments) in &hit.highlight {
		let Some(field) = Field::from_key(key) else {
			tracing::warn!(domain = %hit.domain, key = %key, "Unrecognized highlight field.");

			row.unrecognized_fields.push(key.clone());

			continue;
		};
		let terms = row.matches.entry(field).or_default();

		for fragment in fragments {
			let cleaned = emphasis.strip(fragment);
			let cleaned = cleaned.trim();

			if !cleaned.is_empty() && !terms.iter().any(|term| term == cleaned) {
				terms.push(cleaned.to_string());
			}
		}
	}

	row
}

fn normalize(value: &str) -> String {
	value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn hit(domain: &str, score: f64, highlight: Vec<(&str, Vec<&str>)>) -> SearchHit {
		SearchHit {
			domain: domain.to_string(),
			score,
			highlight: highlight
				.into_iter()
				.map(|(key, fragments)| {
					(key.to_string(), fragments.into_iter().map(str::to_string).collect())
				})
				.collect(),
		}
	}

	#[test]
	fn routes_cb_tag_highlight() {
		let rows =
			aggregate(&[hit("b.io", 4.2, vec![("cb_tags.keyword", vec!["<em>fintech</em>"])])]);

		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].domain, "b.io");
		assert_eq!(rows[0].score, 4.2);
		assert_eq!(rows[0].matched(Field::CbTags), ["fintech".to_string()]);
		assert!(rows[0].matched(Field::LiTags).is_empty());
		assert!(rows[0].unrecognized_fields.is_empty());
	}

	#[test]
	fn zero_hits_yield_zero_rows() {
		assert!(aggregate(&[]).is_empty());
	}

	#[test]
	fn preserves_hit_order_without_merging() {
		let rows = aggregate(&[
			hit("low.io", 1.0, vec![]),
			hit("high.io", 9.0, vec![]),
			hit("low.io", 1.0, vec![]),
		]);
		let domains: Vec<&str> = rows.iter().map(|row| row.domain.as_str()).collect();

		assert_eq!(domains, vec!["low.io", "high.io", "low.io"]);
	}

	#[test]
	fn every_field_is_present_when_highlight_is_absent() {
		let rows = aggregate(&[hit("b.io", 1.0, vec![])]);

		assert_eq!(rows[0].matches.len(), Field::ALL.len());
		assert!(rows[0].matches.values().all(Vec::is_empty));
	}

	#[test]
	fn records_unrecognized_keys() {
		let rows = aggregate(&[hit(
			"b.io",
			1.0,
			vec![
				("employees_total", vec!["<em>10</em>"]),
				("funding_stage.keyword", vec!["<em>Seed</em>"]),
			],
		)]);

		assert_eq!(rows[0].unrecognized_fields, vec!["employees_total".to_string()]);
		assert!(rows[0].matched(Field::Employees).is_empty());
		assert_eq!(rows[0].matched(Field::FundingStage), ["Seed".to_string()]);
	}

	#[test]
	fn merges_bare_and_keyword_keys_without_duplicates() {
		let rows = aggregate(&[hit(
			"b.io",
			1.0,
			vec![
				("li_tags", vec!["<em>saas</em>"]),
				("li_tags.keyword", vec!["<em>saas</em>", "<em>b2b</em>"]),
			],
		)]);

		assert_eq!(rows[0].matched(Field::LiTags), ["saas".to_string(), "b2b".to_string()]);
	}

	#[test]
	fn stripped_terms_hold_no_markers() {
		let emphasis = Emphasis::default();
		let rows = aggregate(&[hit("b.io", 1.0, vec![("wp_tags.keyword", vec!["<<em>em>cms</em>"])])]);

		for terms in rows[0].matches.values() {
			for term in terms {
				assert!(!emphasis.contains_marker(term), "Residual marker in {term:?}.");
			}
		}
	}

	#[test]
	fn retain_overlap_drops_foreign_terms() {
		let source = DomainRecord {
			domain: "a.io".to_string(),
			cb_tags: vec!["FinTech".to_string()],
			funding_stage: Some("Seed".to_string()),
			..Default::default()
		};
		let mut rows = aggregate(&[hit(
			"b.io",
			1.0,
			vec![
				("cb_tags.keyword", vec!["<em>fintech</em>", "<em>insurtech</em>"]),
				("funding_stage.keyword", vec!["<em>Seed</em>"]),
			],
		)]);
		let dropped = rows[0].retain_overlap(&source);

		assert_eq!(dropped, 1);
		assert_eq!(rows[0].matched(Field::CbTags), ["fintech".to_string()]);
		assert_eq!(rows[0].matched(Field::FundingStage), ["Seed".to_string()]);
	}
}
