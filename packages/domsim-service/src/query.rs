use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use domsim_config::{FieldBoosts, Similarity};
use domsim_domain::{DOMAIN_ID_PATH, Emphasis, Field};

#[derive(Clone, Debug)]
pub struct QueryOptions {
	pub size: u32,
	pub boosts: FieldBoosts,
	pub emphasis: Emphasis,
}
impl QueryOptions {
	pub fn from_config(cfg: &Similarity) -> Self {
		Self {
			size: cfg.size,
			boosts: cfg.boosts.clone(),
			emphasis: Emphasis::new(cfg.pre_tag.clone(), cfg.post_tag.clone()),
		}
	}

	pub fn boost(&self, field: Field) -> f32 {
		match field {
			Field::RefinedGptTags => self.boosts.refined_gpt_tags,
			Field::CbTags => self.boosts.cb_tags,
			Field::LiTags => self.boosts.li_tags,
			Field::WpTags => self.boosts.wp_tags,
			Field::FundingStage => self.boosts.funding_stage,
			Field::Employees => self.boosts.employees,
			Field::TotalFundingAmount => self.boosts.total_funding_amount,
		}
	}
}
impl Default for QueryOptions {
	fn default() -> Self {
		Self { size: 50, boosts: FieldBoosts::default(), emphasis: Emphasis::default() }
	}
}

/// A scoring clause; never excludes a document on its own.
#[derive(Clone, Debug, PartialEq)]
pub enum Clause {
	/// Matches when the document holds any of `values`; each overlapping value adds to the score.
	AnyOf { field: Field, values: Vec<String>, boost: f32 },
	Exact { field: Field, value: String, boost: f32 },
}
impl Clause {
	pub fn field(&self) -> Field {
		match self {
			Self::AnyOf { field, .. } | Self::Exact { field, .. } => *field,
		}
	}

	fn to_value(&self) -> Value {
		match self {
			Self::AnyOf { field, values, boost } => {
				let terms: Vec<Value> =
					values.iter().map(|value| term(field.index_path(), value, None)).collect();

				serde_json::json!({
					"bool": {
						"should": terms,
						"minimum_should_match": 1,
						"boost": boost,
					}
				})
			},
			Self::Exact { field, value, boost } => term(field.index_path(), value, Some(*boost)),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryRequest {
	pub size: u32,
	pub should: Vec<Clause>,
	/// Identifier excluded from the results; blank means nothing is excluded.
	pub excluded_id: String,
	pub emphasis: Emphasis,
}
impl QueryRequest {
	pub fn clause_for(&self, field: Field) -> Option<&Clause> {
		self.should.iter().find(|clause| clause.field() == field)
	}

	/// Every field used for scoring is highlighted.
	pub fn highlight_fields(&self) -> Vec<Field> {
		self.should.iter().map(Clause::field).collect()
	}

	/// Search body in the index's query DSL.
	pub fn to_body(&self) -> Value {
		let should: Vec<Value> = self.should.iter().map(Clause::to_value).collect();
		let mut bool_query = Map::new();

		bool_query.insert("should".to_string(), Value::Array(should));

		if !self.excluded_id.trim().is_empty() {
			bool_query.insert(
				"must_not".to_string(),
				Value::Array(vec![term(DOMAIN_ID_PATH, &self.excluded_id, None)]),
			);
		}

		let mut body = serde_json::json!({
			"size": self.size,
			"query": { "bool": bool_query },
		});
		let fields: Map<String, Value> = self
			.highlight_fields()
			.into_iter()
			.map(|field| {
				(field.index_path().to_string(), serde_json::json!({ "number_of_fragments": 0 }))
			})
			.collect();

		if !fields.is_empty() {
			body["highlight"] = serde_json::json!({
				"pre_tags": [self.emphasis.pre()],
				"post_tags": [self.emphasis.post()],
				"require_field_match": true,
				"fields": fields,
			});
		}

		body
	}
}

/// Builds the similarity query for one source domain.
///
/// Tag fields contribute one any-of clause each and categorical fields one exact clause each.
/// Fields without a usable value contribute nothing, so a source with no usable fields yields a
/// query with no scoring clauses at all.
pub fn build_similarity_query(
	tags_by_field: &BTreeMap<Field, Vec<String>>,
	categorical_fields: &BTreeMap<Field, String>,
	excluded_id: &str,
	options: &QueryOptions,
) -> QueryRequest {
	let mut should = Vec::new();

	for (field, values) in tags_by_field {
		let mut seen = BTreeSet::new();
		let values: Vec<String> = values
			.iter()
			.filter(|value| !value.trim().is_empty())
			.filter(|value| seen.insert(value.as_str()))
			.cloned()
			.collect();

		if values.is_empty() {
			continue;
		}

		should.push(Clause::AnyOf { field: *field, values, boost: options.boost(*field) });
	}
	for (field, value) in categorical_fields {
		if value.trim().is_empty() {
			continue;
		}

		should.push(Clause::Exact {
			field: *field,
			value: value.clone(),
			boost: options.boost(*field),
		});
	}

	QueryRequest {
		size: options.size,
		should,
		excluded_id: excluded_id.to_string(),
		emphasis: options.emphasis.clone(),
	}
}

fn term(path: &str, value: &str, boost: Option<f32>) -> Value {
	let mut inner = serde_json::json!({ "value": value });

	if let Some(boost) = boost {
		inner["boost"] = serde_json::json!(boost);
	}

	let mut term = Map::new();

	term.insert(path.to_string(), inner);

	serde_json::json!({ "term": term })
}
