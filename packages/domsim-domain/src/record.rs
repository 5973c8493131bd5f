use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::field::{Field, FieldKind};

/// One indexed domain as stored in the search index `_source`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
	pub domain: String,
	/// Index document id; a `_source` id of any scalar type is read as a string.
	#[serde(default, deserialize_with = "opaque_value", skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, deserialize_with = "tag_list")]
	pub refined_gpt_tags: Vec<String>,
	#[serde(default, deserialize_with = "tag_list")]
	pub cb_tags: Vec<String>,
	#[serde(default, deserialize_with = "tag_list")]
	pub li_tags: Vec<String>,
	#[serde(default, deserialize_with = "tag_list")]
	pub wp_tags: Vec<String>,
	#[serde(default, deserialize_with = "opaque_value")]
	pub funding_stage: Option<String>,
	#[serde(default, deserialize_with = "opaque_value")]
	pub employees: Option<String>,
	#[serde(default, deserialize_with = "opaque_value")]
	pub total_funding_amount: Option<String>,
}
impl DomainRecord {
	/// Tag values for a tag field; attributes yield an empty slice.
	pub fn tags(&self, field: Field) -> &[String] {
		match field {
			Field::RefinedGptTags => &self.refined_gpt_tags,
			Field::CbTags => &self.cb_tags,
			Field::LiTags => &self.li_tags,
			Field::WpTags => &self.wp_tags,
			Field::FundingStage | Field::Employees | Field::TotalFundingAmount => &[],
		}
	}

	/// Defined value of an attribute field; tag fields yield `None`.
	pub fn attribute(&self, field: Field) -> Option<&str> {
		let value = match field {
			Field::FundingStage => self.funding_stage.as_deref(),
			Field::Employees => self.employees.as_deref(),
			Field::TotalFundingAmount => self.total_funding_amount.as_deref(),
			Field::RefinedGptTags | Field::CbTags | Field::LiTags | Field::WpTags => None,
		};

		value.filter(|value| !value.trim().is_empty())
	}

	pub fn values(&self, field: Field) -> Vec<&str> {
		match field.kind() {
			FieldKind::Tags => self.tags(field).iter().map(String::as_str).collect(),
			FieldKind::Attribute => self.attribute(field).into_iter().collect(),
		}
	}

	pub fn tags_by_field(&self) -> BTreeMap<Field, Vec<String>> {
		Field::TAGS.into_iter().map(|field| (field, self.tags(field).to_vec())).collect()
	}

	/// Only attributes with a defined value are present.
	pub fn attributes(&self) -> BTreeMap<Field, String> {
		Field::ATTRIBUTES
			.into_iter()
			.filter_map(|field| self.attribute(field).map(|value| (field, value.to_string())))
			.collect()
	}

	pub fn has_usable_fields(&self) -> bool {
		Field::ALL
			.into_iter()
			.any(|field| self.values(field).iter().any(|value| !value.trim().is_empty()))
	}
}

// The index may hold a single string where a list is expected, or `null`.
fn tag_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	let tags = match value {
		None | Some(Value::Null) => Vec::new(),
		Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
		Some(other) => scalar_to_string(other).into_iter().collect(),
	};

	Ok(tags)
}

fn opaque_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;

	Ok(value.and_then(scalar_to_string).filter(|value| !value.trim().is_empty()))
}

fn scalar_to_string(value: Value) -> Option<String> {
	match value {
		Value::String(raw) => Some(raw),
		Value::Number(number) => Some(number.to_string()),
		Value::Bool(flag) => Some(flag.to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_numeric_attributes_as_strings() {
		let record: DomainRecord = serde_json::from_value(serde_json::json!({
			"domain": "acme.io",
			"employees": 120,
			"total_funding_amount": 2500000.5,
			"funding_stage": "Series A"
		}))
		.expect("Failed to decode record.");

		assert_eq!(record.employees.as_deref(), Some("120"));
		assert_eq!(record.total_funding_amount.as_deref(), Some("2500000.5"));
		assert_eq!(record.attribute(Field::FundingStage), Some("Series A"));
	}

	#[test]
	fn tolerates_missing_null_and_scalar_tags() {
		let record: DomainRecord = serde_json::from_value(serde_json::json!({
			"domain": "acme.io",
			"cb_tags": null,
			"li_tags": "saas",
			"funding_stage": "  "
		}))
		.expect("Failed to decode record.");

		assert!(record.refined_gpt_tags.is_empty());
		assert!(record.cb_tags.is_empty());
		assert_eq!(record.li_tags, vec!["saas".to_string()]);
		assert_eq!(record.funding_stage, None);
		assert!(record.attributes().is_empty());
	}

	#[test]
	fn usable_fields_ignore_blank_tags() {
		let mut record = DomainRecord { domain: "acme.io".to_string(), ..Default::default() };

		record.wp_tags = vec!["   ".to_string()];

		assert!(!record.has_usable_fields());

		record.employees = Some("11-50".to_string());

		assert!(record.has_usable_fields());
	}
}
