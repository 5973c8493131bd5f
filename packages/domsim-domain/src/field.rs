use serde::{Deserialize, Serialize};

/// Exact-match path of the domain identifier.
pub const DOMAIN_ID_PATH: &str = "domain.keyword";

/// Every document field that takes part in similarity scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
	RefinedGptTags,
	CbTags,
	LiTags,
	WpTags,
	FundingStage,
	Employees,
	TotalFundingAmount,
}
impl Field {
	pub const ALL: [Self; 7] = [
		Self::RefinedGptTags,
		Self::CbTags,
		Self::LiTags,
		Self::WpTags,
		Self::FundingStage,
		Self::Employees,
		Self::TotalFundingAmount,
	];
	pub const ATTRIBUTES: [Self; 3] = [Self::FundingStage, Self::Employees, Self::TotalFundingAmount];
	pub const TAGS: [Self; 4] = [Self::RefinedGptTags, Self::CbTags, Self::LiTags, Self::WpTags];

	/// Source document key.
	pub fn name(self) -> &'static str {
		match self {
			Self::RefinedGptTags => "refined_gpt_tags",
			Self::CbTags => "cb_tags",
			Self::LiTags => "li_tags",
			Self::WpTags => "wp_tags",
			Self::FundingStage => "funding_stage",
			Self::Employees => "employees",
			Self::TotalFundingAmount => "total_funding_amount",
		}
	}

	/// Exact-match (keyword) path used for scoring and highlighting.
	pub fn index_path(self) -> &'static str {
		match self {
			Self::RefinedGptTags => "refined_gpt_tags.keyword",
			Self::CbTags => "cb_tags.keyword",
			Self::LiTags => "li_tags.keyword",
			Self::WpTags => "wp_tags.keyword",
			Self::FundingStage => "funding_stage.keyword",
			Self::Employees => "employees.keyword",
			Self::TotalFundingAmount => "total_funding_amount.keyword",
		}
	}

	pub fn kind(self) -> FieldKind {
		match self {
			Self::RefinedGptTags | Self::CbTags | Self::LiTags | Self::WpTags => FieldKind::Tags,
			Self::FundingStage | Self::Employees | Self::TotalFundingAmount => FieldKind::Attribute,
		}
	}

	pub fn export_column(self) -> &'static str {
		match self {
			Self::RefinedGptTags => "Matched Refined GPT Tags",
			Self::CbTags => "Matched CB Tags",
			Self::LiTags => "Matched LI Tags",
			Self::WpTags => "Matched WP Tags",
			Self::FundingStage => "Matched Funding Stage",
			Self::Employees => "Matched Employees",
			Self::TotalFundingAmount => "Matched Total Funding Amount",
		}
	}

	/// Resolves a highlight key by exact match on the index path or the bare source key.
	///
	/// No substring matching: `employees_total` or `cb_tags.text` resolve to `None`.
	pub fn from_key(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|field| field.index_path() == key || field.name() == key)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
	/// Multi-valued label set.
	Tags,
	/// Single categorical or numeric-ish value.
	Attribute,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn resolves_index_path_and_bare_key() {
		assert_eq!(Field::from_key("cb_tags.keyword"), Some(Field::CbTags));
		assert_eq!(Field::from_key("cb_tags"), Some(Field::CbTags));
		assert_eq!(Field::from_key("total_funding_amount.keyword"), Some(Field::TotalFundingAmount));
	}

	#[test]
	fn rejects_substring_matches() {
		assert_eq!(Field::from_key("employees_total"), None);
		assert_eq!(Field::from_key("refined_gpt_tags.keyword.raw"), None);
		assert_eq!(Field::from_key("tags"), None);
		assert_eq!(Field::from_key(""), None);
	}

	#[test]
	fn tag_and_attribute_sets_partition_all_fields() {
		for field in Field::ALL {
			let in_tags = Field::TAGS.contains(&field);
			let in_attributes = Field::ATTRIBUTES.contains(&field);

			assert!(in_tags != in_attributes, "{field:?} must be in exactly one set.");
			assert_eq!(in_tags, field.kind() == FieldKind::Tags);
		}
	}

	#[test]
	fn export_columns_follow_field_order() {
		let columns: Vec<&str> = Field::ALL.into_iter().map(Field::export_column).collect();

		assert_eq!(
			columns,
			[
				"Matched Refined GPT Tags",
				"Matched CB Tags",
				"Matched LI Tags",
				"Matched WP Tags",
				"Matched Funding Stage",
				"Matched Employees",
				"Matched Total Funding Amount",
			]
		);
	}
}
