use domsim_domain::{Field, flatten_for_export};

use crate::{Result, aggregate::ResultRow};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

pub fn export_headers() -> Vec<&'static str> {
	let mut headers = vec!["Domain", "Score"];

	headers.extend(Field::ALL.into_iter().map(Field::export_column));

	headers
}

pub fn export_file_name(domain: &str) -> String {
	format!("similarity_data_{domain}.csv")
}

/// Flat cells for one row, in [`export_headers`] order.
pub fn export_record(row: &ResultRow) -> Vec<String> {
	let mut record = vec![flatten_for_export(&row.domain), row.score.to_string()];

	for field in Field::ALL {
		record.push(flatten_for_export(&row.matched(field).join(", ")));
	}

	record
}

/// Renders rows as UTF-8 CSV with a header line; no rows yields the header line only.
pub fn export_csv(rows: &[ResultRow]) -> Result<Vec<u8>> {
	let mut writer = csv::Writer::from_writer(Vec::new());

	writer.write_record(export_headers())?;

	for row in rows {
		writer.write_record(export_record(row))?;
	}

	writer.into_inner().map_err(|err| crate::Error::Export { message: err.error().to_string() })
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;

	const HEADER_LINE: &str = "Domain,Score,Matched Refined GPT Tags,Matched CB Tags,Matched LI Tags,Matched WP Tags,Matched Funding Stage,Matched Employees,Matched Total Funding Amount\n";

	fn row(domain: &str, score: f64, matches: &[(Field, Vec<&str>)]) -> ResultRow {
		let mut all: BTreeMap<Field, Vec<String>> =
			Field::ALL.into_iter().map(|field| (field, Vec::new())).collect();

		for (field, terms) in matches {
			all.insert(*field, terms.iter().map(|term| term.to_string()).collect());
		}

		ResultRow {
			domain: domain.to_string(),
			score,
			matches: all,
			unrecognized_fields: Vec::new(),
		}
	}

	#[test]
	fn zero_rows_export_headers_only() {
		let bytes = export_csv(&[]).expect("export failed");

		assert_eq!(String::from_utf8(bytes).expect("utf-8"), HEADER_LINE);
	}

	#[test]
	fn exports_flattened_matches() {
		let rows = [row(
			"b.io",
			7.25,
			&[(Field::CbTags, vec!["fintech", "lending"]), (Field::FundingStage, vec!["Seed"])],
		)];
		let csv = String::from_utf8(export_csv(&rows).expect("export failed")).expect("utf-8");
		let mut lines = csv.lines();

		assert_eq!(lines.next().map(|line| format!("{line}\n")), Some(HEADER_LINE.to_string()));
		assert_eq!(lines.next(), Some(r#"b.io,7.25,,"fintech, lending",,,Seed,,"#));
		assert_eq!(lines.next(), None);
	}

	#[test]
	fn record_cells_are_stable_under_reflattening() {
		let record =
			export_record(&row("b.io", 1.0, &[(Field::WpTags, vec!["<b>cms</b>", " ", "ai"])]));

		for cell in &record {
			assert_eq!(&flatten_for_export(cell), cell);
		}

		assert_eq!(record[5], "cms, ai");
	}

	#[test]
	fn names_download_after_domain() {
		assert_eq!(export_file_name("acme.io"), "similarity_data_acme.io.csv");
	}
}
