use std::sync::Arc;

use serde::Serialize;

use domsim_domain::DomainRecord;

use crate::{
	Error, Result, SimilarityService,
	aggregate::{self, ResultRow},
	export, normalize_domain, query,
};

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport {
	pub domain: String,
	pub source: DomainRecord,
	pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone)]
pub struct CsvExport {
	pub file_name: String,
	pub bytes: Arc<Vec<u8>>,
}

impl SimilarityService {
	/// Point lookup of the source record.
	pub async fn record(&self, domain: &str) -> Result<DomainRecord> {
		let domain = normalize_domain(domain)?;

		self.index
			.get_domain(domain)
			.await?
			.ok_or_else(|| Error::NotFound { domain: domain.to_string() })
	}

	/// Looks up `domain` and ranks the other domains by field overlap with it.
	///
	/// A missing record fails with [`Error::NotFound`] before any similarity query is issued.
	/// A fresh report drops the cached CSV for `domain`, so the next export agrees with it.
	pub async fn similar(&self, domain: &str) -> Result<SimilarityReport> {
		let domain = normalize_domain(domain)?;
		let source = self.record(domain).await?;

		if !source.has_usable_fields() {
			tracing::info!(domain = %source.domain, "Source record has no usable fields.");
		}

		let request = query::build_similarity_query(
			&source.tags_by_field(),
			&source.attributes(),
			&source.domain,
			&self.options,
		);
		let hits = self.index.search(&request.to_body()).await?;
		let mut rows = aggregate::aggregate_with(&hits, &self.options.emphasis);

		for row in &mut rows {
			let dropped = row.retain_overlap(&source);

			if dropped > 0 {
				tracing::warn!(
					domain = %source.domain,
					target = %row.domain,
					dropped,
					"Dropped highlighted terms absent from the source record."
				);
			}
		}

		if self.exports.invalidate(&domain.to_string()) {
			tracing::debug!(domain, "Dropped cached export superseded by a fresh report.");
		}

		tracing::info!(
			domain = %source.domain,
			clauses = request.should.len(),
			rows = rows.len(),
			"Similarity query completed."
		);

		Ok(SimilarityReport { domain: source.domain.clone(), source, rows })
	}

	/// CSV export of [`Self::similar`], cached per domain.
	pub async fn export_csv(&self, domain: &str) -> Result<CsvExport> {
		let domain = normalize_domain(domain)?;
		let bytes = self
			.exports
			.get_or_try_load(domain.to_string(), || async {
				let report = self.similar(domain).await?;

				export::export_csv(&report.rows).map(Arc::new)
			})
			.await?;

		Ok(CsvExport { file_name: export::export_file_name(domain), bytes })
	}
}
