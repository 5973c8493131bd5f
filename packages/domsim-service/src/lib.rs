pub mod aggregate;
pub mod cache;
pub mod domains;
pub mod export;
pub mod query;
pub mod similar;

mod error;

pub use aggregate::{ResultRow, aggregate, aggregate_with};
pub use cache::TtlCache;
pub use domains::DomainListResponse;
pub use error::{Error, Result};
pub use export::{export_csv, export_file_name, export_headers};
pub use query::{Clause, QueryOptions, QueryRequest, build_similarity_query};
pub use similar::{CsvExport, SimilarityReport};

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use serde_json::Value;

use domsim_config::Config;
use domsim_domain::DomainRecord;
use domsim_index::{IndexClient, SearchHit};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only view of the domain index.
pub trait DomainIndex
where
	Self: Send + Sync,
{
	fn get_domain<'a>(
		&'a self,
		domain: &'a str,
	) -> BoxFuture<'a, domsim_index::Result<Option<DomainRecord>>>;

	fn search<'a>(
		&'a self,
		body: &'a Value,
	) -> BoxFuture<'a, domsim_index::Result<Vec<SearchHit>>>;

	fn all_domains(&self) -> BoxFuture<'_, domsim_index::Result<Vec<String>>>;
}

pub struct SimilarityService {
	pub options: QueryOptions,
	pub index: Arc<dyn DomainIndex>,
	pub(crate) domain_list: TtlCache<(), Arc<Vec<String>>>,
	pub(crate) exports: TtlCache<String, Arc<Vec<u8>>>,
}
impl SimilarityService {
	pub fn new(cfg: &Config) -> Result<Self> {
		let client = IndexClient::new(&cfg.index)?;

		Ok(Self::with_index(cfg, Arc::new(client)))
	}

	pub fn with_index(cfg: &Config, index: Arc<dyn DomainIndex>) -> Self {
		Self {
			options: QueryOptions::from_config(&cfg.similarity),
			index,
			domain_list: TtlCache::new(Duration::from_secs(cfg.cache.domain_list_ttl_secs), 1),
			exports: TtlCache::new(
				Duration::from_secs(cfg.cache.export_ttl_secs),
				cfg.cache.export_max_entries,
			),
		}
	}

	pub fn clear_caches(&self) {
		self.domain_list.clear();
		self.exports.clear();

		tracing::info!("Cleared domain list and export caches.");
	}
}

impl DomainIndex for IndexClient {
	fn get_domain<'a>(
		&'a self,
		domain: &'a str,
	) -> BoxFuture<'a, domsim_index::Result<Option<DomainRecord>>> {
		Box::pin(IndexClient::get_domain(self, domain))
	}

	fn search<'a>(
		&'a self,
		body: &'a Value,
	) -> BoxFuture<'a, domsim_index::Result<Vec<SearchHit>>> {
		Box::pin(IndexClient::search(self, body))
	}

	fn all_domains(&self) -> BoxFuture<'_, domsim_index::Result<Vec<String>>> {
		Box::pin(IndexClient::all_domains(self))
	}
}

pub(crate) fn normalize_domain(domain: &str) -> Result<&str> {
	let domain = domain.trim();

	if domain.is_empty() {
		return Err(Error::InvalidRequest { message: "domain must be non-empty.".to_string() });
	}

	Ok(domain)
}
