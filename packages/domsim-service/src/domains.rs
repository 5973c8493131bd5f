use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, SimilarityService};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainListResponse {
	pub count: usize,
	pub domains: Vec<String>,
}
impl DomainListResponse {
	fn from_list(domains: &[String]) -> Self {
		Self { count: domains.len(), domains: domains.to_vec() }
	}
}

impl SimilarityService {
	/// Sorted, de-duplicated identifiers of every selectable domain.
	///
	/// Served from the domain list cache; an empty enumeration is an error and is not cached.
	pub async fn domains(&self) -> Result<DomainListResponse> {
		let domains = self.domain_list.get_or_try_load((), || self.load_domains()).await?;

		Ok(DomainListResponse::from_list(&domains))
	}

	/// Drops the cached list and enumerates again.
	pub async fn refresh_domains(&self) -> Result<DomainListResponse> {
		self.domain_list.invalidate(&());

		self.domains().await
	}

	async fn load_domains(&self) -> Result<Arc<Vec<String>>> {
		let mut domains = self.index.all_domains().await?;

		domains.retain(|domain| !domain.trim().is_empty());
		domains.sort_unstable();
		domains.dedup();

		if domains.is_empty() {
			tracing::warn!("Domain enumeration returned no domains.");

			return Err(Error::EmptyDomainList);
		}

		tracing::info!(count = domains.len(), "Loaded domain list.");

		Ok(Arc::new(domains))
	}
}
