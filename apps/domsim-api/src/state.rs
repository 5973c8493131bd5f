use std::sync::Arc;

use domsim_service::{DomainIndex, SimilarityService};

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SimilarityService>,
}
impl AppState {
	pub fn new(config: &domsim_config::Config) -> color_eyre::Result<Self> {
		let service = SimilarityService::new(config)?;

		Ok(Self { service: Arc::new(service) })
	}

	pub fn with_index(config: &domsim_config::Config, index: Arc<dyn DomainIndex>) -> Self {
		Self { service: Arc::new(SimilarityService::with_index(config, index)) }
	}
}
