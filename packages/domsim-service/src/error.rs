pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No data found for domain: {domain}.")]
	NotFound { domain: String },
	#[error("Unable to retrieve domain list from the database.")]
	EmptyDomainList,
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Index error: {message}")]
	Index { message: String },
	#[error("Export error: {message}")]
	Export { message: String },
}
impl From<domsim_index::Error> for Error {
	fn from(err: domsim_index::Error) -> Self {
		Self::Index { message: err.to_string() }
	}
}
impl From<csv::Error> for Error {
	fn from(err: csv::Error) -> Self {
		Self::Export { message: err.to_string() }
	}
}
