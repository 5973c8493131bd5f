use axum::{
	Json, Router,
	extract::{Path, State},
	http::{HeaderValue, StatusCode, header},
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use domsim_domain::DomainRecord;
use domsim_service::{DomainListResponse, Error, SimilarityReport, export::CSV_CONTENT_TYPE};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/domains", get(domains))
		.route("/v1/domains/{domain}", get(record))
		.route("/v1/domains/{domain}/similar", get(similar))
		.route("/v1/domains/{domain}/similar.csv", get(similar_csv))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/v1/admin/cache/clear", post(clear_cache))
		.route("/v1/admin/domains/refresh", post(refresh_domains))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn domains(State(state): State<AppState>) -> Result<Json<DomainListResponse>, ApiError> {
	let response = state.service.domains().await?;

	Ok(Json(response))
}

async fn record(
	State(state): State<AppState>,
	Path(domain): Path<String>,
) -> Result<Json<DomainRecord>, ApiError> {
	let response = state.service.record(&domain).await?;

	Ok(Json(response))
}

async fn similar(
	State(state): State<AppState>,
	Path(domain): Path<String>,
) -> Result<Json<SimilarityReport>, ApiError> {
	let response = state.service.similar(&domain).await?;

	Ok(Json(response))
}

async fn similar_csv(
	State(state): State<AppState>,
	Path(domain): Path<String>,
) -> Result<Response, ApiError> {
	let export = state.service.export_csv(&domain).await?;
	let disposition =
		HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.file_name)).map_err(
			|_| json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", "Domain is not a valid file name."),
		)?;

	Ok((
		[
			(header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
			(header::CONTENT_DISPOSITION, disposition),
		],
		export.bytes.to_vec(),
	)
		.into_response())
}

#[derive(Debug, Serialize)]
struct ClearCacheResponse {
	cleared: bool,
}

async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
	state.service.clear_caches();

	Json(ClearCacheResponse { cleared: true })
}

async fn refresh_domains(
	State(state): State<AppState>,
) -> Result<Json<DomainListResponse>, ApiError> {
	let response = state.service.refresh_domains().await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: String,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: String,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, error_code: error_code.into(), message: message.into() }
	}
}
impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		match &err {
			Error::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
			Error::EmptyDomainList => json_error(
				StatusCode::SERVICE_UNAVAILABLE,
				"DOMAIN_LIST_UNAVAILABLE",
				err.to_string(),
			),
			Error::InvalidRequest { .. } =>
				json_error(StatusCode::BAD_REQUEST, "INVALID_REQUEST", err.to_string()),
			Error::Index { .. } => {
				tracing::error!(error = %err, "Index request failed.");

				json_error(StatusCode::BAD_GATEWAY, "INDEX_UNAVAILABLE", err.to_string())
			},
			Error::Export { .. } => {
				tracing::error!(error = %err, "CSV export failed.");

				json_error(StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_FAILED", err.to_string())
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}

pub fn json_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}
