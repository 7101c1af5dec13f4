use axum::{
	Json, Router,
	extract::{
		Path, Query, State,
		rejection::{JsonRejection, PathRejection, QueryRejection},
	},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use uuid::Uuid;

use tale_service::{
	BrowseRequest, BrowseResponse, Error as ServiceError, SearchStoriesRequest,
	SearchStoriesResponse, StoryResponse,
};

use crate::state::AppState;

const GENERIC_FAILURE: &str = "Could not load results.";

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/stories/search", post(search_stories))
		.route("/v1/stories", get(browse_stories))
		.route("/v1/stories/{story_id}", get(get_story))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search_stories(
	State(state): State<AppState>,
	payload: Result<Json<SearchStoriesRequest>, JsonRejection>,
) -> Result<Json<SearchStoriesResponse>, ApiError> {
	let Json(payload) = payload?;

	payload.validate()?;

	let response = state.service.search_stories(payload).await?;

	Ok(Json(response))
}

async fn browse_stories(
	State(state): State<AppState>,
	params: Result<Query<BrowseRequest>, QueryRejection>,
) -> Result<Json<BrowseResponse>, ApiError> {
	let Query(params) = params?;
	let response = state.service.browse_stories(params).await?;

	Ok(Json(response))
}

async fn get_story(
	State(state): State<AppState>,
	story_id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StoryResponse>, ApiError> {
	let Path(story_id) = story_id?;
	let response = state.service.get_story(story_id).await?;

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

	fn invalid_request(message: impl Into<String>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
	}
}
impl From<JsonRejection> for ApiError {
	fn from(rejection: JsonRejection) -> Self {
		Self::invalid_request(rejection.body_text())
	}
}
impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::invalid_request(rejection.body_text())
	}
}
impl From<PathRejection> for ApiError {
	fn from(rejection: PathRejection) -> Self {
		Self::invalid_request(rejection.body_text())
	}
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::InvalidRequest { message } => Self::invalid_request(message),
			ServiceError::NotFound { message } =>
				Self::new(StatusCode::NOT_FOUND, "not_found", message),
			ServiceError::Storage { message } => {
				tracing::error!(error = %message, "Storage failure while serving request.");

				Self::new(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", GENERIC_FAILURE)
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
