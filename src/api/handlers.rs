use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::SessionId;
use crate::models::UserId;
use crate::services::recommendations::recommend_for_user;
use crate::session::SessionData;

use super::views;
use super::AppState;

// Request types

/// Form body for the root route
#[derive(Debug, Default, Deserialize)]
pub struct RecommendForm {
    pub user_id: Option<String>,
}

/// True when the client asked for a JSON response.
///
/// The request's own `Content-Type` header selects the response format;
/// nothing else is negotiated.
fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == "application/json")
        .unwrap_or(false)
}

/// Digits-only user id parse; anything else counts as no submission
fn parse_user_id(raw: &str) -> Option<UserId> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// GET `/` renders the empty submission form
pub async fn show_form() -> Html<String> {
    Html(views::index_page(None, &[]))
}

/// POST `/` computes recommendations for the submitted user id.
///
/// The body is parsed as a urlencoded form regardless of the `Content-Type`
/// header; the header only picks the response format. A missing or
/// non-numeric `user_id` renders the same empty form as GET. A valid id runs
/// the recommendation, records the ranked ids in the session, and responds
/// with the joined movie rows.
pub async fn submit_recommendations(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    headers: HeaderMap,
    body: String,
) -> AppResult<Response> {
    let form: RecommendForm = serde_urlencoded::from_str(&body).unwrap_or_default();
    let Some(user_id) = form.user_id.as_deref().and_then(parse_user_id) else {
        return Ok(Html(views::index_page(None, &[])).into_response());
    };

    let recommendations =
        recommend_for_user(&state.matrix, &state.index, user_id, state.neighbor_count)?;
    state
        .sessions
        .put(
            session_id.0,
            SessionData {
                recommendations: recommendations.clone(),
            },
        )
        .await;

    let movies = state.dataset.movies_with_ids(&recommendations);
    if wants_json(&headers) {
        return Ok(Json(movies).into_response());
    }
    Ok(Html(views::index_page(Some(user_id), &movies)).into_response())
}

/// GET `/temp_results` renders the session's last recommendation list.
///
/// An absent or expired session renders an empty table, not an error.
pub async fn temp_results(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    headers: HeaderMap,
) -> Response {
    let data = state.sessions.get(&session_id.0).await.unwrap_or_default();
    let movies = state.dataset.movies_with_ids(&data.recommendations);

    if wants_json(&headers) {
        return Json(movies).into_response();
    }
    Html(views::results_page(&movies)).into_response()
}

/// GET `/api/recommendations`: JSON-only view of the same session data
pub async fn recommendations_api(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Response {
    let data = state.sessions.get(&session_id.0).await.unwrap_or_default();
    let movies = state.dataset.movies_with_ids(&data.recommendations);
    Json(movies).into_response()
}

/// GET `/neighbors_data` reports the neighbor rows behind the last
/// recommendation run.
///
/// No code path records neighbor data into a session and the view has no
/// working render; every hit reports an internal error. See DESIGN.md.
pub async fn neighbors_data() -> AppResult<Response> {
    Err(AppError::Internal(
        "neighbor data is never recorded".to_string(),
    ))
}

/// GET `/movies`: full movie table, unfiltered, HTML only
pub async fn movies_table(State(state): State<AppState>) -> Html<String> {
    Html(views::movies_page(&state.dataset.movies))
}

/// GET `/ratings`: full rating table, unfiltered, HTML only
pub async fn ratings_table(State(state): State<AppState>) -> Html<String> {
    Html(views::ratings_page(&state.dataset.ratings))
}

/// GET `/tags`: full tag table, unfiltered, HTML only
pub async fn tags_table(State(state): State<AppState>) -> Html<String> {
    Html(views::tags_page(&state.dataset.tags))
}
