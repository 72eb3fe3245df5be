//! # People API
//!
//! The HTTP layer powered by Axum. Each handler validates its own input,
//! normalizes `sex`, calls the store once and maps the outcome to a status.
//!
//! ## Endpoints
//!
//! - `POST /people` - Create a person (201)
//! - `GET /people?search=` - List people, optionally filtered by name (200)
//! - `PUT /people/:id` - Replace a person's fields (204)
//! - `DELETE /people/:id` - Delete a person (204)
//!
//! Update and delete on an unknown id still answer 204.

use crate::db::PeopleStore;
use crate::error::PeopleError;
use crate::model::{NewPerson, Person, PersonUpdate};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use utoipa::IntoParams;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PeopleStore>,
}

impl AppState {
    pub fn new(store: Arc<PeopleStore>) -> Self {
        Self { store }
    }
}

/// Query parameters for `GET /people`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring of the name
    #[serde(default)]
    pub search: Option<String>,
}

/// Creates the Axum router with all people endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/people", get(list_people).post(create_person))
        .route("/people/:id", put(update_person).delete(delete_person))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unwraps a JSON body, turning shape errors into a 400
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, PeopleError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| PeopleError::Validation(rejection.body_text()))
}

/// Creates a new person
#[utoipa::path(
    post,
    path = "/people",
    tag = "people",
    request_body = NewPerson,
    responses(
        (status = 201, description = "Person created"),
        (status = 400, description = "Validation error", body = crate::model::ErrorBody),
    )
)]
pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<NewPerson>, JsonRejection>,
) -> Result<StatusCode, PeopleError> {
    let fields = body(payload)?.normalize()?;

    let id = state.store.create(fields).await?;
    info!("📥 Created person {}", id);

    Ok(StatusCode::CREATED)
}

/// Lists people, optionally filtered by name
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    params(SearchParams),
    responses(
        (status = 200, description = "People matching the search", body = [Person]),
        (status = 400, description = "Malformed query string", body = crate::model::ErrorBody),
    )
)]
pub async fn list_people(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Person>>, PeopleError> {
    let Query(params) =
        params.map_err(|rejection| PeopleError::Validation(rejection.body_text()))?;
    let people = state.store.list(params.search).await?;
    debug!("🔍 Listed {} people", people.len());

    Ok(Json(people))
}

/// Replaces the data of a person by id
#[utoipa::path(
    put,
    path = "/people/{id}",
    tag = "people",
    params(("id" = String, Path, description = "Person identifier")),
    request_body = PersonUpdate,
    responses(
        (status = 204, description = "Person updated"),
        (status = 400, description = "Validation error", body = crate::model::ErrorBody),
    )
)]
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PersonUpdate>, JsonRejection>,
) -> Result<StatusCode, PeopleError> {
    let fields = body(payload)?.normalize()?;

    let affected = state.store.update(id.clone(), fields).await?;
    info!("📝 Updated person {} ({} rows)", id, affected);

    Ok(StatusCode::NO_CONTENT)
}

/// Removes a person by id
#[utoipa::path(
    delete,
    path = "/people/{id}",
    tag = "people",
    params(("id" = String, Path, description = "Person identifier")),
    responses(
        (status = 204, description = "Person removed"),
    )
)]
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, PeopleError> {
    let affected = state.store.delete(id.clone()).await?;
    info!("🗑️ Deleted person {} ({} rows)", id, affected);

    Ok(StatusCode::NO_CONTENT)
}
