use application::transfer::SaveOutcome;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ErrorStatus;
use crate::handler::{AppModule, DatabaseModule};

pub use self::{auth::*, car::*, order::*, user::*};

mod auth;
mod car;
mod order;
mod user;

pub fn app_router<D: DatabaseModule>(module: AppModule<D>) -> Router {
    Router::new()
        .route_car()
        .route_order()
        .route_user()
        .route_auth()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(module)
}

/// `?id=` of the PUT, DELETE and order status routes.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: i32,
}

impl IdQuery {
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Accepts `0` (insert) and positive ids.
    pub fn saving_id(&self) -> Result<i32, ErrorStatus> {
        if self.id < 0 {
            return Err(ErrorStatus::invalid_input(format!("Invalid id: {}", self.id)));
        }
        Ok(self.id)
    }
}

/// `?name-filter=…&params=…` of the filter routes.
#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "name-filter")]
    name_filter: String,
    params: String,
}

impl FilterQuery {
    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    pub fn params(&self) -> &str {
        &self.params
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: i32,
}

impl CreatedResponse {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, axum::Json(self)).into_response()
    }
}

pub fn saved_response(outcome: SaveOutcome) -> Response {
    match outcome {
        SaveOutcome::Inserted(id) => CreatedResponse { id }.into_response(),
        SaveOutcome::Updated => StatusCode::NO_CONTENT.into_response(),
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> Result<(), ErrorStatus> {
    if value.trim().is_empty() {
        return Err(ErrorStatus::invalid_input(format!("{field} must not be blank")));
    }
    Ok(())
}
