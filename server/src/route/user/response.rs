use application::transfer::{SaveOutcome, UserDto};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::prelude::entity::Role;
use serde::Serialize;

use crate::controller::Exhaust;
use crate::route::saved_response;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    id: i32,
    login: String,
    name: String,
    age: i32,
    city: String,
    roles: Vec<Role>,
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            login: value.login,
            name: value.name,
            age: value.age,
            city: value.city,
            roles: value.roles,
        }
    }
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Option<UserDto>> for Presenter {
    type To = Option<UserResponse>;
    fn emit(&self, input: Option<UserDto>) -> Self::To {
        input.map(UserResponse::from)
    }
}

impl Exhaust<Vec<UserDto>> for Presenter {
    type To = axum::Json<Vec<UserResponse>>;
    fn emit(&self, input: Vec<UserDto>) -> Self::To {
        axum::Json(input.into_iter().map(UserResponse::from).collect())
    }
}

impl Exhaust<SaveOutcome> for Presenter {
    type To = Response;
    fn emit(&self, input: SaveOutcome) -> Self::To {
        saved_response(input)
    }
}
