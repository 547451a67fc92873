use application::transfer::{CarDto, SaveOutcome};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::controller::Exhaust;
use crate::route::saved_response;

#[derive(Debug, Serialize)]
pub struct CarResponse {
    id: i32,
    brand: String,
    model: String,
    year: i32,
    price: f64,
    condition: String,
}

impl From<CarDto> for CarResponse {
    fn from(value: CarDto) -> Self {
        Self {
            id: value.id,
            brand: value.brand,
            model: value.model,
            year: value.year,
            price: value.price,
            condition: value.condition,
        }
    }
}

impl IntoResponse for CarResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Option<CarDto>> for Presenter {
    type To = Option<CarResponse>;
    fn emit(&self, input: Option<CarDto>) -> Self::To {
        input.map(CarResponse::from)
    }
}

impl Exhaust<Vec<CarDto>> for Presenter {
    type To = axum::Json<Vec<CarResponse>>;
    fn emit(&self, input: Vec<CarDto>) -> Self::To {
        axum::Json(input.into_iter().map(CarResponse::from).collect())
    }
}

impl Exhaust<SaveOutcome> for Presenter {
    type To = Response;
    fn emit(&self, input: SaveOutcome) -> Self::To {
        saved_response(input)
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
