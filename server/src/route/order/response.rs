use application::transfer::OrderDto;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use time::Date;

use crate::controller::Exhaust;
use crate::route::CreatedResponse;

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    id: i32,
    user_id: i32,
    car_id: i32,
    date: Date,
    status: String,
}

impl From<OrderDto> for OrderResponse {
    fn from(value: OrderDto) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            car_id: value.car_id,
            date: value.date,
            status: value.status,
        }
    }
}

impl IntoResponse for OrderResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, axum::Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<i32> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: i32) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<Option<OrderDto>> for Presenter {
    type To = Option<OrderResponse>;
    fn emit(&self, input: Option<OrderDto>) -> Self::To {
        input.map(OrderResponse::from)
    }
}

impl Exhaust<Vec<OrderDto>> for Presenter {
    type To = axum::Json<Vec<OrderResponse>>;
    fn emit(&self, input: Vec<OrderDto>) -> Self::To {
        axum::Json(input.into_iter().map(OrderResponse::from).collect())
    }
}

impl Exhaust<Option<Vec<OrderDto>>> for Presenter {
    type To = Option<axum::Json<Vec<OrderResponse>>>;
    fn emit(&self, input: Option<Vec<OrderDto>>) -> Self::To {
        input.map(|orders| <Self as Exhaust<Vec<OrderDto>>>::emit(self, orders))
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
