use application::transfer::{
    CancelOrderDto, ChangeOrderStatusDto, CreateOrderDto, GetOrderDto, OrderFilter,
};
use kernel::prelude::entity::OrderDate;
use serde::Deserialize;
use time::Date;

use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;
use crate::route::{require_text, FilterQuery, IdQuery};

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    user_id: i32,
    car_id: i32,
    #[serde(default)]
    date: Option<Date>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusQuery {
    id: i32,
    status: String,
}

#[derive(Debug)]
pub struct GetOrderRequest {
    id: i32,
}

impl GetOrderRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<OrderRequest> for Transformer {
    type To = CreateOrderDto;
    type Error = ErrorStatus;
    fn emit(&self, input: OrderRequest) -> Result<Self::To, Self::Error> {
        if input.user_id <= 0 {
            return Err(ErrorStatus::invalid_input(format!(
                "Invalid user_id: {}",
                input.user_id
            )));
        }
        if input.car_id <= 0 {
            return Err(ErrorStatus::invalid_input(format!(
                "Invalid car_id: {}",
                input.car_id
            )));
        }
        if let Some(date) = input.date {
            if OrderDate::new(date).is_future() {
                return Err(ErrorStatus::invalid_input(format!(
                    "date {date} is in the future"
                )));
            }
        }
        if let Some(status) = &input.status {
            require_text("status", status)?;
        }
        Ok(CreateOrderDto {
            user_id: input.user_id,
            car_id: input.car_id,
            date: input.date,
            status: input.status,
        })
    }
}

impl TryIntake<ChangeStatusQuery> for Transformer {
    type To = ChangeOrderStatusDto;
    type Error = ErrorStatus;
    fn emit(&self, input: ChangeStatusQuery) -> Result<Self::To, Self::Error> {
        require_text("status", &input.status)?;
        Ok(ChangeOrderStatusDto {
            id: input.id,
            status: input.status,
        })
    }
}

impl Intake<IdQuery> for Transformer {
    type To = CancelOrderDto;
    fn emit(&self, input: IdQuery) -> Self::To {
        CancelOrderDto { id: input.id() }
    }
}

impl Intake<GetOrderRequest> for Transformer {
    type To = GetOrderDto;
    fn emit(&self, input: GetOrderRequest) -> Self::To {
        GetOrderDto { id: input.id }
    }
}

impl TryIntake<FilterQuery> for Transformer {
    type To = OrderFilter;
    type Error = ErrorStatus;
    fn emit(&self, input: FilterQuery) -> Result<Self::To, Self::Error> {
        Ok(OrderFilter::parse(input.name_filter(), input.params())?)
    }
}
