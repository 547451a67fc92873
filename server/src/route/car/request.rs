use application::transfer::{CarFilter, DeleteCarDto, GetCarDto, SaveCarDto};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;
use crate::route::{require_text, FilterQuery, IdQuery};

#[derive(Debug, Deserialize)]
pub struct CarRequest {
    brand: String,
    model: String,
    year: i32,
    price: f64,
    condition: String,
}

#[derive(Debug)]
pub struct GetCarRequest {
    id: i32,
}

impl GetCarRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Transformer {
    fn validate(input: CarRequest, id: Option<i32>) -> Result<SaveCarDto, ErrorStatus> {
        require_text("brand", &input.brand)?;
        require_text("model", &input.model)?;
        require_text("condition", &input.condition)?;
        let this_year = OffsetDateTime::now_utc().year();
        if input.year > this_year {
            return Err(ErrorStatus::invalid_input(format!(
                "year {} is later than {}",
                input.year, this_year
            )));
        }
        if !input.price.is_finite() || input.price < 0.0 {
            return Err(ErrorStatus::invalid_input(format!(
                "price {} must be a non-negative number",
                input.price
            )));
        }
        Ok(SaveCarDto {
            id,
            brand: input.brand,
            model: input.model,
            year: input.year,
            price: input.price,
            condition: input.condition,
        })
    }
}

impl TryIntake<CarRequest> for Transformer {
    type To = SaveCarDto;
    type Error = ErrorStatus;
    fn emit(&self, input: CarRequest) -> Result<Self::To, Self::Error> {
        Self::validate(input, None)
    }
}

impl TryIntake<(IdQuery, CarRequest)> for Transformer {
    type To = SaveCarDto;
    type Error = ErrorStatus;
    fn emit(&self, (query, input): (IdQuery, CarRequest)) -> Result<Self::To, Self::Error> {
        let id = query.saving_id()?;
        Self::validate(input, Some(id))
    }
}

impl Intake<GetCarRequest> for Transformer {
    type To = GetCarDto;
    fn emit(&self, input: GetCarRequest) -> Self::To {
        GetCarDto { id: input.id }
    }
}

impl Intake<IdQuery> for Transformer {
    type To = DeleteCarDto;
    fn emit(&self, input: IdQuery) -> Self::To {
        DeleteCarDto { id: input.id() }
    }
}

impl TryIntake<FilterQuery> for Transformer {
    type To = CarFilter;
    type Error = ErrorStatus;
    fn emit(&self, input: FilterQuery) -> Result<Self::To, Self::Error> {
        Ok(CarFilter::parse(input.name_filter(), input.params())?)
    }
}
