use error_stack::Report;

use kernel::prelude::entity::{
    Car, CarBrand, CarCondition, CarId, CarModel, CarPrice, CarYear, DestructCar,
};
use kernel::KernelError;

#[derive(Debug, Clone, PartialEq)]
pub struct CarDto {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub condition: String,
}

impl From<Car> for CarDto {
    fn from(value: Car) -> Self {
        let DestructCar {
            id,
            brand,
            model,
            year,
            price,
            condition,
        } = value.into_destruct();
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            year: year.into(),
            price: price.into(),
            condition: condition.into(),
        }
    }
}

pub struct GetCarDto {
    pub id: i32,
}

/// `id` of `None` or `Some(0)` inserts a new car.
#[derive(Debug, Clone)]
pub struct SaveCarDto {
    pub id: Option<i32>,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub condition: String,
}

impl SaveCarDto {
    pub(crate) fn into_car(self) -> (CarId, Car) {
        let id = CarId::new(self.id.unwrap_or_default());
        let car = Car::new(
            id,
            CarBrand::new(self.brand),
            CarModel::new(self.model),
            CarYear::new(self.year),
            CarPrice::new(self.price),
            CarCondition::new(self.condition),
        );
        (id, car)
    }
}

pub struct DeleteCarDto {
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CarFilter {
    Brand(String),
    Condition(String),
    Price(f64),
}

impl CarFilter {
    /// Builds a filter from a `name-filter`/`params` pair.
    pub fn parse(name: &str, params: &str) -> error_stack::Result<Self, KernelError> {
        match name {
            "brand" => Ok(Self::Brand(params.to_string())),
            "condition" => Ok(Self::Condition(params.to_string())),
            "price" => params.trim().parse::<f64>().map(Self::Price).map_err(|error| {
                Report::new(KernelError::InvalidInput)
                    .attach_printable(format!("Invalid price '{params}': {error}"))
            }),
            _ => Err(Report::new(KernelError::InvalidInput)
                .attach_printable(format!("Unknown car filter: {name}"))),
        }
    }
}
