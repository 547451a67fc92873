mod brand;
mod condition;
mod id;
mod model;
mod price;
mod year;

pub use self::{brand::*, condition::*, id::*, model::*, price::*, year::*};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, References, Destructure, Mutation)]
pub struct Car {
    id: CarId,
    brand: CarBrand,
    model: CarModel,
    year: CarYear,
    price: CarPrice,
    condition: CarCondition,
}

impl Car {
    pub fn new(
        id: CarId,
        brand: CarBrand,
        model: CarModel,
        year: CarYear,
        price: CarPrice,
        condition: CarCondition,
    ) -> Self {
        Self {
            id,
            brand,
            model,
            year,
            price,
            condition,
        }
    }
}
