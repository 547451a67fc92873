mod date;
mod id;
mod status;

pub use self::{date::*, id::*, status::*};
use crate::entity::{CarId, UserId};
use destructure::{Destructure, Mutation};
use serde::{Deserialize, Serialize};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, References, Destructure, Mutation)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    car_id: CarId,
    date: OrderDate,
    status: OrderStatus,
}

impl Order {
    pub fn new(
        id: OrderId,
        user_id: UserId,
        car_id: CarId,
        date: OrderDate,
        status: OrderStatus,
    ) -> Self {
        Self {
            id,
            user_id,
            car_id,
            date,
            status,
        }
    }
}
