use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

pub const CREATED_STATUS: &str = "created";
pub const CANCELED_STATUS: &str = "canceled";

/// Free-form order status. Only the releasing statuses carry meaning for car availability.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn created() -> Self {
        Self::new(CREATED_STATUS)
    }

    pub fn canceled() -> Self {
        Self::new(CANCELED_STATUS)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::created()
    }
}
