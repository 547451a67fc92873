use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarPrice(f64);

impl CarPrice {
    pub fn new(price: impl Into<f64>) -> Self {
        Self(price.into())
    }
}
