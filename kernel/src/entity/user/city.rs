use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserCity(String);

impl UserCity {
    pub fn new(city: impl Into<String>) -> Self {
        Self(city.into())
    }
}
