use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarModel(String);

impl CarModel {
    pub fn new(model: impl Into<String>) -> Self {
        Self(model.into())
    }
}
