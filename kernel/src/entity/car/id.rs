use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Primary key of a car. `0` marks a car that has not been stored yet.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Default, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct CarId(i32);

impl CarId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }

    pub fn is_unsaved(&self) -> bool {
        self.0 == 0
    }
}
