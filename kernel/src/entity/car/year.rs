use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarYear(i32);

impl CarYear {
    pub fn new(year: impl Into<i32>) -> Self {
        Self(year.into())
    }
}
