use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Fromln, AsRefln, Serialize, Deserialize)]
pub struct UserAge(i32);

impl UserAge {
    pub fn new(age: impl Into<i32>) -> Self {
        Self(age.into())
    }
}
