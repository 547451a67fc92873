use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Default, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct UserId(i32);

impl UserId {
    pub fn new(id: impl Into<i32>) -> Self {
        Self(id.into())
    }

    pub fn is_unsaved(&self) -> bool {
        self.0 == 0
    }
}
