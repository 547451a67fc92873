use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Free-form description such as "new" or "good".
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct CarCondition(String);

impl CarCondition {
    pub fn new(condition: impl Into<String>) -> Self {
        Self(condition.into())
    }
}
