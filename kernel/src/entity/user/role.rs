use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

const ADMINISTRATOR: &str = "ADMINISTRATOR";
const MANAGER: &str = "MANAGER";
const CLIENT: &str = "CLIENT";

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrator,
    Manager,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => ADMINISTRATOR,
            Role::Manager => MANAGER,
            Role::Client => CLIENT,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            ADMINISTRATOR => Ok(Role::Administrator),
            MANAGER => Ok(Role::Manager),
            CLIENT => Ok(Role::Client),
            _ => Err(Report::new(KernelError::InvalidInput)
                .attach_printable(format!("Unknown role: {value}"))),
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct UserRoles(BTreeSet<Role>);

impl UserRoles {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// Newly registered users without an explicit role are clients.
    pub fn or_client(self) -> Self {
        if self.0.is_empty() {
            Self::new([Role::Client])
        } else {
            self
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}
