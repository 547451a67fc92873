mod auth;
mod car;
mod order;
mod user;

pub use self::{auth::*, car::*, order::*, user::*};

/// Result of a save-or-update call: inserts report the generated id.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SaveOutcome {
    Inserted(i32),
    Updated,
}
