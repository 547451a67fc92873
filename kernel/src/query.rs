mod car;
mod order;
pub mod select;
mod user;

pub use self::{car::*, order::*, user::*};
