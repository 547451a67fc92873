mod car;
mod order;
mod user;

pub use self::{car::*, order::*, user::*};
