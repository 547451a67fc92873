mod fixture;
mod memory;
mod postgres;

pub use self::{fixture::*, memory::*, postgres::*};
