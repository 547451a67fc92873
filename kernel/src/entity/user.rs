mod age;
mod city;
mod id;
mod login;
mod name;
mod password;
mod role;

pub use self::{age::*, city::*, id::*, login::*, name::*, password::*, role::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct User {
    id: UserId,
    login: UserLogin,
    password: UserPassword,
    name: UserName,
    age: UserAge,
    city: UserCity,
    roles: UserRoles,
}

impl User {
    pub fn new(
        id: UserId,
        login: UserLogin,
        password: UserPassword,
        name: UserName,
        age: UserAge,
        city: UserCity,
        roles: UserRoles,
    ) -> Self {
        Self {
            id,
            login,
            password,
            name,
            age,
            city,
            roles,
        }
    }
}
