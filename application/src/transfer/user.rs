use std::str::FromStr;

use error_stack::Report;

use kernel::prelude::entity::{DestructUser, Role, User};
use kernel::KernelError;

/// A user as shown to clients. The password hash stays in the store.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UserDto {
    pub id: i32,
    pub login: String,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub roles: Vec<Role>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            login,
            name,
            age,
            city,
            roles,
            ..
        } = value.into_destruct();
        Self {
            id: id.into(),
            login: login.into(),
            name: name.into(),
            age: age.into(),
            city: city.into(),
            roles: roles.iter().copied().collect(),
        }
    }
}

pub struct GetUserDto {
    pub id: i32,
}

/// `id` of `None` or `Some(0)` registers a new user. `password` is the plain password.
#[derive(Debug, Clone)]
pub struct SaveUserDto {
    pub id: Option<i32>,
    pub login: String,
    pub password: String,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum UserFilter {
    Name(String),
    Age(i32),
    City(String),
}

impl UserFilter {
    pub fn parse(name: &str, params: &str) -> error_stack::Result<Self, KernelError> {
        match name {
            "name" => Ok(Self::Name(params.to_string())),
            "age" => params.trim().parse::<i32>().map(Self::Age).map_err(|error| {
                Report::new(KernelError::InvalidInput)
                    .attach_printable(format!("Invalid age '{params}': {error}"))
            }),
            "city" => Ok(Self::City(params.to_string())),
            _ => Err(Report::new(KernelError::InvalidInput)
                .attach_printable(format!("Unknown user filter: {name}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum UserSortKey {
    Name,
    Age,
    City,
}

impl FromStr for UserSortKey {
    type Err = Report<KernelError>;
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "city" => Ok(Self::City),
            _ => Err(Report::new(KernelError::InvalidInput)
                .attach_printable(format!("Unknown sort key: {value}"))),
        }
    }
}
