use kernel::prelude::entity::Role;

pub struct RegisterDto {
    pub login: String,
    pub password: String,
    pub name: String,
    pub age: i32,
    pub city: String,
    pub roles: Vec<Role>,
}

pub struct LoginDto {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AuthenticatedDto {
    pub id: i32,
    pub roles: Vec<Role>,
}
