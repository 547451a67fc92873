use application::transfer::{GetUserDto, GetUserOrdersDto, SaveUserDto, UserFilter, UserSortKey};
use kernel::prelude::entity::Role;
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;
use crate::route::{require_text, FilterQuery, IdQuery};

/// Body of user registration and replacement. `password` is the plain password.
#[derive(Debug, Deserialize)]
pub struct UserRequest {
    pub(crate) login: String,
    pub(crate) password: String,
    pub(crate) name: String,
    pub(crate) age: i32,
    pub(crate) city: String,
    #[serde(default)]
    pub(crate) roles: Vec<Role>,
}

impl UserRequest {
    pub(crate) fn validate(&self) -> Result<(), ErrorStatus> {
        require_text("login", &self.login)?;
        require_text("password", &self.password)?;
        require_text("name", &self.name)?;
        require_text("city", &self.city)?;
        if self.age < 0 {
            return Err(ErrorStatus::invalid_input(format!("Invalid age: {}", self.age)));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    params: String,
}

#[derive(Debug)]
pub struct GetUserRequest {
    id: i32,
}

impl GetUserRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetUserOrdersRequest {
    id: i32,
}

impl GetUserOrdersRequest {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl TryIntake<(IdQuery, UserRequest)> for Transformer {
    type To = SaveUserDto;
    type Error = ErrorStatus;
    fn emit(&self, (query, input): (IdQuery, UserRequest)) -> Result<Self::To, Self::Error> {
        let id = query.saving_id()?;
        input.validate()?;
        Ok(SaveUserDto {
            id: Some(id),
            login: input.login,
            password: input.password,
            name: input.name,
            age: input.age,
            city: input.city,
            roles: input.roles,
        })
    }
}

impl Intake<GetUserRequest> for Transformer {
    type To = GetUserDto;
    fn emit(&self, input: GetUserRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<GetUserOrdersRequest> for Transformer {
    type To = GetUserOrdersDto;
    fn emit(&self, input: GetUserOrdersRequest) -> Self::To {
        GetUserOrdersDto { user_id: input.id }
    }
}

impl TryIntake<FilterQuery> for Transformer {
    type To = UserFilter;
    type Error = ErrorStatus;
    fn emit(&self, input: FilterQuery) -> Result<Self::To, Self::Error> {
        Ok(UserFilter::parse(input.name_filter(), input.params())?)
    }
}

impl TryIntake<SortQuery> for Transformer {
    type To = UserSortKey;
    type Error = ErrorStatus;
    fn emit(&self, input: SortQuery) -> Result<Self::To, Self::Error> {
        Ok(input.params.parse::<UserSortKey>()?)
    }
}
