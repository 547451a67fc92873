use application::transfer::{LoginDto, RegisterDto};
use serde::Deserialize;

use crate::controller::{Intake, TryIntake};
use crate::error::ErrorStatus;

use super::super::user::UserRequest;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    login: String,
    password: String,
}

pub struct Transformer;

impl TryIntake<UserRequest> for Transformer {
    type To = RegisterDto;
    type Error = ErrorStatus;
    fn emit(&self, input: UserRequest) -> Result<Self::To, Self::Error> {
        input.validate()?;
        Ok(RegisterDto {
            login: input.login,
            password: input.password,
            name: input.name,
            age: input.age,
            city: input.city,
            roles: input.roles,
        })
    }
}

impl Intake<LoginRequest> for Transformer {
    type To = LoginDto;
    fn emit(&self, input: LoginRequest) -> Self::To {
        LoginDto {
            login: input.login,
            password: input.password,
        }
    }
}
