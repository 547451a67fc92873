use application::transfer::AuthenticatedDto;
use kernel::prelude::entity::Role;
use serde::Serialize;

use crate::controller::Exhaust;
use crate::route::CreatedResponse;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    id: i32,
    roles: Vec<Role>,
}

pub struct Presenter;

impl Exhaust<i32> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, input: i32) -> Self::To {
        CreatedResponse::new(input)
    }
}

impl Exhaust<AuthenticatedDto> for Presenter {
    type To = axum::Json<LoginResponse>;
    fn emit(&self, input: AuthenticatedDto) -> Self::To {
        axum::Json(LoginResponse {
            id: input.id,
            roles: input.roles,
        })
    }
}
