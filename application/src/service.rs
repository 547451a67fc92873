mod auth;
mod car;
mod order;
mod user;

pub use self::{auth::*, car::*, order::*, user::*};

#[cfg(test)]
pub(crate) mod test_support {
    use kernel::KernelError;

    use crate::service::{AuthService, SaveCarService};
    use crate::transfer::{RegisterDto, SaveCarDto, SaveOutcome};

    pub async fn register<D: AuthService>(db: &D, login: &str) -> error_stack::Result<i32, KernelError> {
        db.register(RegisterDto {
            login: login.to_string(),
            password: login.to_string(),
            name: login.to_string(),
            age: 30,
            city: "Moscow".to_string(),
            roles: Vec::new(),
        })
        .await
    }

    pub async fn stock_car<D: SaveCarService>(db: &D, brand: &str) -> error_stack::Result<i32, KernelError> {
        let outcome = db
            .save_car(SaveCarDto {
                id: None,
                brand: brand.to_string(),
                model: "Model".to_string(),
                year: 2020,
                price: 20000.0,
                condition: "new".to_string(),
            })
            .await?;
        match outcome {
            SaveOutcome::Inserted(id) => Ok(id),
            SaveOutcome::Updated => panic!("new car was treated as an update"),
        }
    }
}
