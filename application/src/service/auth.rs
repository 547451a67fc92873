use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::DependOnUserModifier;
use kernel::prelude::entity::{
    User, UserAge, UserCity, UserId, UserLogin, UserName, UserPassword, UserRoles,
};
use kernel::KernelError;

use crate::service::user::insert_user;
use crate::transfer::{AuthenticatedDto, LoginDto, RegisterDto};

#[async_trait::async_trait]
pub trait AuthService: 'static + Sync + Send + DependOnUserQuery + DependOnUserModifier {
    async fn register(&self, dto: RegisterDto) -> error_stack::Result<i32, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user = User::new(
            UserId::default(),
            UserLogin::new(dto.login),
            UserPassword::hash(&dto.password)?,
            UserName::new(dto.name),
            UserAge::new(dto.age),
            UserCity::new(dto.city),
            UserRoles::new(dto.roles).or_client(),
        );
        let id = insert_user(self, &mut connection, &user).await?;
        connection.commit().await?;
        tracing::info!("Registered user {}", id.as_ref());
        Ok(id.into())
    }

    /// Checks the credentials. Unknown logins and wrong passwords fail the same way.
    async fn login(&self, dto: LoginDto) -> error_stack::Result<AuthenticatedDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let login = UserLogin::new(dto.login);
        let user = self
            .user_query()
            .find_by_login(&mut connection, &login)
            .await?;
        connection.commit().await?;

        match user {
            Some(user) if user.password().verify(&dto.password) => Ok(AuthenticatedDto {
                id: (*user.id()).into(),
                roles: user.roles().iter().copied().collect(),
            }),
            _ => Err(Report::new(KernelError::Unauthorized)),
        }
    }
}

impl<T> AuthService for T where T: DependOnUserQuery + DependOnUserModifier {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::Role;
    use kernel::KernelError;

    use crate::service::AuthService;
    use crate::transfer::{LoginDto, RegisterDto};

    fn register_dto(login: &str, roles: Vec<Role>) -> RegisterDto {
        RegisterDto {
            login: login.to_string(),
            password: "secret".to_string(),
            name: "Robert".to_string(),
            age: 33,
            city: "Moscow".to_string(),
            roles,
        }
    }

    #[tokio::test]
    async fn register_then_login() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let id = db.register(register_dto("client3", Vec::new())).await?;

        let authenticated = db
            .login(LoginDto {
                login: "client3".to_string(),
                password: "secret".to_string(),
            })
            .await?;
        assert_eq!(authenticated.id, id);
        assert_eq!(authenticated.roles, vec![Role::Client]);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        db.register(register_dto("manager1", vec![Role::Manager])).await?;
        let report = db
            .register(register_dto("manager1", vec![Role::Client]))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        Ok(())
    }

    #[tokio::test]
    async fn bad_credentials_are_unauthorized() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        db.register(register_dto("admin", vec![Role::Administrator])).await?;

        for (login, password) in [("admin", "wrong"), ("nobody", "secret")] {
            let report = db
                .login(LoginDto {
                    login: login.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(report.current_context(), &KernelError::Unauthorized);
        }
        Ok(())
    }
}
