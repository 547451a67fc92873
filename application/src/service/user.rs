use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::select::{filter_by, sort_by_field};
use kernel::interface::query::{DependOnUserQuery, UserQuery};
use kernel::interface::update::{DependOnUserModifier, UserModifier};
use kernel::prelude::entity::{
    User, UserAge, UserCity, UserId, UserLogin, UserName, UserPassword, UserRoles,
};
use kernel::KernelError;

use crate::transfer::{GetUserDto, SaveOutcome, SaveUserDto, UserDto, UserFilter, UserSortKey};

/// Inserts `user` after making sure its login is still free.
pub(crate) async fn insert_user<T>(
    service: &T,
    connection: &mut <<T as DependOnDatabaseConnection>::DatabaseConnection as DatabaseConnection>::Transaction,
    user: &User,
) -> error_stack::Result<UserId, KernelError>
where
    T: ?Sized + DependOnUserQuery + DependOnUserModifier,
{
    if service
        .user_query()
        .find_by_login(connection, user.login())
        .await?
        .is_some()
    {
        return Err(Report::new(KernelError::Conflict).attach_printable(format!(
            "Login {} is already taken",
            AsRef::<String>::as_ref(user.login())
        )));
    }
    service.user_modifier().create(connection, user).await
}

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_all_users(&self) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = UserId::new(dto.id);
        let user = self.user_query().find_by_id(&mut connection, &id).await?;
        connection.commit().await?;
        Ok(user.map(UserDto::from))
    }

    async fn filter_users(
        &self,
        filter: UserFilter,
    ) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut connection).await?;
        connection.commit().await?;

        let users = match &filter {
            UserFilter::Name(name) => {
                filter_by(users, |user| user.name().as_ref(), |n: &String| n == name)
            }
            UserFilter::Age(age) => {
                filter_by(users, |user| user.age().as_ref(), |a: &i32| a == age)
            }
            UserFilter::City(city) => {
                filter_by(users, |user| user.city().as_ref(), |c: &String| c == city)
            }
        };
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn sort_users(&self, key: UserSortKey) -> error_stack::Result<Vec<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let users = self.user_query().find_all(&mut connection).await?;
        connection.commit().await?;

        let users = match key {
            UserSortKey::Name => sort_by_field(users, |user| user.name().clone()),
            UserSortKey::Age => sort_by_field(users, |user| *user.age()),
            UserSortKey::City => sort_by_field(users, |user| user.city().clone()),
        };
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait SaveUserService: 'static + Sync + Send + DependOnUserQuery + DependOnUserModifier {
    /// Registers the user when `dto.id` is unset or `0`, otherwise replaces every field of the
    /// stored user. The password is hashed either way.
    async fn save_user(&self, dto: SaveUserDto) -> error_stack::Result<SaveOutcome, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = UserId::new(dto.id.unwrap_or_default());
        let user = User::new(
            id,
            UserLogin::new(dto.login),
            UserPassword::hash(&dto.password)?,
            UserName::new(dto.name),
            UserAge::new(dto.age),
            UserCity::new(dto.city),
            UserRoles::new(dto.roles),
        );

        let outcome = if id.is_unsaved() {
            let user = user.reconstruct(|u| u.roles = u.roles.clone().or_client());
            let id = insert_user(self, &mut connection, &user).await?;
            SaveOutcome::Inserted(id.into())
        } else {
            self.user_modifier().update(&mut connection, &user).await?;
            SaveOutcome::Updated
        };
        connection.commit().await?;
        Ok(outcome)
    }
}

impl<T> SaveUserService for T where T: DependOnUserQuery + DependOnUserModifier {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::Role;
    use kernel::KernelError;

    use crate::service::{GetUserService, SaveUserService};
    use crate::transfer::{GetUserDto, SaveOutcome, SaveUserDto, UserFilter, UserSortKey};

    fn user(login: &str, name: &str, age: i32, city: &str) -> SaveUserDto {
        SaveUserDto {
            id: None,
            login: login.to_string(),
            password: login.to_string(),
            name: name.to_string(),
            age,
            city: city.to_string(),
            roles: Vec::new(),
        }
    }

    async fn populated() -> error_stack::Result<InMemoryDatabase, KernelError> {
        let db = InMemoryDatabase::default();
        db.save_user(user("admin", "Alexandr", 33, "Moscow")).await?;
        db.save_user(user("manager1", "John", 36, "New-York")).await?;
        db.save_user(user("manager2", "Alexandr", 34, "Moscow")).await?;
        db.save_user(user("client1", "Tanya", 25, "London")).await?;
        Ok(db)
    }

    #[tokio::test]
    async fn registered_user_round_trips() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let SaveOutcome::Inserted(id) = db.save_user(user("anna", "Anna", 28, "Tver")).await?
        else {
            panic!("expected insert");
        };
        let found = db.get_user(GetUserDto { id }).await?.expect("user is stored");
        assert_eq!(found.login, "anna");
        assert_eq!(found.name, "Anna");
        assert_eq!(found.roles, vec![Role::Client]);
        assert_eq!(db.get_all_users().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_user() -> error_stack::Result<(), KernelError> {
        let db = populated().await?;
        let outcome = db
            .save_user(SaveUserDto {
                id: Some(4),
                roles: vec![Role::Manager],
                ..user("client1", "Tatiana", 26, "Paris")
            })
            .await?;
        assert_eq!(outcome, SaveOutcome::Updated);
        let found = db.get_user(GetUserDto { id: 4 }).await?.expect("user is stored");
        assert_eq!(found.name, "Tatiana");
        assert_eq!(found.roles, vec![Role::Manager]);

        let report = db
            .save_user(SaveUserDto {
                id: Some(40),
                ..user("ghost", "Ghost", 1, "Nowhere")
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);

        let report = db
            .save_user(SaveUserDto {
                id: Some(4),
                ..user("admin", "Tanya", 25, "London")
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        Ok(())
    }

    #[tokio::test]
    async fn filter_users_by_field() -> error_stack::Result<(), KernelError> {
        let db = populated().await?;
        let moscow = db.filter_users(UserFilter::City("Moscow".to_string())).await?;
        assert_eq!(moscow.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 3]);
        let aged = db.filter_users(UserFilter::Age(36)).await?;
        assert_eq!(aged.iter().map(|u| u.login.as_str()).collect::<Vec<_>>(), vec!["manager1"]);
        assert!(db
            .filter_users(UserFilter::Name("Nobody".to_string()))
            .await?
            .is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn sort_is_stable() -> error_stack::Result<(), KernelError> {
        let db = populated().await?;
        let by_name = db.sort_users(UserSortKey::Name).await?;
        assert_eq!(by_name.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 3, 2, 4]);
        let by_age = db.sort_users(UserSortKey::Age).await?;
        assert_eq!(by_age.iter().map(|u| u.age).collect::<Vec<_>>(), vec![25, 33, 34, 36]);
        let by_city = db.sort_users(UserSortKey::City).await?;
        assert_eq!(by_city.iter().map(|u| u.id).collect::<Vec<_>>(), vec![4, 1, 3, 2]);
        Ok(())
    }
}
