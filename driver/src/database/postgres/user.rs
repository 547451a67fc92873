use std::str::FromStr;

use error_stack::Report;
use sqlx::PgConnection;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{
    Role, User, UserAge, UserCity, UserId, UserLogin, UserName, UserPassword, UserRoles,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresUserRepository;

#[async_trait::async_trait]
impl UserQuery for PostgresUserRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        PgUserInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_id(con, id).await
    }

    async fn find_by_login(
        &self,
        con: &mut PostgresTransaction,
        login: &UserLogin,
    ) -> error_stack::Result<Option<User>, KernelError> {
        PgUserInternal::find_by_login(con, login).await
    }
}

#[async_trait::async_trait]
impl UserModifier for PostgresUserRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<UserId, KernelError> {
        PgUserInternal::create(con, user).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        PgUserInternal::update(con, user).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i32,
    login: String,
    password: String,
    name: String,
    age: i32,
    city: String,
    roles: Vec<String>,
}

impl TryFrom<UserRow> for User {
    type Error = Report<KernelError>;
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roles = row
            .roles
            .iter()
            .map(|role| Role::from_str(role))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|report| report.change_context(KernelError::Internal))?;
        Ok(User::new(
            UserId::new(row.user_id),
            UserLogin::new(row.login),
            UserPassword::new(row.password),
            UserName::new(row.name),
            UserAge::new(row.age),
            UserCity::new(row.city),
            UserRoles::new(roles),
        ))
    }
}

fn role_names(user: &User) -> Vec<String> {
    user.roles()
        .iter()
        .map(|role| role.as_str().to_string())
        .collect()
}

pub(in crate::database) struct PgUserInternal;

impl PgUserInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<User>, KernelError> {
        let rows = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT u.user_id, u.login, u.password, u.name, u.age, u.city,
                   COALESCE(array_agg(r.role ORDER BY r.role) FILTER (WHERE r.role IS NOT NULL), '{}') AS roles
            FROM car_shop."user" u
            LEFT JOIN car_shop.user_roles r ON r.user_id = u.user_id
            GROUP BY u.user_id
            ORDER BY u.user_id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT u.user_id, u.login, u.password, u.name, u.age, u.city,
                   COALESCE(array_agg(r.role ORDER BY r.role) FILTER (WHERE r.role IS NOT NULL), '{}') AS roles
            FROM car_shop."user" u
            LEFT JOIN car_shop.user_roles r ON r.user_id = u.user_id
            WHERE u.user_id = $1
            GROUP BY u.user_id
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_login(
        con: &mut PgConnection,
        login: &UserLogin,
    ) -> error_stack::Result<Option<User>, KernelError> {
        let row = sqlx::query_as::<_, UserRow>(
            // language=postgresql
            r#"
            SELECT u.user_id, u.login, u.password, u.name, u.age, u.city,
                   COALESCE(array_agg(r.role ORDER BY r.role) FILTER (WHERE r.role IS NOT NULL), '{}') AS roles
            FROM car_shop."user" u
            LEFT JOIN car_shop.user_roles r ON r.user_id = u.user_id
            WHERE u.login = $1
            GROUP BY u.user_id
            "#,
        )
        .bind(login.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(User::try_from).transpose()
    }

    async fn create(con: &mut PgConnection, user: &User) -> error_stack::Result<UserId, KernelError> {
        let id = sqlx::query_scalar::<_, i32>(
            // language=postgresql
            r#"
            INSERT INTO car_shop."user" (login, password, name, age, city)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING user_id
            "#,
        )
        .bind(user.login().as_ref())
        .bind(user.password().as_ref())
        .bind(user.name().as_ref())
        .bind(user.age().as_ref())
        .bind(user.city().as_ref())
        .fetch_one(&mut *con)
        .await
        .convert_error()?;
        let id = UserId::new(id);
        Self::insert_roles(con, &id, role_names(user)).await?;
        Ok(id)
    }

    async fn update(con: &mut PgConnection, user: &User) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE car_shop."user"
            SET login = $2, password = $3, name = $4, age = $5, city = $6
            WHERE user_id = $1
            "#,
        )
        .bind(user.id().as_ref())
        .bind(user.login().as_ref())
        .bind(user.password().as_ref())
        .bind(user.name().as_ref())
        .bind(user.age().as_ref())
        .bind(user.city().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("User {} not found", user.id().as_ref())));
        }

        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM car_shop.user_roles
            WHERE user_id = $1
            "#,
        )
        .bind(user.id().as_ref())
        .execute(&mut *con)
        .await
        .convert_error()?;
        Self::insert_roles(con, user.id(), role_names(user)).await
    }

    async fn insert_roles(
        con: &mut PgConnection,
        id: &UserId,
        roles: Vec<String>,
    ) -> error_stack::Result<(), KernelError> {
        if roles.is_empty() {
            return Ok(());
        }
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO car_shop.user_roles (user_id, role)
            SELECT $1, UNNEST($2::text[])
            "#,
        )
        .bind(id.as_ref())
        .bind(roles)
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rand::distributions::{Alphanumeric, DistString};

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{
        Role, User, UserAge, UserCity, UserId, UserLogin, UserName, UserPassword, UserRoles,
    };
    use kernel::KernelError;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::PostgresUserRepository;

    fn unique_login() -> UserLogin {
        UserLogin::new(format!(
            "user-{}",
            Alphanumeric.sample_string(&mut rand::thread_rng(), 12)
        ))
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn user_roles_are_replaced_on_update() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let login = unique_login();
        let user = User::new(
            UserId::default(),
            login.clone(),
            UserPassword::hash("secret")?,
            UserName::new("Ivan"),
            UserAge::new(30),
            UserCity::new("Moscow"),
            UserRoles::new([Role::Client]),
        );

        let id = PostgresUserRepository.create(&mut connection, &user).await?;
        let user = user.reconstruct(|u| u.id = id);
        let found = PostgresUserRepository
            .find_by_login(&mut connection, &login)
            .await?;
        assert_eq!(found, Some(user.clone()));

        let user = user.reconstruct(|u| u.roles = UserRoles::new([Role::Manager, Role::Administrator]));
        PostgresUserRepository.update(&mut connection, &user).await?;
        let found = PostgresUserRepository.find_by_id(&mut connection, &id).await?;
        assert_eq!(found, Some(user));
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn duplicate_login_conflicts() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let user = User::new(
            UserId::default(),
            unique_login(),
            UserPassword::hash("secret")?,
            UserName::new("Olga"),
            UserAge::new(25),
            UserCity::new("Kazan"),
            UserRoles::default(),
        );
        PostgresUserRepository.create(&mut connection, &user).await?;
        let report = PostgresUserRepository
            .create(&mut connection, &user)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        Ok(())
    }
}
