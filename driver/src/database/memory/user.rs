use error_stack::Report;

use kernel::interface::query::UserQuery;
use kernel::interface::update::UserModifier;
use kernel::prelude::entity::{User, UserId, UserLogin};
use kernel::KernelError;

use crate::database::memory::{MemoryState, MemoryTransaction};

pub struct InMemoryUserRepository;

fn ensure_login_free(
    state: &MemoryState,
    login: &UserLogin,
    owner: Option<&UserId>,
) -> error_stack::Result<(), KernelError> {
    let taken = state
        .users
        .values()
        .any(|user| user.login() == login && Some(user.id()) != owner);
    if taken {
        return Err(Report::new(KernelError::Conflict)
            .attach_printable(format!("Login {} is already taken", login.as_ref())));
    }
    Ok(())
}

#[async_trait::async_trait]
impl UserQuery for InMemoryUserRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        Ok(con.working.users.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.working.users.get(id).cloned())
    }

    async fn find_by_login(
        &self,
        con: &mut MemoryTransaction,
        login: &UserLogin,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con
            .working
            .users
            .values()
            .find(|user| user.login() == login)
            .cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier for InMemoryUserRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<UserId, KernelError> {
        let state = &mut con.working;
        ensure_login_free(state, user.login(), None)?;
        state.user_sequence += 1;
        let id = UserId::new(state.user_sequence);
        state
            .users
            .insert(id, user.clone().reconstruct(|u| u.id = id));
        Ok(id)
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        let state = &mut con.working;
        if !state.users.contains_key(user.id()) {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("User {} not found", user.id().as_ref())));
        }
        ensure_login_free(state, user.login(), Some(user.id()))?;
        state.users.insert(*user.id(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::UserQuery;
    use kernel::interface::update::UserModifier;
    use kernel::prelude::entity::{
        Role, User, UserAge, UserCity, UserId, UserLogin, UserName, UserPassword, UserRoles,
    };
    use kernel::KernelError;

    use crate::database::{InMemoryDatabase, InMemoryUserRepository};

    fn user(login: &str) -> User {
        User::new(
            UserId::default(),
            UserLogin::new(login),
            UserPassword::new("hash"),
            UserName::new("Anna"),
            UserAge::new(28),
            UserCity::new("Tver"),
            UserRoles::new([Role::Client]),
        )
    }

    #[tokio::test]
    async fn login_is_unique() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.transact().await?;
        let first = InMemoryUserRepository.create(&mut con, &user("anna")).await?;
        let second = InMemoryUserRepository.create(&mut con, &user("boris")).await?;

        let report = InMemoryUserRepository
            .create(&mut con, &user("anna"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let renamed = user("anna").reconstruct(|u| u.id = second);
        let report = InMemoryUserRepository
            .update(&mut con, &renamed)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        let same_login = user("anna").reconstruct(|u| {
            u.id = first;
            u.city = UserCity::new("Pskov");
        });
        InMemoryUserRepository.update(&mut con, &same_login).await?;
        let found = InMemoryUserRepository
            .find_by_login(&mut con, &UserLogin::new("anna"))
            .await?;
        assert_eq!(found, Some(same_login));
        Ok(())
    }
}
