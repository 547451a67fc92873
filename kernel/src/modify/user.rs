use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{User, UserId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores `user` and its roles under a freshly generated id, ignoring `user.id()`.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        user: &User,
    ) -> error_stack::Result<UserId, KernelError>;
    /// Overwrites every field of the user, roles included.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnUserModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type UserModifier: UserModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn user_modifier(&self) -> &Self::UserModifier;
}
