use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{User, UserId, UserLogin};
use crate::KernelError;

#[async_trait::async_trait]
pub trait UserQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<User>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError>;
    async fn find_by_login(
        &self,
        con: &mut Self::Transaction,
        login: &UserLogin,
    ) -> error_stack::Result<Option<User>, KernelError>;
}

pub trait DependOnUserQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type UserQuery: UserQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn user_query(&self) -> &Self::UserQuery;
}
