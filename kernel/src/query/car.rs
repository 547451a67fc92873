use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Car, CarId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CarQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_all(&self, con: &mut Self::Transaction)
        -> error_stack::Result<Vec<Car>, KernelError>;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError>;
    /// Same as `find_by_id`, but keeps the car locked against concurrent lockers
    /// until `con` is committed or dropped.
    async fn lock_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError>;
}

pub trait DependOnCarQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CarQuery: CarQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn car_query(&self) -> &Self::CarQuery;
}
