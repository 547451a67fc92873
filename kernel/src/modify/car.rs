use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Car, CarId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CarModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Stores `car` under a freshly generated id, ignoring `car.id()`.
    async fn create(
        &self,
        con: &mut Self::Transaction,
        car: &Car,
    ) -> error_stack::Result<CarId, KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        car: &Car,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        car_id: &CarId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCarModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CarModifier: CarModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn car_modifier(&self) -> &Self::CarModifier;
}
