use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Order, OrderId, OrderStatus};
use crate::KernelError;

#[async_trait::async_trait]
pub trait OrderModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        order: &Order,
    ) -> error_stack::Result<OrderId, KernelError>;
    async fn update_status(
        &self,
        con: &mut Self::Transaction,
        order_id: &OrderId,
        status: &OrderStatus,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnOrderModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type OrderModifier: OrderModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn order_modifier(&self) -> &Self::OrderModifier;
}
