use error_stack::Report;

use kernel::interface::query::OrderQuery;
use kernel::interface::update::OrderModifier;
use kernel::prelude::entity::{CarId, Order, OrderId, OrderStatus, UserId};
use kernel::KernelError;

use crate::database::memory::MemoryTransaction;

pub struct InMemoryOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for InMemoryOrderRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        Ok(con.working.orders.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        Ok(con.working.orders.get(id).cloned())
    }

    async fn find_by_car_id(
        &self,
        con: &mut MemoryTransaction,
        car_id: &CarId,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        Ok(con
            .working
            .orders
            .values()
            .filter(|order| order.car_id() == car_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_id(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        Ok(con
            .working
            .orders
            .values()
            .filter(|order| order.user_id() == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl OrderModifier for InMemoryOrderRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        order: &Order,
    ) -> error_stack::Result<OrderId, KernelError> {
        let state = &mut con.working;
        if !state.cars.contains_key(order.car_id()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Car {} does not exist", order.car_id().as_ref())));
        }
        if !state.users.contains_key(order.user_id()) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("User {} does not exist", order.user_id().as_ref())));
        }
        state.order_sequence += 1;
        let id = OrderId::new(state.order_sequence);
        state
            .orders
            .insert(id, order.clone().reconstruct(|o| o.id = id));
        Ok(id)
    }

    async fn update_status(
        &self,
        con: &mut MemoryTransaction,
        order_id: &OrderId,
        status: &OrderStatus,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.orders.get_mut(order_id) {
            Some(order) => {
                *order = order.clone().reconstruct(|o| o.status = status.clone());
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Order {} not found", order_id.as_ref()))),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::OrderQuery;
    use kernel::interface::update::{CarModifier, OrderModifier};
    use kernel::prelude::entity::{
        Car, CarBrand, CarCondition, CarId, CarModel, CarPrice, CarYear, Order, OrderDate,
        OrderId, OrderStatus, UserId,
    };
    use kernel::KernelError;

    use crate::database::{InMemoryCarRepository, InMemoryDatabase, InMemoryOrderRepository};

    #[tokio::test]
    async fn order_needs_existing_references() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.transact().await?;
        let car_id = InMemoryCarRepository
            .create(
                &mut con,
                &Car::new(
                    CarId::default(),
                    CarBrand::new("Audi"),
                    CarModel::new("A4"),
                    CarYear::new(2018),
                    CarPrice::new(15000.0),
                    CarCondition::new("used"),
                ),
            )
            .await?;
        let order = Order::new(
            OrderId::default(),
            UserId::new(99),
            car_id,
            OrderDate::today(),
            OrderStatus::created(),
        );
        let report = InMemoryOrderRepository
            .create(&mut con, &order)
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        assert!(InMemoryOrderRepository
            .find_by_car_id(&mut con, &car_id)
            .await?
            .is_empty());

        let report = InMemoryOrderRepository
            .update_status(&mut con, &OrderId::new(1), &OrderStatus::canceled())
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
