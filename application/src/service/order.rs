use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::ledger::DependOnReleasingStatuses;
use kernel::interface::query::select::filter_by;
use kernel::interface::query::{
    CarQuery, DependOnCarQuery, DependOnOrderQuery, DependOnUserQuery, OrderQuery, UserQuery,
};
use kernel::interface::update::{DependOnOrderModifier, OrderModifier};
use kernel::prelude::entity::{CarId, Order, OrderDate, OrderId, OrderStatus, UserId};
use kernel::KernelError;

use crate::transfer::{
    CancelOrderDto, ChangeOrderStatusDto, CreateOrderDto, GetOrderDto, GetUserOrdersDto,
    OrderDto, OrderFilter,
};

#[async_trait::async_trait]
pub trait GetOrderService: 'static + Sync + Send + DependOnOrderQuery + DependOnUserQuery {
    async fn get_all_orders(&self) -> error_stack::Result<Vec<OrderDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let orders = self.order_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }

    async fn get_order(
        &self,
        dto: GetOrderDto,
    ) -> error_stack::Result<Option<OrderDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = OrderId::new(dto.id);
        let order = self.order_query().find_by_id(&mut connection, &id).await?;
        connection.commit().await?;
        Ok(order.map(OrderDto::from))
    }

    /// `None` when the user itself does not exist.
    async fn get_user_orders(
        &self,
        dto: GetUserOrdersDto,
    ) -> error_stack::Result<Option<Vec<OrderDto>>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let user_id = UserId::new(dto.user_id);
        if self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }
        let orders = self
            .order_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;
        connection.commit().await?;
        Ok(Some(orders.into_iter().map(OrderDto::from).collect()))
    }

    async fn filter_orders(
        &self,
        filter: OrderFilter,
    ) -> error_stack::Result<Vec<OrderDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let orders = self.order_query().find_all(&mut connection).await?;
        connection.commit().await?;

        let orders = match &filter {
            OrderFilter::Date(date) => {
                filter_by(orders, |order| order.date().as_ref(), |d: &time::Date| d == date)
            }
            OrderFilter::Status(status) => {
                filter_by(orders, |order| order.status().as_ref(), |s: &String| s == status)
            }
        };
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }
}

impl<T> GetOrderService for T where T: DependOnOrderQuery + DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateOrderService:
    'static
    + Sync
    + Send
    + DependOnCarQuery
    + DependOnUserQuery
    + DependOnOrderQuery
    + DependOnOrderModifier
    + DependOnReleasingStatuses
{
    /// Places an order unless the car already has an active one.
    ///
    /// The car row stays locked from the lookup until commit, so two orders for the same car
    /// cannot both pass the availability check.
    async fn create_order(&self, dto: CreateOrderDto) -> error_stack::Result<i32, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let car_id = CarId::new(dto.car_id);
        let user_id = UserId::new(dto.user_id);
        if self
            .car_query()
            .lock_by_id(&mut connection, &car_id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Car {} not found", dto.car_id)));
        }
        if self
            .user_query()
            .find_by_id(&mut connection, &user_id)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("User {} not found", dto.user_id)));
        }

        let orders = self
            .order_query()
            .find_by_car_id(&mut connection, &car_id)
            .await?;
        self.releasing_statuses()
            .ensure_available(&car_id, &orders)?;

        let order = Order::new(
            OrderId::default(),
            user_id,
            car_id,
            dto.date.map(OrderDate::new).unwrap_or_else(OrderDate::today),
            dto.status.map(OrderStatus::new).unwrap_or_default(),
        );
        let id = self.order_modifier().create(&mut connection, &order).await?;
        connection.commit().await?;

        tracing::info!(
            "Order {} placed for car {} by user {}",
            id.as_ref(),
            dto.car_id,
            dto.user_id
        );
        Ok(id.into())
    }
}

impl<T> CreateOrderService for T where
    T: DependOnCarQuery
        + DependOnUserQuery
        + DependOnOrderQuery
        + DependOnOrderModifier
        + DependOnReleasingStatuses
{
}

#[async_trait::async_trait]
pub trait UpdateOrderService: 'static + Sync + Send + DependOnOrderModifier {
    async fn change_order_status(
        &self,
        dto: ChangeOrderStatusDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = OrderId::new(dto.id);
        let status = OrderStatus::new(dto.status);
        self.order_modifier()
            .update_status(&mut connection, &id, &status)
            .await?;
        connection.commit().await?;
        Ok(())
    }

    async fn cancel_order(&self, dto: CancelOrderDto) -> error_stack::Result<(), KernelError> {
        self.change_order_status(ChangeOrderStatusDto {
            id: dto.id,
            status: OrderStatus::canceled().into(),
        })
        .await
    }
}

impl<T> UpdateOrderService for T where T: DependOnOrderModifier {}

#[cfg(test)]
mod test {
    use time::macros::date;

    use driver::database::{InMemoryDatabase, PostgresDatabase};
    use kernel::interface::ledger::ReleasingStatuses;
    use rand::distributions::{Alphanumeric, DistString};
    use kernel::KernelError;

    use crate::service::test_support::{register, stock_car};
    use crate::service::{CreateOrderService, GetOrderService, UpdateOrderService};
    use crate::transfer::{
        CancelOrderDto, ChangeOrderStatusDto, CreateOrderDto, GetOrderDto, GetUserOrdersDto,
        OrderFilter,
    };

    fn order_for(user_id: i32, car_id: i32) -> CreateOrderDto {
        CreateOrderDto {
            user_id,
            car_id,
            date: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn defaults_are_applied() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let car_id = stock_car(&db, "BMW").await?;
        let user_id = register(&db, "client").await?;

        let id = db.create_order(order_for(user_id, car_id)).await?;
        let order = db.get_order(GetOrderDto { id }).await?.expect("order is stored");
        assert_eq!(order.user_id, user_id);
        assert_eq!(order.car_id, car_id);
        assert_eq!(order.status, "created");
        assert_eq!(order.date, time::OffsetDateTime::now_utc().date());
        Ok(())
    }

    #[tokio::test]
    async fn active_order_blocks_second_order() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let car_id = stock_car(&db, "BMW").await?;
        let first = register(&db, "first").await?;
        let second = register(&db, "second").await?;

        db.create_order(order_for(first, car_id)).await?;
        let report = db.create_order(order_for(second, car_id)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::CarUnavailable);
        assert_eq!(db.get_all_orders().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn canceled_order_releases_car() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let car_id = stock_car(&db, "Audi").await?;
        let user_id = register(&db, "client").await?;

        let id = db.create_order(order_for(user_id, car_id)).await?;
        db.cancel_order(CancelOrderDto { id }).await?;
        let next = db.create_order(order_for(user_id, car_id)).await?;
        assert_ne!(next, id);

        db.change_order_status(ChangeOrderStatusDto {
            id: next,
            status: "CANCELED".to_string(),
        })
        .await?;
        db.create_order(order_for(user_id, car_id)).await?;
        assert_eq!(db.get_all_orders().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn configured_status_releases_car() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new(ReleasingStatuses::parse("canceled,completed"));
        let car_id = stock_car(&db, "Volvo").await?;
        let user_id = register(&db, "client").await?;

        db.create_order(CreateOrderDto {
            status: Some("completed".to_string()),
            ..order_for(user_id, car_id)
        })
        .await?;
        db.create_order(order_for(user_id, car_id)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn missing_references_are_not_found() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let car_id = stock_car(&db, "Kia").await?;
        let user_id = register(&db, "client").await?;

        let report = db.create_order(order_for(user_id, 99)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        let report = db.create_order(order_for(99, car_id)).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert!(db.get_all_orders().await?.is_empty());

        let report = db
            .cancel_order(CancelOrderDto { id: 5 })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_orders_for_one_car() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let car_id = stock_car(&db, "Mercedes").await?;
        let mut users = Vec::new();
        for login in ["a", "b", "c", "d"] {
            users.push(register(&db, login).await?);
        }

        let attempts = users.into_iter().map(|user_id| {
            let db = db.clone();
            tokio::spawn(async move { db.create_order(order_for(user_id, car_id)).await })
        });
        let mut placed = 0;
        for attempt in attempts.collect::<Vec<_>>() {
            match attempt.await.expect("task panicked") {
                Ok(_) => placed += 1,
                Err(report) => {
                    assert_eq!(report.current_context(), &KernelError::CarUnavailable)
                }
            }
        }
        assert_eq!(placed, 1);
        Ok(())
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn concurrent_orders_for_one_car_on_postgres() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let car_id = stock_car(&db, "Lada").await?;
        let suffix = Alphanumeric.sample_string(&mut rand::thread_rng(), 12);
        let mut users = Vec::new();
        for n in 0..6 {
            users.push(register(&db, &format!("rush-{n}-{suffix}")).await?);
        }

        let attempts = users.into_iter().map(|user_id| {
            let db = db.clone();
            tokio::spawn(async move { db.create_order(order_for(user_id, car_id)).await })
        });
        let mut placed = 0;
        for attempt in attempts.collect::<Vec<_>>() {
            match attempt.await.expect("task panicked") {
                Ok(_) => placed += 1,
                Err(report) => {
                    assert_eq!(report.current_context(), &KernelError::CarUnavailable)
                }
            }
        }
        assert_eq!(placed, 1);

        let orders = db.filter_orders(OrderFilter::Status("created".to_string())).await?;
        assert_eq!(orders.iter().filter(|o| o.car_id == car_id).count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn orders_by_user_and_filters() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let bmw = stock_car(&db, "BMW").await?;
        let audi = stock_car(&db, "Audi").await?;
        let anna = register(&db, "anna").await?;
        let boris = register(&db, "boris").await?;

        db.create_order(CreateOrderDto {
            date: Some(date!(2024 - 12 - 12)),
            ..order_for(anna, bmw)
        })
        .await?;
        db.create_order(CreateOrderDto {
            status: Some("successfully".to_string()),
            ..order_for(boris, audi)
        })
        .await?;

        let annas = db
            .get_user_orders(GetUserOrdersDto { user_id: anna })
            .await?
            .expect("user exists");
        assert_eq!(annas.iter().map(|o| o.car_id).collect::<Vec<_>>(), vec![bmw]);
        assert!(db
            .get_user_orders(GetUserOrdersDto { user_id: 42 })
            .await?
            .is_none());

        let dated = db
            .filter_orders(OrderFilter::Date(date!(2024 - 12 - 12)))
            .await?;
        assert_eq!(dated.len(), 1);
        let done = db
            .filter_orders(OrderFilter::Status("successfully".to_string()))
            .await?;
        assert_eq!(done.iter().map(|o| o.user_id).collect::<Vec<_>>(), vec![boris]);
        assert!(db
            .filter_orders(OrderFilter::Status("lost".to_string()))
            .await?
            .is_empty());
        Ok(())
    }
}
