use error_stack::Report;
use sqlx::PgConnection;
use time::Date;

use kernel::interface::query::OrderQuery;
use kernel::interface::update::OrderModifier;
use kernel::prelude::entity::{CarId, Order, OrderDate, OrderId, OrderStatus, UserId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresOrderRepository;

#[async_trait::async_trait]
impl OrderQuery for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        PgOrderInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        PgOrderInternal::find_by_id(con, id).await
    }

    async fn find_by_car_id(
        &self,
        con: &mut PostgresTransaction,
        car_id: &CarId,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        PgOrderInternal::find_by_car_id(con, car_id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        PgOrderInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl OrderModifier for PostgresOrderRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        order: &Order,
    ) -> error_stack::Result<OrderId, KernelError> {
        PgOrderInternal::create(con, order).await
    }

    async fn update_status(
        &self,
        con: &mut PostgresTransaction,
        order_id: &OrderId,
        status: &OrderStatus,
    ) -> error_stack::Result<(), KernelError> {
        PgOrderInternal::update_status(con, order_id, status).await
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: i32,
    user_id: i32,
    car_id: i32,
    date: Date,
    status: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order::new(
            OrderId::new(row.order_id),
            UserId::new(row.user_id),
            CarId::new(row.car_id),
            OrderDate::new(row.date),
            OrderStatus::new(row.status),
        )
    }
}

pub(in crate::database) struct PgOrderInternal;

impl PgOrderInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Order>, KernelError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT order_id, user_id, car_id, date, status
            FROM car_shop.orders
            ORDER BY order_id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &OrderId,
    ) -> error_stack::Result<Option<Order>, KernelError> {
        let row = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT order_id, user_id, car_id, date, status
            FROM car_shop.orders
            WHERE order_id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Order::from))
    }

    async fn find_by_car_id(
        con: &mut PgConnection,
        car_id: &CarId,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT order_id, user_id, car_id, date, status
            FROM car_shop.orders
            WHERE car_id = $1
            ORDER BY order_id
            "#,
        )
        .bind(car_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Order>, KernelError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            // language=postgresql
            r#"
            SELECT order_id, user_id, car_id, date, status
            FROM car_shop.orders
            WHERE user_id = $1
            ORDER BY order_id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        order: &Order,
    ) -> error_stack::Result<OrderId, KernelError> {
        let id = sqlx::query_scalar::<_, i32>(
            // language=postgresql
            r#"
            INSERT INTO car_shop.orders (user_id, car_id, date, status)
            VALUES ($1, $2, $3, $4)
            RETURNING order_id
            "#,
        )
        .bind(order.user_id().as_ref())
        .bind(order.car_id().as_ref())
        .bind(order.date().as_ref())
        .bind(order.status().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(OrderId::new(id))
    }

    async fn update_status(
        con: &mut PgConnection,
        order_id: &OrderId,
        status: &OrderStatus,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE car_shop.orders
            SET status = $2
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_ref())
        .bind(status.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Order {} not found", order_id.as_ref())));
        }
        Ok(())
    }
}
