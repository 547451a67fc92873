use sqlx::PgConnection;

use kernel::interface::query::CarQuery;
use kernel::interface::update::CarModifier;
use kernel::prelude::entity::{Car, CarBrand, CarCondition, CarId, CarModel, CarPrice, CarYear};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresCarRepository;

#[async_trait::async_trait]
impl CarQuery for PostgresCarRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        PgCarInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        PgCarInternal::find_by_id(con, id).await
    }

    async fn lock_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        PgCarInternal::lock_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl CarModifier for PostgresCarRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        car: &Car,
    ) -> error_stack::Result<CarId, KernelError> {
        PgCarInternal::create(con, car).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::update(con, car).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        car_id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        PgCarInternal::delete(con, car_id).await
    }
}

#[derive(sqlx::FromRow)]
struct CarRow {
    car_id: i32,
    brand: String,
    model: String,
    year: i32,
    price: f64,
    condition: String,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car::new(
            CarId::new(row.car_id),
            CarBrand::new(row.brand),
            CarModel::new(row.model),
            CarYear::new(row.year),
            CarPrice::new(row.price),
            CarCondition::new(row.condition),
        )
    }
}

pub(in crate::database) struct PgCarInternal;

impl PgCarInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Car>, KernelError> {
        let rows = sqlx::query_as::<_, CarRow>(
            // language=postgresql
            r#"
            SELECT car_id, brand, model, year, price, condition
            FROM car_shop.car
            ORDER BY car_id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        let row = sqlx::query_as::<_, CarRow>(
            // language=postgresql
            r#"
            SELECT car_id, brand, model, year, price, condition
            FROM car_shop.car
            WHERE car_id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Car::from))
    }

    async fn lock_by_id(
        con: &mut PgConnection,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        let row = sqlx::query_as::<_, CarRow>(
            // language=postgresql
            r#"
            SELECT car_id, brand, model, year, price, condition
            FROM car_shop.car
            WHERE car_id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Car::from))
    }

    async fn create(con: &mut PgConnection, car: &Car) -> error_stack::Result<CarId, KernelError> {
        let id = sqlx::query_scalar::<_, i32>(
            // language=postgresql
            r#"
            INSERT INTO car_shop.car (brand, model, year, price, condition)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING car_id
            "#,
        )
        .bind(car.brand().as_ref())
        .bind(car.model().as_ref())
        .bind(car.year().as_ref())
        .bind(car.price().as_ref())
        .bind(car.condition().as_ref())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(CarId::new(id))
    }

    async fn update(con: &mut PgConnection, car: &Car) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE car_shop.car
            SET brand = $2, model = $3, year = $4, price = $5, condition = $6
            WHERE car_id = $1
            "#,
        )
        .bind(car.id().as_ref())
        .bind(car.brand().as_ref())
        .bind(car.model().as_ref())
        .bind(car.year().as_ref())
        .bind(car.price().as_ref())
        .bind(car.condition().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound)
                .attach_printable(format!("Car {} not found", car.id().as_ref())));
        }
        Ok(())
    }

    async fn delete(con: &mut PgConnection, car_id: &CarId) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM car_shop.car
            WHERE car_id = $1
            "#,
        )
        .bind(car_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound)
                .attach_printable(format!("Car {} not found", car_id.as_ref())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::CarQuery;
    use kernel::interface::update::CarModifier;
    use kernel::prelude::entity::{Car, CarBrand, CarCondition, CarId, CarModel, CarPrice, CarYear};
    use kernel::KernelError;

    use crate::database::postgres::PostgresDatabase;
    use crate::database::PostgresCarRepository;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn car_lifecycle() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut connection = db.transact().await?;
        let car = Car::new(
            CarId::default(),
            CarBrand::new("Lada"),
            CarModel::new("Vesta"),
            CarYear::new(2022),
            CarPrice::new(12000.5),
            CarCondition::new("new"),
        );

        let id = PostgresCarRepository.create(&mut connection, &car).await?;
        let car = car.reconstruct(|c| c.id = id);
        let found = PostgresCarRepository.find_by_id(&mut connection, &id).await?;
        assert_eq!(found, Some(car.clone()));

        let car = car.reconstruct(|c| c.condition = CarCondition::new("used"));
        PostgresCarRepository.update(&mut connection, &car).await?;
        let locked = PostgresCarRepository.lock_by_id(&mut connection, &id).await?;
        assert_eq!(locked, Some(car));

        PostgresCarRepository.delete(&mut connection, &id).await?;
        let found = PostgresCarRepository.find_by_id(&mut connection, &id).await?;
        assert!(found.is_none());

        let missing = PostgresCarRepository
            .delete(&mut connection, &id)
            .await
            .unwrap_err();
        assert_eq!(missing.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
