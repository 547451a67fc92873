use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::select::filter_by;
use kernel::interface::query::{CarQuery, DependOnCarQuery, DependOnOrderQuery, OrderQuery};
use kernel::interface::update::{CarModifier, DependOnCarModifier};
use kernel::prelude::entity::CarId;
use kernel::KernelError;

use crate::transfer::{CarDto, CarFilter, DeleteCarDto, GetCarDto, SaveCarDto, SaveOutcome};

#[async_trait::async_trait]
pub trait GetCarService: 'static + Sync + Send + DependOnCarQuery {
    async fn get_all_cars(&self) -> error_stack::Result<Vec<CarDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let cars = self.car_query().find_all(&mut connection).await?;
        connection.commit().await?;
        Ok(cars.into_iter().map(CarDto::from).collect())
    }

    async fn get_car(&self, dto: GetCarDto) -> error_stack::Result<Option<CarDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = CarId::new(dto.id);
        let car = self.car_query().find_by_id(&mut connection, &id).await?;
        connection.commit().await?;
        Ok(car.map(CarDto::from))
    }

    async fn filter_cars(&self, filter: CarFilter) -> error_stack::Result<Vec<CarDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let cars = self.car_query().find_all(&mut connection).await?;
        connection.commit().await?;

        let cars = match &filter {
            CarFilter::Brand(brand) => {
                filter_by(cars, |car| car.brand().as_ref(), |b: &String| b == brand)
            }
            CarFilter::Condition(condition) => {
                filter_by(cars, |car| car.condition().as_ref(), |c: &String| c == condition)
            }
            CarFilter::Price(price) => {
                filter_by(cars, |car| car.price().as_ref(), |p: &f64| p == price)
            }
        };
        Ok(cars.into_iter().map(CarDto::from).collect())
    }
}

impl<T> GetCarService for T where T: DependOnCarQuery {}

#[async_trait::async_trait]
pub trait SaveCarService: 'static + Sync + Send + DependOnCarModifier {
    async fn save_car(&self, dto: SaveCarDto) -> error_stack::Result<SaveOutcome, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let (id, car) = dto.into_car();
        let outcome = if id.is_unsaved() {
            let id = self.car_modifier().create(&mut connection, &car).await?;
            SaveOutcome::Inserted(id.into())
        } else {
            self.car_modifier().update(&mut connection, &car).await?;
            SaveOutcome::Updated
        };
        connection.commit().await?;
        tracing::debug!("Saved car: {:?}", outcome);
        Ok(outcome)
    }
}

impl<T> SaveCarService for T where T: DependOnCarModifier {}

#[async_trait::async_trait]
pub trait DeleteCarService: 'static + Sync + Send + DependOnCarModifier + DependOnOrderQuery {
    async fn delete_car(&self, dto: DeleteCarDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = CarId::new(dto.id);
        let orders = self
            .order_query()
            .find_by_car_id(&mut connection, &id)
            .await?;
        if !orders.is_empty() {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Car {} is referenced by {} orders",
                dto.id,
                orders.len()
            )));
        }
        self.car_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;
        Ok(())
    }
}

impl<T> DeleteCarService for T where T: DependOnCarModifier + DependOnOrderQuery {}
