use error_stack::Report;

use kernel::interface::query::CarQuery;
use kernel::interface::update::CarModifier;
use kernel::prelude::entity::{Car, CarId};
use kernel::KernelError;

use crate::database::memory::MemoryTransaction;

pub struct InMemoryCarRepository;

#[async_trait::async_trait]
impl CarQuery for InMemoryCarRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Car>, KernelError> {
        Ok(con.working.cars.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        Ok(con.working.cars.get(id).cloned())
    }

    // The transaction already owns the whole state.
    async fn lock_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &CarId,
    ) -> error_stack::Result<Option<Car>, KernelError> {
        self.find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl CarModifier for InMemoryCarRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        car: &Car,
    ) -> error_stack::Result<CarId, KernelError> {
        let state = &mut con.working;
        state.car_sequence += 1;
        let id = CarId::new(state.car_sequence);
        state
            .cars
            .insert(id, car.clone().reconstruct(|c| c.id = id));
        Ok(id)
    }

    async fn update(
        &self,
        con: &mut MemoryTransaction,
        car: &Car,
    ) -> error_stack::Result<(), KernelError> {
        match con.working.cars.get_mut(car.id()) {
            Some(stored) => {
                *stored = car.clone();
                Ok(())
            }
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Car {} not found", car.id().as_ref()))),
        }
    }

    async fn delete(
        &self,
        con: &mut MemoryTransaction,
        car_id: &CarId,
    ) -> error_stack::Result<(), KernelError> {
        let state = &mut con.working;
        if state.orders.values().any(|order| order.car_id() == car_id) {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Car {} is referenced by orders", car_id.as_ref())));
        }
        match state.cars.remove(car_id) {
            Some(_) => Ok(()),
            None => Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("Car {} not found", car_id.as_ref()))),
        }
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::CarQuery;
    use kernel::interface::update::CarModifier;
    use kernel::prelude::entity::{Car, CarBrand, CarCondition, CarId, CarModel, CarPrice, CarYear};
    use kernel::KernelError;

    use crate::database::{InMemoryCarRepository, InMemoryDatabase};

    fn car(brand: &str) -> Car {
        Car::new(
            CarId::default(),
            CarBrand::new(brand),
            CarModel::new("Model"),
            CarYear::new(2020),
            CarPrice::new(10000.0),
            CarCondition::new("new"),
        )
    }

    #[tokio::test]
    async fn ids_are_generated_in_order() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.transact().await?;
        let first = InMemoryCarRepository.create(&mut con, &car("BMW")).await?;
        let second = InMemoryCarRepository.create(&mut con, &car("Audi")).await?;
        assert_eq!(first, CarId::new(1));
        assert_eq!(second, CarId::new(2));

        let brands = InMemoryCarRepository
            .find_all(&mut con)
            .await?
            .into_iter()
            .map(|car| car.brand().clone())
            .collect::<Vec<_>>();
        assert_eq!(brands, vec![CarBrand::new("BMW"), CarBrand::new("Audi")]);
        Ok(())
    }

    #[tokio::test]
    async fn missing_car_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let mut con = db.transact().await?;
        let ghost = car("Lada").reconstruct(|c| c.id = CarId::new(42));
        let report = InMemoryCarRepository.update(&mut con, &ghost).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        let report = InMemoryCarRepository
            .delete(&mut con, &CarId::new(42))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }
}
