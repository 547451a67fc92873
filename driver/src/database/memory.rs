use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::ledger::{DependOnReleasingStatuses, ReleasingStatuses};
use kernel::interface::query::{DependOnCarQuery, DependOnOrderQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnCarModifier, DependOnOrderModifier, DependOnUserModifier};
use kernel::prelude::entity::{Car, CarId, Order, OrderId, User, UserId};
use kernel::KernelError;

pub use self::{car::*, order::*, user::*};

mod car;
mod order;
mod user;

#[derive(Debug, Clone, Default)]
struct MemoryState {
    cars: BTreeMap<CarId, Car>,
    users: BTreeMap<UserId, User>,
    orders: BTreeMap<OrderId, Order>,
    car_sequence: i32,
    user_sequence: i32,
    order_sequence: i32,
}

/// Process local storage. Every transaction holds the whole state exclusively and works on a
/// copy of it, so transactions never interleave and an uncommitted one leaves no trace.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    state: Arc<Mutex<MemoryState>>,
    releasing: ReleasingStatuses,
}

impl InMemoryDatabase {
    pub fn new(releasing: ReleasingStatuses) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            releasing,
        }
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let MemoryTransaction { mut guard, working } = self;
        *guard = working;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<MemoryTransaction, KernelError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(MemoryTransaction { guard, working })
    }
}

impl DependOnReleasingStatuses for InMemoryDatabase {
    fn releasing_statuses(&self) -> &ReleasingStatuses {
        &self.releasing
    }
}

impl DependOnCarQuery for InMemoryDatabase {
    type CarQuery = InMemoryCarRepository;
    fn car_query(&self) -> &Self::CarQuery {
        &InMemoryCarRepository
    }
}

impl DependOnCarModifier for InMemoryDatabase {
    type CarModifier = InMemoryCarRepository;
    fn car_modifier(&self) -> &Self::CarModifier {
        &InMemoryCarRepository
    }
}

impl DependOnUserQuery for InMemoryDatabase {
    type UserQuery = InMemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserRepository
    }
}

impl DependOnUserModifier for InMemoryDatabase {
    type UserModifier = InMemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &InMemoryUserRepository
    }
}

impl DependOnOrderQuery for InMemoryDatabase {
    type OrderQuery = InMemoryOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &InMemoryOrderRepository
    }
}

impl DependOnOrderModifier for InMemoryDatabase {
    type OrderModifier = InMemoryOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &InMemoryOrderRepository
    }
}
