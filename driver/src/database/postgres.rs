use std::ops::{Deref, DerefMut};

use error_stack::ResultExt;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::ledger::{DependOnReleasingStatuses, ReleasingStatuses};
use kernel::interface::query::{DependOnCarQuery, DependOnOrderQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnCarModifier, DependOnOrderModifier, DependOnUserModifier};
use kernel::KernelError;

use crate::error::ConvertError;
use crate::{env, releasing_statuses};

pub use self::{car::*, order::*, user::*};

mod car;
mod order;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
    releasing: ReleasingStatuses,
}

impl PostgresDatabase {
    /// Connects to `POSTGRES_URL` and applies pending migrations.
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to apply migrations")?;
        let releasing = releasing_statuses();
        tracing::info!(
            "Releasing order statuses: {:?}",
            releasing.iter().collect::<Vec<_>>()
        );
        Ok(Self { pool, releasing })
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<PostgresTransaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

impl DependOnReleasingStatuses for PostgresDatabase {
    fn releasing_statuses(&self) -> &ReleasingStatuses {
        &self.releasing
    }
}

impl DependOnCarQuery for PostgresDatabase {
    type CarQuery = PostgresCarRepository;
    fn car_query(&self) -> &Self::CarQuery {
        &PostgresCarRepository
    }
}

impl DependOnCarModifier for PostgresDatabase {
    type CarModifier = PostgresCarRepository;
    fn car_modifier(&self) -> &Self::CarModifier {
        &PostgresCarRepository
    }
}

impl DependOnUserQuery for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for PostgresDatabase {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

impl DependOnOrderQuery for PostgresDatabase {
    type OrderQuery = PostgresOrderRepository;
    fn order_query(&self) -> &Self::OrderQuery {
        &PostgresOrderRepository
    }
}

impl DependOnOrderModifier for PostgresDatabase {
    type OrderModifier = PostgresOrderRepository;
    fn order_modifier(&self) -> &Self::OrderModifier {
        &PostgresOrderRepository
    }
}
