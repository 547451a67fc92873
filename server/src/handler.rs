use std::ops::Deref;
use std::sync::Arc;

use kernel::interface::ledger::DependOnReleasingStatuses;
use kernel::interface::query::{DependOnCarQuery, DependOnOrderQuery, DependOnUserQuery};
use kernel::interface::update::{DependOnCarModifier, DependOnOrderModifier, DependOnUserModifier};

/// Every store capability the routes need, satisfied by both `PostgresDatabase` and
/// `InMemoryDatabase`.
pub trait DatabaseModule:
    DependOnCarQuery
    + DependOnCarModifier
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnOrderQuery
    + DependOnOrderModifier
    + DependOnReleasingStatuses
{
}

impl<T> DatabaseModule for T where
    T: DependOnCarQuery
        + DependOnCarModifier
        + DependOnUserQuery
        + DependOnUserModifier
        + DependOnOrderQuery
        + DependOnOrderModifier
        + DependOnReleasingStatuses
{
}

pub struct AppModule<D>(Arc<Handler<D>>);

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D: DatabaseModule> AppModule<D> {
    pub fn new(database: D) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

pub struct Handler<D> {
    database: D,
}

impl<D> Handler<D> {
    pub fn database(&self) -> &D {
        &self.database
    }
}
