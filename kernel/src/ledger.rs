use std::collections::BTreeSet;

use error_stack::Report;

use crate::entity::{CarId, Order, OrderStatus, CANCELED_STATUS};
use crate::KernelError;

/// Statuses that free a car for new orders. Compared case-insensitively.
///
/// An order whose status is not in this set is *active*, and a car may have at most one
/// active order at the moment a new order for it is created.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ReleasingStatuses(BTreeSet<String>);

impl ReleasingStatuses {
    pub fn new<S: AsRef<str>>(statuses: impl IntoIterator<Item = S>) -> Self {
        Self(
            statuses
                .into_iter()
                .map(|status| status.as_ref().trim().to_lowercase())
                .filter(|status| !status.is_empty())
                .collect(),
        )
    }

    /// Parses a comma separated list such as `canceled,completed`.
    /// A list without any usable entry yields the default set.
    pub fn parse(list: &str) -> Self {
        let parsed = Self::new(list.split(','));
        if parsed.0.is_empty() {
            Self::default()
        } else {
            parsed
        }
    }

    pub fn is_releasing(&self, status: &OrderStatus) -> bool {
        let status: &String = status.as_ref();
        self.0.contains(&status.to_lowercase())
    }

    pub fn is_active(&self, order: &Order) -> bool {
        !self.is_releasing(order.status())
    }

    pub fn ensure_available(
        &self,
        car_id: &CarId,
        orders: &[Order],
    ) -> error_stack::Result<(), KernelError> {
        match orders
            .iter()
            .find(|order| order.car_id() == car_id && self.is_active(order))
        {
            None => Ok(()),
            Some(active) => Err(Report::new(KernelError::CarUnavailable).attach_printable(
                format!(
                    "Car {} already has active order {} with status '{}'",
                    car_id.as_ref(),
                    active.id().as_ref(),
                    AsRef::<String>::as_ref(active.status())
                ),
            )),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ReleasingStatuses {
    fn default() -> Self {
        Self::new([CANCELED_STATUS])
    }
}

pub trait DependOnReleasingStatuses: 'static + Sync + Send {
    fn releasing_statuses(&self) -> &ReleasingStatuses;
}
