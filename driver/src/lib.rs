use error_stack::ResultExt;
use kernel::interface::ledger::ReleasingStatuses;
use kernel::KernelError;

pub mod database;
pub mod error;

static RELEASING_ORDER_STATUSES: &str = "RELEASING_ORDER_STATUSES";

pub(crate) fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Env {} not specified", key))
}

/// Reads `RELEASING_ORDER_STATUSES`, falling back to `canceled` when it is unset.
pub fn releasing_statuses() -> ReleasingStatuses {
    match dotenvy::var(RELEASING_ORDER_STATUSES) {
        Ok(list) => ReleasingStatuses::parse(&list),
        Err(_) => ReleasingStatuses::default(),
    }
}
