use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    NotFound,
    CarUnavailable,
    Conflict,
    InvalidInput,
    Unauthorized,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::NotFound => write!(f, "Requested entity was not found"),
            KernelError::CarUnavailable => write!(f, "Car is not available for order"),
            KernelError::Conflict => write!(f, "Conflicts with the current state"),
            KernelError::InvalidInput => write!(f, "Invalid input"),
            KernelError::Unauthorized => write!(f, "Invalid login or password"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
