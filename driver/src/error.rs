use error_stack::Report;
use kernel::KernelError;
use sqlx::error::ErrorKind;

pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}

impl<T> ConvertError for Result<T, sqlx::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                sqlx::Error::PoolTimedOut => KernelError::Timeout,
                sqlx::Error::RowNotFound => KernelError::NotFound,
                sqlx::Error::Database(database) => match database.kind() {
                    ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation => {
                        KernelError::Conflict
                    }
                    _ => KernelError::Internal,
                },
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use super::ConvertError;

    #[test]
    fn timeout_is_kept_apart() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolTimedOut);
        let report = result.convert_error().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Timeout);
    }

    #[test]
    fn other_errors_are_internal() {
        let result: Result<(), sqlx::Error> = Err(sqlx::Error::PoolClosed);
        let report = result.convert_error().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
