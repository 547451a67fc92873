use std::process::{ExitCode, Termination};

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::{AttachmentKind, FrameKind, Report};
use kernel::KernelError;
use serde::Serialize;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl ErrorStatus {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self(Report::new(KernelError::InvalidInput).attach_printable(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self(Report::new(KernelError::NotFound).attach_printable(message.into()))
    }

    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::CarUnavailable | KernelError::Conflict => StatusCode::CONFLICT,
            KernelError::InvalidInput => StatusCode::BAD_REQUEST,
            KernelError::Unauthorized => StatusCode::UNAUTHORIZED,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The context followed by its printable attachments, innermost first.
    fn message(&self) -> String {
        let mut details = self
            .0
            .frames()
            .filter_map(|frame| match frame.kind() {
                FrameKind::Attachment(AttachmentKind::Printable(attachment)) => {
                    Some(attachment.to_string())
                }
                _ => None,
            })
            .collect::<Vec<_>>();
        details.reverse();
        let context = self.0.current_context().to_string();
        if details.is_empty() {
            context
        } else {
            format!("{}: {}", context, details.join("; "))
        }
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_input(rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorStatus {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid_input(rejection.body_text())
    }
}

impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid_input(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match self.0.current_context() {
            KernelError::Internal => {
                tracing::error!("{:?}", self.0);
                KernelError::Internal.to_string()
            }
            _ => {
                tracing::debug!("{:?}", self.0);
                self.message()
            }
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::KernelError;

    use super::ErrorStatus;

    #[test]
    fn status_follows_context() {
        let cases = [
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::CarUnavailable, StatusCode::CONFLICT),
            (KernelError::Conflict, StatusCode::CONFLICT),
            (KernelError::InvalidInput, StatusCode::BAD_REQUEST),
            (KernelError::Unauthorized, StatusCode::UNAUTHORIZED),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (context, status) in cases {
            let response = ErrorStatus::from(Report::new(context)).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn message_carries_attachments() {
        let status = ErrorStatus::from(
            Report::new(KernelError::CarUnavailable).attach_printable("Car 4 already has an order"),
        );
        assert_eq!(
            status.message(),
            "Car is not available for order: Car 4 already has an order"
        );
    }
}
