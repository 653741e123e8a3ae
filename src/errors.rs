use std::fmt;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Labelled HTTP status categories attached to locally raised errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCodeCategory {
    Continue,
    SwitchingProtocols,
    Processing,
    EarlyHints,
    Ok,
    Created,
    Accepted,
    MovedPermanently,
    PermanentRedirect,
    BadRequest,
    Unauthorized,
    NotFound,
    InternalServerError,
    NotImplemented,
    ServiceUnavailable,
    GatewayTimeout,
    NetworkAuthenticationRequired,
    Exception,
}

impl StatusCodeCategory {
    #[must_use]
    pub fn code(self) -> Option<u16> {
        let code = match self {
            Self::Continue => 100,
            Self::SwitchingProtocols => 101,
            Self::Processing => 102,
            Self::EarlyHints => 103,
            Self::Ok => 200,
            Self::Created => 201,
            Self::Accepted => 202,
            Self::MovedPermanently => 301,
            Self::PermanentRedirect => 308,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
            Self::NotImplemented => 501,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
            Self::NetworkAuthenticationRequired => 511,
            Self::Exception => return None,
        };
        Some(code)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Continue => "100 Continue",
            Self::SwitchingProtocols => "101 Switching Protocols",
            Self::Processing => "102 Processing",
            Self::EarlyHints => "103 Early Hints",
            Self::Ok => "200 OK",
            Self::Created => "201 Created",
            Self::Accepted => "202 Accepted",
            Self::MovedPermanently => "301 Moved Permanently",
            Self::PermanentRedirect => "308 Permanent Redirect",
            Self::BadRequest => "400 Bad Request",
            Self::Unauthorized => "401 Unauthorized",
            Self::NotFound => "404 Not Found",
            Self::InternalServerError => "500 Internal Server Error",
            Self::NotImplemented => "501 Not Implemented",
            Self::ServiceUnavailable => "503 Service Unavailable",
            Self::GatewayTimeout => "504 Gateway Timeout",
            Self::NetworkAuthenticationRequired => "511 Network Authentication Required",
            Self::Exception => "Exception",
        }
    }
}

impl fmt::Display for StatusCodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error payload shared by locally raised failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    pub message: String,
    pub http_status_code: Option<u16>,
    pub http_status_code_category: Option<StatusCodeCategory>,
    pub application_error_code: Option<i32>,
    pub application_error_code_category: Option<String>,
}

impl ErrorDetails {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            http_status_code: None,
            http_status_code_category: None,
            application_error_code: None,
            application_error_code_category: None,
        }
    }

    /// Sets both the numeric status and its label.
    #[must_use]
    pub fn with_status(mut self, category: StatusCodeCategory) -> Self {
        self.http_status_code = category.code();
        self.http_status_code_category = Some(category);
        self
    }

    #[must_use]
    pub fn with_application_code(mut self, code: i32, category: impl Into<String>) -> Self {
        self.application_error_code = Some(code);
        self.application_error_code_category = Some(category.into());
        self
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Error)]
pub enum AwsWrapperError {
    #[error("Precondition failed: {0}")]
    Precondition(ErrorDetails),

    #[error("Upstream returned nothing usable: {0}")]
    Upstream(ErrorDetails),

    #[error("AWS {operation} call failed: {source}")]
    Provider {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl AwsWrapperError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(ErrorDetails::new(message).with_status(StatusCodeCategory::BadRequest))
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(
            ErrorDetails::new(message).with_status(StatusCodeCategory::ServiceUnavailable),
        )
    }

    pub fn provider<E>(operation: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Provider {
            operation,
            source: Box::new(source),
        }
    }

    /// Details for locally raised errors; `None` for provider failures.
    #[must_use]
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Precondition(details) | Self::Upstream(details) => Some(details),
            Self::Provider { .. } => None,
        }
    }

    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

impl From<serde_json::Error> for AwsWrapperError {
    fn from(error: serde_json::Error) -> Self {
        AwsWrapperError::Upstream(
            ErrorDetails::new(format!("Failed to parse secret payload: {error}"))
                .with_status(StatusCodeCategory::InternalServerError),
        )
    }
}

pub type Result<T, E = AwsWrapperError> = std::result::Result<T, E>;
