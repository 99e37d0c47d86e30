//! Failures surfaced by the remote resource gateway.

use thiserror::Error;

/// The only failure kind the sync layer models. Never retried.
///
/// `Display` is the message stored verbatim into a slice's `error_message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// The request never produced a response (connect, timeout, I/O).
    #[error("{0}")]
    Network(String),
    /// A 2xx response body did not match the expected record shape.
    #[error("invalid response payload: {0}")]
    Decode(String),
    /// The request could not be built from the given input.
    #[error("{0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Non-2xx failure with the conventional client message.
    pub fn status(status: u16) -> Self {
        TransportError::Status {
            status,
            message: format!("Request failed with status code {status}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_the_code() {
        let err = TransportError::status(404);
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }
}
