//! Error types for the FedEx client.
//!
//! # Design
//! Precondition violations get their own variant because they are raised
//! before anything touches the network and the caller usually fixes them by
//! calling a missing setter. A SOAP fault is kept apart from a plain HTTP
//! failure since FedEx reports malformed requests as faults with a 500
//! status. Business failures (a reply whose `HighestSeverity` is `FAILURE` or
//! `ERROR`) are NOT errors: they come back as a normal `Reply`.

use thiserror::Error;

/// Errors returned by the builder, the codec and the transport.
#[derive(Debug, Error)]
pub enum FedexError {
    /// A required piece of the request was not set before dispatch.
    #[error("{0}")]
    Precondition(String),

    /// The request record could not be converted into a request tree.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request tree could not be written as XML.
    #[error("XML encoding failed: {0}")]
    Xml(String),

    /// The response body is not a SOAP envelope we understand.
    #[error("malformed reply: {0}")]
    MalformedReply(String),

    /// The remote service answered with a SOAP fault.
    #[error("SOAP fault {code}: {message}")]
    SoapFault { code: String, message: String },

    /// The server returned a non-200 status without a SOAP fault.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// No session could be opened for the resolved endpoint.
    #[error("cannot open SOAP session for {endpoint}: {reason}")]
    Connection { endpoint: String, reason: String },

    /// The HTTP round-trip itself failed (DNS, TLS, timeout, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid date or time: {0}")]
    InvalidDate(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FedexError>;

impl FedexError {
    pub fn precondition(message: impl Into<String>) -> Self {
        FedexError::Precondition(message.into())
    }

    pub(crate) fn requires(field: &str) -> Self {
        FedexError::Precondition(format!("This method requires a {field} to be set"))
    }

    /// Render the error as a bag of human readable messages, headed by a
    /// generic line, the way FedEx notifications are surfaced to users.
    pub fn messages(&self) -> Vec<String> {
        vec![
            "Error returned in processing transaction".to_string(),
            self.to_string(),
        ]
    }
}

impl From<serde_json::Error> for FedexError {
    fn from(e: serde_json::Error) -> Self {
        FedexError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_names_the_missing_field() {
        let err = FedexError::requires("shipper");
        assert!(matches!(err, FedexError::Precondition(_)));
        assert_eq!(err.to_string(), "This method requires a shipper to be set");
    }

    #[test]
    fn messages_start_with_generic_line() {
        let err = FedexError::SoapFault {
            code: "soapenv:Server".to_string(),
            message: "Fault".to_string(),
        };
        let messages = err.messages();
        assert_eq!(messages[0], "Error returned in processing transaction");
        assert_eq!(messages[1], "SOAP fault soapenv:Server: Fault");
    }
}
