//! Error types for the transport library.

use thiserror::Error;

/// Result type alias for the transport library.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while sending through a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Target address is not in the peer registry.
    #[error("failed to connect with {addr}")]
    Unreachable { addr: String },

    /// Fewer proof requests than registered peers.
    #[error("insufficient requests for peer count: {requests} requests, {peers} peers")]
    InsufficientRequests { peers: usize, requests: usize },
}

impl TransportError {
    pub(crate) fn unreachable(addr: impl Into<String>) -> Self {
        TransportError::Unreachable { addr: addr.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_names_address() {
        let err = TransportError::unreachable("node-7");
        assert_eq!(err.to_string(), "failed to connect with node-7");
    }

    #[test]
    fn test_insufficient_requests_message() {
        let err = TransportError::InsufficientRequests {
            peers: 3,
            requests: 1,
        };
        assert_eq!(
            err.to_string(),
            "insufficient requests for peer count: 1 requests, 3 peers"
        );
    }
}
