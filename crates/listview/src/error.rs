use thiserror::Error;

/// Failure of a single remote fetch, as seen by a resource.
///
/// Every transport, envelope, and payload problem is folded into one of
/// these three before it reaches a [`RemoteResource`]; nothing else crosses
/// the boundary.
///
/// [`RemoteResource`]: crate::RemoteResource
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server could not be reached (timeout, DNS, refused connection).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with `status: false` and a message.
    #[error("{0}")]
    Rejected(String),
    /// The payload was missing or unparseable where data was required.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether retrying the same request can reasonably succeed.
    ///
    /// Rejections carry a server-side reason and malformed payloads will
    /// not fix themselves, so only transport failures qualify.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Failure details a resource keeps around after a failed load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub retryable: bool,
}

impl From<FetchError> for ErrorInfo {
    fn from(err: FetchError) -> Self {
        Self {
            retryable: err.retryable(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_failures_are_retryable() {
        assert!(FetchError::Network("timed out".to_string()).retryable());
        assert!(!FetchError::Rejected("invalid admin".to_string()).retryable());
        assert!(!FetchError::Malformed("data missing".to_string()).retryable());
    }

    #[test]
    fn rejection_message_is_surfaced_verbatim() {
        let info = ErrorInfo::from(FetchError::Rejected("boom".to_string()));
        assert_eq!(info.message, "boom");
        assert!(!info.retryable);
    }
}
