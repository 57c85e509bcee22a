//! Errors raised while driving coroutines.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::classify::YieldKind;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a run can fail.
///
/// Errors that originate in a yielded value (an invalid yield, a rejected future, a
/// thunk reporting failure) are first handed to the coroutine through
/// [`Coroutine::fail`](crate::Coroutine::fail). Only errors the coroutine lets escape
/// reach the caller of [`run`](crate::run).
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The coroutine yielded something that cannot be turned into a future.
    #[error("cannot await a yielded {kind}: yield a future, thunk, coroutine, sequence or record")]
    InvalidYield { kind: YieldKind },

    /// A future or thunk settled with an arbitrary error payload.
    #[error("rejected with {0}")]
    Rejected(Value),

    /// A thunk dropped its completion callback without calling it.
    #[error("thunk dropped its completion callback without reporting a result")]
    CallbackDropped,

    /// An error raised by the computation itself.
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Source(Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }

    pub fn rejected(payload: impl Into<Value>) -> Self {
        Error::Rejected(payload.into())
    }

    pub fn is_invalid_yield(&self) -> bool {
        matches!(self, Error::InvalidYield { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_yield_names_the_kind() {
        let error = Error::InvalidYield {
            kind: YieldKind::Other,
        };
        assert!(error.is_invalid_yield());
        assert!(error.to_string().contains("plain value"));
    }

    #[test]
    fn test_rejected_carries_payload() {
        let error = Error::rejected(json!({"code": 7}));
        assert!(matches!(&error, Error::Rejected(v) if v["code"] == 7));
        assert_eq!(error.to_string(), r#"rejected with {"code":7}"#);
    }

    #[test]
    fn test_source_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let error = Error::Source(Arc::new(io));
        assert_eq!(error.to_string(), "disk on fire");
        assert!(!error.is_invalid_yield());
    }
}
