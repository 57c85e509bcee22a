//! Callback-style deferred operations.
//!
//! A [`Thunk`] is a one-shot operation that reports its outcome through a single
//! [`Callback`] instead of returning a future. The callback may be completed
//! synchronously, later, or from another thread.

use std::fmt;

use futures::channel::oneshot;
use serde_json::Value;

use crate::{context::Context, error::Error};

type ThunkFn = dyn FnOnce(&Context, Callback) + Send;

pub struct Thunk(Box<ThunkFn>);

impl Thunk {
    pub fn new<F>(thunk: F) -> Self
    where
        F: FnOnce(&Context, Callback) + Send + 'static,
    {
        Thunk(Box::new(thunk))
    }

    /// Start the operation under `ctx`.
    pub fn invoke(self, ctx: &Context, callback: Callback) {
        (self.0)(ctx, callback)
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Thunk(..)")
    }
}

/// Completion callback handed to a [`Thunk`].
///
/// Follows the `(error, results...)` convention: an error rejects, a single result
/// resolves with that result, several results resolve with an array of them, and no
/// result resolves with `Null`.
pub struct Callback {
    settle: oneshot::Sender<Result<Value, Error>>,
}

impl Callback {
    pub(crate) fn channel() -> (Callback, oneshot::Receiver<Result<Value, Error>>) {
        let (settle, settled) = oneshot::channel();
        (Callback { settle }, settled)
    }

    pub fn call(self, error: Option<Error>, results: Vec<Value>) {
        let outcome = match error {
            Some(error) => Err(error),
            None => Ok(collect_results(results)),
        };
        // the receiver is gone once a fail-fast join rejected without us
        let _ = self.settle.send(outcome);
    }

    /// Report a single result.
    pub fn ok(self, value: Value) {
        self.call(None, vec![value]);
    }

    pub fn err(self, error: Error) {
        self.call(Some(error), Vec::new());
    }

    /// Report several results at once.
    pub fn ok_many(self, values: Vec<Value>) {
        self.call(None, values);
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("canceled", &self.settle.is_canceled())
            .finish()
    }
}

fn collect_results(mut results: Vec<Value>) -> Value {
    match results.len() {
        0 => Value::Null,
        1 => results.remove(0),
        _ => Value::Array(results),
    }
}
