use serde_json::Value;

use crate::{
    coroutine::{Coroutine, Resumed},
    error::Error,
    step::Step,
};

/// How a [`from_fn`] closure is resumed: `Ok` from `advance`, `Err` from `fail`.
pub type Resume = Result<Value, Error>;

pub struct FromFn<F>(F);

impl<F> Coroutine for FromFn<F>
where
    F: FnMut(Resume) -> Resumed + Send,
{
    fn advance(&mut self, input: Value) -> Resumed {
        (self.0)(Ok(input))
    }

    fn fail(&mut self, error: Error) -> Resumed {
        (self.0)(Err(error))
    }
}

/// Create a coroutine from a closure.
///
/// The closure sees every resumption as a [`Resume`]. Propagating an `Err` with `?`
/// lets the failure escape; matching on it recovers.
///
/// ```rust
/// use corun::prelude::*;
/// use serde_json::json;
///
/// let mut calls = 0;
/// let mut stage = from_fn(move |resume: Resume| {
///     calls += 1;
///     match resume {
///         Ok(_) if calls == 1 => Ok(Step::Suspended(Yield::value(1))),
///         Ok(value) => Ok(Step::Finished(value)),
///         Err(error) => Ok(Step::Finished(json!(format!("recovered: {error}")))),
///     }
/// });
///
/// assert!(stage.advance(json!(null)).unwrap().is_suspended());
/// let done = stage.fail(Error::msg("boom")).unwrap().unwrap_finished();
/// assert_eq!(done, json!("recovered: boom"));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(Resume) -> Resumed + Send,
{
    FromFn(f)
}

/// A coroutine that finishes on its first step.
pub struct Ready(Option<Value>);

/// Create a coroutine that finishes with `value` without yielding.
///
/// Any later step, or a failure routed into it, finishes with `Null` or raises.
pub fn ready(value: Value) -> Ready {
    Ready(Some(value))
}

impl Coroutine for Ready {
    fn advance(&mut self, _input: Value) -> Resumed {
        Ok(Step::Finished(self.0.take().unwrap_or(Value::Null)))
    }

    fn fail(&mut self, error: Error) -> Resumed {
        Err(error)
    }
}
