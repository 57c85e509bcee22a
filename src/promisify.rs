//! Turning yielded values into futures.
//!
//! [`promisify`] is the single entry point the driver uses at every suspension
//! point. Futures pass straight through, plain values come back unchanged, and
//! everything else goes through the [registry](crate::registry). Sequences and
//! records recurse into their entries and join them fail-fast: the first entry to
//! fail rejects the whole container and the outcomes of its siblings are dropped.

use std::fmt;

use futures::{
    future,
    stream::{FuturesUnordered, TryStreamExt},
    FutureExt, TryFutureExt,
};
use serde_json::{Map, Value};

use crate::{
    context::Context,
    error::Error,
    registry,
    thunk::{Callback, Thunk},
    yielded::{Deferred, Yield},
};

/// Outcome of [`promisify`].
pub enum Promisified {
    Future(Deferred),
    /// Nothing could convert the value.
    Unchanged(Yield),
}

impl Promisified {
    pub fn is_future(&self) -> bool {
        matches!(self, Promisified::Future(_))
    }

    /// Where a container entry ends up: settled now, or pending on a future.
    fn into_slot(self) -> Slot {
        match self {
            Promisified::Future(deferred) => Slot::Pending(deferred),
            Promisified::Unchanged(Yield::Value(value)) => Slot::Ready(value),
            // Unreached while every non-value kind has a registry entry.
            Promisified::Unchanged(other) => {
                let error = Error::InvalidYield { kind: other.kind() };
                Slot::Pending(future::err(error).boxed())
            }
        }
    }
}

impl fmt::Debug for Promisified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Promisified::Future(_) => f.write_str("Promisified::Future(..)"),
            Promisified::Unchanged(value) => {
                f.debug_tuple("Promisified::Unchanged").field(value).finish()
            }
        }
    }
}

enum Slot {
    Ready(Value),
    Pending(Deferred),
}

/// Convert `value` into a future if it can be awaited.
///
/// ```rust
/// use corun::prelude::*;
/// use futures::executor::block_on;
/// use serde_json::json;
///
/// let ctx = Context::empty();
///
/// let joined = promisify(
///     Yield::sequence([Yield::value(1), Yield::thunk(|_, done| done.ok(json!(2)))]),
///     &ctx,
/// );
/// match joined {
///     Promisified::Future(deferred) => assert_eq!(block_on(deferred).unwrap(), json!([1, 2])),
///     Promisified::Unchanged(_) => unreachable!(),
/// }
///
/// assert!(!promisify(Yield::value(12), &ctx).is_future());
/// ```
pub fn promisify(value: Yield, ctx: &Context) -> Promisified {
    match value {
        Yield::Value(value) => Promisified::Unchanged(Yield::Value(value)),
        Yield::Future(deferred) => Promisified::Future(deferred),
        other => registry::convert(other, ctx),
    }
}

/// Await every element concurrently; resolves to an array in the original order.
pub fn promisify_sequence(items: Vec<Yield>, ctx: &Context) -> Deferred {
    let slots = items
        .into_iter()
        .map(|item| promisify(item, ctx).into_slot())
        .collect();
    join_slots(slots).map_ok(Value::Array).boxed()
}

/// Await every entry concurrently; resolves to an object with the same keys in the
/// same order.
///
/// A key given twice keeps its first position and its last value.
pub fn promisify_record(entries: Vec<(String, Yield)>, ctx: &Context) -> Deferred {
    let (keys, slots): (Vec<String>, Vec<Slot>) = entries
        .into_iter()
        .map(|(key, value)| (key, promisify(value, ctx).into_slot()))
        .unzip();
    join_slots(slots)
        .map_ok(move |values| Value::Object(keys.into_iter().zip(values).collect::<Map<_, _>>()))
        .boxed()
}

/// Invoke `thunk` now and settle with whatever it reports through its callback.
pub fn promisify_thunk(thunk: Thunk, ctx: &Context) -> Deferred {
    let (callback, settled) = Callback::channel();
    thunk.invoke(ctx, callback);
    settled
        .map(|outcome| outcome.unwrap_or(Err(Error::CallbackDropped)))
        .boxed()
}

async fn join_slots(slots: Vec<Slot>) -> Result<Vec<Value>, Error> {
    let mut values = Vec::with_capacity(slots.len());
    let mut pending = FuturesUnordered::new();
    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Slot::Ready(value) => values.push(value),
            Slot::Pending(deferred) => {
                values.push(Value::Null);
                pending.push(deferred.map_ok(move |value| (index, value)));
            }
        }
    }

    while let Some((index, value)) = pending.try_next().await? {
        values[index] = value;
    }
    Ok(values)
}
