//! Values a coroutine may suspend on.

use std::{fmt, future::Future};

use futures::{future::BoxFuture, FutureExt};
use serde_json::Value;

use crate::{
    classify::{classify, YieldKind},
    context::Context,
    coroutine::{Coroutine, Factory},
    error::Error,
    thunk::{Callback, Thunk},
};

/// A boxed future settling with a value or an error.
pub type Deferred = BoxFuture<'static, Result<Value, Error>>;

/// Everything a coroutine can produce at a suspension point.
///
/// Containers hold further `Yield`s so a single step can wait on many deferred
/// values at once. Plain [`Value`]s are data, not work: yielding one on its own is an
/// invalid yield, though they may sit inside a sequence or record next to deferred
/// entries.
pub enum Yield {
    Future(Deferred),
    Factory(Factory),
    Coroutine(Box<dyn Coroutine>),
    Thunk(Thunk),
    Sequence(Vec<Yield>),
    /// Keyed entries, kept in insertion order.
    Record(Vec<(String, Yield)>),
    Value(Value),
}

impl Yield {
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value, Error>> + Send + 'static,
    {
        Yield::Future(future.boxed())
    }

    pub fn thunk<F>(thunk: F) -> Self
    where
        F: FnOnce(&Context, Callback) + Send + 'static,
    {
        Yield::Thunk(Thunk::new(thunk))
    }

    pub fn coroutine<C>(coroutine: C) -> Self
    where
        C: Coroutine + 'static,
    {
        Yield::Coroutine(Box::new(coroutine))
    }

    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Yield>,
    {
        Yield::Sequence(items.into_iter().collect())
    }

    pub fn record<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Yield)>,
    {
        Yield::Record(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Yield::Value(value.into())
    }

    pub fn kind(&self) -> YieldKind {
        classify(self)
    }
}

impl From<Value> for Yield {
    fn from(value: Value) -> Self {
        Yield::Value(value)
    }
}

impl From<Vec<Yield>> for Yield {
    fn from(items: Vec<Yield>) -> Self {
        Yield::Sequence(items)
    }
}

impl From<Factory> for Yield {
    fn from(factory: Factory) -> Self {
        Yield::Factory(factory)
    }
}

impl From<Thunk> for Yield {
    fn from(thunk: Thunk) -> Self {
        Yield::Thunk(thunk)
    }
}

impl From<Box<dyn Coroutine>> for Yield {
    fn from(coroutine: Box<dyn Coroutine>) -> Self {
        Yield::Coroutine(coroutine)
    }
}

impl fmt::Debug for Yield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Yield::Sequence(items) => f.debug_list().entries(items).finish(),
            Yield::Record(entries) => f
                .debug_map()
                .entries(entries.iter().map(|(key, value)| (key, value)))
                .finish(),
            Yield::Value(value) => fmt::Debug::fmt(value, f),
            other => write!(f, "<{}>", other.kind()),
        }
    }
}
