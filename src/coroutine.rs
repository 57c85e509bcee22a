//! The coroutine handle and the factories that start one.
//!
//! A [`Coroutine`] is a stateful computation that the driver advances one step at a
//! time. Each step either suspends on a [`Yield`] that must settle before the next
//! step, or finishes with the final [`Value`]. Errors flow in both directions: the
//! driver hands failures to the coroutine through [`Coroutine::fail`], and the
//! coroutine raises by returning `Err` from either method.
//!
//! # Examples
//!
//! ```rust
//! use corun::prelude::*;
//! use serde_json::json;
//!
//! // Yields once, then finishes with whatever it was resumed with plus one.
//! let mut asked = false;
//! let mut stage = from_fn(move |resume: Resume| {
//!     let value = resume?;
//!     if !asked {
//!         asked = true;
//!         return Ok(Step::Suspended(Yield::future(async { Ok(json!(41)) })));
//!     }
//!     Ok(Step::Finished(json!(value.as_i64().unwrap_or_default() + 1)))
//! });
//!
//! assert!(stage.advance(json!(null)).unwrap().is_suspended());
//! assert_eq!(stage.advance(json!(41)).unwrap().unwrap_finished(), json!(42));
//! ```

use std::{fmt, sync::Arc};

use serde_json::Value;

use crate::{context::Context, error::Error, step::Step, yielded::Yield};

/// What a coroutine returns from a step: suspended, finished, or raised.
pub type Resumed = Result<Step<Yield, Value>, Error>;

/// A started stepwise computation.
///
/// The driver owns the handle exclusively for one run and never calls it
/// concurrently: the next call happens only after the previously yielded value
/// settled.
pub trait Coroutine: Send {
    /// Resume with the settled value of the last yield (`Null` on the first call).
    fn advance(&mut self, input: Value) -> Resumed;

    /// Resume by raising `error` at the suspension point.
    ///
    /// Returning a step means the coroutine recovered; returning `Err` means the
    /// error (or a new one) escaped and the run rejects with it.
    fn fail(&mut self, error: Error) -> Resumed;

    fn boxed(self) -> Box<dyn Coroutine>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<C> Coroutine for Box<C>
where
    C: Coroutine + ?Sized,
{
    fn advance(&mut self, input: Value) -> Resumed {
        (**self).advance(input)
    }

    fn fail(&mut self, error: Error) -> Resumed {
        (**self).fail(error)
    }
}

/// What calling a [`Factory`] produced.
pub enum Started {
    /// A coroutine ready to be driven.
    Coroutine(Box<dyn Coroutine>),
    /// A value that is already final; the run settles with it immediately.
    Value(Value),
}

impl Started {
    pub fn coroutine<C>(coroutine: C) -> Self
    where
        C: Coroutine + 'static,
    {
        Started::Coroutine(Box::new(coroutine))
    }
}

impl From<Value> for Started {
    fn from(value: Value) -> Self {
        Started::Value(value)
    }
}

impl From<Box<dyn Coroutine>> for Started {
    fn from(coroutine: Box<dyn Coroutine>) -> Self {
        Started::Coroutine(coroutine)
    }
}

impl fmt::Debug for Started {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Started::Coroutine(_) => f.write_str("Started::Coroutine(..)"),
            Started::Value(value) => f.debug_tuple("Started::Value").field(value).finish(),
        }
    }
}

type StartFn = dyn Fn(&Context, Vec<Value>) -> Started + Send + Sync;

/// A shareable callable that starts a fresh coroutine each time it is called.
///
/// Factories are what [`wrap`](crate::wrap) turns into plain future-returning
/// callables, and what a coroutine yields to run a nested computation.
#[derive(Clone)]
pub struct Factory {
    start: Arc<StartFn>,
}

impl Factory {
    pub fn new<F>(start: F) -> Self
    where
        F: Fn(&Context, Vec<Value>) -> Started + Send + Sync + 'static,
    {
        Factory {
            start: Arc::new(start),
        }
    }

    /// Build a factory from a closure returning any coroutine.
    pub fn from_fn<F, C>(start: F) -> Self
    where
        F: Fn(&Context, Vec<Value>) -> C + Send + Sync + 'static,
        C: Coroutine + 'static,
    {
        Factory::new(move |ctx, args| Started::coroutine(start(ctx, args)))
    }

    /// Invoke the factory under `ctx`.
    pub fn start(&self, ctx: &Context, args: Vec<Value>) -> Started {
        (self.start)(ctx, args)
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Factory(..)")
    }
}

/// Anything [`run`](crate::run) can drive.
pub enum Runnable {
    Factory(Factory),
    Coroutine(Box<dyn Coroutine>),
    /// Not a computation at all; the run settles with it as-is.
    Value(Value),
}

impl Runnable {
    pub fn is_factory(&self) -> bool {
        matches!(self, Runnable::Factory(_))
    }

    pub fn is_coroutine(&self) -> bool {
        matches!(self, Runnable::Coroutine(_))
    }

    /// Obtain a handle, calling the factory with `args` if there is one.
    ///
    /// `args` are ignored when the runnable is already a coroutine.
    pub fn start(self, ctx: &Context, args: Vec<Value>) -> Started {
        match self {
            Runnable::Factory(factory) => factory.start(ctx, args),
            Runnable::Coroutine(coroutine) => Started::Coroutine(coroutine),
            Runnable::Value(value) => Started::Value(value),
        }
    }
}

impl From<Factory> for Runnable {
    fn from(factory: Factory) -> Self {
        Runnable::Factory(factory)
    }
}

impl From<Box<dyn Coroutine>> for Runnable {
    fn from(coroutine: Box<dyn Coroutine>) -> Self {
        Runnable::Coroutine(coroutine)
    }
}

impl From<Value> for Runnable {
    fn from(value: Value) -> Self {
        Runnable::Value(value)
    }
}

impl fmt::Debug for Runnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runnable::Factory(factory) => fmt::Debug::fmt(factory, f),
            Runnable::Coroutine(_) => f.write_str("Runnable::Coroutine(..)"),
            Runnable::Value(value) => f.debug_tuple("Runnable::Value").field(value).finish(),
        }
    }
}
