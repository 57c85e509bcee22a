//! # corun: drive coroutines that yield futures
//!
//! Write sequential-looking logic over values that may be immediate, deferred, or
//! whole collections of deferred values. A coroutine suspends on a [`Yield`]; the
//! driver turns it into a future, waits for it, and resumes the coroutine with the
//! result (or hands it the error).
//!
//! ## Core Pieces
//!
//! - **[`Coroutine`]**: the stepwise computation, resumed with `advance` or `fail`
//! - **[`Yield`]**: what a coroutine can suspend on: futures, thunks, factories,
//!   coroutines, and sequences or records of those
//! - **[`promisify`]**: converts one yielded value into a future through the
//!   [registry](crate::registry)
//! - **[`run`]** / **[`wrap`]**: drive a coroutine to its final value
//!
//! ## Example
//!
//! ```
//! use corun::prelude::*;
//! use futures::executor::block_on;
//! use serde_json::json;
//!
//! // Waits on a record of deferred values, then adds them up.
//! let mut waited = false;
//! let sum = from_fn(move |resume: Resume| {
//!     let settled = resume?;
//!     if !waited {
//!         waited = true;
//!         return Ok(Step::Suspended(Yield::record([
//!             ("a", Yield::future(async { Ok(json!(1)) })),
//!             ("b", Yield::thunk(|_, done| done.ok(json!(2)))),
//!         ])));
//!     }
//!     let total = settled["a"].as_i64().unwrap_or(0) + settled["b"].as_i64().unwrap_or(0);
//!     Ok(Step::Finished(json!(total)))
//! });
//!
//! let result = block_on(run(sum.boxed(), &Context::empty(), vec![]));
//! assert_eq!(result.unwrap(), json!(3));
//! ```
//!
//! ## Common Functions
//!
//! **Building coroutines:**
//! - [`from_fn(f)`](from_fn) - Coroutine from a closure over [`Resume`]
//! - [`script(yields)`](script) - Yield a fixed list of values in order
//! - [`ready(value)`](ready) - Finish immediately
//!
//! **Execution:**
//! - [`run(runnable, ctx, args)`](run) - Drive to completion
//! - [`wrap(factory)`](wrap) - Turn a factory into a future-returning callable

pub mod build;
pub mod classify;
mod context;
mod coroutine;
mod error;
pub mod prelude;
pub mod promisify;
pub mod registry;
mod run;
mod step;
mod thunk;
mod wrap;
mod yielded;

pub use build::{from_fn, ready, script, Resume};
pub use classify::{classify, YieldKind};
pub use context::Context;
pub use coroutine::{Coroutine, Factory, Resumed, Runnable, Started};
pub use error::{Error, Result};
pub use promisify::{promisify, Promisified};
pub use run::{run, run_detached, Running};
pub use step::Step;
pub use thunk::{Callback, Thunk};
pub use wrap::{wrap, Wrapped};
pub use yielded::{Deferred, Yield};
