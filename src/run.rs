//! Driving coroutines to completion.
//!
//! [`run`] owns one coroutine for its whole life. It advances the coroutine,
//! converts each yielded value with [`promisify`], waits for it to settle, and
//! resumes the coroutine with the result. Failures are routed back in through
//! [`Coroutine::fail`] so the coroutine can recover; only what escapes rejects the
//! returned future.

use futures::{future, future::BoxFuture, FutureExt, TryFutureExt};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    context::Context,
    coroutine::{Coroutine, Runnable, Started},
    error::Error,
    promisify::{promisify, Promisified},
    step::Step,
};

/// The future returned by [`run`]: settles once with the final result.
pub type Running = BoxFuture<'static, Result<Value, Error>>;

/// Drive a factory, a started coroutine, or a plain value to completion.
///
/// A factory is called with `ctx` and `args` right away; a coroutine is used as-is
/// and `args` are ignored. If either produces a plain value instead of a coroutine
/// the returned future resolves with that value. The first step runs on the first
/// poll.
///
/// ```rust
/// use corun::prelude::*;
/// use futures::executor::block_on;
/// use serde_json::{json, Value};
///
/// let greet = Factory::from_fn(|_, args| {
///     let name = args.first().and_then(Value::as_str).unwrap_or("stranger").to_owned();
///     script([Yield::thunk(move |_, done| done.ok(json!(format!("hi {name}"))))])
/// });
///
/// let result = block_on(run(greet, &Context::empty(), vec![json!("ada")])).unwrap();
/// assert_eq!(result, json!(["hi ada"]));
/// ```
pub fn run(runnable: impl Into<Runnable>, ctx: &Context, args: Vec<Value>) -> Running {
    let runnable = runnable.into();
    trace!(factory = runnable.is_factory(), args = args.len(), "starting run");
    match runnable.start(ctx, args) {
        Started::Coroutine(coroutine) => drive(coroutine, ctx.clone())
            .inspect_err(|error| debug!(%error, "coroutine rejected"))
            .boxed(),
        Started::Value(value) => {
            trace!("started with a plain value, nothing to drive");
            future::ok(value).boxed()
        }
    }
}

/// [`run`] under an empty context.
pub fn run_detached(runnable: impl Into<Runnable>, args: Vec<Value>) -> Running {
    run(runnable, &Context::empty(), args)
}

async fn drive(mut coroutine: Box<dyn Coroutine>, ctx: Context) -> Result<Value, Error> {
    let mut step = coroutine.advance(Value::Null)?;
    let mut steps = 0_usize;
    loop {
        let yielded = match step {
            Step::Finished(result) => {
                debug!(steps, "coroutine finished");
                return Ok(result);
            }
            Step::Suspended(yielded) => yielded,
        };
        steps += 1;

        let kind = yielded.kind();
        trace!(%kind, step = steps, "coroutine suspended");
        let settled = match promisify(yielded, &ctx) {
            Promisified::Future(deferred) => deferred.await,
            Promisified::Unchanged(_) => Err(Error::InvalidYield { kind }),
        };

        step = match settled {
            Ok(value) => coroutine.advance(value)?,
            Err(error) => {
                debug!(%error, step = steps, "routing failure into coroutine");
                coroutine.fail(error)?
            }
        };
    }
}
