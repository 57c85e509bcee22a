//! Adapting a coroutine factory into an ordinary future-returning callable.

use serde_json::Value;

use crate::{
    context::Context,
    coroutine::Factory,
    run::{run, Running},
};

/// A factory packaged as a callable; see [`wrap`].
#[derive(Debug, Clone)]
pub struct Wrapped {
    factory: Factory,
}

/// Wrap `factory` so each call starts and drives a fresh coroutine.
///
/// `wrap(f).call(ctx, args)` behaves exactly like `run(f, ctx, args)`.
///
/// ```rust
/// use corun::prelude::*;
/// use futures::executor::block_on;
/// use serde_json::json;
///
/// let double = wrap(Factory::from_fn(|_, args| {
///     let n = args.first().and_then(|v| v.as_i64()).unwrap_or_default();
///     script([Yield::thunk(move |_, done| done.ok(json!(n * 2)))])
/// }));
///
/// assert_eq!(block_on(double.call_detached(vec![json!(21)])).unwrap(), json!([42]));
/// ```
pub fn wrap(factory: Factory) -> Wrapped {
    Wrapped { factory }
}

impl Wrapped {
    pub fn call(&self, ctx: &Context, args: Vec<Value>) -> Running {
        run(self.factory.clone(), ctx, args)
    }

    /// Call with an empty context.
    pub fn call_detached(&self, args: Vec<Value>) -> Running {
        self.call(&Context::empty(), args)
    }
}

impl From<Factory> for Wrapped {
    fn from(factory: Factory) -> Self {
        wrap(factory)
    }
}
