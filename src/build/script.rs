use std::collections::VecDeque;

use serde_json::Value;

use crate::{
    coroutine::{Coroutine, Resumed},
    error::Error,
    step::Step,
    yielded::Yield,
};

/// Yields a fixed list of values in order, then finishes with what each resolved to.
pub struct Script {
    pending: VecDeque<Yield>,
    resumed: Vec<Value>,
    started: bool,
}

/// Create a coroutine that yields each of `yields` in turn.
///
/// It finishes with an array of the settled values, in yield order. The first failure
/// routed into it escapes unchanged.
///
/// ```rust
/// use corun::prelude::*;
/// use futures::executor::block_on;
/// use serde_json::json;
///
/// let stage = script([
///     Yield::future(async { Ok(json!("a")) }),
///     Yield::thunk(|_, done| done.ok(json!("b"))),
/// ]);
/// let result = block_on(run(stage.boxed(), &Context::empty(), vec![])).unwrap();
/// assert_eq!(result, json!(["a", "b"]));
/// ```
pub fn script<I>(yields: I) -> Script
where
    I: IntoIterator<Item = Yield>,
{
    Script {
        pending: yields.into_iter().collect(),
        resumed: Vec::new(),
        started: false,
    }
}

impl Coroutine for Script {
    fn advance(&mut self, input: Value) -> Resumed {
        if self.started {
            self.resumed.push(input);
        }
        self.started = true;

        match self.pending.pop_front() {
            Some(next) => Ok(Step::Suspended(next)),
            None => Ok(Step::Finished(Value::Array(std::mem::take(
                &mut self.resumed,
            )))),
        }
    }

    fn fail(&mut self, error: Error) -> Resumed {
        self.pending.clear();
        Err(error)
    }
}
