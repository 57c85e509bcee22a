//! Building coroutines without implementing the trait by hand
//!
//! [`from_fn`] turns a closure into a coroutine, [`script`] replays a fixed list of
//! yields, and [`ready`] finishes immediately.

mod func;
mod script;

pub use func::{from_fn, ready, FromFn, Ready, Resume};
pub use script::{script, Script};
