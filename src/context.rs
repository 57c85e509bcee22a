//! The calling context threaded through a run.

use std::{any::Any, fmt, sync::Arc};

/// Receiver handed to factories and thunks.
///
/// A run never inspects its context. It is passed unchanged from [`run`](crate::run)
/// into the factory that starts the coroutine, into every thunk the coroutine yields,
/// and into nested coroutines, so they can all reach the same shared state.
///
/// ```rust
/// use corun::Context;
///
/// let ctx = Context::new(String::from("db-pool"));
/// assert_eq!(ctx.get::<String>().map(String::as_str), Some("db-pool"));
/// assert!(ctx.get::<u32>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    receiver: Option<Arc<dyn Any + Send + Sync>>,
}

impl Context {
    pub fn new<T>(receiver: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Context {
            receiver: Some(Arc::new(receiver)),
        }
    }

    /// A context with no receiver.
    pub fn empty() -> Self {
        Context::default()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_none()
    }

    /// Borrow the receiver if it has type `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.receiver.as_deref()?.downcast_ref()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("empty", &self.is_empty())
            .finish()
    }
}
