/// Result of advancing a coroutine: suspended on a yielded value, or finished with
/// the final result.
///
/// The driver matches on it after every `advance` or `fail` call.
///
/// ```rust
/// use corun::Step;
///
/// let paused: Step<&str, i32> = Step::Suspended("waiting on io");
/// assert!(paused.is_suspended());
/// assert_eq!(Step::<&str, i32>::Finished(7).unwrap_finished(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<Y, D> {
    /// Paused on a value that must settle before the coroutine resumes.
    Suspended(Y),
    Finished(D),
}

impl<Y, D> Step<Y, D> {
    #[inline]
    pub const fn is_suspended(&self) -> bool {
        matches!(self, Step::Suspended(_))
    }

    #[inline]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Step::Finished(_))
    }

    /// Returns the final result.
    ///
    /// # Panics
    ///
    /// Panics if the coroutine is still suspended.
    #[track_caller]
    pub fn unwrap_finished(self) -> D {
        match self {
            Step::Finished(result) => result,
            Step::Suspended(_) => panic!("coroutine is still suspended"),
        }
    }
}
