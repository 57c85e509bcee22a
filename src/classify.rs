//! Sorting yielded values into the categories the driver knows how to await.
//!
//! Classification is one total function, [`classify`], that walks
//! [`YieldKind::PRIORITY`] and returns the first kind whose predicate matches.
//! Anything that matches none of them is [`YieldKind::Other`].

use std::fmt;

use crate::yielded::Yield;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YieldKind {
    Future,
    Factory,
    Coroutine,
    Thunk,
    Sequence,
    Record,
    /// Plain data; cannot be awaited on its own.
    Other,
}

impl YieldKind {
    /// Order in which kinds are tested. Factories precede thunks since both are
    /// callable.
    pub const PRIORITY: [YieldKind; 6] = [
        YieldKind::Future,
        YieldKind::Factory,
        YieldKind::Coroutine,
        YieldKind::Thunk,
        YieldKind::Sequence,
        YieldKind::Record,
    ];

    /// The predicate for this kind.
    pub fn matches(self, value: &Yield) -> bool {
        match self {
            YieldKind::Future => is_future(value),
            YieldKind::Factory => is_factory(value),
            YieldKind::Coroutine => is_coroutine(value),
            YieldKind::Thunk => is_thunk(value),
            YieldKind::Sequence => is_sequence(value),
            YieldKind::Record => is_record(value),
            YieldKind::Other => classify(value) == YieldKind::Other,
        }
    }
}

impl fmt::Display for YieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            YieldKind::Future => "future",
            YieldKind::Factory => "coroutine factory",
            YieldKind::Coroutine => "coroutine",
            YieldKind::Thunk => "thunk",
            YieldKind::Sequence => "sequence",
            YieldKind::Record => "record",
            YieldKind::Other => "plain value",
        })
    }
}

pub fn classify(value: &Yield) -> YieldKind {
    YieldKind::PRIORITY
        .into_iter()
        .find(|kind| kind.matches(value))
        .unwrap_or(YieldKind::Other)
}

/// Already a future; awaited as-is.
pub fn is_future(value: &Yield) -> bool {
    matches!(value, Yield::Future(_))
}

/// Calling it starts a coroutine rather than producing a plain result.
pub fn is_factory(value: &Yield) -> bool {
    matches!(value, Yield::Factory(_))
}

/// A started coroutine that can be advanced and failed.
pub fn is_coroutine(value: &Yield) -> bool {
    matches!(value, Yield::Coroutine(_))
}

/// Callable, reports through a callback, and is not a factory.
pub fn is_thunk(value: &Yield) -> bool {
    matches!(value, Yield::Thunk(_)) && !is_factory(value)
}

pub fn is_sequence(value: &Yield) -> bool {
    matches!(value, Yield::Sequence(_))
}

/// A keyed container not already claimed by an earlier kind.
pub fn is_record(value: &Yield) -> bool {
    matches!(value, Yield::Record(_)) && !is_sequence(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::ready,
        coroutine::{Factory, Started},
    };
    use serde_json::{json, Value};

    fn samples() -> Vec<Yield> {
        vec![
            Yield::future(async { Ok(Value::Null) }),
            Yield::Factory(Factory::new(|_, _| Started::Value(Value::Null))),
            Yield::coroutine(ready(Value::Null)),
            Yield::thunk(|_, done| done.ok(Value::Null)),
            Yield::sequence([Yield::value(1)]),
            Yield::record([("a", Yield::value(1))]),
            Yield::value(json!({"plain": [1, 2]})),
        ]
    }

    #[test]
    fn test_each_sample_lands_in_its_own_kind() {
        let kinds: Vec<_> = samples().iter().map(classify).collect();
        assert_eq!(
            kinds,
            [
                YieldKind::Future,
                YieldKind::Factory,
                YieldKind::Coroutine,
                YieldKind::Thunk,
                YieldKind::Sequence,
                YieldKind::Record,
                YieldKind::Other,
            ]
        );
    }

    #[test]
    fn test_predicates_are_mutually_exclusive() {
        for value in samples() {
            let matching = YieldKind::PRIORITY
                .iter()
                .filter(|kind| kind.matches(&value))
                .count();
            assert!(matching <= 1, "{value:?} matched {matching} kinds");
            assert_eq!(matching == 0, YieldKind::Other.matches(&value));
        }
    }

    #[test]
    fn test_factory_is_not_a_thunk() {
        let factory = Yield::Factory(Factory::new(|_, _| Started::Value(Value::Null)));
        assert!(is_factory(&factory));
        assert!(!is_thunk(&factory));
    }

    #[test]
    fn test_plain_containers_are_other() {
        assert_eq!(classify(&Yield::value(json!([1, 2, 3]))), YieldKind::Other);
        assert_eq!(classify(&Yield::value(json!({"a": 1}))), YieldKind::Other);
        assert_eq!(classify(&Yield::value(Value::Null)), YieldKind::Other);
    }
}
