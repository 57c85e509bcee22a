//! The table of conversions from yielded values to futures.
//!
//! The table is a `static`: built at compile time, shared by every run, and never
//! mutated. It is walked front to back and the first entry whose kind matches does
//! the conversion.

use std::fmt;

use crate::{
    classify::YieldKind,
    context::Context,
    promisify::{promisify_record, promisify_sequence, promisify_thunk, Promisified},
    run::run,
    yielded::{Deferred, Yield},
};

/// Converts a value of one kind; hands the value back if its shape does not match.
pub type Conversion = fn(Yield, &Context) -> Result<Deferred, Yield>;

pub struct Converter {
    kind: YieldKind,
    convert: Conversion,
}

impl Converter {
    pub fn kind(&self) -> YieldKind {
        self.kind
    }

    pub fn matches(&self, value: &Yield) -> bool {
        self.kind.matches(value)
    }

    pub fn convert(&self, value: Yield, ctx: &Context) -> Result<Deferred, Yield> {
        (self.convert)(value, ctx)
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter").field("kind", &self.kind).finish()
    }
}

static REGISTRY: [Converter; 5] = [
    Converter {
        kind: YieldKind::Factory,
        convert: convert_factory,
    },
    Converter {
        kind: YieldKind::Coroutine,
        convert: convert_coroutine,
    },
    Converter {
        kind: YieldKind::Thunk,
        convert: convert_thunk,
    },
    Converter {
        kind: YieldKind::Sequence,
        convert: convert_sequence,
    },
    Converter {
        kind: YieldKind::Record,
        convert: convert_record,
    },
];

/// The registry entries, in the order they are consulted.
pub fn entries() -> &'static [Converter] {
    &REGISTRY
}

/// Convert `value` with the first matching entry.
///
/// Values no entry claims come back unchanged; an already-future stays a future.
pub fn convert(value: Yield, ctx: &Context) -> Promisified {
    let mut value = value;
    for converter in entries() {
        if !converter.matches(&value) {
            continue;
        }
        match converter.convert(value, ctx) {
            Ok(deferred) => return Promisified::Future(deferred),
            Err(unclaimed) => value = unclaimed,
        }
    }

    match value {
        Yield::Future(deferred) => Promisified::Future(deferred),
        unclaimed => Promisified::Unchanged(unclaimed),
    }
}

fn convert_factory(value: Yield, ctx: &Context) -> Result<Deferred, Yield> {
    match value {
        Yield::Factory(factory) => Ok(run(factory, ctx, Vec::new())),
        other => Err(other),
    }
}

fn convert_coroutine(value: Yield, ctx: &Context) -> Result<Deferred, Yield> {
    match value {
        Yield::Coroutine(coroutine) => Ok(run(coroutine, ctx, Vec::new())),
        other => Err(other),
    }
}

fn convert_thunk(value: Yield, ctx: &Context) -> Result<Deferred, Yield> {
    match value {
        Yield::Thunk(thunk) => Ok(promisify_thunk(thunk, ctx)),
        other => Err(other),
    }
}

fn convert_sequence(value: Yield, ctx: &Context) -> Result<Deferred, Yield> {
    match value {
        Yield::Sequence(items) => Ok(promisify_sequence(items, ctx)),
        other => Err(other),
    }
}

fn convert_record(value: Yield, ctx: &Context) -> Result<Deferred, Yield> {
    match value {
        Yield::Record(entries) => Ok(promisify_record(entries, ctx)),
        other => Err(other),
    }
}
