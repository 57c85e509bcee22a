//! Commonly used imports
//!
//! Use `use corun::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Context, Coroutine, Error, Factory, Step, Yield};

// Building coroutines
pub use crate::build::{from_fn, ready, script, Resume};

// Conversion
pub use crate::promisify::{promisify, Promisified};

// Execution
pub use crate::run::{run, run_detached};
pub use crate::wrap::wrap;
