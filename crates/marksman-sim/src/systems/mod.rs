//! Systems that operate on the sandbox world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! and own no state.

pub mod movement;
pub mod snapshot;
