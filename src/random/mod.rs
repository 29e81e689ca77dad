//! Injectable uniform random sources.
//!
//! - [`RandomSource`] — the trait the colony draws from
//! - [`SeededRandom`] — reproducible `StdRng` wrapper, or OS-seeded for production
//! - [`ScriptedRandom`] — replays a fixed list of values, for tests

mod source;

pub use source::{RandomSource, ScriptedRandom, SeededRandom};
