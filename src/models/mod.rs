//! Graph model: towns, the paths between them, and the canvas that owns both.
//!
//! Towns and paths live in the [`Canvas`] and are referred to everywhere else
//! through the copyable handles [`TownId`] and [`PathId`]. A handle to a
//! deleted entity simply stops resolving; it never dangles.

mod canvas;
mod path;
mod town;

pub use canvas::{Canvas, DEFAULT_INITIAL_TAU, DEFAULT_TOWN_SIZE};
pub use path::{canonical_pair, Path, PathId, DISTANCE_SCALE};
pub use town::{Town, TownId};
