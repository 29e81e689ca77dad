//! Line-oriented text format for saving and loading a canvas.
//!
//! ```text
//! x;y;name                    one line per town, in insertion order
//! indexA;indexB;distance;trail one line per path
//! ```
//!
//! Path endpoints are zero-based positions among the town lines of the same
//! file. The trail column is written for inspection only: loading restores
//! positions, names and distances, and the colony reset that follows puts
//! every trail back to the floor.

mod format;

pub use format::{load_from, load_str, save_to, to_persisted_string};
