//! Town type and its handle.

use std::fmt;

/// Stable handle to a [`Town`] owned by a [`Canvas`](super::Canvas).
///
/// Handles are allocated from a monotonically increasing counter and never
/// reused, so a handle to a deleted town stays invalid forever instead of
/// silently aliasing a newer town. The ordering of handles is the insertion
/// order of their towns, which is also the canonical ordering used for path
/// endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TownId(pub(crate) u32);

impl TownId {
    /// Raw sequence number of this handle.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TownId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "town#{}", self.0)
    }
}

/// A node of the TSP graph: a named point on an integer grid.
///
/// # Examples
///
/// ```
/// use ant_colony::models::Canvas;
///
/// let mut canvas = Canvas::new();
/// let id = canvas.add_town(64, 0);
/// let town = canvas.town(id).expect("just added");
/// assert_eq!((town.x(), town.y()), (64, 0));
/// assert_eq!(town.name(), "Town 1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Town {
    id: TownId,
    x: i32,
    y: i32,
    name: String,
}

impl Town {
    pub(crate) fn new(id: TownId, x: i32, y: i32, name: String) -> Self {
        Self { id, x, y, name }
    }

    /// Handle of this town.
    pub fn id(&self) -> TownId {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Moves the town, clamping negative coordinates to zero.
    ///
    /// Returns `true` if the position actually changed.
    pub(crate) fn set_position(&mut self, x: i32, y: i32) -> bool {
        let (x, y) = (x.max(0), y.max(0));
        if (self.x, self.y) == (x, y) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }

    /// Returns `true` if the name actually changed.
    pub(crate) fn set_name(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name.to_string();
        true
    }

    /// Euclidean distance to another town, in grid units.
    pub fn distance_to(&self, other: &Town) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_town_accessors() {
        let t = Town::new(TownId(3), 10, 20, "Town 3".into());
        assert_eq!(t.id(), TownId(3));
        assert_eq!(t.x(), 10);
        assert_eq!(t.y(), 20);
        assert_eq!(t.name(), "Town 3");
    }

    #[test]
    fn test_set_position_clamps_negative() {
        let mut t = Town::new(TownId(0), 10, 20, "A".into());
        assert!(t.set_position(-5, 7));
        assert_eq!((t.x(), t.y()), (0, 7));
        assert!(!t.set_position(0, 7));
    }

    #[test]
    fn test_creation_keeps_negative() {
        let t = Town::new(TownId(0), -1, -1, "A".into());
        assert_eq!((t.x(), t.y()), (-1, -1));
    }

    #[test]
    fn test_set_name() {
        let mut t = Town::new(TownId(0), 0, 0, "A".into());
        assert!(!t.set_name("A"));
        assert!(t.set_name("Brno"));
        assert_eq!(t.name(), "Brno");
    }

    #[test]
    fn test_distance() {
        let a = Town::new(TownId(0), 0, 0, "A".into());
        let b = Town::new(TownId(1), 3, 4, "B".into());
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_id_ordering_follows_insertion() {
        assert!(TownId(1) < TownId(2));
        assert_eq!(TownId(7).index(), 7);
        assert_eq!(TownId(7).to_string(), "town#7");
    }
}
