//! Path (undirected edge) type and its handle.

use std::fmt;

use super::TownId;

/// Scale applied to the Euclidean distance between two towns' grid
/// coordinates when a path has no explicit distance.
pub const DISTANCE_SCALE: f64 = 1.0 / 64.0;

/// Stable handle to a [`Path`] owned by a [`Canvas`](super::Canvas).
///
/// Like [`TownId`], never reused after the path is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathId(pub(crate) u32);

impl PathId {
    /// Raw sequence number of this handle.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path#{}", self.0)
    }
}

/// Orders two town handles so that `a < b`.
///
/// Path identity is order-independent: `(a, b)` and `(b, a)` name the same edge.
pub fn canonical_pair(a: TownId, b: TownId) -> (TownId, TownId) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

/// An undirected edge between two distinct towns.
///
/// Carries a distance (explicit, or derived from the endpoint positions) and
/// a pheromone trail level which never drops below the canvas floor.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    id: PathId,
    a: TownId,
    b: TownId,
    explicit_distance: Option<f64>,
    derived_distance: f64,
    trail: f64,
}

impl Path {
    /// Endpoints must already be canonical.
    pub(crate) fn new(id: PathId, a: TownId, b: TownId, derived_distance: f64, trail: f64) -> Self {
        debug_assert!(a < b, "path endpoints must be canonical");
        Self {
            id,
            a,
            b,
            explicit_distance: None,
            derived_distance,
            trail,
        }
    }

    /// Handle of this path.
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Endpoint with the lower handle.
    pub fn town_a(&self) -> TownId {
        self.a
    }

    /// Endpoint with the higher handle.
    pub fn town_b(&self) -> TownId {
        self.b
    }

    /// Both endpoints in canonical order.
    pub fn endpoints(&self) -> (TownId, TownId) {
        (self.a, self.b)
    }

    /// Returns `true` if `town` is one of the endpoints.
    pub fn touches(&self, town: TownId) -> bool {
        self.a == town || self.b == town
    }

    /// Returns the endpoint opposite to `town`, if `town` is an endpoint.
    pub fn other(&self, town: TownId) -> Option<TownId> {
        if town == self.a {
            Some(self.b)
        } else if town == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Effective distance: the explicit one if set, else the derived one.
    pub fn distance(&self) -> f64 {
        self.explicit_distance.unwrap_or(self.derived_distance)
    }

    /// Returns `true` if the distance was set explicitly.
    pub fn has_explicit_distance(&self) -> bool {
        self.explicit_distance.is_some()
    }

    /// Current pheromone trail level.
    pub fn trail(&self) -> f64 {
        self.trail
    }

    /// Sets or clears (negative / non-finite value) the explicit distance.
    ///
    /// Returns `true` if the effective distance changed.
    pub(crate) fn set_distance(&mut self, distance: f64) -> bool {
        let before = self.distance();
        self.explicit_distance = if distance >= 0.0 && distance.is_finite() {
            Some(distance)
        } else {
            None
        };
        before != self.distance()
    }

    /// Returns `true` if the effective distance changed.
    pub(crate) fn set_derived_distance(&mut self, distance: f64) -> bool {
        let before = self.distance();
        self.derived_distance = distance;
        before != self.distance()
    }

    /// Sets the trail, clamping to `floor`. Returns `true` if it changed.
    pub(crate) fn set_trail(&mut self, trail: f64, floor: f64) -> bool {
        let trail = if trail < floor || trail.is_nan() { floor } else { trail };
        if self.trail == trail {
            return false;
        }
        self.trail = trail;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Path {
        Path::new(PathId(0), TownId(1), TownId(4), 2.5, 1.0)
    }

    #[test]
    fn test_canonical_pair() {
        assert_eq!(canonical_pair(TownId(4), TownId(1)), (TownId(1), TownId(4)));
        assert_eq!(canonical_pair(TownId(1), TownId(4)), (TownId(1), TownId(4)));
    }

    #[test]
    fn test_endpoints() {
        let p = sample();
        assert_eq!(p.endpoints(), (TownId(1), TownId(4)));
        assert!(p.touches(TownId(4)));
        assert!(!p.touches(TownId(2)));
        assert_eq!(p.other(TownId(1)), Some(TownId(4)));
        assert_eq!(p.other(TownId(4)), Some(TownId(1)));
        assert_eq!(p.other(TownId(2)), None);
    }

    #[test]
    fn test_explicit_distance_overrides_derived() {
        let mut p = sample();
        assert_eq!(p.distance(), 2.5);
        assert!(!p.has_explicit_distance());
        assert!(p.set_distance(1.0));
        assert_eq!(p.distance(), 1.0);
        // Derived updates are shadowed by the explicit value.
        assert!(!p.set_derived_distance(9.0));
        assert_eq!(p.distance(), 1.0);
        // Negative restores the derived value.
        assert!(p.set_distance(-1.0));
        assert_eq!(p.distance(), 9.0);
    }

    #[test]
    fn test_trail_clamps_to_floor() {
        let mut p = sample();
        assert!(p.set_trail(5.0, 1.0));
        assert_eq!(p.trail(), 5.0);
        assert!(p.set_trail(0.2, 1.0));
        assert_eq!(p.trail(), 1.0);
        assert!(!p.set_trail(-3.0, 1.0));
        assert!(!p.set_trail(f64::NAN, 1.0));
        assert_eq!(p.trail(), 1.0);
    }
}
