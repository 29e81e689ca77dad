//! The editable town graph.

use tracing::debug;

use super::path::{canonical_pair, DISTANCE_SCALE};
use super::{Path, PathId, Town, TownId};
use crate::events::{Event, EventQueue};

/// Default hit-test radius for [`Canvas::town_at`].
pub const DEFAULT_TOWN_SIZE: i32 = 40;

/// Default pheromone floor.
pub const DEFAULT_INITIAL_TAU: f64 = 1.0;

/// The graph model: towns, the paths between them, and the trail floor.
///
/// Towns keep their insertion order. Paths are unique per unordered town
/// pair and always connect two live towns: deleting a town deletes every
/// incident path with it.
///
/// With `fill_paths` on (the default) every new town is connected to all
/// existing towns, keeping the graph complete. With it off, paths are edited
/// by hand through [`add_path`](Self::add_path),
/// [`remove_path`](Self::remove_path) and [`toggle_path`](Self::toggle_path).
///
/// # Examples
///
/// ```
/// use ant_colony::models::Canvas;
///
/// let mut canvas = Canvas::new();
/// let a = canvas.add_town(0, 0);
/// let b = canvas.add_town(64, 0);
/// let c = canvas.add_town(64, 64);
/// assert_eq!(canvas.path_count(), 3);
///
/// let ab = canvas.path_between(b, a).expect("complete graph");
/// assert!((ab.distance() - 1.0).abs() < 1e-10);
///
/// canvas.delete_town(c);
/// assert_eq!(canvas.path_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    towns: Vec<Town>,
    paths: Vec<Path>,
    next_town: u32,
    next_path: u32,
    town_size: i32,
    initial_tau: f64,
    fill_paths: bool,
    events: EventQueue,
}

impl Canvas {
    /// Creates an empty canvas with default settings.
    pub fn new() -> Self {
        Self {
            towns: Vec::new(),
            paths: Vec::new(),
            next_town: 0,
            next_path: 0,
            town_size: DEFAULT_TOWN_SIZE,
            initial_tau: DEFAULT_INITIAL_TAU,
            fill_paths: true,
            events: EventQueue::default(),
        }
    }

    /// Towns in insertion order.
    pub fn towns(&self) -> &[Town] {
        &self.towns
    }

    /// Paths in creation order.
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Number of towns.
    pub fn town_count(&self) -> usize {
        self.towns.len()
    }

    /// Number of paths.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Looks up a live town.
    pub fn town(&self, id: TownId) -> Option<&Town> {
        self.town_index(id).map(|i| &self.towns[i])
    }

    /// Looks up a live path.
    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.path_index(id).map(|i| &self.paths[i])
    }

    /// Returns `true` if `id` refers to a live town.
    pub fn contains_town(&self, id: TownId) -> bool {
        self.town_index(id).is_some()
    }

    /// Zero-based insertion-order position of a live town.
    pub fn town_index(&self, id: TownId) -> Option<usize> {
        // Handles are allocated in increasing order and removals keep order.
        self.towns.binary_search_by_key(&id, |t| t.id()).ok()
    }

    fn path_index(&self, id: PathId) -> Option<usize> {
        self.paths.binary_search_by_key(&id, |p| p.id()).ok()
    }

    /// Hit-test radius used by [`town_at`](Self::town_at).
    pub fn town_size(&self) -> i32 {
        self.town_size
    }

    /// Pheromone floor: minimum trail level and the reset value.
    pub fn initial_tau(&self) -> f64 {
        self.initial_tau
    }

    /// Whether new towns are connected to every existing town.
    pub fn fill_paths(&self) -> bool {
        self.fill_paths
    }

    /// Appends a town and names it `Town N`.
    ///
    /// With `fill_paths` on, the town is connected to every pre-existing town.
    pub fn add_town(&mut self, x: i32, y: i32) -> TownId {
        let id = TownId(self.next_town);
        self.next_town += 1;
        let name = format!("Town {}", self.next_town);
        self.towns.push(Town::new(id, x, y, name));

        if self.fill_paths {
            let others: Vec<TownId> = self.towns.iter().map(|t| t.id()).filter(|&t| t != id).collect();
            for other in others {
                self.insert_path(other, id);
            }
        }

        debug!(town = %id, x, y, paths = self.paths.len(), "town added");
        self.events.push(Event::TopologyChanged);
        id
    }

    /// Deletes a town and every path incident to it.
    ///
    /// Returns `false` if the handle is stale.
    pub fn delete_town(&mut self, id: TownId) -> bool {
        let Some(index) = self.town_index(id) else {
            return false;
        };
        let before = self.paths.len();
        self.paths.retain(|p| !p.touches(id));
        self.towns.remove(index);

        debug!(town = %id, removed_paths = before - self.paths.len(), "town deleted");
        self.events.push(Event::TopologyChanged);
        true
    }

    /// Deletes all towns (and thus all paths), one at a time.
    pub fn clear(&mut self) {
        while let Some(first) = self.towns.first().map(|t| t.id()) {
            self.delete_town(first);
        }
    }

    /// Adds a path between two distinct live towns.
    ///
    /// Returns `false` when `fill_paths` is on, on a self-loop, a stale
    /// handle, or when the path already exists.
    pub fn add_path(&mut self, a: TownId, b: TownId) -> bool {
        if self.fill_paths {
            return false;
        }
        match self.insert_path(a, b) {
            Some(id) => {
                debug!(path = %id, %a, %b, "path added");
                self.events.push(Event::TopologyChanged);
                true
            }
            None => false,
        }
    }

    /// Removes the path between two towns.
    ///
    /// Returns `false` when `fill_paths` is on or no such path exists.
    pub fn remove_path(&mut self, a: TownId, b: TownId) -> bool {
        if self.fill_paths || a == b {
            return false;
        }
        let Some(id) = self.path_between(a, b).map(|p| p.id()) else {
            return false;
        };
        if let Some(index) = self.path_index(id) {
            self.paths.remove(index);
        }
        debug!(path = %id, %a, %b, "path removed");
        self.events.push(Event::TopologyChanged);
        true
    }

    /// Removes the path between `a` and `b` if present, else adds it.
    ///
    /// Returns `true` if the topology changed. Always a no-op with
    /// `fill_paths` on.
    pub fn toggle_path(&mut self, a: TownId, b: TownId) -> bool {
        if self.fill_paths {
            return false;
        }
        self.remove_path(a, b) || self.add_path(a, b)
    }

    /// Finds the path connecting two towns, in either order.
    pub fn path_between(&self, a: TownId, b: TownId) -> Option<&Path> {
        let key = canonical_pair(a, b);
        self.paths.iter().find(|p| p.endpoints() == key)
    }

    /// Finds the town whose hit box contains `(x, y)`.
    ///
    /// A town's hit box spans `town_size` units right and down from its
    /// position. On overlap, the most recently added town wins.
    pub fn town_at(&self, x: i32, y: i32) -> Option<TownId> {
        let size = 0..i64::from(self.town_size);
        self.towns
            .iter()
            .rev()
            .find(|t| {
                let dx = i64::from(x) - i64::from(t.x());
                let dy = i64::from(y) - i64::from(t.y());
                size.contains(&dx) && size.contains(&dy)
            })
            .map(|t| t.id())
    }

    /// Moves a town, clamping negative coordinates to zero, and recomputes
    /// the derived distance of every incident path.
    ///
    /// Returns `false` if the handle is stale or the position is unchanged.
    pub fn set_town_position(&mut self, id: TownId, x: i32, y: i32) -> bool {
        let Some(index) = self.town_index(id) else {
            return false;
        };
        if !self.towns[index].set_position(x, y) {
            return false;
        }
        self.events.push(Event::TownMoved(id));

        let mut any = false;
        for i in 0..self.paths.len() {
            if !self.paths[i].touches(id) {
                continue;
            }
            let (a, b) = self.paths[i].endpoints();
            let Some(derived) = self.derived_distance(a, b) else {
                continue;
            };
            if self.paths[i].set_derived_distance(derived) {
                self.events.push(Event::PathDistanceChanged(self.paths[i].id()));
                any = true;
            }
        }
        if any {
            self.events.push(Event::DistancesChanged);
        }
        true
    }

    /// Renames a town. Returns `false` if the handle is stale, the name is
    /// unchanged, or it contains a field separator (`;`) or line break.
    pub fn set_town_name(&mut self, id: TownId, name: &str) -> bool {
        if name.contains([';', '\n', '\r']) {
            return false;
        }
        let Some(index) = self.town_index(id) else {
            return false;
        };
        if !self.towns[index].set_name(name) {
            return false;
        }
        self.events.push(Event::TownRenamed(id));
        true
    }

    /// Sets a path's explicit distance; a negative value restores the
    /// position-derived distance.
    ///
    /// Returns `true` if the effective distance changed.
    pub fn set_path_distance(&mut self, id: PathId, distance: f64) -> bool {
        let Some(index) = self.path_index(id) else {
            return false;
        };
        if !self.paths[index].set_distance(distance) {
            return false;
        }
        self.events.push(Event::PathDistanceChanged(id));
        self.events.push(Event::DistancesChanged);
        true
    }

    /// Sets a path's trail, clamped to [`initial_tau`](Self::initial_tau).
    ///
    /// Returns `true` if the trail changed.
    pub fn set_trail(&mut self, id: PathId, trail: f64) -> bool {
        let Some(index) = self.path_index(id) else {
            return false;
        };
        let floor = self.initial_tau;
        if !self.paths[index].set_trail(trail, floor) {
            return false;
        }
        self.events.push(Event::TrailChanged(id));
        true
    }

    /// Puts every path's trail back to the floor.
    pub fn reset_trails(&mut self) {
        let floor = self.initial_tau;
        for path in &mut self.paths {
            if path.set_trail(floor, floor) {
                self.events.push(Event::TrailChanged(path.id()));
            }
        }
    }

    /// Sets the hit-test radius.
    pub fn set_town_size(&mut self, size: i32) {
        if self.town_size != size {
            self.town_size = size;
            self.events.push(Event::CanvasSettingsChanged);
        }
    }

    /// Sets the pheromone floor. Counts as a topology change.
    ///
    /// Trails below the new floor are raised to it. Values that are not
    /// finite and positive are ignored.
    pub fn set_initial_tau(&mut self, tau: f64) {
        if !tau.is_finite() || tau <= 0.0 || self.initial_tau == tau {
            return;
        }
        self.initial_tau = tau;
        for path in &mut self.paths {
            let trail = path.trail();
            if path.set_trail(trail, tau) {
                self.events.push(Event::TrailChanged(path.id()));
            }
        }
        debug!(initial_tau = tau, "trail floor changed");
        self.events.push(Event::TopologyChanged);
    }

    /// Switches between complete-graph auto-fill and manual path editing.
    ///
    /// Existing paths are left as they are.
    pub fn set_fill_paths(&mut self, on: bool) {
        if self.fill_paths != on {
            self.fill_paths = on;
            self.events.push(Event::CanvasSettingsChanged);
        }
    }

    /// Takes all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Returns the path between `a` and `b`, creating it regardless of
    /// `fill_paths` if missing.
    pub(crate) fn ensure_path(&mut self, a: TownId, b: TownId) -> Option<PathId> {
        if let Some(p) = self.path_between(a, b) {
            return Some(p.id());
        }
        let id = self.insert_path(a, b)?;
        self.events.push(Event::TopologyChanged);
        Some(id)
    }

    /// Inserts a path without the `fill_paths` guard and without emitting.
    ///
    /// Returns `None` on a self-loop, a stale handle or a duplicate.
    pub(crate) fn insert_path(&mut self, a: TownId, b: TownId) -> Option<PathId> {
        if a == b || self.path_between(a, b).is_some() {
            return None;
        }
        let (a, b) = canonical_pair(a, b);
        let derived = self.derived_distance(a, b)?;
        let id = PathId(self.next_path);
        self.next_path += 1;
        self.paths.push(Path::new(id, a, b, derived, self.initial_tau));
        Some(id)
    }

    /// Scaled Euclidean distance between two live towns.
    fn derived_distance(&self, a: TownId, b: TownId) -> Option<f64> {
        let (ta, tb) = (self.town(a)?, self.town(b)?);
        Some(ta.distance_to(tb) * DISTANCE_SCALE)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Canvas, TownId, TownId, TownId) {
        let mut c = Canvas::new();
        let a = c.add_town(0, 0);
        let b = c.add_town(64, 0);
        let t = c.add_town(64, 64);
        c.drain_events();
        (c, a, b, t)
    }

    fn manual() -> Canvas {
        let mut c = Canvas::new();
        c.set_fill_paths(false);
        c
    }

    #[test]
    fn test_add_town_names_sequentially() {
        let (c, a, b, t) = triangle();
        assert_eq!(c.town(a).expect("a").name(), "Town 1");
        assert_eq!(c.town(b).expect("b").name(), "Town 2");
        assert_eq!(c.town(t).expect("c").name(), "Town 3");
    }

    #[test]
    fn test_fill_paths_makes_complete_graph() {
        let mut c = Canvas::new();
        for i in 0..5 {
            c.add_town(i * 10, 0);
        }
        assert_eq!(c.path_count(), 10);
        for p in c.paths() {
            assert!(p.town_a() < p.town_b());
        }
    }

    #[test]
    fn test_add_town_single_topology_event() {
        let mut c = Canvas::new();
        c.add_town(0, 0);
        c.add_town(1, 1);
        let events = c.drain_events();
        assert_eq!(events, vec![Event::TopologyChanged, Event::TopologyChanged]);
    }

    #[test]
    fn test_derived_distance_scaled() {
        let (c, a, b, t) = triangle();
        let ab = c.path_between(a, b).expect("ab");
        let at = c.path_between(t, a).expect("at");
        assert!((ab.distance() - 1.0).abs() < 1e-10);
        assert!((at.distance() - 2f64.sqrt()).abs() < 1e-10);
        assert_eq!(ab.trail(), 1.0);
    }

    #[test]
    fn test_path_between_symmetric() {
        let (c, a, b, _) = triangle();
        let p1 = c.path_between(a, b).expect("ab").id();
        let p2 = c.path_between(b, a).expect("ba").id();
        assert_eq!(p1, p2);
        assert!(c.path_between(a, a).is_none());
    }

    #[test]
    fn test_delete_town_cascades() {
        let (mut c, a, b, t) = triangle();
        assert!(c.delete_town(b));
        assert_eq!(c.town_count(), 2);
        assert_eq!(c.path_count(), 1);
        assert!(c.paths().iter().all(|p| !p.touches(b)));
        assert!(c.path_between(a, t).is_some());
        assert_eq!(c.drain_events(), vec![Event::TopologyChanged]);
        // Stale handle.
        assert!(!c.delete_town(b));
        assert!(c.town(b).is_none());
        assert!(c.drain_events().is_empty());
    }

    #[test]
    fn test_handles_not_reused() {
        let (mut c, _, b, _) = triangle();
        c.delete_town(b);
        let d = c.add_town(5, 5);
        assert_ne!(d, b);
        assert!(!c.contains_town(b));
        assert_eq!(c.town(d).expect("d").name(), "Town 4");
    }

    #[test]
    fn test_clear() {
        let (mut c, ..) = triangle();
        c.clear();
        assert_eq!(c.town_count(), 0);
        assert_eq!(c.path_count(), 0);
        assert_eq!(c.drain_events().len(), 3);
    }

    #[test]
    fn test_manual_paths_rejected_when_filling() {
        let (mut c, a, b, _) = triangle();
        assert!(!c.remove_path(a, b));
        assert!(!c.add_path(a, b));
        assert!(!c.toggle_path(a, b));
        assert_eq!(c.path_count(), 3);
    }

    #[test]
    fn test_add_path_rules() {
        let mut c = manual();
        let a = c.add_town(0, 0);
        let b = c.add_town(10, 0);
        assert_eq!(c.path_count(), 0);
        assert!(!c.add_path(a, a));
        assert!(c.add_path(b, a));
        assert!(!c.add_path(a, b));
        assert_eq!(c.path_count(), 1);
        c.delete_town(b);
        assert!(!c.add_path(a, b));
    }

    #[test]
    fn test_toggle_path() {
        let mut c = manual();
        let a = c.add_town(0, 0);
        let b = c.add_town(10, 0);
        c.drain_events();
        assert!(c.toggle_path(a, b));
        assert!(c.path_between(a, b).is_some());
        assert!(c.toggle_path(b, a));
        assert!(c.path_between(a, b).is_none());
        assert_eq!(c.drain_events(), vec![Event::TopologyChanged, Event::TopologyChanged]);
    }

    #[test]
    fn test_town_at_newest_wins() {
        let mut c = Canvas::new();
        let a = c.add_town(0, 0);
        let b = c.add_town(20, 20);
        assert_eq!(c.town_at(25, 25), Some(b));
        assert_eq!(c.town_at(5, 5), Some(a));
        assert_eq!(c.town_at(-1, 5), None);
        assert_eq!(c.town_at(100, 100), None);
        c.set_town_size(10);
        assert_eq!(c.town_at(15, 15), None);
    }

    #[test]
    fn test_town_at_extreme_coordinates() {
        let mut c = Canvas::new();
        c.add_town(100, 0);
        let far = c.add_town(i32::MAX - 5, 0);
        assert_eq!(c.town_at(i32::MIN, 0), None);
        assert_eq!(c.town_at(0, i32::MIN), None);
        assert_eq!(c.town_at(i32::MAX, 0), Some(far));
        assert_eq!(c.town_at(i32::MAX, i32::MAX), None);
    }

    #[test]
    fn test_town_name_rejects_separators() {
        let (mut c, a, ..) = triangle();
        c.drain_events();
        assert!(!c.set_town_name(a, "Brno;Centre"));
        assert!(!c.set_town_name(a, "Line\nBreak"));
        assert!(!c.set_town_name(a, "Carriage\rReturn"));
        assert_eq!(c.town(a).map(|t| t.name()), Some("Town 1"));
        assert!(c.drain_events().is_empty());
        assert!(c.set_town_name(a, "Brno Centre"));
    }

    #[test]
    fn test_move_town_updates_distances() {
        let (mut c, a, b, _) = triangle();
        assert!(c.set_town_position(b, 128, 0));
        let ab = c.path_between(a, b).expect("ab");
        assert!((ab.distance() - 2.0).abs() < 1e-10);
        let events = c.drain_events();
        assert_eq!(events.first(), Some(&Event::TownMoved(b)));
        assert_eq!(events.last(), Some(&Event::DistancesChanged));
        assert!(!events.contains(&Event::TopologyChanged));
    }

    #[test]
    fn test_move_town_clamps() {
        let (mut c, a, ..) = triangle();
        assert!(!c.set_town_position(a, -10, -3));
        assert_eq!(c.town(a).map(|t| (t.x(), t.y())), Some((0, 0)));
    }

    #[test]
    fn test_explicit_distance() {
        let (mut c, a, b, _) = triangle();
        let id = c.path_between(a, b).expect("ab").id();
        assert!(c.set_path_distance(id, 7.5));
        assert_eq!(c.path(id).expect("path").distance(), 7.5);
        assert!(!c.set_path_distance(id, 7.5));
        assert!(c.set_path_distance(id, -1.0));
        assert!((c.path(id).expect("path").distance() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_trail_floor() {
        let (mut c, a, b, _) = triangle();
        let id = c.path_between(a, b).expect("ab").id();
        assert!(c.set_trail(id, 3.0));
        assert!(c.set_trail(id, 0.5));
        assert_eq!(c.path(id).expect("path").trail(), 1.0);
        c.set_trail(id, 4.0);
        c.reset_trails();
        assert_eq!(c.path(id).expect("path").trail(), 1.0);
    }

    #[test]
    fn test_initial_tau_is_topology_change() {
        let (mut c, a, b, _) = triangle();
        c.set_initial_tau(2.0);
        let events = c.drain_events();
        assert_eq!(events.iter().filter(|e| e.is_topology_change()).count(), 1);
        assert_eq!(c.path_between(a, b).expect("ab").trail(), 2.0);
        c.set_initial_tau(2.0);
        c.set_initial_tau(f64::NAN);
        c.set_initial_tau(0.0);
        c.set_initial_tau(-1.0);
        assert!(c.drain_events().is_empty());
        assert_eq!(c.initial_tau(), 2.0);
    }

    #[test]
    fn test_town_index_is_insertion_order() {
        let (mut c, a, b, t) = triangle();
        assert_eq!(c.town_index(a), Some(0));
        assert_eq!(c.town_index(t), Some(2));
        c.delete_town(a);
        assert_eq!(c.town_index(b), Some(0));
        assert_eq!(c.town_index(t), Some(1));
    }
}
