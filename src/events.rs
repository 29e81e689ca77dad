//! Change notifications emitted by the canvas and the colony engine.
//!
//! The core never pushes diffs: an [`Event`] only says *what* changed, and
//! an observer reads the current state back through the accessors of
//! [`Canvas`](crate::models::Canvas) and [`Algorithm`](crate::colony::Algorithm).

use crate::colony::Counters;
use crate::models::{PathId, TownId};

/// A typed change notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Town or path count changed, or the trail floor changed.
    ///
    /// The colony engine resets itself on this event.
    TopologyChanged,
    /// At least one path's effective distance changed.
    DistancesChanged,
    /// A town moved.
    TownMoved(TownId),
    /// A town was renamed.
    TownRenamed(TownId),
    /// A path's effective distance changed.
    PathDistanceChanged(PathId),
    /// A path's pheromone trail changed.
    TrailChanged(PathId),
    /// Hit-test radius or path auto-fill mode changed.
    CanvasSettingsChanged,
    /// The round-local, cumulative or round counters changed.
    CountersChanged(Counters),
    /// The best known tour was replaced or cleared.
    BestTourChanged,
    /// The ant generation was replaced, cleared or extended.
    AntsChanged,
    /// The engine's `initialized` flag flipped.
    InitializedChanged(bool),
    /// An algorithm parameter or the pheromone rule changed.
    ParametersChanged,
}

impl Event {
    /// Returns `true` for events that invalidate the colony engine.
    pub fn is_topology_change(&self) -> bool {
        matches!(self, Event::TopologyChanged)
    }
}

/// Receives [`Event`]s from an [`Aco`](crate::simulation::Aco) instance.
///
/// Implemented for every `FnMut(&Event)` closure.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use ant_colony::events::Event;
/// use ant_colony::simulation::Aco;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
///
/// let mut aco = Aco::with_seed(7);
/// aco.subscribe(move |e: &Event| sink.borrow_mut().push(*e));
/// aco.add_town(0, 0);
/// assert!(seen.borrow().contains(&Event::TopologyChanged));
/// ```
pub trait Observer {
    /// Called once per event, in emission order.
    fn notify(&mut self, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}

/// Pending events of one component, drained by the owner.
#[derive(Debug, Default, Clone)]
pub(crate) struct EventQueue {
    pending: Vec<Event>,
}

impl EventQueue {
    pub(crate) fn push(&mut self, event: Event) {
        self.pending.push(event);
    }

    pub(crate) fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub(crate) fn count(&self, event: &Event) -> usize {
        self.pending.iter().filter(|e| *e == event).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drain_empties() {
        let mut q = EventQueue::default();
        q.push(Event::TopologyChanged);
        q.push(Event::BestTourChanged);
        assert_eq!(q.count(&Event::TopologyChanged), 1);
        let drained = q.drain();
        assert_eq!(drained, vec![Event::TopologyChanged, Event::BestTourChanged]);
        assert!(q.drain().is_empty());
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = Vec::new();
        {
            let mut obs = |e: &Event| seen.push(*e);
            obs.notify(&Event::AntsChanged);
        }
        assert_eq!(seen, vec![Event::AntsChanged]);
    }

    #[test]
    fn test_is_topology_change() {
        assert!(Event::TopologyChanged.is_topology_change());
        assert!(!Event::DistancesChanged.is_topology_change());
    }
}
