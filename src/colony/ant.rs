//! Tour walker: one ant building a tour by roulette-wheel selection.

use tracing::trace;

use super::Parameters;
use crate::error::{AcoError, Result};
use crate::models::{Canvas, PathId, TownId};
use crate::random::RandomSource;

/// A tour evaluated at round close: the ant's walk plus the edge back to
/// its start town, when that edge exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrip {
    /// Visited towns in order, starting town first (not repeated at the end).
    pub towns: Vec<TownId>,
    /// Paths walked, in order, including the return edge if present.
    pub paths: Vec<PathId>,
    /// Sum of the distances of `paths`.
    pub length: f64,
}

/// One agent of the colony.
///
/// An ant stands on a town and remembers every town it has visited (its
/// taboo list, starting town first). Each [`step`](Self::step) moves it along
/// an existing path to a town not yet on the list, so the list never holds
/// duplicates and never grows past the town count.
///
/// # Examples
///
/// ```
/// use ant_colony::colony::{Ant, Parameters};
/// use ant_colony::models::Canvas;
/// use ant_colony::random::ScriptedRandom;
///
/// let mut canvas = Canvas::new();
/// let a = canvas.add_town(0, 0);
/// canvas.add_town(64, 0);
/// canvas.add_town(64, 64);
///
/// let mut ant = Ant::new(a);
/// let mut rng = ScriptedRandom::constant(0.5);
/// let params = Parameters::default();
/// while ant.step(&canvas, &params, &mut rng).is_some() {}
///
/// assert_eq!(ant.taboo().len(), 3);
/// let trip = ant.closed_trip(&canvas).expect("walked existing paths");
/// assert_eq!(trip.paths.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ant {
    town: TownId,
    taboo: Vec<TownId>,
}

impl Ant {
    /// Places a new ant on `town`.
    pub fn new(town: TownId) -> Self {
        Self {
            town,
            taboo: vec![town],
        }
    }

    /// Town the ant currently stands on.
    pub fn town(&self) -> TownId {
        self.town
    }

    /// Town the ant started from.
    pub fn first_town(&self) -> TownId {
        self.taboo.first().copied().unwrap_or(self.town)
    }

    /// Visited towns, starting town first.
    pub fn taboo(&self) -> &[TownId] {
        &self.taboo
    }

    /// Returns `true` if the ant has already been on `town`.
    pub fn has_visited(&self, town: TownId) -> bool {
        self.taboo.contains(&town)
    }

    /// Grid position of the current town.
    pub fn position(&self, canvas: &Canvas) -> Option<(i32, i32)> {
        canvas.town(self.town).map(|t| (t.x(), t.y()))
    }

    /// Clears the visited list and places the ant on `town`.
    pub fn reset(&mut self, town: TownId) {
        self.taboo.clear();
        self.town = town;
        self.taboo.push(town);
    }

    /// Moves to one unvisited town reachable by a path.
    ///
    /// Each candidate gets the weight `trail^alpha × (1 / distance)^beta`.
    /// One value `u` is drawn from `rng`, candidates are walked in canvas
    /// insertion order accumulating normalized weight, and the first
    /// candidate whose cumulative mass reaches `u` is chosen. Towns with no
    /// path from the current town are not candidates.
    ///
    /// Returns the new town, or `None` (without drawing) if there is no
    /// candidate left.
    pub fn step<R>(&mut self, canvas: &Canvas, params: &Parameters, rng: &mut R) -> Option<TownId>
    where
        R: RandomSource + ?Sized,
    {
        let candidates: Vec<(TownId, f64)> = canvas
            .towns()
            .iter()
            .map(|t| t.id())
            .filter(|&t| !self.has_visited(t))
            .filter_map(|t| {
                let path = canvas.path_between(self.town, t)?;
                let visibility = 1.0 / path.distance();
                Some((t, path.trail().powf(params.alpha) * visibility.powf(params.beta)))
            })
            .collect();

        if candidates.is_empty() {
            return None;
        }

        let u = rng.next_unit();
        let next = roulette(&candidates, u);
        trace!(from = %self.town, to = %next, u, "ant moved");
        self.town = next;
        self.taboo.push(next);
        Some(next)
    }

    /// Paths between consecutive visited towns.
    ///
    /// Fails with [`AcoError::BrokenTrip`] if a consecutive pair has no path,
    /// which only happens if the canvas changed under the ant.
    pub fn trip(&self, canvas: &Canvas) -> Result<Vec<PathId>> {
        self.taboo
            .windows(2)
            .map(|pair| {
                canvas
                    .path_between(pair[0], pair[1])
                    .map(|p| p.id())
                    .ok_or(AcoError::BrokenTrip {
                        from: pair[0],
                        to: pair[1],
                    })
            })
            .collect()
    }

    /// Sum of the distances between consecutive visited towns.
    pub fn trip_length(&self, canvas: &Canvas) -> Result<f64> {
        let mut length = 0.0;
        for id in self.trip(canvas)? {
            length += canvas.path(id).map(|p| p.distance()).unwrap_or(0.0);
        }
        Ok(length)
    }

    /// The walked trip closed back to the starting town.
    ///
    /// The return edge is appended only if the ant has moved at least once
    /// and a path back to the start exists; a sparse canvas can leave a
    /// walk that cannot be closed.
    pub fn closed_trip(&self, canvas: &Canvas) -> Result<ClosedTrip> {
        let mut paths = self.trip(canvas)?;
        let first = self.first_town();
        if self.taboo.len() > 1 {
            if let Some(back) = canvas.path_between(self.town, first) {
                paths.push(back.id());
            }
        }
        let length = paths
            .iter()
            .filter_map(|&id| canvas.path(id))
            .map(|p| p.distance())
            .sum();
        Ok(ClosedTrip {
            towns: self.taboo.clone(),
            paths,
            length,
        })
    }

    /// Length of [`closed_trip`](Self::closed_trip).
    pub fn closed_trip_length(&self, canvas: &Canvas) -> Result<f64> {
        Ok(self.closed_trip(canvas)?.length)
    }
}

/// Roulette-wheel pick over weighted candidates, in slice order.
///
/// Infinite weights (zero-length paths) win outright, first one first. If
/// every weight is zero the pick falls back to `u` scaled over the slice.
/// Rounding that leaves the cumulative sum just short of `u` picks the last
/// candidate.
fn roulette(candidates: &[(TownId, f64)], u: f64) -> TownId {
    if let Some(&(t, _)) = candidates.iter().find(|(_, w)| w.is_infinite()) {
        return t;
    }
    let total: f64 = candidates.iter().map(|(_, w)| w).sum();
    if total.is_nan() || total <= 0.0 {
        let i = ((u * candidates.len() as f64) as usize).min(candidates.len() - 1);
        return candidates[i].0;
    }
    let mut cumulative = 0.0;
    for &(t, w) in candidates {
        cumulative += w / total;
        if cumulative >= u {
            return t;
        }
    }
    candidates[candidates.len() - 1].0
}
