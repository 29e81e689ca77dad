//! Round-based colony engine.
//!
//! # Round structure
//!
//! Every [`Algorithm::step`] moves each ant once and bumps the round-local
//! move counter `s`. When `s` reaches the town count the round closes:
//!
//! 1. each ant's walk is closed back to its start town and measured,
//! 2. the shortest closed tour of the round is noted,
//! 3. every ant evaporates and deposits pheromone on its edges in turn
//!    (`trail ← (1 − ro) × trail + deposit`, compounding across ants that
//!    share an edge),
//! 4. the best tour is replaced if the round's shortest tour is strictly
//!    shorter and visits every town,
//! 5. `t += s`, `s = 0`, `c += 1`,
//! 6. a fresh generation of ants is spawned.
//!
//! A tour of `n` towns needs only `n − 1` moves; the extra move of the
//! `n`-th step finds no candidate and is a no-op for a complete walk. The
//! round boundary is keyed to the move counter, not to ant progress, so an
//! ant stalled on a sparse canvas cannot hold the colony back.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::ant::ClosedTrip;
use super::{Ant, Parameters, PheromoneRule};
use crate::events::{Event, EventQueue};
use crate::models::{Canvas, PathId, TownId};
use crate::random::RandomSource;

/// Progress counters of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counters {
    /// Moves made in the current round.
    pub s: usize,
    /// Moves made in all completed rounds.
    pub t: usize,
    /// Completed rounds.
    pub c: usize,
}

/// Best closed tour found since the last reset.
#[derive(Debug, Clone, PartialEq)]
pub struct BestTour {
    towns: Vec<TownId>,
    paths: Vec<PathId>,
    length: f64,
}

impl BestTour {
    fn empty() -> Self {
        Self {
            towns: Vec::new(),
            paths: Vec::new(),
            length: f64::INFINITY,
        }
    }

    /// Towns in visiting order, starting town first.
    pub fn towns(&self) -> &[TownId] {
        &self.towns
    }

    /// Paths of the closed tour, return edge last.
    pub fn paths(&self) -> &[PathId] {
        &self.paths
    }

    /// Tour length; infinite while no tour has been found.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns `true` while no tour has been found.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for BestTour {
    fn default() -> Self {
        Self::empty()
    }
}

/// Summary of a closed round, returned by [`Algorithm::step`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// Number of the round that just closed, starting at 1.
    pub round: usize,
    /// Moves the round took.
    pub moves: usize,
    /// Shortest closed tour among the round's ants, if any ant produced one.
    pub shortest: Option<f64>,
    /// Whether the best tour was replaced.
    pub improved: bool,
}

/// The colony engine.
///
/// Holds no reference to the canvas: every operation borrows it, and the
/// owner must call [`reset`](Self::reset) whenever the canvas reports
/// [`Event::TopologyChanged`] and
/// [`refresh_best_length`](Self::refresh_best_length) on
/// [`Event::DistancesChanged`]. [`Aco`](crate::simulation::Aco) does both.
///
/// # Examples
///
/// ```
/// use ant_colony::colony::{Algorithm, Parameters};
/// use ant_colony::models::Canvas;
/// use ant_colony::random::SeededRandom;
///
/// let mut canvas = Canvas::new();
/// canvas.add_town(0, 0);
/// canvas.add_town(64, 0);
/// canvas.add_town(64, 64);
///
/// let mut algo = Algorithm::new(Parameters::default().with_ant_count(1));
/// let mut rng = SeededRandom::new(3);
/// for _ in 0..3 {
///     algo.step(&mut canvas, &mut rng);
/// }
/// assert_eq!(algo.counters().c, 1);
/// assert_eq!(algo.best_tour().paths().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Algorithm {
    params: Parameters,
    counters: Counters,
    initialized: bool,
    ants: Vec<Ant>,
    best: BestTour,
    events: EventQueue,
}

impl Algorithm {
    /// Creates an engine with the given parameters.
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            counters: Counters::default(),
            initialized: false,
            ants: Vec::new(),
            best: BestTour::empty(),
            events: EventQueue::default(),
        }
    }

    /// Current parameters.
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Current counters.
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Whether the current generation of ants has been spawned.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// The current generation of ants.
    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Best tour since the last reset.
    pub fn best_tour(&self) -> &BestTour {
        &self.best
    }

    /// Discards all ants and the best tour, zeroes the counters and puts
    /// every trail back to the floor.
    pub fn reset(&mut self, canvas: &mut Canvas) {
        self.ants.clear();
        self.events.push(Event::AntsChanged);
        self.best = BestTour::empty();
        self.events.push(Event::BestTourChanged);
        self.counters = Counters::default();
        self.events.push(Event::CountersChanged(self.counters));
        self.set_initialized(false);
        canvas.reset_trails();
        debug!("colony reset");
    }

    /// Replaces the ants with `ant_count` new ones, each on a uniformly
    /// drawn town. Spawns nothing on an empty canvas.
    pub fn round_init<R>(&mut self, canvas: &Canvas, rng: &mut R)
    where
        R: RandomSource + ?Sized,
    {
        self.ants.clear();
        let towns = canvas.towns();
        if !towns.is_empty() {
            for _ in 0..self.params.ant_count {
                let start = towns[rng.next_index(towns.len())].id();
                self.ants.push(Ant::new(start));
            }
        }
        self.events.push(Event::AntsChanged);
        self.set_initialized(true);
    }

    /// Advances the colony by one move per ant.
    ///
    /// Spawns a generation first if none is active. Returns a report when
    /// this step closed a round. Does nothing on an empty canvas.
    pub fn step<R>(&mut self, canvas: &mut Canvas, rng: &mut R) -> Option<RoundReport>
    where
        R: RandomSource + ?Sized,
    {
        let town_count = canvas.town_count();
        if town_count == 0 {
            return None;
        }
        if !self.initialized {
            self.round_init(canvas, rng);
        }

        for ant in &mut self.ants {
            ant.step(canvas, &self.params, rng);
        }
        self.counters.s += 1;
        self.events.push(Event::CountersChanged(self.counters));

        if self.counters.s < town_count {
            return None;
        }
        let report = self.close_round(canvas);
        self.round_init(canvas, rng);
        Some(report)
    }

    /// Adds one ant on `town` and marks the generation stale, so the next
    /// [`step`](Self::step) respawns the whole colony.
    ///
    /// Returns `false` if `town` is not on the canvas.
    pub fn new_ant(&mut self, canvas: &Canvas, town: TownId) -> bool {
        if !canvas.contains_town(town) {
            return false;
        }
        self.set_initialized(false);
        self.ants.push(Ant::new(town));
        self.events.push(Event::AntsChanged);
        true
    }

    /// Recomputes the best tour length from the current path distances.
    ///
    /// Clears the best tour if one of its paths no longer exists.
    pub fn refresh_best_length(&mut self, canvas: &Canvas) {
        if self.best.is_empty() {
            return;
        }
        let mut length = 0.0;
        for &id in &self.best.paths {
            match canvas.path(id) {
                Some(p) => length += p.distance(),
                None => {
                    self.best = BestTour::empty();
                    self.events.push(Event::BestTourChanged);
                    return;
                }
            }
        }
        if length != self.best.length {
            self.best.length = length;
            self.events.push(Event::BestTourChanged);
        }
    }

    /// Sets the number of ants spawned per round.
    pub fn set_ant_count(&mut self, ant_count: usize) {
        if self.params.ant_count != ant_count {
            self.params.ant_count = ant_count;
            self.events.push(Event::ParametersChanged);
        }
    }

    /// Sets the trail exponent.
    pub fn set_alpha(&mut self, alpha: f64) {
        Self::set_param(&mut self.params.alpha, alpha, &mut self.events);
    }

    /// Sets the visibility exponent.
    pub fn set_beta(&mut self, beta: f64) {
        Self::set_param(&mut self.params.beta, beta, &mut self.events);
    }

    /// Sets the deposit quantity.
    pub fn set_q(&mut self, q: f64) {
        Self::set_param(&mut self.params.q, q, &mut self.events);
    }

    /// Sets the evaporation rate, clamped to `[0, 1]`.
    pub fn set_ro(&mut self, ro: f64) {
        Self::set_param(&mut self.params.ro, ro.clamp(0.0, 1.0), &mut self.events);
    }

    /// Sets the elitist weight.
    pub fn set_e(&mut self, e: f64) {
        Self::set_param(&mut self.params.e, e, &mut self.events);
    }

    /// Selects the pheromone update rule.
    pub fn set_rule(&mut self, rule: PheromoneRule) {
        if self.params.rule != rule {
            self.params.rule = rule;
            self.events.push(Event::ParametersChanged);
        }
    }

    /// Replaces all parameters at once.
    pub fn set_parameters(&mut self, params: Parameters) {
        if self.params != params {
            self.params = params;
            self.events.push(Event::ParametersChanged);
        }
    }

    /// Takes all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    fn set_param(slot: &mut f64, value: f64, events: &mut EventQueue) {
        if value.is_finite() && *slot != value {
            *slot = value;
            events.push(Event::ParametersChanged);
        }
    }

    fn set_initialized(&mut self, initialized: bool) {
        if self.initialized != initialized {
            self.initialized = initialized;
            self.events.push(Event::InitializedChanged(initialized));
        }
    }

    fn close_round(&mut self, canvas: &mut Canvas) -> RoundReport {
        let moves = self.counters.s;
        self.counters.t += moves;
        self.counters.s = 0;
        self.counters.c += 1;
        self.events.push(Event::CountersChanged(self.counters));

        let mut shortest: Option<ClosedTrip> = None;
        for (i, ant) in self.ants.iter().enumerate() {
            let trip = match ant.closed_trip(canvas) {
                Ok(trip) => trip,
                Err(e) => {
                    warn!(ant = i, error = %e, "skipping ant with broken trip");
                    continue;
                }
            };
            self.deposit(canvas, &trip);
            if shortest.as_ref().map_or(true, |s| trip.length < s.length) {
                shortest = Some(trip);
            }
        }

        let shortest_length = shortest.as_ref().map(|s| s.length);
        let mut improved = false;
        if let Some(trip) = shortest {
            // Only a closed tour through every town qualifies.
            if trip.length < self.best.length && trip.paths.len() == canvas.town_count() {
                info!(round = self.counters.c, length = trip.length, "new best tour");
                self.best = BestTour {
                    towns: trip.towns,
                    paths: trip.paths,
                    length: trip.length,
                };
                self.events.push(Event::BestTourChanged);
                improved = true;
            }
        }

        if self.params.rule == PheromoneRule::Elitist {
            self.reinforce_best(canvas);
        }

        debug!(
            round = self.counters.c,
            moves,
            shortest = ?shortest_length,
            best = self.best.length,
            "round closed"
        );
        RoundReport {
            round: self.counters.c,
            moves,
            shortest: shortest_length,
            improved,
        }
    }

    /// Evaporates and deposits on every edge of one ant's tour.
    fn deposit(&self, canvas: &mut Canvas, trip: &ClosedTrip) {
        let Parameters { q, ro, rule, .. } = self.params;
        for &id in &trip.paths {
            let Some(path) = canvas.path(id) else {
                continue;
            };
            let amount = rule.deposit(q, trip.length, path.distance());
            let trail = rule.update(path.trail(), ro, amount);
            canvas.set_trail(id, trail);
        }
    }

    /// Elitist bonus: `e × q / best_length` on every edge of the best tour.
    fn reinforce_best(&self, canvas: &mut Canvas) {
        if self.best.is_empty() || !self.best.length.is_finite() {
            return;
        }
        let bonus = self.params.e * self.params.q / self.best.length;
        for &id in &self.best.paths {
            if let Some(trail) = canvas.path(id).map(|p| p.trail()) {
                canvas.set_trail(id, trail + bonus);
            }
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}
