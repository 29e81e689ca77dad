//! Driver-facing facade tying the canvas, the engine and the random source
//! together.

use std::fmt;
use std::path::Path as FsPath;

use crate::colony::{Algorithm, Parameters, PheromoneRule, RoundReport};
use crate::config::Config;
use crate::error::Result;
use crate::events::{Event, Observer};
use crate::models::{Canvas, Path, PathId, TownId};
use crate::persistence;
use crate::random::{RandomSource, SeededRandom};

/// A headless ant colony simulation.
///
/// Owns the [`Canvas`], the [`Algorithm`] and the random source, and keeps
/// them consistent: any topology change (town or path added or removed,
/// trail floor changed) resets the engine, and any distance change
/// recomputes the best tour length. Every change is forwarded to the
/// subscribed [`Observer`]s once the triggering call has finished.
///
/// # Examples
///
/// ```
/// use ant_colony::simulation::Aco;
///
/// let mut aco = Aco::with_seed(42);
/// aco.add_town(0, 0);
/// aco.add_town(64, 0);
/// aco.add_town(64, 64);
/// aco.add_town(0, 64);
///
/// let reports = aco.run_rounds(10);
/// assert_eq!(reports.len(), 10);
/// assert_eq!(aco.algorithm().counters().c, 10);
/// assert!((aco.algorithm().best_tour().length() - 4.0).abs() < 1e-10);
/// ```
pub struct Aco {
    canvas: Canvas,
    algorithm: Algorithm,
    random: Box<dyn RandomSource>,
    observers: Vec<Box<dyn Observer>>,
}

impl Aco {
    /// Creates a simulation with default settings, seeded from the OS.
    pub fn new() -> Self {
        Self::with_random(SeededRandom::from_entropy())
    }

    /// Creates a simulation with default settings and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_random(SeededRandom::new(seed))
    }

    /// Creates a simulation with default settings drawing from `random`.
    pub fn with_random(random: impl RandomSource + 'static) -> Self {
        Self {
            canvas: Canvas::new(),
            algorithm: Algorithm::default(),
            random: Box::new(random),
            observers: Vec::new(),
        }
    }

    /// Creates a simulation from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let random = match config.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        let mut aco = Self::with_random(random);
        aco.canvas.set_town_size(config.town_size);
        aco.canvas.set_initial_tau(config.initial_tau);
        aco.canvas.set_fill_paths(config.fill_paths);
        aco.algorithm.set_parameters(config.parameters.clone());
        aco.canvas.drain_events();
        aco.algorithm.drain_events();
        Ok(aco)
    }

    /// The graph model.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The colony engine.
    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    /// Registers an observer for all subsequent events.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the random source, e.g. with a seeded or scripted one.
    pub fn set_random(&mut self, random: impl RandomSource + 'static) {
        self.random = Box::new(random);
    }

    /// Draws one value on `[0, 1)` from the simulation's random source.
    pub fn get_random(&mut self) -> f64 {
        self.random.next_unit()
    }

    // Canvas editing

    /// Adds a town. See [`Canvas::add_town`].
    pub fn add_town(&mut self, x: i32, y: i32) -> TownId {
        let id = self.canvas.add_town(x, y);
        self.flush();
        id
    }

    /// Deletes a town and its paths. See [`Canvas::delete_town`].
    pub fn delete_town(&mut self, town: TownId) -> bool {
        let changed = self.canvas.delete_town(town);
        self.flush();
        changed
    }

    /// Adds a path in manual mode. See [`Canvas::add_path`].
    pub fn add_path(&mut self, a: TownId, b: TownId) -> bool {
        let changed = self.canvas.add_path(a, b);
        self.flush();
        changed
    }

    /// Removes a path in manual mode. See [`Canvas::remove_path`].
    pub fn remove_path(&mut self, a: TownId, b: TownId) -> bool {
        let changed = self.canvas.remove_path(a, b);
        self.flush();
        changed
    }

    /// Toggles a path in manual mode. See [`Canvas::toggle_path`].
    pub fn toggle_path(&mut self, a: TownId, b: TownId) -> bool {
        let changed = self.canvas.toggle_path(a, b);
        self.flush();
        changed
    }

    /// Deletes every town.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.flush();
    }

    /// Moves a town. See [`Canvas::set_town_position`].
    pub fn set_town_position(&mut self, town: TownId, x: i32, y: i32) -> bool {
        let changed = self.canvas.set_town_position(town, x, y);
        self.flush();
        changed
    }

    /// Renames a town.
    pub fn set_town_name(&mut self, town: TownId, name: &str) -> bool {
        let changed = self.canvas.set_town_name(town, name);
        self.flush();
        changed
    }

    /// Sets or clears a path's explicit distance.
    pub fn set_path_distance(&mut self, path: PathId, distance: f64) -> bool {
        let changed = self.canvas.set_path_distance(path, distance);
        self.flush();
        changed
    }

    /// Sets the hit-test radius.
    pub fn set_town_size(&mut self, size: i32) {
        self.canvas.set_town_size(size);
        self.flush();
    }

    /// Sets the trail floor, resetting the engine.
    pub fn set_initial_tau(&mut self, tau: f64) {
        self.canvas.set_initial_tau(tau);
        self.flush();
    }

    /// Switches path auto-fill.
    pub fn set_fill_paths(&mut self, on: bool) {
        self.canvas.set_fill_paths(on);
        self.flush();
    }

    /// Town under a point, newest first.
    pub fn town_at(&self, x: i32, y: i32) -> Option<TownId> {
        self.canvas.town_at(x, y)
    }

    /// Path between two towns, in either order.
    pub fn path_between(&self, a: TownId, b: TownId) -> Option<&Path> {
        self.canvas.path_between(a, b)
    }

    // Engine control

    /// Advances the colony by one move per ant. See [`Algorithm::step`].
    pub fn step(&mut self) -> Option<RoundReport> {
        let report = self.algorithm.step(&mut self.canvas, self.random.as_mut());
        self.flush();
        report
    }

    /// Steps until `rounds` more rounds have closed.
    ///
    /// Returns early with no reports on an empty canvas.
    pub fn run_rounds(&mut self, rounds: usize) -> Vec<RoundReport> {
        let mut reports = Vec::with_capacity(rounds);
        while reports.len() < rounds {
            if self.canvas.town_count() == 0 {
                break;
            }
            if let Some(report) = self.step() {
                reports.push(report);
            }
        }
        reports
    }

    /// Resets the engine. See [`Algorithm::reset`].
    pub fn reset(&mut self) {
        self.algorithm.reset(&mut self.canvas);
        self.flush();
    }

    /// Adds one ant on `town`, forcing a respawn on the next step.
    pub fn new_ant(&mut self, town: TownId) -> bool {
        let added = self.algorithm.new_ant(&self.canvas, town);
        self.flush();
        added
    }

    /// Sets the number of ants per round.
    pub fn set_ant_count(&mut self, ant_count: usize) {
        self.algorithm.set_ant_count(ant_count);
        self.flush();
    }

    /// Sets the trail exponent.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.algorithm.set_alpha(alpha);
        self.flush();
    }

    /// Sets the visibility exponent.
    pub fn set_beta(&mut self, beta: f64) {
        self.algorithm.set_beta(beta);
        self.flush();
    }

    /// Sets the deposit quantity.
    pub fn set_q(&mut self, q: f64) {
        self.algorithm.set_q(q);
        self.flush();
    }

    /// Sets the evaporation rate.
    pub fn set_ro(&mut self, ro: f64) {
        self.algorithm.set_ro(ro);
        self.flush();
    }

    /// Sets the elitist weight.
    pub fn set_e(&mut self, e: f64) {
        self.algorithm.set_e(e);
        self.flush();
    }

    /// Selects the pheromone rule.
    pub fn set_rule(&mut self, rule: PheromoneRule) {
        self.algorithm.set_rule(rule);
        self.flush();
    }

    /// Replaces all engine parameters.
    pub fn set_parameters(&mut self, params: Parameters) {
        self.algorithm.set_parameters(params);
        self.flush();
    }

    // Persistence

    /// Serializes the canvas. See [`persistence`].
    pub fn to_persisted_string(&self) -> String {
        persistence::to_persisted_string(&self.canvas)
    }

    /// Replaces the canvas with the serialized one in `text`.
    pub fn load_str(&mut self, text: &str) -> Result<()> {
        let result = persistence::load_str(&mut self.canvas, text);
        self.flush();
        result
    }

    /// Writes the canvas to a file.
    pub fn save_to(&self, path: impl AsRef<FsPath>) -> Result<()> {
        persistence::save_to(&self.canvas, path)
    }

    /// Replaces the canvas with the contents of a file.
    pub fn load_from(&mut self, path: impl AsRef<FsPath>) -> Result<()> {
        let result = persistence::load_from(&mut self.canvas, path);
        self.flush();
        result
    }

    /// Reacts to pending canvas events and forwards everything to observers.
    fn flush(&mut self) {
        let mut events = self.canvas.drain_events();
        if events.iter().any(Event::is_topology_change) {
            self.algorithm.reset(&mut self.canvas);
        } else if events.contains(&Event::DistancesChanged) {
            self.algorithm.refresh_best_length(&self.canvas);
        }
        events.extend(self.algorithm.drain_events());
        events.extend(self.canvas.drain_events());

        for event in &events {
            for observer in &mut self.observers {
                observer.notify(event);
            }
        }
    }
}

impl Default for Aco {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Aco {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aco")
            .field("canvas", &self.canvas)
            .field("algorithm", &self.algorithm)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
