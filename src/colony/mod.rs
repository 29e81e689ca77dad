//! Ant colony engine.
//!
//! - [`Ant`] — a tour walker choosing its next town by roulette wheel
//! - [`Algorithm`] — round-based engine: moves, pheromone updates, best tour
//! - [`Parameters`] / [`PheromoneRule`] — tunables and the Ant-Cycle,
//!   Ant-Density, Ant-Quantity and elitist update rules
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System: Optimization
//! by a colony of cooperating agents", *IEEE Transactions on Systems, Man,
//! and Cybernetics, Part B* 26(1), 29-41.

mod algorithm;
mod ant;
mod params;

pub use algorithm::{Algorithm, BestTour, Counters, RoundReport};
pub use ant::{Ant, ClosedTrip};
pub use params::{Parameters, PheromoneRule};
