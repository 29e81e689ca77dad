//! # ant-colony
//!
//! Ant Colony Optimization for the traveling salesman problem over an
//! editable set of towns, driven one discrete step at a time.
//!
//! ## Modules
//!
//! - [`models`] — Graph model (Town, Path, Canvas) with stable handles
//! - [`colony`] — Tour walkers (ants), the round-based engine, pheromone rules
//! - [`random`] — Injectable uniform random sources
//! - [`events`] — Typed change notifications and the observer trait
//! - [`persistence`] — Line-oriented save/load format
//! - [`config`] — Serde-backed configuration
//! - [`simulation`] — The [`Aco`](simulation::Aco) facade driving everything
//! - [`error`] — Error type for persistence, configuration and broken trips

pub mod colony;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod persistence;
pub mod random;
pub mod simulation;

pub use error::{AcoError, Result};
pub use simulation::Aco;
