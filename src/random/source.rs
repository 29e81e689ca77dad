//! Random source trait and implementations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A uniform random source on `[0, 1)`.
///
/// Ants draw one value per move for roulette-wheel selection; the colony
/// draws start towns through [`next_index`](Self::next_index).
pub trait RandomSource {
    /// Returns a value uniformly distributed on `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Returns an index uniformly distributed on `0..len`.
    ///
    /// `len` must be non-zero. The default maps [`next_unit`](Self::next_unit)
    /// onto the range.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index on an empty range");
        let i = (self.next_unit() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }

    fn next_index(&mut self, len: usize) -> usize {
        (**self).next_index(len)
    }
}

/// Seedable random source backed by [`StdRng`].
///
/// The same seed yields the same sequence for a given `rand` version.
///
/// # Examples
///
/// ```
/// use ant_colony::random::{RandomSource, SeededRandom};
///
/// let mut a = SeededRandom::new(42);
/// let mut b = SeededRandom::new(42);
/// let u = a.next_unit();
/// assert!((0.0..1.0).contains(&u));
/// assert_eq!(u, b.next_unit());
/// ```
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: Option<u64>,
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a reproducible source from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            seed: None,
            rng: StdRng::from_os_rng(),
        }
    }

    /// The seed this source was created with, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of values in a cycle.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
///
/// # Examples
///
/// ```
/// use ant_colony::random::{RandomSource, ScriptedRandom};
///
/// let mut r = ScriptedRandom::new(vec![0.25, 0.75]);
/// assert_eq!(r.next_unit(), 0.25);
/// assert_eq!(r.next_unit(), 0.75);
/// assert_eq!(r.next_unit(), 0.25);
/// assert_eq!(r.next_index(4), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Creates a source replaying `values`.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| if v.is_finite() { v.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
