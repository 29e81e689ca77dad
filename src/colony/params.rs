//! Algorithm parameters and pheromone update rules.

use serde::{Deserialize, Serialize};

use crate::error::{AcoError, Result};

/// How much pheromone an ant deposits on each edge of its tour.
///
/// Every rule first evaporates, then deposits:
/// `trail ← (1 − ro) × trail + deposit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PheromoneRule {
    /// `deposit = q / tour_length`, the same on every edge of the tour.
    #[default]
    AntCycle,
    /// `deposit = q`, regardless of tour or edge length.
    AntDensity,
    /// `deposit = q / edge_distance`.
    AntQuantity,
    /// Ant-Cycle, plus `e × q / best_length` on every edge of the best
    /// tour found so far after each round.
    Elitist,
}

impl PheromoneRule {
    /// Amount deposited on one edge of length `edge_distance` belonging to a
    /// tour of length `tour_length`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ant_colony::colony::PheromoneRule;
    ///
    /// assert_eq!(PheromoneRule::AntCycle.deposit(20.0, 4.0, 1.0), 5.0);
    /// assert_eq!(PheromoneRule::AntDensity.deposit(20.0, 4.0, 1.0), 20.0);
    /// assert_eq!(PheromoneRule::AntQuantity.deposit(20.0, 4.0, 2.0), 10.0);
    /// ```
    pub fn deposit(&self, q: f64, tour_length: f64, edge_distance: f64) -> f64 {
        match self {
            PheromoneRule::AntCycle | PheromoneRule::Elitist => q / tour_length,
            PheromoneRule::AntDensity => q,
            PheromoneRule::AntQuantity => q / edge_distance,
        }
    }

    /// Evaporation followed by deposit.
    pub fn update(&self, trail: f64, ro: f64, deposit: f64) -> f64 {
        (1.0 - ro) * trail + deposit
    }
}

/// Tunable parameters of the colony engine.
///
/// Defaults: 5 ants, `alpha = 1`, `beta = 2`, `q = 20`, `ro = 0.1`, `e = 2`,
/// Ant-Cycle.
///
/// # Examples
///
/// ```
/// use ant_colony::colony::{Parameters, PheromoneRule};
///
/// let p = Parameters::default()
///     .with_ant_count(10)
///     .with_rule(PheromoneRule::AntQuantity);
/// assert_eq!(p.ant_count, 10);
/// assert!(p.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Ants spawned per round.
    pub ant_count: usize,
    /// Exponent applied to the trail level.
    pub alpha: f64,
    /// Exponent applied to the visibility `1 / distance`.
    pub beta: f64,
    /// Deposit quantity.
    pub q: f64,
    /// Evaporation rate, in `[0, 1]`.
    pub ro: f64,
    /// Elitist weight, used by [`PheromoneRule::Elitist`] only.
    pub e: f64,
    /// Pheromone update rule.
    pub rule: PheromoneRule,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            ant_count: 5,
            alpha: 1.0,
            beta: 2.0,
            q: 20.0,
            ro: 0.1,
            e: 2.0,
            rule: PheromoneRule::AntCycle,
        }
    }
}

impl Parameters {
    /// Sets the number of ants per round.
    pub fn with_ant_count(mut self, ant_count: usize) -> Self {
        self.ant_count = ant_count;
        self
    }

    /// Sets the trail exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the visibility exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the deposit quantity.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Sets the evaporation rate.
    pub fn with_ro(mut self, ro: f64) -> Self {
        self.ro = ro;
        self
    }

    /// Sets the elitist weight.
    pub fn with_e(mut self, e: f64) -> Self {
        self.e = e;
        self
    }

    /// Sets the pheromone rule.
    pub fn with_rule(mut self, rule: PheromoneRule) -> Self {
        self.rule = rule;
        self
    }

    /// Rejects non-finite values and an evaporation rate outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("q", self.q),
            ("ro", self.ro),
            ("e", self.e),
        ] {
            if !value.is_finite() {
                return Err(AcoError::Config(format!("{name} must be finite, got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.ro) {
            return Err(AcoError::Config(format!("ro must be in [0, 1], got {}", self.ro)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Parameters::default();
        assert_eq!(p.ant_count, 5);
        assert_eq!(p.alpha, 1.0);
        assert_eq!(p.beta, 2.0);
        assert_eq!(p.q, 20.0);
        assert_eq!(p.ro, 0.1);
        assert_eq!(p.e, 2.0);
        assert_eq!(p.rule, PheromoneRule::AntCycle);
    }

    #[test]
    fn test_deposit_rules() {
        assert!((PheromoneRule::AntCycle.deposit(20.0, 3.0, 1.0) - 20.0 / 3.0).abs() < 1e-12);
        assert_eq!(PheromoneRule::Elitist.deposit(20.0, 4.0, 9.0), 5.0);
        assert_eq!(PheromoneRule::AntDensity.deposit(3.0, 100.0, 100.0), 3.0);
        assert_eq!(PheromoneRule::AntQuantity.deposit(3.0, 100.0, 0.5), 6.0);
    }

    #[test]
    fn test_update_evaporates_then_deposits() {
        let r = PheromoneRule::AntCycle;
        assert!((r.update(1.0, 0.1, 0.5) - 1.4).abs() < 1e-12);
        assert_eq!(r.update(2.0, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(Parameters::default().validate().is_ok());
        assert!(Parameters::default().with_ro(1.5).validate().is_err());
        assert!(Parameters::default().with_ro(-0.1).validate().is_err());
        assert!(Parameters::default().with_alpha(f64::NAN).validate().is_err());
        assert!(Parameters::default().with_q(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_serde_partial() {
        let p: Parameters = serde_json::from_str(r#"{"ant_count": 3, "rule": "ant_density"}"#)
            .expect("valid json");
        assert_eq!(p.ant_count, 3);
        assert_eq!(p.rule, PheromoneRule::AntDensity);
        assert_eq!(p.beta, 2.0);
    }
}
