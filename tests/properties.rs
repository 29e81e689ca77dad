//! Property tests for the colony invariants.

use std::collections::{BTreeSet, HashSet};

use ant_colony::colony::{Parameters, PheromoneRule};
use ant_colony::Aco;
use proptest::prelude::*;

fn build(positions: &BTreeSet<(i32, i32)>, seed: u64, params: Parameters) -> Aco {
    let mut aco = Aco::with_seed(seed);
    aco.set_parameters(params);
    for &(x, y) in positions {
        aco.add_town(x, y);
    }
    aco
}

fn rule() -> impl Strategy<Value = PheromoneRule> {
    prop_oneof![
        Just(PheromoneRule::AntCycle),
        Just(PheromoneRule::AntDensity),
        Just(PheromoneRule::AntQuantity),
        Just(PheromoneRule::Elitist),
    ]
}

fn params() -> impl Strategy<Value = Parameters> {
    (1usize..6, 0.0f64..3.0, 0.0f64..4.0, 0.1f64..50.0, 0.0f64..=1.0, rule()).prop_map(
        |(ant_count, alpha, beta, q, ro, rule)| {
            Parameters::default()
                .with_ant_count(ant_count)
                .with_alpha(alpha)
                .with_beta(beta)
                .with_q(q)
                .with_ro(ro)
                .with_rule(rule)
        },
    )
}

fn towns() -> impl Strategy<Value = BTreeSet<(i32, i32)>> {
    prop::collection::btree_set((0..640i32, 0..640i32), 2..8)
}

proptest! {
    #[test]
    fn trails_never_below_floor(
        positions in towns(),
        params in params(),
        seed in any::<u64>(),
        steps in 0usize..40,
    ) {
        let mut aco = build(&positions, seed, params);
        for _ in 0..steps {
            aco.step();
        }
        let floor = aco.canvas().initial_tau();
        for p in aco.canvas().paths() {
            prop_assert!(p.trail() >= floor);
        }
    }

    #[test]
    fn taboo_lists_stay_duplicate_free(
        positions in towns(),
        params in params(),
        seed in any::<u64>(),
        steps in 1usize..40,
    ) {
        let mut aco = build(&positions, seed, params);
        let n = aco.canvas().town_count();
        for _ in 0..steps {
            aco.step();
            for ant in aco.algorithm().ants() {
                let unique: HashSet<_> = ant.taboo().iter().collect();
                prop_assert_eq!(unique.len(), ant.taboo().len());
                prop_assert!(ant.taboo().len() <= n);
            }
        }
    }

    #[test]
    fn round_boundary_moves_s_into_t(
        positions in towns(),
        seed in any::<u64>(),
        steps in 1usize..60,
    ) {
        let mut aco = build(&positions, seed, Parameters::default());
        for _ in 0..steps {
            let before = aco.algorithm().counters();
            aco.step();
            let after = aco.algorithm().counters();
            if after.c == before.c + 1 {
                prop_assert_eq!(after.s, 0);
                prop_assert_eq!(after.t, before.t + before.s + 1);
            } else {
                prop_assert_eq!(after.c, before.c);
                prop_assert_eq!(after.s, before.s + 1);
                prop_assert_eq!(after.t, before.t);
            }
        }
    }

    #[test]
    fn reset_is_idempotent(
        positions in towns(),
        seed in any::<u64>(),
        steps in 0usize..30,
    ) {
        let mut aco = build(&positions, seed, Parameters::default());
        for _ in 0..steps {
            aco.step();
        }
        aco.reset();
        let once = (
            aco.algorithm().counters(),
            aco.algorithm().best_tour().clone(),
            aco.algorithm().initialized(),
            aco.algorithm().ants().len(),
            aco.canvas().paths().to_vec(),
        );
        aco.reset();
        let twice = (
            aco.algorithm().counters(),
            aco.algorithm().best_tour().clone(),
            aco.algorithm().initialized(),
            aco.algorithm().ants().len(),
            aco.canvas().paths().to_vec(),
        );
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.0.c, 0);
        prop_assert!(once.1.is_empty());
        prop_assert!(once.4.iter().all(|p| p.trail() == 1.0));
    }

    #[test]
    fn same_seed_same_run(
        positions in towns(),
        params in params(),
        seed in any::<u64>(),
        rounds in 1usize..6,
    ) {
        let mut a = build(&positions, seed, params.clone());
        let mut b = build(&positions, seed, params);
        a.run_rounds(rounds);
        b.run_rounds(rounds);
        let trails_a: Vec<u64> = a.canvas().paths().iter().map(|p| p.trail().to_bits()).collect();
        let trails_b: Vec<u64> = b.canvas().paths().iter().map(|p| p.trail().to_bits()).collect();
        prop_assert_eq!(trails_a, trails_b);
        prop_assert_eq!(a.algorithm().best_tour(), b.algorithm().best_tour());
    }

    #[test]
    fn delete_town_removes_exactly_incident_paths(
        positions in towns(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut aco = build(&positions, 0, Parameters::default());
        let victim = aco.canvas().towns()[pick.index(positions.len())].id();
        let incident = aco.canvas().paths().iter().filter(|p| p.touches(victim)).count();
        let before = aco.canvas().path_count();
        prop_assert!(aco.delete_town(victim));
        prop_assert_eq!(aco.canvas().path_count(), before - incident);
        prop_assert!(aco.canvas().paths().iter().all(|p| !p.touches(victim)));
    }
}
