//! How to register your policy
//!
//! 1) Implement `Policy` for your type in its module.
//! 2) Add a new `PolicyFactory` entry to the static list with stable `name` and `version`.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed implies same behavior (where applicable).

use crate::ai::{EstimatorPolicy, LadderPolicy, Policy, RandomPolicy};

/// Factory definition for constructing policy implementations.
pub struct PolicyFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn Policy + Send + Sync>,
}

static POLICY_FACTORIES: &[PolicyFactory] = &[
    PolicyFactory {
        name: RandomPolicy::NAME,
        version: RandomPolicy::VERSION,
        make: make_random,
    },
    PolicyFactory {
        name: LadderPolicy::NAME,
        version: LadderPolicy::VERSION,
        make: make_ladder,
    },
    PolicyFactory {
        name: EstimatorPolicy::NAME,
        version: EstimatorPolicy::VERSION,
        make: make_estimator,
    },
];

/// Returns the statically registered policy factories.
pub fn registered_policies() -> &'static [PolicyFactory] {
    POLICY_FACTORIES
}

/// Finds a registered policy factory by its name.
pub fn by_name(name: &str) -> Option<&'static PolicyFactory> {
    registered_policies()
        .iter()
        .find(|factory| factory.name == name)
}

fn make_random(seed: Option<u64>) -> Box<dyn Policy + Send + Sync> {
    Box::new(RandomPolicy::new(seed))
}

fn make_ladder(seed: Option<u64>) -> Box<dyn Policy + Send + Sync> {
    Box::new(LadderPolicy::new(seed))
}

fn make_estimator(seed: Option<u64>) -> Box<dyn Policy + Send + Sync> {
    Box::new(EstimatorPolicy::new(seed))
}
