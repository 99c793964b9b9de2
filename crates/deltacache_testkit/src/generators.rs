//! Property-based test generators using proptest.
//!
//! Keys are drawn from a small alphabet so generated operations collide
//! often, which is what makes delta ordering observable.

use crate::fixtures::{TestDelta, TestMap};
use deltacache_core::{Flag, MapOperation};
use proptest::prelude::*;

/// Strategy for map keys from a deliberately small key space.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-e]").expect("Invalid regex")
}

/// Strategy for a single map operation.
pub fn map_operation_strategy() -> impl Strategy<Value = MapOperation<String, i32>> {
    prop_oneof![
        6 => (key_strategy(), any::<i32>())
            .prop_map(|(key, value)| MapOperation::Put { key, value }),
        3 => key_strategy().prop_map(|key| MapOperation::Remove { key }),
        1 => Just(MapOperation::Clear),
    ]
}

/// Strategy for a delta carrying one to `max_ops` operations.
pub fn delta_strategy(max_ops: usize) -> impl Strategy<Value = TestDelta> {
    prop::collection::vec(map_operation_strategy(), 1..=max_ops.max(1))
        .prop_map(TestDelta::from_operations)
}

/// Strategy for an ordered sequence of deltas.
pub fn delta_sequence_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<TestDelta>> {
    prop::collection::vec(delta_strategy(3), min..max)
}

/// Strategy for a committed aggregate.
pub fn test_map_strategy() -> impl Strategy<Value = TestMap> {
    prop::collection::vec((key_strategy(), any::<i32>()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

/// Strategy for a local flag mutation.
pub fn flag_mutation_strategy() -> impl Strategy<Value = (Flag, bool)> {
    (prop::sample::select(Flag::ALL.to_vec()), any::<bool>())
}

/// Case budget for the transaction property suites.
#[derive(Debug, Clone, Copy)]
pub struct PropTestConfig {
    /// Generated cases per property.
    pub cases: u32,
    /// Upper bound on shrinking steps after a failure.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Small budget for generator self-checks.
    #[must_use]
    pub const fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Builds the proptest runner configuration.
    #[must_use]
    pub fn to_proptest_config(self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
