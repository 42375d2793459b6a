use crate::engine::gifts::spawner::Gift;
use bevy::prelude::*;
use std::collections::BTreeMap;

/// Gifts still waiting to be collected, keyed by index.
#[derive(Resource, Debug, Default)]
pub struct GiftRegistry {
    active: BTreeMap<usize, Gift>,
    total: usize,
}

impl GiftRegistry {
    /// Replace the active set with a fresh batch.
    pub fn reset(&mut self, gifts: Vec<Gift>) {
        self.total = gifts.len();
        self.active = gifts.into_iter().map(|gift| (gift.index, gift)).collect();
    }

    /// Remove a gift from the active set. Returns it only on the first collection;
    /// collecting an absent index is a no-op.
    pub fn collect(&mut self, index: usize) -> Option<Gift> {
        self.active.remove(&index)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains_key(&index)
    }

    pub fn remaining(&self) -> usize {
        self.active.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(count: usize) -> GiftRegistry {
        let mut registry = GiftRegistry::default();
        registry.reset((0..count).map(Gift::for_test).collect());
        registry
    }

    #[test]
    fn collecting_twice_removes_once() {
        let mut registry = registry(3);

        assert!(registry.collect(1).is_some());
        assert!(registry.collect(1).is_none());
        assert_eq!(registry.remaining(), 2);
        assert_eq!(registry.total(), 3);
        assert!(!registry.is_active(1));
        assert!(registry.is_active(0));
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut registry = registry(2);
        assert!(registry.collect(42).is_none());
        assert_eq!(registry.remaining(), 2);
    }

    #[test]
    fn independent_gifts_collect_independently() {
        let mut registry = registry(4);
        registry.collect(0);
        registry.collect(3);
        let left: Vec<usize> = (0..4).filter(|&i| registry.is_active(i)).collect();
        assert_eq!(left, vec![1, 2]);
        assert_eq!(registry.remaining(), 2);
    }

    #[test]
    fn reset_replaces_previous_batch() {
        let mut registry = registry(4);
        registry.collect(0);
        registry.reset(vec![Gift::for_test(9)]);
        assert_eq!(registry.total(), 1);
        assert!(registry.is_active(9));
        assert!(!registry.is_active(1));
    }
}
