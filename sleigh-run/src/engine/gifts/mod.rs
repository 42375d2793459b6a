//! Collectible gifts scattered through the city.
//!
//! Gifts are generated once the city bounds are known, spin in place and
//! disappear with a chime when the sleigh drives through their trigger.

/// Pickup detection from sensor collision events.
pub mod collection;

/// One-shot pickup sound that restarts on every collection.
pub mod chime;

/// Active set of uncollected gifts.
pub mod registry;

/// Random gift generation and entity spawning.
pub mod spawner;
