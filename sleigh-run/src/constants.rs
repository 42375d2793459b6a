/// Asset locations resolved by the game at runtime.
pub mod path;
