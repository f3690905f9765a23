// Pokedoku Schema - Shared vocabulary definitions
// This crate contains the closed enums every component of the puzzle core
// agrees on: elemental types, game regions, form tags, special categories
// and evolution stages.

// Re-export the main types
pub use categories::*;
pub use pokemon_types::*;
pub use region::*;

pub mod categories;
pub mod pokemon_types;
pub mod region;
