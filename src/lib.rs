// In: src/lib.rs

//! Pokedoku Puzzle Core
//!
//! Name normalization, form classification, region inference, evolution
//! chain analysis and grid criterion matching for a Pokemon sudoku. Species
//! tables are embedded at compile time and parsed once on first use.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod cache;
pub mod classify;
pub mod config;
pub mod criteria;
pub mod errors;
pub mod evolution;
pub mod names;
pub mod region;
pub mod resolve;
pub mod service;
pub mod tables;
pub mod tool_interface;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokedoku` crate,
// making it easy for users to import the most important types directly.

// --- From the `schema` crate ---
// Re-export the shared vocabularies.
pub use schema::{
    CriterionKind, EvolutionStage, FormTag, PokemonType, Region, SpecialCategory,
};

// --- From this crate's modules (`src/`) ---

// Names and classification.
pub use classify::{classify, Classification, SpeciesFlags};
pub use names::{base_form_name, display_name, normalize, sprite_safe_name, sprite_url};
pub use region::resolve_region;

// Evolution chains.
pub use evolution::{analyze, safe_analyze, EvolutionAnalysis, EvolutionChain, EvolutionDetail};

// Puzzle-facing records and checks.
pub use criteria::{validate_guess, Criterion, GuessVerdict};
pub use resolve::{ResolvedPokemon, Resolver, SpeciesRecord};
pub use service::PokedexService;
pub use tables::SpeciesTables;

// Errors.
pub use errors::{PokedokuError, PokedokuResult};
