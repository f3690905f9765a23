pub mod adapter;
pub mod analysis;
pub mod chain;
pub mod inspect;

pub use analysis::{
    analyze, evolution_method, name_variants, safe_analyze, ChainStats, EvolutionAnalysis,
    ANALYSIS_DEPTH_LIMIT,
};
pub use chain::{EvolutionChain, EvolutionDetail, EvolutionNode, NodeId};
pub use inspect::{
    count_species, depth, simplify, validate, ChainSummaryEntry, ChainValidation, DetailSummary,
    SimplifiedNode, DEPTH_MEASURE_LIMIT,
};

#[cfg(test)]
mod tests;
