use std::sync::Arc;

use crate::cache::{CacheStats, TtlCache};
use crate::config::Config;
use crate::criteria::{validate_guess, Criterion, GuessVerdict};
use crate::errors::PokedokuResult;
use crate::evolution::{safe_analyze, EvolutionAnalysis, EvolutionChain};
use crate::names::normalize;
use crate::resolve::{ResolvedPokemon, Resolver, SpeciesRecord};
use crate::tables::SpeciesTables;

/// Hit/miss counters for both caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ServiceCacheStats {
    pub pokemon: CacheStats,
    pub evolution: CacheStats,
}

/// Shared entry point for the binaries: the species tables plus memoized
/// record resolution and chain analysis.
pub struct PokedexService {
    tables: Arc<SpeciesTables>,
    pokemon: TtlCache<ResolvedPokemon>,
    evolution: TtlCache<EvolutionAnalysis>,
}

impl PokedexService {
    pub fn new(tables: Arc<SpeciesTables>, config: &Config) -> Self {
        let ttl = config.cache.ttl();
        let max_entries = config.cache.max_entries;
        Self {
            tables,
            pokemon: TtlCache::new(ttl, max_entries),
            evolution: TtlCache::new(ttl, max_entries),
        }
    }

    /// Builds the service from configuration, loading replacement tables when
    /// a path is configured.
    pub fn from_config(config: &Config) -> PokedokuResult<Self> {
        let tables = match &config.data.tables_path {
            Some(path) => SpeciesTables::load(path)?,
            None => SpeciesTables::builtin().clone(),
        };
        Ok(Self::new(Arc::new(tables), config))
    }

    pub fn tables(&self) -> &SpeciesTables {
        &self.tables
    }

    /// Resolve a species record, reusing a cached answer for the same
    /// normalized name when no chain is supplied.
    pub fn resolve(&self, record: &SpeciesRecord, chain: Option<&EvolutionChain>) -> ResolvedPokemon {
        let key = normalize(&record.name);
        if chain.is_none() {
            if let Some(cached) = self.pokemon.get(&key) {
                log::debug!("Cache hit for {key}");
                return cached;
            }
        }

        let resolved = Resolver::new(&self.tables).resolve(record, chain);
        if !key.is_empty() {
            self.pokemon.insert(key, resolved.clone());
        }
        resolved
    }

    /// Validated analysis of `target` within `chain`, cached by the
    /// normalized target name.
    pub fn analyze_evolution(&self, chain: Option<&EvolutionChain>, target: &str) -> EvolutionAnalysis {
        let key = normalize(target);
        if let Some(cached) = self.evolution.get(&key) {
            log::debug!("Evolution cache hit for {key}");
            return cached;
        }

        let analysis = safe_analyze(chain, target, &self.tables);
        // Invalid or missing chains are not cached.
        if !key.is_empty() && analysis.validated == Some(true) {
            self.evolution.insert(key, analysis.clone());
        }
        analysis
    }

    pub fn validate_guess(
        &self,
        record: &SpeciesRecord,
        chain: Option<&EvolutionChain>,
        row: &Criterion,
        col: &Criterion,
    ) -> GuessVerdict {
        let pokemon = self.resolve(record, chain);
        let verdict = validate_guess(&pokemon, row, col);
        log::info!(
            "Guess {} -> row {} col {} valid {}",
            pokemon.key,
            verdict.row,
            verdict.col,
            verdict.is_valid
        );
        verdict
    }

    pub fn cache_stats(&self) -> ServiceCacheStats {
        ServiceCacheStats {
            pokemon: self.pokemon.stats(),
            evolution: self.evolution.stats(),
        }
    }

    pub fn clear_cache(&self) {
        self.pokemon.clear();
        self.evolution.clear();
        log::info!("Cleared lookup caches");
    }
}

impl Default for PokedexService {
    fn default() -> Self {
        Self::new(Arc::new(SpeciesTables::builtin().clone()), &Config::default())
    }
}
