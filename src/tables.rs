//! Static membership and override tables.
//!
//! The tables are plain data: loaded once (from the embedded RON file or a
//! deployment-supplied one), then shared by reference with every component.
//! Nothing mutates them after load.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use schema::{PokemonType, Region};
use serde::{Deserialize, Serialize};

use crate::errors::{DataError, DataResult};

const BUILTIN_TABLES: &str = include_str!("../data/special_pokemon.ron");

static BUILTIN: LazyLock<SpeciesTables> = LazyLock::new(|| {
    SpeciesTables::from_ron_str(BUILTIN_TABLES).expect("embedded species tables")
});

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesTables {
    pub fossils: BTreeMap<String, Region>,
    pub legendary_regions: BTreeMap<String, Region>,
    pub paradox: BTreeSet<String>,
    pub ultra_beasts: BTreeSet<String>,
    pub starters: BTreeSet<String>,
    pub babies: BTreeSet<String>,
    pub region_overrides: BTreeMap<String, Region>,
    pub type_overrides: BTreeMap<String, Vec<PokemonType>>,
    pub evolution_overrides: BTreeMap<String, String>,
    pub sprite_exceptions: BTreeMap<String, String>,
    pub multi_word_species: BTreeSet<String>,
}

impl SpeciesTables {
    /// The tables shipped with the crate, parsed on first use.
    pub fn builtin() -> &'static SpeciesTables {
        &BUILTIN
    }

    pub fn from_ron_str(text: &str) -> DataResult<SpeciesTables> {
        Ok(ron::from_str(text)?)
    }

    /// Load a replacement table file.
    pub fn load(path: &Path) -> DataResult<SpeciesTables> {
        let text = fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_ron_str(&text)?;
        log::info!(
            "Loaded species tables from {} ({} fossils, {} legendaries, {} starters)",
            path.display(),
            tables.fossils.len(),
            tables.legendary_regions.len(),
            tables.starters.len()
        );
        Ok(tables)
    }

    pub fn fossil_region(&self, base: &str) -> Option<Region> {
        self.fossils.get(base).copied()
    }

    pub fn legendary_region(&self, base: &str) -> Option<Region> {
        self.legendary_regions.get(base).copied()
    }

    pub fn region_override(&self, base: &str) -> Option<Region> {
        self.region_overrides.get(base).copied()
    }

    pub fn is_fossil(&self, base: &str) -> bool {
        self.fossils.contains_key(base)
    }

    pub fn is_paradox(&self, base: &str) -> bool {
        self.paradox.contains(base)
    }

    pub fn is_ultra_beast(&self, base: &str) -> bool {
        self.ultra_beasts.contains(base)
    }

    pub fn is_starter(&self, base: &str) -> bool {
        self.starters.contains(base)
    }

    pub fn is_baby(&self, base: &str) -> bool {
        self.babies.contains(base)
    }

    /// Species whose own name contains a hyphen (Paradox names included).
    pub fn is_multi_word(&self, key: &str) -> bool {
        self.multi_word_species.contains(key) || self.paradox.contains(key)
    }

    pub fn type_override(&self, key: &str) -> Option<&[PokemonType]> {
        self.type_overrides.get(key).map(Vec::as_slice)
    }

    pub fn evolution_override(&self, key: &str) -> Option<&str> {
        self.evolution_overrides.get(key).map(String::as_str)
    }

    pub fn sprite_exception(&self, key: &str) -> Option<&str> {
        self.sprite_exceptions.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_tables_parse() {
        let tables = SpeciesTables::from_ron_str(BUILTIN_TABLES).expect("embedded tables parse");
        assert_eq!(tables.fossils.len(), 25);
        assert_eq!(tables.paradox.len(), 20);
        assert_eq!(tables.ultra_beasts.len(), 11);
        assert_eq!(tables.babies.len(), 19);
        assert_eq!(tables.starters.len(), 81);
    }

    #[test]
    fn test_builtin_matches_embedded_file() {
        let builtin = SpeciesTables::builtin();
        assert_eq!(builtin.fossils.len(), 25);
        assert!(!builtin.multi_word_species.is_empty());
        assert!(!builtin.legendary_regions.is_empty());
    }

    #[test]
    fn test_lookups() {
        let tables = SpeciesTables::builtin();
        assert_eq!(tables.fossil_region("aerodactyl"), Some(Region::Kanto));
        assert_eq!(tables.fossil_region("dracovish"), Some(Region::Galar));
        assert_eq!(tables.legendary_region("ho-oh"), Some(Region::Johto));
        assert_eq!(tables.region_override("lucario"), Some(Region::Sinnoh));
        assert_eq!(tables.type_override("vulpix-alola"), Some(&[PokemonType::Ice][..]));
        assert_eq!(tables.type_override("vulpix"), None);
        assert!(tables.is_multi_word("mr-mime"));
        assert!(tables.is_multi_word("iron-hands"));
        assert!(!tables.is_multi_word("charizard-mega-x"));
    }

    #[test]
    fn test_partial_table_file_uses_defaults() {
        let tables = SpeciesTables::from_ron_str(r#"(ultra_beasts: ["nihilego"])"#)
            .expect("partial tables parse");
        assert!(tables.is_ultra_beast("nihilego"));
        assert!(tables.fossils.is_empty());
    }

    #[test]
    fn test_malformed_table_file_is_an_error() {
        let result = SpeciesTables::from_ron_str("(fossils: [1, 2, 3])");
        assert!(matches!(result, Err(DataError::Malformed(_))));
    }

    #[test]
    fn test_missing_table_file_is_an_error() {
        let result = SpeciesTables::load(Path::new("/definitely/not/here.ron"));
        assert!(matches!(result, Err(DataError::Io { .. })));
    }
}
