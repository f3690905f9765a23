//! Builds the per-lookup [`ResolvedPokemon`] record from an upstream species
//! record and, optionally, its evolution chain.

use std::collections::BTreeSet;

use schema::{generation_number, EvolutionStage, FormTag, PokemonType, Region, SpecialCategory};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, SpeciesFlags};
use crate::evolution::{analyze, EvolutionAnalysis, EvolutionChain};
use crate::names::{display_name, normalize, sprite_url};
use crate::region::resolve_region;
use crate::tables::SpeciesTables;

/// A species record as the fetch layer supplies it. Deserializes from both
/// the REST shape (`types: [{"slot": 1, "type": {"name": "fire"}}]`,
/// `generation: {"name": "generation-i"}`) and a flat one
/// (`types: ["fire"]`, `generation: "generation-i"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireSpeciesRecord")]
pub struct SpeciesRecord {
    pub name: String,
    pub types: Vec<String>,
    pub generation: Option<String>,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub is_baby: bool,
}

impl SpeciesRecord {
    pub fn new(name: &str, types: &[&str], generation: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            generation: generation.map(str::to_string),
            ..Self::default()
        }
    }

    fn flags(&self) -> SpeciesFlags {
        SpeciesFlags {
            is_legendary: self.is_legendary,
            is_mythical: self.is_mythical,
            is_baby: self.is_baby,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResource {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireType {
    Name(String),
    Slot {
        #[serde(rename = "type")]
        kind: WireResource,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireGeneration {
    Slug(String),
    Resource(WireResource),
}

#[derive(Debug, Deserialize)]
struct WireSpeciesRecord {
    name: String,
    #[serde(default)]
    types: Vec<WireType>,
    #[serde(default)]
    generation: Option<WireGeneration>,
    #[serde(default)]
    is_legendary: bool,
    #[serde(default)]
    is_mythical: bool,
    #[serde(default)]
    is_baby: bool,
}

impl From<WireSpeciesRecord> for SpeciesRecord {
    fn from(wire: WireSpeciesRecord) -> Self {
        Self {
            name: wire.name,
            types: wire
                .types
                .into_iter()
                .map(|entry| match entry {
                    WireType::Name(name) => name,
                    WireType::Slot { kind } => kind.name,
                })
                .collect(),
            generation: wire.generation.map(|generation| match generation {
                WireGeneration::Slug(slug) => slug,
                WireGeneration::Resource(resource) => resource.name,
            }),
            is_legendary: wire.is_legendary,
            is_mythical: wire.is_mythical,
            is_baby: wire.is_baby,
        }
    }
}

/// Everything the puzzle needs to know about one species or form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPokemon {
    pub key: String,
    pub display_name: String,
    pub sprite_url: String,
    pub region: Region,
    pub generation: Option<u8>,
    pub types: Vec<PokemonType>,
    pub categories: BTreeSet<SpecialCategory>,
    pub form_tag: FormTag,
    pub regional_form: Option<FormTag>,
    pub battle_form: Option<FormTag>,
    pub status_labels: Vec<String>,
    pub evolution_override: Option<String>,
    pub evolution: Option<EvolutionAnalysis>,
}

impl ResolvedPokemon {
    pub fn stage(&self) -> EvolutionStage {
        self.evolution
            .as_ref()
            .map_or(EvolutionStage::Unknown, |analysis| analysis.stage)
    }

    pub fn has_type(&self, kind: PokemonType) -> bool {
        self.types.contains(&kind)
    }

    pub fn has_category(&self, category: SpecialCategory) -> bool {
        self.categories.contains(&category)
    }
}

pub struct Resolver<'a> {
    tables: &'a SpeciesTables,
}

impl<'a> Resolver<'a> {
    pub fn new(tables: &'a SpeciesTables) -> Self {
        Self { tables }
    }

    pub fn resolve(&self, record: &SpeciesRecord, chain: Option<&EvolutionChain>) -> ResolvedPokemon {
        let key = normalize(&record.name);
        let classification = classify(&key, record.flags(), self.tables);
        let generation_slug = record.generation.as_deref();

        let types = match &classification.type_override {
            Some(types) => types.clone(),
            None => parse_types(&key, &record.types),
        };

        ResolvedPokemon {
            display_name: display_name(&key, self.tables),
            sprite_url: sprite_url(&key, self.tables),
            region: resolve_region(&key, generation_slug, self.tables),
            generation: generation_slug.and_then(generation_number),
            types,
            form_tag: classification.form_tag(),
            regional_form: classification.regional_form,
            battle_form: classification.battle_form,
            status_labels: classification.status_labels(),
            evolution: chain.map(|chain| analyze(Some(chain), &key, self.tables)),
            evolution_override: classification.evolution_override,
            categories: classification.categories,
            key,
        }
    }
}

fn parse_types(key: &str, names: &[String]) -> Vec<PokemonType> {
    names
        .iter()
        .filter_map(|name| {
            let parsed = PokemonType::from_name(name);
            if parsed.is_none() {
                log::warn!("Dropping unknown type '{name}' on {key}");
            }
            parsed
        })
        .collect()
}
