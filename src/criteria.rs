//! Grid criteria and guess validation.

use schema::{
    generation_number, CriterionKind, EvolutionStage, FormTag, PokemonType, Region,
    SpecialCategory,
};
use serde::{Deserialize, Serialize};

use crate::names::normalize;
use crate::resolve::ResolvedPokemon;

/// One row or column criterion. A missing `kind` or `value` leaves the
/// criterion unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl Criterion {
    pub fn new(kind: &str, value: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            value: Some(value.to_string()),
        }
    }
}

/// Result of checking one guess against its row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessVerdict {
    pub row: bool,
    pub col: bool,
    pub is_valid: bool,
}

pub fn validate_guess(pokemon: &ResolvedPokemon, row: &Criterion, col: &Criterion) -> GuessVerdict {
    let row = matches(pokemon, row);
    let col = matches(pokemon, col);
    GuessVerdict {
        row,
        col,
        is_valid: row && col,
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|text| !text.is_empty())
}

/// Whether `pokemon` satisfies `criterion`. Unknown kinds never match.
pub fn matches(pokemon: &ResolvedPokemon, criterion: &Criterion) -> bool {
    let (Some(kind), Some(value)) = (present(&criterion.kind), present(&criterion.value)) else {
        return true;
    };
    let Ok(kind) = kind.parse::<CriterionKind>() else {
        log::debug!("Unknown criterion kind '{kind}' rejects {}", pokemon.key);
        return false;
    };

    match kind {
        CriterionKind::Type => {
            PokemonType::from_name(value).is_some_and(|kind| pokemon.has_type(kind))
        }
        CriterionKind::Region => parse_region(value) == Some(pokemon.region),
        CriterionKind::Special => special_matches(pokemon, value),
        CriterionKind::Stage => parse_stage(value).is_some_and(|stage| pokemon.stage() == stage),
        CriterionKind::Evolution => evolution_matches(pokemon, value),
        CriterionKind::DualType => dual_type_matches(pokemon, value),
        CriterionKind::Legendary => membership_matches(pokemon, value, SpecialCategory::Legendary),
        CriterionKind::Mythical => membership_matches(pokemon, value, SpecialCategory::Mythical),
        CriterionKind::Generation => {
            generation_number(value).is_some_and(|number| pokemon.generation == Some(number))
        }
    }
}

/// Region names, or any generation spelling of the region's generation.
pub fn parse_region(value: &str) -> Option<Region> {
    if let Some(number) = generation_number(value) {
        return Some(Region::from_generation_number(number));
    }
    value
        .trim()
        .parse::<Region>()
        .ok()
        .filter(|region| region.is_known())
}

pub fn parse_stage(value: &str) -> Option<EvolutionStage> {
    match normalize(value).as_str() {
        "base" | "first" | "base-stage" | "stage-1" | "unevolved" => Some(EvolutionStage::Base),
        "middle" | "second" | "middle-stage" | "stage-2" => Some(EvolutionStage::Middle),
        "final" | "last" | "final-stage" | "stage-3" | "fully-evolved" => {
            Some(EvolutionStage::Final)
        }
        _ => None,
    }
}

fn special_matches(pokemon: &ResolvedPokemon, value: &str) -> bool {
    let key = normalize(value);
    let key = key.strip_suffix("-pokemon").unwrap_or(&key);
    let regional = |tag: FormTag| pokemon.regional_form == Some(tag);

    match key {
        "legendary" => pokemon.has_category(SpecialCategory::Legendary),
        "mythical" | "mythic" => pokemon.has_category(SpecialCategory::Mythical),
        "ultra-beast" | "ultrabeast" | "ub" => pokemon.has_category(SpecialCategory::UltraBeast),
        "mega" | "mega-evolution" => pokemon.battle_form.is_some_and(FormTag::is_mega),
        "gigantamax" | "gmax" => pokemon.battle_form == Some(FormTag::Gigantamax),
        "primal" | "primal-reversion" => pokemon.battle_form == Some(FormTag::Primal),
        "totem" | "totem-form" => pokemon.battle_form == Some(FormTag::Totem),
        "regional" | "regional-form" | "regional-variant" => pokemon.regional_form.is_some(),
        "alolan" | "alolan-form" => regional(FormTag::RegionalAlola),
        "galarian" | "galarian-form" => regional(FormTag::RegionalGalar),
        "hisuian" | "hisuian-form" => regional(FormTag::RegionalHisui),
        "paldean" | "paldean-form" => regional(FormTag::RegionalPaldea),
        other => other
            .parse::<SpecialCategory>()
            .is_ok_and(|category| pokemon.has_category(category)),
    }
}

fn evolution_matches(pokemon: &ResolvedPokemon, value: &str) -> bool {
    if let Some(stage) = parse_stage(value) {
        return pokemon.stage() == stage;
    }
    let Some(analysis) = pokemon.evolution.as_ref().filter(|analysis| analysis.is_found()) else {
        return false;
    };
    let evolved_by = analysis.evolved_by.as_str();

    match normalize(value).as_str() {
        "branched" | "branching" => analysis.is_branched,
        "unbranched" | "linear" => !analysis.is_branched,
        "trade" => evolved_by == "Trade",
        "item" | "use-item" | "evolution-item" | "stone" => {
            evolved_by.starts_with("Use Item") || evolved_by == "Use Evolution Item"
        }
        "held-item" => evolved_by.starts_with("Held Item"),
        "level" | "level-up" => evolved_by.starts_with("Level"),
        "friendship" | "happiness" => evolved_by == "Friendship",
        other => {
            log::debug!("Unknown evolution criterion '{other}'");
            false
        }
    }
}

fn dual_type_matches(pokemon: &ResolvedPokemon, value: &str) -> bool {
    let Some((first, second)) = value.split_once('/') else {
        return false;
    };
    let (Some(first), Some(second)) = (PokemonType::from_name(first), PokemonType::from_name(second))
    else {
        return false;
    };
    first != second
        && pokemon.types.len() == 2
        && pokemon.has_type(first)
        && pokemon.has_type(second)
}

fn membership_matches(pokemon: &ResolvedPokemon, value: &str, category: SpecialCategory) -> bool {
    let asserted = normalize(value) == category.to_string();
    pokemon.has_category(category) == asserted
}
