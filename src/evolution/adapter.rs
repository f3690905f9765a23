//! Builds an [`EvolutionChain`] from the payload shapes the fetch layer hands
//! over: the REST `evolution-chain` document (whole or just its `chain`
//! node), the same document encoded as a JSON string, or the flat species
//! list of the GraphQL endpoint.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::{ChainError, ChainResult};
use crate::evolution::chain::{EvolutionChain, EvolutionDetail, NodeId};

const GRAPHQL_SPECIES_POINTERS: [&str; 3] = [
    "/pokemon_v2_pokemonspecies",
    "/pokemon_v2_evolutionchain_by_pk/pokemon_v2_pokemonspecies",
    "/data/pokemon_v2_evolutionchain_by_pk/pokemon_v2_pokemonspecies",
];

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RestLink {
    species: NamedResource,
    #[serde(default)]
    evolves_to: Vec<RestLink>,
    #[serde(default)]
    evolution_details: Vec<RestDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RestDetail {
    trigger: Option<NamedResource>,
    item: Option<NamedResource>,
    held_item: Option<NamedResource>,
    min_level: Option<u32>,
    min_happiness: Option<u32>,
    min_beauty: Option<u32>,
    known_move_type: Option<NamedResource>,
    location: Option<NamedResource>,
}

impl From<RestDetail> for EvolutionDetail {
    fn from(detail: RestDetail) -> Self {
        EvolutionDetail {
            trigger: detail.trigger.map(|r| r.name),
            item: detail.item.map(|r| r.name),
            held_item: detail.held_item.map(|r| r.name),
            min_level: detail.min_level,
            min_happiness: detail.min_happiness,
            min_beauty: detail.min_beauty,
            known_move_type: detail.known_move_type.map(|r| r.name),
            location: detail.location.map(|r| r.name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlSpecies {
    id: i64,
    name: String,
    evolves_from_species_id: Option<i64>,
    #[serde(default)]
    pokemon_v2_pokemonevolutions: Vec<GraphqlEvolution>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GraphqlEvolution {
    min_level: Option<u32>,
    min_happiness: Option<u32>,
    min_beauty: Option<u32>,
    pokemon_v2_evolutiontrigger: Option<NamedResource>,
    pokemon_v2_item: Option<NamedResource>,
    #[serde(rename = "pokemon_v2_itemByHeldItemId")]
    held_item: Option<NamedResource>,
    pokemon_v2_type: Option<NamedResource>,
    pokemon_v2_location: Option<NamedResource>,
}

impl From<&GraphqlEvolution> for EvolutionDetail {
    fn from(evolution: &GraphqlEvolution) -> Self {
        let name = |resource: &Option<NamedResource>| resource.as_ref().map(|r| r.name.clone());
        EvolutionDetail {
            trigger: name(&evolution.pokemon_v2_evolutiontrigger),
            item: name(&evolution.pokemon_v2_item),
            held_item: name(&evolution.held_item),
            min_level: evolution.min_level,
            min_happiness: evolution.min_happiness,
            min_beauty: evolution.min_beauty,
            known_move_type: name(&evolution.pokemon_v2_type),
            location: name(&evolution.pokemon_v2_location),
        }
    }
}

impl EvolutionChain {
    /// Adapt any supported payload shape, or `None` (with a warning) when
    /// the payload matches none of them.
    pub fn from_json(payload: &Value) -> Option<EvolutionChain> {
        match Self::try_from_json(payload) {
            Ok(chain) => Some(chain),
            Err(err) => {
                log::warn!("Could not adapt evolution payload: {err}");
                None
            }
        }
    }

    pub fn try_from_json(payload: &Value) -> ChainResult<EvolutionChain> {
        match payload {
            Value::String(text) => {
                let parsed: Value = serde_json::from_str(text).map_err(|err| {
                    ChainError::UnrecognizedShape(format!("string payload is not JSON: {err}"))
                })?;
                if parsed.is_string() {
                    return Err(ChainError::UnrecognizedShape(
                        "doubly encoded string payload".to_string(),
                    ));
                }
                log::debug!("Adapting string-encoded evolution payload");
                Self::try_from_json(&parsed)
            }
            Value::Object(map) => {
                if let Some(chain) = map.get("chain") {
                    return from_rest_link(chain);
                }
                if map.contains_key("species") {
                    return from_rest_link(payload);
                }
                if let Some(species) = GRAPHQL_SPECIES_POINTERS
                    .iter()
                    .find_map(|pointer| payload.pointer(pointer))
                {
                    return from_graphql_species(species);
                }
                let keys: Vec<&str> = map.keys().map(String::as_str).collect();
                Err(ChainError::UnrecognizedShape(format!(
                    "object with keys [{}]",
                    keys.join(", ")
                )))
            }
            other => Err(ChainError::UnrecognizedShape(json_kind(other).to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn from_rest_link(value: &Value) -> ChainResult<EvolutionChain> {
    let root = RestLink::deserialize(value)
        .map_err(|err| ChainError::UnrecognizedShape(format!("bad chain node: {err}")))?;

    let mut chain = EvolutionChain::new(root.species.name);
    let mut pending: Vec<(NodeId, RestLink)> = root
        .evolves_to
        .into_iter()
        .rev()
        .map(|link| (NodeId::ROOT, link))
        .collect();

    while let Some((parent, link)) = pending.pop() {
        let details = link.evolution_details.into_iter().map(Into::into).collect();
        let id = chain.add_child(parent, link.species.name, details)?;
        pending.extend(link.evolves_to.into_iter().rev().map(|child| (id, child)));
    }
    Ok(chain)
}

fn from_graphql_species(value: &Value) -> ChainResult<EvolutionChain> {
    let species = Vec::<GraphqlSpecies>::deserialize(value)
        .map_err(|err| ChainError::UnrecognizedShape(format!("bad species list: {err}")))?;

    let root = species
        .iter()
        .find(|s| s.evolves_from_species_id.is_none())
        .ok_or_else(|| ChainError::UnrecognizedShape("species list has no root".to_string()))?;

    let mut chain = EvolutionChain::new(root.name.clone());
    let mut placed = HashSet::from([root.id]);
    let mut pending = vec![(NodeId::ROOT, root.id)];

    while let Some((parent, parent_species_id)) = pending.pop() {
        for child in species
            .iter()
            .filter(|s| s.evolves_from_species_id == Some(parent_species_id))
        {
            if !placed.insert(child.id) {
                continue;
            }
            let details = child
                .pokemon_v2_pokemonevolutions
                .iter()
                .map(EvolutionDetail::from)
                .collect();
            let id = chain.add_child(parent, child.name.clone(), details)?;
            pending.push((id, child.id));
        }
    }

    if placed.len() < species.len() {
        log::debug!(
            "Ignored {} species not connected to root '{}'",
            species.len() - placed.len(),
            root.name
        );
    }
    Ok(chain)
}
