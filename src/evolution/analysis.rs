use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use schema::EvolutionStage;
use serde::{Deserialize, Serialize};

use crate::errors::ChainResult;
use crate::evolution::chain::{EvolutionChain, EvolutionDetail, NodeId};
use crate::evolution::inspect::validate;
use crate::names::{base_form_name, normalize};
use crate::tables::SpeciesTables;

/// Nodes deeper than this are analyzed but their children are not visited.
pub const ANALYSIS_DEPTH_LIMIT: usize = 10;

pub const NOT_FOUND_ERROR: &str = "Target Pokémon not found in evolution chain";

static FORM_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(mega|gmax|alola|galar|hisui|paldea)").expect("static pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStats {
    pub species_count: usize,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionAnalysis {
    pub stage: EvolutionStage,
    pub evolved_by: String,
    pub is_branched: bool,
    pub error: Option<String>,
    /// Set by [`safe_analyze`] only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_stats: Option<ChainStats>,
}

impl Default for EvolutionAnalysis {
    fn default() -> Self {
        Self {
            stage: EvolutionStage::Unknown,
            evolved_by: "None".to_string(),
            is_branched: false,
            error: None,
            validated: None,
            chain_stats: None,
        }
    }
}

impl EvolutionAnalysis {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_found(&self) -> bool {
        self.error.is_none() && self.stage != EvolutionStage::Unknown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum NameMatch {
    Loose,
    Exact,
}

/// Spellings under which `target` may appear in a chain. Upstream species and
/// chain endpoints do not always agree on form names, so matching against
/// this set is deliberately loose.
pub fn name_variants(target: &str, tables: &SpeciesTables) -> Vec<String> {
    let clean = normalize(target);
    if clean.is_empty() {
        return Vec::new();
    }

    let mut candidates = vec![clean.clone()];
    let multi_word =
        tables.is_multi_word(&clean) || tables.is_multi_word(&base_form_name(&clean, tables));
    if !multi_word {
        if let Some((head, _)) = clean.split_once('-') {
            candidates.push(head.to_string());
        }
    }
    candidates.push(clean.strip_suffix("-hisui").unwrap_or(&clean).to_string());
    candidates.push(clean.replace('-', " "));
    candidates.push(FORM_MARKERS.replace_all(&clean, "").into_owned());

    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !candidate.is_empty() && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}

fn match_name(species: &str, target: &str, variants: &[String]) -> Option<NameMatch> {
    let name = normalize(species);
    if name.is_empty() {
        return None;
    }
    if name == target {
        return Some(NameMatch::Exact);
    }
    variants
        .iter()
        .any(|variant| *variant == name || name.contains(variant.as_str()) || variant.contains(&name))
        .then_some(NameMatch::Loose)
}

/// Describe how a species evolves from one upstream detail entry.
pub fn evolution_method(detail: &EvolutionDetail) -> String {
    let trigger = detail.trigger.as_deref();
    let present = |value: Option<u32>| value.filter(|v| *v > 0);

    if trigger == Some("trade") {
        return "Trade".to_string();
    }
    if let Some(item) = &detail.item {
        return format!("Use Item: {item}");
    }
    if let Some(item) = &detail.held_item {
        return format!("Held Item: {item}");
    }
    if trigger == Some("level-up") {
        if let Some(level) = present(detail.min_level) {
            return format!("Level {level}");
        }
    }
    if present(detail.min_happiness).is_some() {
        return "Friendship".to_string();
    }
    if present(detail.min_beauty).is_some() {
        return "Beauty".to_string();
    }
    if let Some(move_type) = &detail.known_move_type {
        return format!("Knows Move Type: {move_type}");
    }
    if let Some(location) = &detail.location {
        return format!("At Location: {location}");
    }
    if trigger == Some("use-item") {
        return "Use Evolution Item".to_string();
    }
    "Level Up".to_string()
}

/// Stage, evolution method and branching of `target` within `chain`.
///
/// Never fails: a missing chain or target, a target absent from the chain
/// and traversal errors all come back as `Unknown` with `error` set.
pub fn analyze(
    chain: Option<&EvolutionChain>,
    target: &str,
    tables: &SpeciesTables,
) -> EvolutionAnalysis {
    let Some(chain) = chain else {
        return EvolutionAnalysis::failed("No evolution chain provided");
    };
    if target.trim().is_empty() {
        return EvolutionAnalysis::failed("No target Pokémon name provided");
    }

    match traverse(chain, target, tables) {
        Ok(analysis) => analysis,
        Err(err) => {
            log::error!("Error during evolution chain traversal: {err}");
            EvolutionAnalysis::failed(format!("Traversal error: {err}"))
        }
    }
}

fn traverse(
    chain: &EvolutionChain,
    target: &str,
    tables: &SpeciesTables,
) -> ChainResult<EvolutionAnalysis> {
    let clean = normalize(target);
    let variants = name_variants(target, tables);
    let mut analysis = EvolutionAnalysis::default();
    let mut best: Option<NameMatch> = None;

    // (node, parent, depth), popped in depth-first pre-order
    let mut stack: Vec<(NodeId, Option<NodeId>, usize)> = vec![(chain.root(), None, 0)];
    // Each (node, parent, depth) state is expanded at most once.
    let mut seen: HashSet<(NodeId, Option<NodeId>, usize)> = HashSet::new();

    while let Some((id, parent, depth)) = stack.pop() {
        if !seen.insert((id, parent, depth)) {
            continue;
        }
        let node = chain.node(id)?;

        if let Some(found) = match_name(&node.species, &clean, &variants) {
            // An exact hit is never replaced by a later loose one.
            if best != Some(NameMatch::Exact) {
                best = Some(found);
                analysis.stage = match parent {
                    None => EvolutionStage::Base,
                    Some(_) if node.is_leaf() => EvolutionStage::Final,
                    Some(_) => EvolutionStage::Middle,
                };
                analysis.evolved_by = match parent {
                    Some(parent) => method_from_parent(chain, parent, &clean, &variants)?,
                    None => "None".to_string(),
                };
                log::debug!(
                    "{}- {} matched target '{}' as {}",
                    "  ".repeat(depth.min(5)),
                    node.species,
                    clean,
                    analysis.stage
                );
            }
        }

        if !analysis.is_branched && node.children().len() > 1 {
            analysis.is_branched = true;
        }

        if depth < ANALYSIS_DEPTH_LIMIT {
            for child in node.children().iter().rev() {
                stack.push((*child, Some(id), depth + 1));
            }
        } else if !node.is_leaf() {
            log::warn!(
                "Depth limit reached at {}, stopping traversal",
                node.species
            );
        }
    }

    if best.is_none() {
        log::info!("Target {clean} not found in evolution chain, variants tried: {variants:?}");
        analysis.error = Some(NOT_FOUND_ERROR.to_string());
    } else {
        log::debug!(
            "Final analysis for {}: {} by {} (branched: {})",
            clean,
            analysis.stage,
            analysis.evolved_by,
            analysis.is_branched
        );
    }
    Ok(analysis)
}

/// Method recorded on the parent's child that matches the target, preferring
/// an exact name match.
fn method_from_parent(
    chain: &EvolutionChain,
    parent: NodeId,
    target: &str,
    variants: &[String],
) -> ChainResult<String> {
    let mut chosen: Option<(NameMatch, NodeId)> = None;
    for child in chain.node(parent)?.children() {
        let child_node = chain.node(*child)?;
        if let Some(found) = match_name(&child_node.species, target, variants) {
            if chosen.map_or(true, |(previous, _)| found > previous) {
                chosen = Some((found, *child));
            }
        }
    }

    let Some((_, child)) = chosen else {
        return Ok("None".to_string());
    };
    Ok(chain
        .node(child)?
        .details
        .first()
        .map(evolution_method)
        .unwrap_or_else(|| "None".to_string()))
}

/// Validate the chain, then analyze it. Invalid chains are rejected with
/// `validated: false`; valid ones carry their species count and depth.
pub fn safe_analyze(
    chain: Option<&EvolutionChain>,
    target: &str,
    tables: &SpeciesTables,
) -> EvolutionAnalysis {
    let Some(present) = chain else {
        return EvolutionAnalysis {
            validated: Some(false),
            ..EvolutionAnalysis::failed("Invalid chain: no evolution chain provided")
        };
    };

    let validation = validate(present);
    if !validation.is_valid {
        let reason = validation.error.unwrap_or_default();
        log::error!("Evolution chain validation failed: {reason}");
        return EvolutionAnalysis {
            validated: Some(false),
            ..EvolutionAnalysis::failed(format!("Invalid chain: {reason}"))
        };
    }

    EvolutionAnalysis {
        validated: Some(true),
        chain_stats: Some(ChainStats {
            species_count: validation.species_count.unwrap_or_default(),
            depth: validation.depth.unwrap_or_default(),
        }),
        ..analyze(chain, target, tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn variants(target: &str) -> Vec<String> {
        name_variants(target, SpeciesTables::builtin())
    }

    #[test]
    fn test_name_variants() {
        assert_eq!(
            variants("Arcanine-Hisui"),
            vec!["arcanine-hisui", "arcanine", "arcanine hisui"]
        );
        assert_eq!(variants("pikachu"), vec!["pikachu"]);
        assert!(variants("").is_empty());
    }

    #[test]
    fn test_multi_word_names_keep_their_head() {
        assert_eq!(variants("mr-mime"), vec!["mr-mime", "mr mime"]);
        assert_eq!(variants("mr-mime-galar"), vec!["mr-mime-galar", "mr mime galar", "mr-mime"]);
        assert!(!variants("iron-hands").contains(&"iron".to_string()));
    }

    #[rstest]
    #[case(EvolutionDetail::trigger("trade"), "Trade")]
    #[case(EvolutionDetail::use_item("fire-stone"), "Use Item: fire-stone")]
    #[case(
        EvolutionDetail { held_item: Some("kings-rock".into()), ..EvolutionDetail::trigger("trade") },
        "Trade"
    )]
    #[case(
        EvolutionDetail { held_item: Some("oval-stone".into()), ..EvolutionDetail::trigger("level-up") },
        "Held Item: oval-stone"
    )]
    #[case(EvolutionDetail::level_up(16), "Level 16")]
    #[case(EvolutionDetail::level_up(0), "Level Up")]
    #[case(
        EvolutionDetail { min_happiness: Some(160), ..EvolutionDetail::trigger("level-up") },
        "Friendship"
    )]
    #[case(
        EvolutionDetail { min_beauty: Some(171), ..EvolutionDetail::trigger("level-up") },
        "Beauty"
    )]
    #[case(
        EvolutionDetail { known_move_type: Some("fairy".into()), ..EvolutionDetail::trigger("level-up") },
        "Knows Move Type: fairy"
    )]
    #[case(
        EvolutionDetail { location: Some("mt-coronet".into()), ..EvolutionDetail::trigger("level-up") },
        "At Location: mt-coronet"
    )]
    #[case(EvolutionDetail::trigger("use-item"), "Use Evolution Item")]
    #[case(EvolutionDetail::trigger("level-up"), "Level Up")]
    #[case(EvolutionDetail::default(), "Level Up")]
    fn test_evolution_method(#[case] detail: EvolutionDetail, #[case] expected: &str) {
        assert_eq!(evolution_method(&detail), expected);
    }

    #[test]
    fn test_missing_inputs() {
        let tables = SpeciesTables::builtin();
        let chain = EvolutionChain::new("eevee");

        let analysis = analyze(None, "eevee", tables);
        assert_eq!(analysis.stage, EvolutionStage::Unknown);
        assert_eq!(analysis.error.as_deref(), Some("No evolution chain provided"));

        let analysis = analyze(Some(&chain), "  ", tables);
        assert_eq!(analysis.error.as_deref(), Some("No target Pokémon name provided"));
        assert_eq!(analysis.evolved_by, "None");
    }

    #[test]
    fn test_single_species_chain() {
        let chain = EvolutionChain::new("tauros");
        let analysis = analyze(Some(&chain), "tauros-paldea", SpeciesTables::builtin());
        assert_eq!(analysis.stage, EvolutionStage::Base);
        assert_eq!(analysis.evolved_by, "None");
        assert!(analysis.is_found());
    }
}
