//! Structural queries over a chain: size, depth, a flattened debug view and
//! cycle validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::evolution::chain::{EvolutionChain, EvolutionDetail, NodeId};

/// Ceiling on the depth [`depth`] will measure.
pub const DEPTH_MEASURE_LIMIT: usize = 20;
/// Most entries [`simplify`] emits before truncating.
pub const SIMPLIFY_NODE_LIMIT: usize = 50;
/// Deepest level [`simplify`] descends to.
pub const SIMPLIFY_DEPTH_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailSummary {
    pub trigger: Option<String>,
    pub min_level: Option<u32>,
    pub item: Option<String>,
}

impl From<&EvolutionDetail> for DetailSummary {
    fn from(detail: &EvolutionDetail) -> Self {
        Self {
            trigger: detail.trigger.clone(),
            min_level: detail.min_level,
            item: detail.item.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSummaryEntry {
    pub species: String,
    pub depth: usize,
    pub evolves_to: Vec<String>,
    pub evolution_details: Option<DetailSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimplifiedNode {
    Species(ChainSummaryEntry),
    Truncated { warning: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
}

impl ChainValidation {
    fn invalid(error: String) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
            species_count: None,
            depth: None,
        }
    }
}

/// Number of distinct species nodes reachable from the root.
pub fn count_species(chain: &EvolutionChain) -> usize {
    let mut seen = HashSet::new();
    let mut stack = vec![chain.root()];
    while let Some(id) = stack.pop() {
        let Ok(node) = chain.node(id) else {
            continue;
        };
        if seen.insert(id) {
            stack.extend(node.children().iter().copied());
        }
    }
    log::debug!(
        "Chain species count: {} for chain starting with {}",
        seen.len(),
        root_name(chain)
    );
    seen.len()
}

/// Longest root-to-leaf path in edges, capped at [`DEPTH_MEASURE_LIMIT`].
/// Each (node, depth) pair is expanded once.
pub fn depth(chain: &EvolutionChain) -> usize {
    let mut max_depth = 0;
    let mut seen = HashSet::new();
    let mut stack = vec![(chain.root(), 0usize)];
    while let Some((id, depth)) = stack.pop() {
        if !seen.insert((id, depth)) {
            continue;
        }
        let Ok(node) = chain.node(id) else {
            continue;
        };
        max_depth = max_depth.max(depth);
        if depth < DEPTH_MEASURE_LIMIT {
            stack.extend(node.children().iter().map(|child| (*child, depth + 1)));
        }
    }
    log::debug!("Chain depth: {max_depth} for {}", root_name(chain));
    max_depth
}

/// Flatten the chain in depth-first order for debugging output.
pub fn simplify(chain: &EvolutionChain) -> Vec<SimplifiedNode> {
    let mut entries = Vec::new();
    let mut truncated = false;
    let mut stack = vec![(chain.root(), 0usize)];

    while let Some((id, depth)) = stack.pop() {
        let Ok(node) = chain.node(id) else {
            continue;
        };
        if entries.len() >= SIMPLIFY_NODE_LIMIT {
            truncated = true;
            break;
        }

        let evolves_to = node
            .children()
            .iter()
            .map(|child| {
                chain
                    .species(*child)
                    .map(str::to_string)
                    .unwrap_or_else(|_| "unknown".to_string())
            })
            .collect();
        entries.push(SimplifiedNode::Species(ChainSummaryEntry {
            species: if node.species.is_empty() {
                "unknown".to_string()
            } else {
                node.species.clone()
            },
            depth,
            evolves_to,
            evolution_details: node.details.first().map(DetailSummary::from),
        }));

        if depth < SIMPLIFY_DEPTH_LIMIT {
            stack.extend(node.children().iter().rev().map(|child| (*child, depth + 1)));
        }
    }

    if truncated {
        entries.push(SimplifiedNode::Truncated {
            warning: format!("Stopped at {SIMPLIFY_NODE_LIMIT} nodes to prevent overflow"),
        });
    }
    log::debug!("Simplified chain: {} entries", entries.len());
    entries
}

enum Step {
    Enter(NodeId),
    Leave,
}

/// Reject chains whose root has no name or in which a species appears among
/// its own ancestors.
pub fn validate(chain: &EvolutionChain) -> ChainValidation {
    if root_name(chain).is_empty() {
        return ChainValidation::invalid("Chain species missing name".to_string());
    }

    let mut path: Vec<&str> = Vec::new();
    let mut stack = vec![Step::Enter(chain.root())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Leave => {
                path.pop();
            }
            Step::Enter(id) => {
                let node = match chain.node(id) {
                    Ok(node) => node,
                    Err(err) => return ChainValidation::invalid(err.to_string()),
                };
                let name = node.species.as_str();
                if path.contains(&name) {
                    return ChainValidation::invalid(format!(
                        "Circular reference detected: {} -> {}",
                        path.join(" -> "),
                        name
                    ));
                }
                path.push(name);
                stack.push(Step::Leave);
                let mut entered = HashSet::new();
                stack.extend(
                    node.children()
                        .iter()
                        .rev()
                        .filter(|child| entered.insert(**child))
                        .map(|child| Step::Enter(*child)),
                );
            }
        }
    }

    ChainValidation {
        is_valid: true,
        error: None,
        species_count: Some(count_species(chain)),
        depth: Some(depth(chain)),
    }
}

fn root_name(chain: &EvolutionChain) -> &str {
    chain.species(chain.root()).unwrap_or_default()
}
