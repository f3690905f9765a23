use serde::{Deserialize, Serialize};

use crate::errors::{ChainError, ChainResult};

/// Index of a node inside its [`EvolutionChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// One way a species is reached from its parent. Mirrors the fields of an
/// upstream `evolution_details` entry that the analyzer reads; resource
/// fields hold the resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionDetail {
    pub trigger: Option<String>,
    pub item: Option<String>,
    pub held_item: Option<String>,
    pub min_level: Option<u32>,
    pub min_happiness: Option<u32>,
    pub min_beauty: Option<u32>,
    pub known_move_type: Option<String>,
    pub location: Option<String>,
}

impl EvolutionDetail {
    pub fn trigger(trigger: &str) -> Self {
        Self {
            trigger: Some(trigger.to_string()),
            ..Self::default()
        }
    }

    pub fn level_up(level: u32) -> Self {
        Self {
            min_level: Some(level),
            ..Self::trigger("level-up")
        }
    }

    pub fn use_item(item: &str) -> Self {
        Self {
            item: Some(item.to_string()),
            ..Self::trigger("use-item")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionNode {
    pub species: String,
    /// How this node is reached from its parent; empty on the root.
    pub details: Vec<EvolutionDetail>,
    children: Vec<NodeId>,
}

impl EvolutionNode {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An evolution tree stored as an arena. The root is always [`NodeId::ROOT`].
///
/// Trees are built with [`add_child`](Self::add_child). [`link`](Self::link)
/// attaches an existing node under another one, so malformed data such as a
/// species listed among its own descendants can be represented; every
/// traversal over a chain is bounded for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionChain {
    nodes: Vec<EvolutionNode>,
}

impl EvolutionChain {
    pub fn new(root_species: impl Into<String>) -> Self {
        Self {
            nodes: vec![EvolutionNode {
                species: root_species.into(),
                details: Vec::new(),
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> ChainResult<&EvolutionNode> {
        self.nodes.get(id.0).ok_or(ChainError::DanglingNode(id))
    }

    pub fn species(&self, id: NodeId) -> ChainResult<&str> {
        Ok(self.node(id)?.species.as_str())
    }

    /// Append a new species that evolves from `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        species: impl Into<String>,
        details: Vec<EvolutionDetail>,
    ) -> ChainResult<NodeId> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(EvolutionNode {
            species: species.into(),
            details,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Attach an existing node as a further child of `parent`.
    pub fn link(&mut self, parent: NodeId, child: NodeId) -> ChainResult<()> {
        self.node(child)?;
        let parent_node = self
            .nodes
            .get_mut(parent.0)
            .ok_or(ChainError::DanglingNode(parent))?;
        parent_node.children.push(child);
        Ok(())
    }

    /// Species names in insertion order.
    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.species.as_str())
    }
}
