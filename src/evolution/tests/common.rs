use crate::evolution::{EvolutionChain, EvolutionDetail, NodeId};

/// A builder for evolution chains used across the scenario tests.
///
/// Species are attached under the most recently added one unless a parent is
/// named explicitly.
///
/// # Example
/// ```
/// let chain = TestChainBuilder::new("bulbasaur")
///     .evolves("ivysaur", EvolutionDetail::level_up(16))
///     .evolves("venusaur", EvolutionDetail::level_up(32))
///     .build();
/// ```
pub struct TestChainBuilder {
    chain: EvolutionChain,
    last: NodeId,
}

impl TestChainBuilder {
    /// Creates a builder whose root is `root`.
    pub fn new(root: &str) -> Self {
        let chain = EvolutionChain::new(root);
        let last = chain.root();
        Self { chain, last }
    }

    /// Adds `species` under the most recently added species.
    pub fn evolves(self, species: &str, detail: EvolutionDetail) -> Self {
        let parent = self.last;
        self.evolves_from(parent, species, detail)
    }

    /// Adds `species` under the node at `parent`.
    pub fn evolves_from(mut self, parent: NodeId, species: &str, detail: EvolutionDetail) -> Self {
        self.last = match self.chain.add_child(parent, species, vec![detail]) {
            Ok(id) => id,
            Err(err) => panic!("Failed to add {species} to test chain: {err}"),
        };
        self
    }

    /// Adds `species` under the root, for branching chains.
    pub fn branch(self, species: &str, detail: EvolutionDetail) -> Self {
        self.evolves_from(NodeId::ROOT, species, detail)
    }

    /// Links the most recently added species back to `ancestor`.
    pub fn cycle_to(mut self, ancestor: NodeId) -> Self {
        if let Err(err) = self.chain.link(self.last, ancestor) {
            panic!("Failed to link test chain: {err}");
        }
        self
    }

    pub fn last(&self) -> NodeId {
        self.last
    }

    pub fn build(self) -> EvolutionChain {
        self.chain
    }
}

pub fn bulbasaur_line() -> EvolutionChain {
    TestChainBuilder::new("bulbasaur")
        .evolves("ivysaur", EvolutionDetail::level_up(16))
        .evolves("venusaur", EvolutionDetail::level_up(32))
        .build()
}

pub fn eevee_line() -> EvolutionChain {
    TestChainBuilder::new("eevee")
        .branch("vaporeon", EvolutionDetail::use_item("water-stone"))
        .branch("jolteon", EvolutionDetail::use_item("thunder-stone"))
        .branch("flareon", EvolutionDetail::use_item("fire-stone"))
        .build()
}
