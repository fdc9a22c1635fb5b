//! The generated roadmap: nodes, edges and the supply/demand ledger.
//!
//! A [`RoadmapGraph`] is built once by [`crate::Roadmap::generate`] and handed
//! out as an immutable value. Nothing in the public API mutates it.

mod invariants;
mod node;

pub use invariants::InvariantViolation;
pub use node::{Edge, Node, NodeId, NodeRole, Position};

/// Completed roadmap graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RoadmapGraph {
    seed: u64,
    map_size: f64,
    good_type_count: usize,
    store_ids: Vec<NodeId>,
    warehouse_ids: Vec<NodeId>,
    nodes: Vec<Node>,
}

impl RoadmapGraph {
    pub(crate) fn new(
        seed: u64,
        map_size: f64,
        good_type_count: usize,
        store_ids: Vec<NodeId>,
        warehouse_ids: Vec<NodeId>,
        nodes: Vec<Node>,
    ) -> Self {
        Self {
            seed,
            map_size,
            good_type_count,
            store_ids,
            warehouse_ids,
            nodes,
        }
    }

    /// Seed of the random source that produced this graph.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Edge length of the square map in kilometres.
    #[must_use]
    pub const fn map_size(&self) -> f64 {
        self.map_size
    }

    /// Number of good types tracked per node.
    #[must_use]
    pub const fn good_type_count(&self) -> usize {
        self.good_type_count
    }

    /// All nodes in id order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.get())
    }

    /// Store ids in the order they were assigned.
    #[must_use]
    pub fn store_ids(&self) -> &[NodeId] {
        &self.store_ids
    }

    /// Warehouse ids in the order they were assigned.
    #[must_use]
    pub fn warehouse_ids(&self) -> &[NodeId] {
        &self.warehouse_ids
    }

    /// Iterates over nodes holding `role`.
    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |node| node.role() == role)
    }

    /// Iterates over every edge together with its source node id.
    ///
    /// # Examples
    /// ```
    /// use roadmap_core::{GenerationRequest, RoadmapBuilder};
    ///
    /// let params = GenerationRequest {
    ///     node_count: 6,
    ///     max_edges_per_node: 2,
    ///     store_count: 2,
    ///     warehouse_count: 2,
    ///     good_type_count: 1,
    ///     supply: vec![4],
    ///     demand: vec![4],
    /// }
    /// .validate()?;
    /// let graph = RoadmapBuilder::new().with_seed(5).build()?.generate(&params)?;
    /// assert_eq!(graph.edges().count(), graph.edge_count());
    /// assert!(graph.edges().all(|(source, edge)| edge.destination() != source));
    /// # Ok::<(), roadmap_core::RoadmapError>(())
    /// ```
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        self.nodes
            .iter()
            .flat_map(|node| node.edges().iter().map(move |edge| (node.id(), edge)))
    }

    /// Total number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges().len()).sum()
    }

    /// Sum of supply for `good` across all nodes, or `None` for an unknown good.
    #[must_use]
    pub fn total_supply(&self, good: usize) -> Option<u64> {
        self.ledger_total(good, Node::supply)
    }

    /// Sum of demand for `good` across all nodes, or `None` for an unknown good.
    #[must_use]
    pub fn total_demand(&self, good: usize) -> Option<u64> {
        self.ledger_total(good, Node::demand)
    }

    fn ledger_total(&self, good: usize, ledger: fn(&Node) -> &[u64]) -> Option<u64> {
        if good >= self.good_type_count {
            return None;
        }
        Some(
            self.nodes
                .iter()
                .filter_map(|node| ledger(node).get(good))
                .fold(0_u64, |acc, units| acc.saturating_add(*units)),
        )
    }
}
