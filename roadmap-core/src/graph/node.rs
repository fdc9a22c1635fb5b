//! Nodes, positions, roles and edges of a roadmap graph.

use std::fmt;

/// Identifier of a node, equal to its creation index.
///
/// # Examples
/// ```
/// use roadmap_core::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Part a node plays in the logistics network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum NodeRole {
    /// Pure waypoint without supply or demand.
    Joint,
    /// Consumes goods.
    Store,
    /// Produces goods.
    Warehouse,
}

impl NodeRole {
    /// Numeric role code used by the graph-description format.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Joint => 0,
            Self::Store => 1,
            Self::Warehouse => 2,
        }
    }

    /// One-letter tag: `J`, `S` or `W`.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Joint => 'J',
            Self::Store => 'S',
            Self::Warehouse => 'W',
        }
    }

    /// Upper-case label used in human-readable traces.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Joint => "JOINT",
            Self::Store => "STORE",
            Self::Warehouse => "WAREHOUSE",
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Planar coordinates in kilometres.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Position {
    /// Euclidean distance to `other`.
    ///
    /// # Examples
    /// ```
    /// use roadmap_core::Position;
    ///
    /// let origin = Position { x: 0.0, y: 0.0 };
    /// let corner = Position { x: 3.0, y: 4.0 };
    /// assert_eq!(origin.distance_to(corner), 5.0);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Euclidean distance requires floating-point arithmetic"
    )]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Directed edge owned by its source node.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    destination: NodeId,
    distance: f64,
    travel_time: u64,
}

impl Edge {
    pub(crate) const fn new(destination: NodeId, distance: f64, travel_time: u64) -> Self {
        Self {
            destination,
            distance,
            travel_time,
        }
    }

    /// Node the edge leads to.
    #[must_use]
    pub const fn destination(&self) -> NodeId {
        self.destination
    }

    /// Euclidean length in kilometres.
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// Travel time in whole minutes.
    #[must_use]
    pub const fn travel_time(&self) -> u64 {
        self.travel_time
    }
}

/// A placed node with its ledger and outgoing edges.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    id: NodeId,
    role: NodeRole,
    position: Position,
    supply: Vec<u64>,
    demand: Vec<u64>,
    edges: Vec<Edge>,
    #[cfg_attr(feature = "serde", serde(skip))]
    edges_finalized: bool,
}

impl Node {
    pub(crate) fn new(id: NodeId, position: Position, good_type_count: usize) -> Self {
        Self {
            id,
            role: NodeRole::Joint,
            position,
            supply: vec![0; good_type_count],
            demand: vec![0; good_type_count],
            edges: Vec::new(),
            edges_finalized: false,
        }
    }

    /// Stable identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Assigned role.
    #[must_use]
    pub const fn role(&self) -> NodeRole {
        self.role
    }

    /// Placement on the map.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Supply counters, indexed by good type.
    #[must_use]
    pub fn supply(&self) -> &[u64] {
        &self.supply
    }

    /// Demand counters, indexed by good type.
    #[must_use]
    pub fn demand(&self) -> &[u64] {
        &self.demand
    }

    /// Outgoing edges in creation order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Whether edge synthesis has processed this node.
    #[must_use]
    pub const fn edges_finalized(&self) -> bool {
        self.edges_finalized
    }

    /// Turns a joint into `role`. Returns `false`, leaving the node untouched,
    /// when it already holds a non-joint role.
    pub(crate) fn promote(&mut self, role: NodeRole) -> bool {
        if self.role != NodeRole::Joint {
            return false;
        }
        self.role = role;
        true
    }

    pub(crate) fn supply_mut(&mut self) -> &mut [u64] {
        &mut self.supply
    }

    pub(crate) fn demand_mut(&mut self) -> &mut [u64] {
        &mut self.demand
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        debug_assert!(!self.edges_finalized, "edges are append-only until finalized");
        self.edges.push(edge);
    }

    pub(crate) fn finalize_edges(&mut self) {
        self.edges_finalized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(NodeRole::Joint, 0, 'J', "JOINT")]
    #[case(NodeRole::Store, 1, 'S', "STORE")]
    #[case(NodeRole::Warehouse, 2, 'W', "WAREHOUSE")]
    fn role_encodings(
        #[case] role: NodeRole,
        #[case] code: u8,
        #[case] tag: char,
        #[case] label: &str,
    ) {
        assert_eq!(role.code(), code);
        assert_eq!(role.tag(), tag);
        assert_eq!(role.label(), label);
        assert_eq!(role.to_string(), label);
    }

    #[test]
    fn new_node_is_an_empty_joint() {
        let node = Node::new(NodeId::new(2), Position { x: 1.0, y: 2.0 }, 3);
        assert_eq!(node.role(), NodeRole::Joint);
        assert_eq!(node.supply(), &[0, 0, 0]);
        assert_eq!(node.demand(), &[0, 0, 0]);
        assert!(node.edges().is_empty());
        assert!(!node.edges_finalized());
    }

    #[test]
    fn promotion_happens_once() {
        let mut node = Node::new(NodeId::new(0), Position { x: 0.0, y: 0.0 }, 1);
        assert!(node.promote(NodeRole::Store));
        assert!(!node.promote(NodeRole::Warehouse));
        assert_eq!(node.role(), NodeRole::Store);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Position { x: 10.0, y: 20.0 };
        let b = Position { x: 13.0, y: 24.0 };
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
        assert!((a.distance_to(b) - b.distance_to(a)).abs() < 1e-12);
        assert!(a.distance_to(a).abs() < 1e-12);
    }
}
