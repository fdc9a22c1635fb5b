//! Structural self-check for completed graphs.

use thiserror::Error;

use super::{NodeId, NodeRole, RoadmapGraph};
use crate::params::GenerationParameters;

/// First invariant a graph was found to break.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The graph holds a different number of nodes than requested.
    #[error("expected {expected} nodes, found {actual}")]
    NodeCount {
        /// Requested node count.
        expected: usize,
        /// Node count found.
        actual: usize,
    },
    /// A node id does not match its position in the node list.
    #[error("node at index {index} carries id {id}")]
    IdMismatch {
        /// Position in the node list.
        index: usize,
        /// Id stored on the node.
        id: NodeId,
    },
    /// A role is held by the wrong number of nodes.
    #[error("expected {expected} nodes with role {role}, found {actual}")]
    RoleCount {
        /// Role being counted.
        role: NodeRole,
        /// Requested count.
        expected: usize,
        /// Count found.
        actual: usize,
    },
    /// A recorded store or warehouse id does not hold the matching role.
    #[error("node {node} is recorded as {role} but does not hold that role")]
    RoleRecordMismatch {
        /// Offending node.
        node: NodeId,
        /// Role it was recorded under.
        role: NodeRole,
    },
    /// A node has no outgoing edge.
    #[error("node {node} has no outgoing edge")]
    MissingEdges {
        /// Offending node.
        node: NodeId,
    },
    /// Edge synthesis never processed a node.
    #[error("node {node} never had its edges finalized")]
    EdgesNotFinalized {
        /// Offending node.
        node: NodeId,
    },
    /// An edge leads back to its own source.
    #[error("node {node} has an edge to itself")]
    SelfLoop {
        /// Offending node.
        node: NodeId,
    },
    /// An edge leads to a node that does not exist.
    #[error("node {node} has an edge to missing node {destination}")]
    DanglingEdge {
        /// Source node.
        node: NodeId,
        /// Missing destination.
        destination: NodeId,
    },
    /// An edge carries a negative or non-finite distance.
    #[error("node {node} has an edge with an invalid distance")]
    InvalidDistance {
        /// Source node.
        node: NodeId,
    },
    /// A node's ledger has the wrong number of good slots.
    #[error("node {node} tracks {actual} good types instead of {expected}")]
    LedgerWidth {
        /// Offending node.
        node: NodeId,
        /// Expected number of good types.
        expected: usize,
        /// Ledger width found.
        actual: usize,
    },
    /// A non-warehouse holds supply or a non-store holds demand.
    #[error("node {node} ({role}) holds a nonzero {ledger} entry for good {good}")]
    StrayLedgerEntry {
        /// Offending node.
        node: NodeId,
        /// Its role.
        role: NodeRole,
        /// `"supply"` or `"demand"`.
        ledger: &'static str,
        /// Good index.
        good: usize,
    },
    /// Distributed units do not add up to the requested total.
    #[error("{ledger} of good {good} sums to {actual} instead of {expected}")]
    Conservation {
        /// `"supply"` or `"demand"`.
        ledger: &'static str,
        /// Good index.
        good: usize,
        /// Requested total.
        expected: u64,
        /// Distributed total.
        actual: u64,
    },
}

impl RoadmapGraph {
    /// Re-verifies every structural invariant against the parameters the
    /// graph was generated from.
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    /// ```
    /// use roadmap_core::{GenerationRequest, RoadmapBuilder};
    ///
    /// let params = GenerationRequest {
    ///     node_count: 4,
    ///     max_edges_per_node: 1,
    ///     store_count: 1,
    ///     warehouse_count: 1,
    ///     good_type_count: 1,
    ///     supply: vec![3],
    ///     demand: vec![2],
    /// }
    /// .validate()?;
    /// let graph = RoadmapBuilder::new().with_seed(9).build()?.generate(&params)?;
    /// assert!(graph.check_invariants(&params).is_ok());
    /// # Ok::<(), roadmap_core::RoadmapError>(())
    /// ```
    pub fn check_invariants(
        &self,
        params: &GenerationParameters,
    ) -> Result<(), InvariantViolation> {
        self.check_nodes(params)?;
        self.check_roles(params)?;
        self.check_edges()?;
        self.check_ledgers(params)
    }

    fn check_nodes(&self, params: &GenerationParameters) -> Result<(), InvariantViolation> {
        if self.nodes.len() != params.node_count() {
            return Err(InvariantViolation::NodeCount {
                expected: params.node_count(),
                actual: self.nodes.len(),
            });
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if node.id().get() != index {
                return Err(InvariantViolation::IdMismatch {
                    index,
                    id: node.id(),
                });
            }
        }
        Ok(())
    }

    fn check_roles(&self, params: &GenerationParameters) -> Result<(), InvariantViolation> {
        let joints = params
            .node_count()
            .saturating_sub(params.store_count())
            .saturating_sub(params.warehouse_count());
        let expectations = [
            (NodeRole::Store, params.store_count()),
            (NodeRole::Warehouse, params.warehouse_count()),
            (NodeRole::Joint, joints),
        ];
        for (role, expected) in expectations {
            let actual = self.nodes_with_role(role).count();
            if actual != expected {
                return Err(InvariantViolation::RoleCount {
                    role,
                    expected,
                    actual,
                });
            }
        }

        let records = [
            (NodeRole::Store, &self.store_ids),
            (NodeRole::Warehouse, &self.warehouse_ids),
        ];
        for (role, ids) in records {
            if ids.len() != self.nodes_with_role(role).count() {
                return Err(InvariantViolation::RoleCount {
                    role,
                    expected: self.nodes_with_role(role).count(),
                    actual: ids.len(),
                });
            }
            for &id in ids {
                if self.node(id).map(|node| node.role()) != Some(role) {
                    return Err(InvariantViolation::RoleRecordMismatch { node: id, role });
                }
            }
        }
        Ok(())
    }

    fn check_edges(&self) -> Result<(), InvariantViolation> {
        for node in &self.nodes {
            let id = node.id();
            if !node.edges_finalized() {
                return Err(InvariantViolation::EdgesNotFinalized { node: id });
            }
            if node.edges().is_empty() {
                return Err(InvariantViolation::MissingEdges { node: id });
            }
            for edge in node.edges() {
                if edge.destination() == id {
                    return Err(InvariantViolation::SelfLoop { node: id });
                }
                if self.node(edge.destination()).is_none() {
                    return Err(InvariantViolation::DanglingEdge {
                        node: id,
                        destination: edge.destination(),
                    });
                }
                if !edge.distance().is_finite() || edge.distance() < 0.0 {
                    return Err(InvariantViolation::InvalidDistance { node: id });
                }
            }
        }
        Ok(())
    }

    fn check_ledgers(&self, params: &GenerationParameters) -> Result<(), InvariantViolation> {
        let goods = params.good_type_count();
        for node in &self.nodes {
            for ledger in [node.supply(), node.demand()] {
                if ledger.len() != goods {
                    return Err(InvariantViolation::LedgerWidth {
                        node: node.id(),
                        expected: goods,
                        actual: ledger.len(),
                    });
                }
            }
            let stray = [
                ("supply", node.role() != NodeRole::Warehouse, node.supply()),
                ("demand", node.role() != NodeRole::Store, node.demand()),
            ];
            for (ledger, forbidden, units) in stray {
                if !forbidden {
                    continue;
                }
                if let Some(good) = units.iter().position(|&count| count != 0) {
                    return Err(InvariantViolation::StrayLedgerEntry {
                        node: node.id(),
                        role: node.role(),
                        ledger,
                        good,
                    });
                }
            }
        }

        for (good, totals) in params.goods().iter().enumerate() {
            let sums = [
                ("supply", totals.supply, self.total_supply(good)),
                ("demand", totals.demand, self.total_demand(good)),
            ];
            for (ledger, expected, actual) in sums {
                let actual = actual.unwrap_or_default();
                if actual != expected {
                    return Err(InvariantViolation::Conservation {
                        ledger,
                        good,
                        expected,
                        actual,
                    });
                }
            }
        }
        Ok(())
    }
}
