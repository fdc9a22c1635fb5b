//! Generation parameters and their validation.
//!
//! [`GenerationRequest`] carries raw caller input. [`GenerationRequest::validate`]
//! runs the checks in a fixed order and returns the first failure, so callers
//! always see the same error for the same input.

use crate::{Result, error::RoadmapError};

/// Requested totals for one good type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GoodTotals {
    /// Units spread across warehouses.
    pub supply: u64,
    /// Units spread across stores.
    pub demand: u64,
}

/// Raw, unvalidated generation input.
///
/// # Examples
/// ```
/// use roadmap_core::GenerationRequest;
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
/// .validate()
/// .expect("request is valid");
/// assert_eq!(params.node_count(), 4);
/// assert_eq!(params.goods()[0].supply, 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Number of nodes to place.
    pub node_count: usize,
    /// Number of coin-flip edge slots per node.
    pub max_edges_per_node: usize,
    /// Number of nodes to turn into stores.
    pub store_count: usize,
    /// Number of nodes to turn into warehouses.
    pub warehouse_count: usize,
    /// Number of good types tracked per node.
    pub good_type_count: usize,
    /// Total supply per good type, indexed by good.
    pub supply: Vec<u64>,
    /// Total demand per good type, indexed by good.
    pub demand: Vec<u64>,
}

impl GenerationRequest {
    /// Validates the request.
    ///
    /// # Errors
    /// Returns, in this order of precedence:
    /// [`RoadmapError::InsufficientNodes`], [`RoadmapError::NoEdgesRequested`],
    /// [`RoadmapError::TooManyEdgesRequested`], [`RoadmapError::NoStoresRequested`],
    /// [`RoadmapError::NoWarehousesRequested`], [`RoadmapError::RoleOvercommit`],
    /// [`RoadmapError::NoGoodsRequested`] and
    /// [`RoadmapError::GoodTotalsMismatch`].
    pub fn validate(self) -> Result<GenerationParameters> {
        if self.node_count < 2 {
            return Err(RoadmapError::InsufficientNodes {
                got: self.node_count,
            });
        }
        if self.max_edges_per_node < 1 {
            return Err(RoadmapError::NoEdgesRequested);
        }
        let max_edges = self.node_count.saturating_sub(1);
        if self.max_edges_per_node > max_edges {
            return Err(RoadmapError::TooManyEdgesRequested {
                requested: self.max_edges_per_node,
                max: max_edges,
            });
        }
        if self.store_count < 1 {
            return Err(RoadmapError::NoStoresRequested);
        }
        if self.warehouse_count < 1 {
            return Err(RoadmapError::NoWarehousesRequested);
        }
        if self.store_count.saturating_add(self.warehouse_count) > self.node_count {
            return Err(RoadmapError::RoleOvercommit {
                stores: self.store_count,
                warehouses: self.warehouse_count,
                nodes: self.node_count,
            });
        }
        if self.good_type_count < 1 {
            return Err(RoadmapError::NoGoodsRequested);
        }
        if self.supply.len() != self.good_type_count || self.demand.len() != self.good_type_count {
            return Err(RoadmapError::GoodTotalsMismatch {
                expected: self.good_type_count,
                supply: self.supply.len(),
                demand: self.demand.len(),
            });
        }

        let goods = self
            .supply
            .iter()
            .zip(&self.demand)
            .map(|(&supply, &demand)| GoodTotals { supply, demand })
            .collect();

        Ok(GenerationParameters {
            node_count: self.node_count,
            max_edges_per_node: self.max_edges_per_node,
            store_count: self.store_count,
            warehouse_count: self.warehouse_count,
            goods,
        })
    }
}

/// Validated, immutable generation parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationParameters {
    node_count: usize,
    max_edges_per_node: usize,
    store_count: usize,
    warehouse_count: usize,
    goods: Vec<GoodTotals>,
}

impl GenerationParameters {
    /// Number of nodes to place.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of coin-flip edge slots per node.
    #[must_use]
    pub const fn max_edges_per_node(&self) -> usize {
        self.max_edges_per_node
    }

    /// Number of stores.
    #[must_use]
    pub const fn store_count(&self) -> usize {
        self.store_count
    }

    /// Number of warehouses.
    #[must_use]
    pub const fn warehouse_count(&self) -> usize {
        self.warehouse_count
    }

    /// Number of good types.
    #[must_use]
    pub fn good_type_count(&self) -> usize {
        self.goods.len()
    }

    /// Requested totals, indexed by good type.
    #[must_use]
    pub fn goods(&self) -> &[GoodTotals] {
        &self.goods
    }
}
