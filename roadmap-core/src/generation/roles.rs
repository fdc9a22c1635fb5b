//! Store and warehouse selection.

use tracing::instrument;

use super::sampling::sample_eligible;
use crate::{
    Result,
    error::RoadmapError,
    graph::{Node, NodeId, NodeRole},
    params::GenerationParameters,
    random::RandomSource,
};

/// Ids promoted during role assignment, in promotion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RoleAssignment {
    pub(crate) stores: Vec<NodeId>,
    pub(crate) warehouses: Vec<NodeId>,
}

/// Promotes `store_count` joints to stores, then `warehouse_count` joints to
/// warehouses. Each pick re-rolls until it lands on a node that is still a
/// joint, so the two sets stay disjoint.
#[instrument(
    name = "core.assign_roles",
    err,
    skip(nodes, params, rng),
    fields(stores = params.store_count(), warehouses = params.warehouse_count()),
)]
pub(crate) fn assign_roles(
    nodes: &mut [Node],
    params: &GenerationParameters,
    rng: &mut RandomSource,
    retry_budget: usize,
) -> Result<RoleAssignment> {
    let stores = promote_joints(
        nodes,
        NodeRole::Store,
        params.store_count(),
        rng,
        retry_budget,
    )?;
    let warehouses = promote_joints(
        nodes,
        NodeRole::Warehouse,
        params.warehouse_count(),
        rng,
        retry_budget,
    )?;
    Ok(RoleAssignment { stores, warehouses })
}

fn promote_joints(
    nodes: &mut [Node],
    role: NodeRole,
    count: usize,
    rng: &mut RandomSource,
    retry_budget: usize,
) -> Result<Vec<NodeId>> {
    let purpose = match role {
        NodeRole::Joint => "joint",
        NodeRole::Store => "store",
        NodeRole::Warehouse => "warehouse",
    };
    let mut promoted = Vec::with_capacity(count);
    for _ in 0..count {
        let index = sample_eligible(rng, nodes.len(), retry_budget, purpose, |candidate| {
            nodes
                .get(candidate)
                .is_some_and(|node| node.role() == NodeRole::Joint)
        })?;
        let node = nodes
            .get_mut(index)
            .ok_or(RoadmapError::UnknownNode { node: index })?;
        if !node.promote(role) {
            return Err(RoadmapError::SamplingExhausted { purpose });
        }
        promoted.push(node.id());
    }
    Ok(promoted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use rstest::rstest;

    use crate::generation::placer::place_nodes;
    use crate::params::GenerationRequest;

    fn setup(
        node_count: usize,
        store_count: usize,
        warehouse_count: usize,
        seed: u64,
    ) -> (Vec<Node>, GenerationParameters, RandomSource) {
        let params = GenerationRequest {
            node_count,
            max_edges_per_node: 1,
            store_count,
            warehouse_count,
            good_type_count: 1,
            supply: vec![0],
            demand: vec![0],
        }
        .validate()
        .expect("test parameters are valid");
        let mut rng = RandomSource::from_seed(seed);
        let nodes = place_nodes(&params, 100.0, &mut rng);
        (nodes, params, rng)
    }

    #[rstest]
    #[case::sparse(20, 2, 3, 64)]
    #[case::full(6, 3, 3, 64)]
    #[case::full_without_retries(6, 3, 3, 0)]
    #[case::minimal(2, 1, 1, 1)]
    fn assigns_exact_disjoint_roles(
        #[case] node_count: usize,
        #[case] store_count: usize,
        #[case] warehouse_count: usize,
        #[case] retry_budget: usize,
    ) {
        let (mut nodes, params, mut rng) = setup(node_count, store_count, warehouse_count, 21);
        let assignment =
            assign_roles(&mut nodes, &params, &mut rng, retry_budget).expect("roles fit");

        assert_eq!(assignment.stores.len(), store_count);
        assert_eq!(assignment.warehouses.len(), warehouse_count);

        let stores: HashSet<_> = assignment.stores.iter().copied().collect();
        let warehouses: HashSet<_> = assignment.warehouses.iter().copied().collect();
        assert_eq!(stores.len(), store_count, "store ids must be distinct");
        assert_eq!(warehouses.len(), warehouse_count, "warehouse ids must be distinct");
        assert!(stores.is_disjoint(&warehouses));

        for node in &nodes {
            let expected = if stores.contains(&node.id()) {
                NodeRole::Store
            } else if warehouses.contains(&node.id()) {
                NodeRole::Warehouse
            } else {
                NodeRole::Joint
            };
            assert_eq!(node.role(), expected);
        }
    }

    #[test]
    fn assignment_is_reproducible() {
        let (mut left_nodes, params, mut left_rng) = setup(30, 4, 5, 77);
        let (mut right_nodes, _, mut right_rng) = setup(30, 4, 5, 77);
        let left = assign_roles(&mut left_nodes, &params, &mut left_rng, 64).expect("fits");
        let right = assign_roles(&mut right_nodes, &params, &mut right_rng, 64).expect("fits");
        assert_eq!(left, right);
    }
}
