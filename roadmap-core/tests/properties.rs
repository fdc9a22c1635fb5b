//! Property suite over randomly shaped generation requests.

use std::collections::HashSet;

use proptest::{
    collection::vec,
    prelude::{Just, Strategy, any},
    prop_assert, prop_assert_eq, proptest,
    test_runner::Config as ProptestConfig,
};
use roadmap_core::{GenerationRequest, NodeId, NodeRole, RoadmapBuilder, RoadmapGraph};
use roadmap_test_support::profile::ProptestRunProfile;

fn suite_config() -> ProptestConfig {
    ProptestConfig {
        cases: ProptestRunProfile::load(64).cases(),
        ..ProptestConfig::default()
    }
}

/// Requests that always pass validation.
fn valid_request() -> impl Strategy<Value = GenerationRequest> {
    (2_usize..40, 1_usize..4)
        .prop_flat_map(|(nodes, goods)| {
            (
                Just(nodes),
                1..nodes,
                1..nodes,
                vec(0_u64..500, goods),
                vec(0_u64..500, goods),
            )
        })
        .prop_flat_map(|(nodes, max_edges, stores, supply, demand)| {
            (
                Just(nodes),
                Just(max_edges),
                Just(stores),
                1..=nodes - stores,
                Just(supply),
                Just(demand),
            )
        })
        .prop_map(
            |(node_count, max_edges_per_node, store_count, warehouse_count, supply, demand)| {
                GenerationRequest {
                    node_count,
                    max_edges_per_node,
                    store_count,
                    warehouse_count,
                    good_type_count: supply.len(),
                    supply,
                    demand,
                }
            },
        )
}

fn generate(request: &GenerationRequest, seed: u64) -> RoadmapGraph {
    let params = request.clone().validate().expect("strategy yields valid requests");
    RoadmapBuilder::new()
        .with_seed(seed)
        .build()
        .expect("default builder is valid")
        .generate(&params)
        .expect("generation succeeds for valid requests")
}

proptest! {
    #![proptest_config(suite_config())]

    #[test]
    fn ids_are_dense_and_ordered(request in valid_request(), seed in any::<u64>()) {
        let graph = generate(&request, seed);
        prop_assert_eq!(graph.nodes().len(), request.node_count);
        for (index, node) in graph.nodes().iter().enumerate() {
            prop_assert_eq!(node.id(), NodeId::new(index));
        }
    }

    #[test]
    fn every_node_has_bounded_loop_free_edges(request in valid_request(), seed in any::<u64>()) {
        let graph = generate(&request, seed);
        for node in graph.nodes() {
            prop_assert!(!node.edges().is_empty());
            prop_assert!(node.edges().len() <= request.max_edges_per_node);
            for edge in node.edges() {
                prop_assert!(edge.destination() != node.id());
                prop_assert!(edge.destination().get() < request.node_count);
                prop_assert!(edge.distance().is_finite() && edge.distance() >= 0.0);
            }
        }
    }

    #[test]
    fn roles_match_requested_counts(request in valid_request(), seed in any::<u64>()) {
        let graph = generate(&request, seed);
        prop_assert_eq!(graph.nodes_with_role(NodeRole::Store).count(), request.store_count);
        prop_assert_eq!(
            graph.nodes_with_role(NodeRole::Warehouse).count(),
            request.warehouse_count
        );
        let stores: HashSet<_> = graph.store_ids().iter().collect();
        let warehouses: HashSet<_> = graph.warehouse_ids().iter().collect();
        prop_assert_eq!(stores.len(), request.store_count);
        prop_assert!(stores.is_disjoint(&warehouses));
    }

    #[test]
    fn goods_are_conserved_and_confined(request in valid_request(), seed in any::<u64>()) {
        let graph = generate(&request, seed);
        for good in 0..request.good_type_count {
            prop_assert_eq!(graph.total_supply(good), Some(request.supply[good]));
            prop_assert_eq!(graph.total_demand(good), Some(request.demand[good]));
        }
        for node in graph.nodes() {
            prop_assert_eq!(node.supply().len(), request.good_type_count);
            prop_assert_eq!(node.demand().len(), request.good_type_count);
            if node.role() != NodeRole::Warehouse {
                prop_assert!(node.supply().iter().all(|&units| units == 0));
            }
            if node.role() != NodeRole::Store {
                prop_assert!(node.demand().iter().all(|&units| units == 0));
            }
        }
    }

    #[test]
    fn shares_differ_by_at_most_one(request in valid_request(), seed in any::<u64>()) {
        let graph = generate(&request, seed);
        for good in 0..request.good_type_count {
            let shares: Vec<u64> = graph
                .nodes_with_role(NodeRole::Warehouse)
                .map(|node| node.supply()[good])
                .collect();
            let min = shares.iter().copied().min().unwrap_or(0);
            let max = shares.iter().copied().max().unwrap_or(0);
            prop_assert!(max - min <= 1);
        }
    }

    #[test]
    fn seeded_generation_is_deterministic(request in valid_request(), seed in any::<u64>()) {
        prop_assert_eq!(generate(&request, seed), generate(&request, seed));
    }
}
