//! Edge synthesis with the at-least-one-edge guarantee.

use tracing::{instrument, trace};

use super::sampling::sample_eligible;
use crate::{
    Result,
    builder::VelocityRange,
    error::RoadmapError,
    graph::{Edge, Node, NodeId, Position},
    params::GenerationParameters,
    random::RandomSource,
};

const MINUTES_PER_HOUR: f64 = 60.0;

/// Gives every node its outgoing edges, visiting nodes in id order.
///
/// Each of the `max_edges_per_node` slots becomes an edge on a coin flip. A
/// node left without edges gets exactly one forced edge. Destinations are
/// drawn uniformly and re-rolled while they equal the source; repeated
/// destinations are allowed.
#[instrument(
    name = "core.synthesize_edges",
    err,
    skip(nodes, params, velocity, rng),
    fields(nodes = nodes.len(), slots = params.max_edges_per_node()),
)]
pub(crate) fn synthesize_edges(
    nodes: &mut [Node],
    params: &GenerationParameters,
    velocity: VelocityRange,
    rng: &mut RandomSource,
    retry_budget: usize,
) -> Result<()> {
    let positions: Vec<Position> = nodes.iter().map(Node::position).collect();
    let mut forced = 0_usize;

    for node in nodes.iter_mut() {
        let source = node.id();
        for _ in 0..params.max_edges_per_node() {
            if rng.coin_flip() {
                let edge = draw_edge(source, &positions, velocity, rng, retry_budget)?;
                node.push_edge(edge);
            }
        }
        if node.edges().is_empty() {
            let edge = draw_edge(source, &positions, velocity, rng, retry_budget)?;
            node.push_edge(edge);
            forced = forced.saturating_add(1);
        }
        node.finalize_edges();
    }

    trace!(forced, "edge synthesis complete");
    Ok(())
}

fn draw_edge(
    source: NodeId,
    positions: &[Position],
    velocity: VelocityRange,
    rng: &mut RandomSource,
    retry_budget: usize,
) -> Result<Edge> {
    let destination = sample_eligible(
        rng,
        positions.len(),
        retry_budget,
        "destination",
        |candidate| candidate != source.get(),
    )?;
    let from = positions
        .get(source.get())
        .ok_or(RoadmapError::UnknownNode { node: source.get() })?;
    let to = positions
        .get(destination)
        .ok_or(RoadmapError::UnknownNode { node: destination })?;
    let distance = from.distance_to(*to);
    let speed = rng.uniform(velocity.min_kmh(), velocity.max_kmh());
    Ok(Edge::new(
        NodeId::new(destination),
        distance,
        travel_minutes(distance, speed),
    ))
}

/// Rounds `distance / speed` hours to whole minutes.
#[expect(
    clippy::float_arithmetic,
    reason = "travel time is derived from distance and speed"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the rounded value is finite and non-negative; `as` saturates"
)]
fn travel_minutes(distance: f64, speed: f64) -> u64 {
    let minutes = (distance / speed * MINUTES_PER_HOUR).round();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::generation::placer::place_nodes;
    use crate::params::GenerationRequest;

    fn setup(node_count: usize, max_edges: usize, seed: u64) -> (Vec<Node>, GenerationParameters) {
        let params = GenerationRequest {
            node_count,
            max_edges_per_node: max_edges,
            store_count: 1,
            warehouse_count: 1,
            good_type_count: 1,
            supply: vec![0],
            demand: vec![0],
        }
        .validate()
        .expect("test parameters are valid");
        let nodes = place_nodes(&params, 1000.0, &mut RandomSource::from_seed(seed));
        (nodes, params)
    }

    #[rstest]
    #[case(60.0, 60.0, 60)]
    #[case(100.0, 40.0, 150)]
    #[case(0.0, 75.0, 0)]
    #[case(1.0, 100.0, 1)]
    #[case(0.5, 100.0, 0)]
    fn travel_minutes_rounds_to_nearest(
        #[case] distance: f64,
        #[case] speed: f64,
        #[case] expected: u64,
    ) {
        assert_eq!(travel_minutes(distance, speed), expected);
    }

    #[rstest]
    #[case::pair(2, 1)]
    #[case::sparse(40, 1)]
    #[case::dense(25, 24)]
    fn every_node_gets_valid_edges(#[case] node_count: usize, #[case] max_edges: usize) {
        let (mut nodes, params) = setup(node_count, max_edges, 5);
        let mut rng = RandomSource::from_seed(6);
        synthesize_edges(&mut nodes, &params, VelocityRange::default(), &mut rng, 64)
            .expect("synthesis succeeds");

        for node in &nodes {
            assert!(node.edges_finalized());
            assert!(!node.edges().is_empty());
            assert!(node.edges().len() <= max_edges.max(1));
            for edge in node.edges() {
                assert_ne!(edge.destination(), node.id());
                assert!(edge.destination().get() < node_count);
                let target = &nodes[edge.destination().get()];
                let expected = node.position().distance_to(target.position());
                assert!((edge.distance() - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn travel_time_respects_velocity_bounds() {
        let (mut nodes, params) = setup(30, 3, 12);
        let velocity = VelocityRange::new(40.0, 100.0).expect("valid range");
        let mut rng = RandomSource::from_seed(13);
        synthesize_edges(&mut nodes, &params, velocity, &mut rng, 64).expect("synthesis succeeds");

        for node in &nodes {
            for edge in node.edges() {
                let fastest = travel_minutes(edge.distance(), 100.0);
                let slowest = travel_minutes(edge.distance(), 40.0);
                assert!(
                    (fastest..=slowest).contains(&edge.travel_time()),
                    "{} outside {fastest}..={slowest}",
                    edge.travel_time()
                );
            }
        }
    }

    #[test]
    fn two_nodes_always_point_at_each_other() {
        let (mut nodes, params) = setup(2, 1, 1);
        let mut rng = RandomSource::from_seed(2);
        synthesize_edges(&mut nodes, &params, VelocityRange::default(), &mut rng, 0)
            .expect("synthesis succeeds");
        assert_eq!(nodes[0].edges()[0].destination(), NodeId::new(1));
        assert_eq!(nodes[1].edges()[0].destination(), NodeId::new(0));
    }

    #[test]
    fn synthesis_is_reproducible() {
        let (mut left, params) = setup(20, 4, 8);
        let (mut right, _) = setup(20, 4, 8);
        synthesize_edges(
            &mut left,
            &params,
            VelocityRange::default(),
            &mut RandomSource::from_seed(31),
            64,
        )
        .expect("synthesis succeeds");
        synthesize_edges(
            &mut right,
            &params,
            VelocityRange::default(),
            &mut RandomSource::from_seed(31),
            64,
        )
        .expect("synthesis succeeds");
        assert_eq!(left, right);
    }
}
