//! Node placement on the square map.

use tracing::instrument;

use crate::{
    graph::{Node, NodeId, Position},
    params::GenerationParameters,
    random::RandomSource,
};

/// Creates `node_count` joints with ids `0..node_count` at independent
/// uniform positions in `[0, map_size)²`.
#[instrument(
    name = "core.place_nodes",
    skip(params, rng),
    fields(nodes = params.node_count(), goods = params.good_type_count()),
)]
pub(crate) fn place_nodes(
    params: &GenerationParameters,
    map_size: f64,
    rng: &mut RandomSource,
) -> Vec<Node> {
    (0..params.node_count())
        .map(|index| {
            let x = rng.uniform(0.0, map_size);
            let y = rng.uniform(0.0, map_size);
            Node::new(
                NodeId::new(index),
                Position { x, y },
                params.good_type_count(),
            )
        })
        .collect()
}
