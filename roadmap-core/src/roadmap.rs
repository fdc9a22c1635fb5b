//! Roadmap generation orchestration.
//!
//! Provides the [`Roadmap`] entry point, which owns a random source for the
//! duration of one run, drives the pipeline stages and returns the finished
//! [`RoadmapGraph`].

use tracing::{Span, field, info, instrument};

use crate::{
    Result,
    builder::VelocityRange,
    error::RoadmapError,
    generation::{
        RoleAssignment, assign_roles, distribute_goods, place_nodes, synthesize_edges,
    },
    graph::RoadmapGraph,
    params::GenerationParameters,
    random::RandomSource,
};

/// Entry point for generating roadmap graphs.
///
/// # Examples
/// ```
/// use roadmap_core::{GenerationRequest, NodeRole, RoadmapBuilder};
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
/// .expect("parameters are valid");
/// let graph = RoadmapBuilder::new()
///     .with_seed(1)
///     .build()
///     .expect("builder must succeed")
///     .generate(&params)
///     .expect("generation must succeed");
/// assert_eq!(graph.nodes().len(), 4);
/// assert_eq!(graph.nodes_with_role(NodeRole::Warehouse).count(), 1);
/// assert_eq!(graph.total_supply(0), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct Roadmap {
    map_size: f64,
    velocity: VelocityRange,
    seed: Option<u64>,
    retry_budget: usize,
}

impl Roadmap {
    pub(crate) const fn new(
        map_size: f64,
        velocity: VelocityRange,
        seed: Option<u64>,
        retry_budget: usize,
    ) -> Self {
        Self {
            map_size,
            velocity,
            seed,
            retry_budget,
        }
    }

    /// Edge length of the square map in kilometres.
    #[must_use]
    pub const fn map_size(&self) -> f64 {
        self.map_size
    }

    /// Assumed velocity bounds used for travel times.
    #[must_use]
    pub const fn velocity(&self) -> VelocityRange {
        self.velocity
    }

    /// Fixed seed, or `None` when each run draws a fresh one.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Rejected draws tolerated before a sampler scans for a candidate.
    #[must_use]
    pub const fn retry_budget(&self) -> usize {
        self.retry_budget
    }

    /// Generates a graph with a random source created for this run.
    ///
    /// The source is seeded from the configured seed, or from OS entropy when
    /// none is set; either way the seed is recorded on the graph.
    ///
    /// # Errors
    /// Returns an internal [`RoadmapError`] only if a pipeline stage or the
    /// final self-check fails, which validated parameters do not trigger.
    pub fn generate(&self, params: &GenerationParameters) -> Result<RoadmapGraph> {
        let mut rng = self
            .seed
            .map_or_else(RandomSource::from_entropy, RandomSource::from_seed);
        self.generate_with(params, &mut rng)
    }

    /// Generates a graph drawing from a caller-supplied random source.
    ///
    /// # Errors
    /// See [`Roadmap::generate`].
    #[instrument(
        name = "core.generate",
        err,
        skip(self, params, rng),
        fields(
            seed = rng.seed(),
            nodes = params.node_count(),
            max_edges = params.max_edges_per_node(),
            map_size = self.map_size,
            edges = field::Empty,
        ),
    )]
    pub fn generate_with(
        &self,
        params: &GenerationParameters,
        rng: &mut RandomSource,
    ) -> Result<RoadmapGraph> {
        let mut nodes = place_nodes(params, self.map_size, rng);
        let assignment = assign_roles(&mut nodes, params, rng, self.retry_budget)?;
        distribute_goods(&mut nodes, &assignment, params)?;
        synthesize_edges(&mut nodes, params, self.velocity, rng, self.retry_budget)?;

        let RoleAssignment { stores, warehouses } = assignment;
        let graph = RoadmapGraph::new(
            rng.seed(),
            self.map_size,
            params.good_type_count(),
            stores,
            warehouses,
            nodes,
        );
        graph
            .check_invariants(params)
            .map_err(RoadmapError::InvariantViolated)?;

        Span::current().record("edges", graph.edge_count());
        info!(
            seed = graph.seed(),
            nodes = graph.nodes().len(),
            edges = graph.edge_count(),
            stores = graph.store_ids().len(),
            warehouses = graph.warehouse_ids().len(),
            "roadmap generated"
        );
        Ok(graph)
    }
}
