//! Roadmap core library.
//!
//! Synthesises random logistics networks: nodes placed on a square map,
//! a disjoint set of stores and warehouses, per-good supply and demand dealt
//! round-robin over them, and directed edges carrying distance and travel
//! time. Every node is guaranteed at least one outgoing edge.
//!
//! Generation is a single synchronous pass. Runs with the same seed and
//! parameters produce identical graphs.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod generation;
mod graph;
mod params;
mod random;
mod roadmap;

pub use crate::{
    builder::{
        DEFAULT_MAP_SIZE, DEFAULT_MAX_VELOCITY_KMH, DEFAULT_MIN_VELOCITY_KMH,
        DEFAULT_RETRY_BUDGET, RoadmapBuilder, VelocityRange,
    },
    error::{Result, RoadmapError, RoadmapErrorCode},
    graph::{Edge, InvariantViolation, Node, NodeId, NodeRole, Position, RoadmapGraph},
    params::{GenerationParameters, GenerationRequest, GoodTotals},
    random::RandomSource,
    roadmap::Roadmap,
};
