//! Error types for the roadmap core library.
//!
//! Validation failures are reported before any graph state is built. The
//! remaining variants describe internal failures that validated parameters
//! cannot trigger; they exist so generation never has to panic.

use std::fmt;

use thiserror::Error;

use crate::graph::InvariantViolation;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when validating parameters, configuring a
/// [`crate::Roadmap`], or generating a graph.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RoadmapError {
    /// Fewer than two nodes were requested, so no edge could exist.
    #[error("node_count must be at least 2 (got {got})")]
    InsufficientNodes {
        /// Node count supplied by the caller.
        got: usize,
    },
    /// Zero edges per node were requested.
    #[error("max_edges_per_node must be at least 1")]
    NoEdgesRequested,
    /// More edges per node were requested than there are other nodes.
    #[error("max_edges_per_node is {requested} but only {max} other nodes exist")]
    TooManyEdgesRequested {
        /// Requested maximum number of edges per node.
        requested: usize,
        /// Largest accepted value, `node_count - 1`.
        max: usize,
    },
    /// No stores were requested.
    #[error("store_count must be at least 1")]
    NoStoresRequested,
    /// No warehouses were requested.
    #[error("warehouse_count must be at least 1")]
    NoWarehousesRequested,
    /// Stores and warehouses together exceed the node count.
    #[error("{stores} stores and {warehouses} warehouses do not fit into {nodes} nodes")]
    RoleOvercommit {
        /// Requested store count.
        stores: usize,
        /// Requested warehouse count.
        warehouses: usize,
        /// Requested node count.
        nodes: usize,
    },
    /// No good types were requested.
    #[error("good_type_count must be at least 1")]
    NoGoodsRequested,
    /// Supply or demand totals were not given for exactly every good type.
    #[error(
        "expected {expected} supply and demand totals but got {supply} supply and {demand} demand totals"
    )]
    GoodTotalsMismatch {
        /// Configured number of good types.
        expected: usize,
        /// Number of supply totals supplied.
        supply: usize,
        /// Number of demand totals supplied.
        demand: usize,
    },
    /// The map edge length was not a finite positive number.
    #[error("map size must be finite and greater than zero (got {got})")]
    InvalidMapSize {
        /// Rejected map size in kilometres.
        got: f64,
    },
    /// The assumed velocity bounds were not a finite, positive, increasing pair.
    #[error("velocity range must satisfy 0 < min < max (got {min}..{max})")]
    InvalidVelocityRange {
        /// Rejected lower bound in km/h.
        min: f64,
        /// Rejected upper bound in km/h.
        max: f64,
    },
    /// Neither the bounded sampler nor the fallback scan found an eligible node.
    #[error("no eligible node left while sampling {purpose}")]
    SamplingExhausted {
        /// What the sampler was choosing, e.g. `"store"`.
        purpose: &'static str,
    },
    /// A node id recorded during generation did not resolve to a node.
    #[error("node {node} does not exist")]
    UnknownNode {
        /// Offending node id.
        node: usize,
    },
    /// The finished graph failed its structural self-check.
    #[error("generated graph violates an invariant: {0}")]
    InvariantViolated(#[source] InvariantViolation),
}

define_error_codes! {
    /// Stable codes describing [`RoadmapError`] variants.
    enum RoadmapErrorCode for RoadmapError {
        /// Fewer than two nodes were requested.
        InsufficientNodes => InsufficientNodes { .. } => "ROADMAP_INSUFFICIENT_NODES",
        /// Zero edges per node were requested.
        NoEdgesRequested => NoEdgesRequested => "ROADMAP_NO_EDGES_REQUESTED",
        /// More edges per node were requested than there are other nodes.
        TooManyEdgesRequested => TooManyEdgesRequested { .. } => "ROADMAP_TOO_MANY_EDGES_REQUESTED",
        /// No stores were requested.
        NoStoresRequested => NoStoresRequested => "ROADMAP_NO_STORES_REQUESTED",
        /// No warehouses were requested.
        NoWarehousesRequested => NoWarehousesRequested => "ROADMAP_NO_WAREHOUSES_REQUESTED",
        /// Stores and warehouses together exceed the node count.
        RoleOvercommit => RoleOvercommit { .. } => "ROADMAP_ROLE_OVERCOMMIT",
        /// No good types were requested.
        NoGoodsRequested => NoGoodsRequested => "ROADMAP_NO_GOODS_REQUESTED",
        /// Supply or demand totals did not cover every good type.
        GoodTotalsMismatch => GoodTotalsMismatch { .. } => "ROADMAP_GOOD_TOTALS_MISMATCH",
        /// The map size was invalid.
        InvalidMapSize => InvalidMapSize { .. } => "ROADMAP_INVALID_MAP_SIZE",
        /// The velocity range was invalid.
        InvalidVelocityRange => InvalidVelocityRange { .. } => "ROADMAP_INVALID_VELOCITY_RANGE",
        /// Sampling found no eligible node.
        SamplingExhausted => SamplingExhausted { .. } => "ROADMAP_SAMPLING_EXHAUSTED",
        /// A recorded node id did not resolve.
        UnknownNode => UnknownNode { .. } => "ROADMAP_UNKNOWN_NODE",
        /// The finished graph failed its self-check.
        InvariantViolated => InvariantViolated(..) => "ROADMAP_INVARIANT_VIOLATED",
    }
}

impl RoadmapError {
    /// Returns `true` for errors raised while validating caller input, as
    /// opposed to internal generation failures.
    ///
    /// # Examples
    /// ```
    /// use roadmap_core::RoadmapError;
    ///
    /// assert!(RoadmapError::NoGoodsRequested.is_validation());
    /// assert!(!RoadmapError::UnknownNode { node: 3 }.is_validation());
    /// ```
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(
            self,
            Self::SamplingExhausted { .. } | Self::UnknownNode { .. } | Self::InvariantViolated(_)
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, RoadmapError>;
