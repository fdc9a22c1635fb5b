//! Builder utilities for configuring roadmap generation.
//!
//! Holds the generator-level settings that stay fixed across runs: map size,
//! assumed velocity range, optional seed and the rejection-sampling budget.

use crate::{Result, error::RoadmapError, roadmap::Roadmap};

/// Default edge length of the square map, in kilometres.
pub const DEFAULT_MAP_SIZE: f64 = 1000.0;
/// Default lower bound of the per-edge assumed velocity, in km/h.
pub const DEFAULT_MIN_VELOCITY_KMH: f64 = 40.0;
/// Default upper bound of the per-edge assumed velocity, in km/h.
pub const DEFAULT_MAX_VELOCITY_KMH: f64 = 100.0;
/// Default number of rejected draws before sampling falls back to a scan.
pub const DEFAULT_RETRY_BUDGET: usize = 64;

/// Half-open range `[min, max)` of assumed travel velocities in km/h.
///
/// # Examples
/// ```
/// use roadmap_core::VelocityRange;
///
/// let range = VelocityRange::new(30.0, 90.0).expect("range is valid");
/// assert_eq!(range.min_kmh(), 30.0);
/// assert!(VelocityRange::new(90.0, 30.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityRange {
    min_kmh: f64,
    max_kmh: f64,
}

impl VelocityRange {
    /// Creates a range after checking `0 < min < max` with finite bounds.
    ///
    /// # Errors
    /// Returns [`RoadmapError::InvalidVelocityRange`] otherwise.
    pub fn new(min_kmh: f64, max_kmh: f64) -> Result<Self> {
        let valid = min_kmh.is_finite() && max_kmh.is_finite() && min_kmh > 0.0 && min_kmh < max_kmh;
        if !valid {
            return Err(RoadmapError::InvalidVelocityRange {
                min: min_kmh,
                max: max_kmh,
            });
        }
        Ok(Self { min_kmh, max_kmh })
    }

    /// Lower bound in km/h.
    #[must_use]
    pub const fn min_kmh(&self) -> f64 {
        self.min_kmh
    }

    /// Upper bound in km/h, exclusive.
    #[must_use]
    pub const fn max_kmh(&self) -> f64 {
        self.max_kmh
    }
}

impl Default for VelocityRange {
    fn default() -> Self {
        Self {
            min_kmh: DEFAULT_MIN_VELOCITY_KMH,
            max_kmh: DEFAULT_MAX_VELOCITY_KMH,
        }
    }
}

/// Configures and constructs [`Roadmap`] generators.
///
/// # Examples
/// ```
/// use roadmap_core::RoadmapBuilder;
///
/// let roadmap = RoadmapBuilder::new()
///     .with_map_size(250.0)
///     .with_seed(42)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(roadmap.map_size(), 250.0);
/// assert_eq!(roadmap.seed(), Some(42));
/// ```
#[derive(Debug, Clone)]
pub struct RoadmapBuilder {
    map_size: f64,
    min_velocity_kmh: f64,
    max_velocity_kmh: f64,
    seed: Option<u64>,
    retry_budget: usize,
}

impl Default for RoadmapBuilder {
    fn default() -> Self {
        Self {
            map_size: DEFAULT_MAP_SIZE,
            min_velocity_kmh: DEFAULT_MIN_VELOCITY_KMH,
            max_velocity_kmh: DEFAULT_MAX_VELOCITY_KMH,
            seed: None,
            retry_budget: DEFAULT_RETRY_BUDGET,
        }
    }
}

impl RoadmapBuilder {
    /// Creates a builder populated with default settings.
    ///
    /// # Examples
    /// ```
    /// use roadmap_core::{DEFAULT_MAP_SIZE, RoadmapBuilder};
    ///
    /// let builder = RoadmapBuilder::new();
    /// assert_eq!(builder.map_size(), DEFAULT_MAP_SIZE);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the map edge length in kilometres.
    #[must_use]
    pub const fn with_map_size(mut self, map_size: f64) -> Self {
        self.map_size = map_size;
        self
    }

    /// Returns the configured map edge length.
    #[must_use]
    pub const fn map_size(&self) -> f64 {
        self.map_size
    }

    /// Overrides the assumed velocity bounds in km/h.
    #[must_use]
    pub const fn with_velocity_range(mut self, min_kmh: f64, max_kmh: f64) -> Self {
        self.min_velocity_kmh = min_kmh;
        self.max_velocity_kmh = max_kmh;
        self
    }

    /// Fixes the seed so every generated graph is reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the seed when `seed` is `Some`, otherwise keeps entropy seeding.
    #[must_use]
    pub const fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets how many rejected draws are tolerated before falling back to a
    /// linear scan. Zero goes straight to the scan.
    #[must_use]
    pub const fn with_retry_budget(mut self, retry_budget: usize) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// Validates the configuration and constructs a [`Roadmap`].
    ///
    /// # Errors
    /// Returns [`RoadmapError::InvalidMapSize`] when the map size is not a
    /// finite positive number and [`RoadmapError::InvalidVelocityRange`] when
    /// the velocity bounds are unusable.
    ///
    /// # Examples
    /// ```
    /// use roadmap_core::{RoadmapBuilder, RoadmapError};
    ///
    /// let err = RoadmapBuilder::new().with_map_size(0.0).build().unwrap_err();
    /// assert!(matches!(err, RoadmapError::InvalidMapSize { .. }));
    /// ```
    pub fn build(self) -> Result<Roadmap> {
        if !self.map_size.is_finite() || self.map_size <= 0.0 {
            return Err(RoadmapError::InvalidMapSize { got: self.map_size });
        }
        let velocity = VelocityRange::new(self.min_velocity_kmh, self.max_velocity_kmh)?;
        Ok(Roadmap::new(
            self.map_size,
            velocity,
            self.seed,
            self.retry_budget,
        ))
    }
}
