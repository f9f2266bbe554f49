//! Topology engine: turns a named algorithm and its parameters into the
//! dependency edges of a project.
//!
//! Configuration supplies a [`TopologyKind`] plus raw [`TopologyParameters`];
//! [`Topology::from_parameters`] validates them into a typed [`Topology`]
//! whose [`Topology::generate`] cannot fail. Every generated edge satisfies
//! `from < to`, so a graph built from topology output alone is acyclic.

mod generators;
mod kind;
mod params;

use std::num::NonZeroUsize;

use tracing::{debug, instrument};

use crate::{
    Result,
    error::ConfigError,
    graph::DependencyEdge,
    rng::{rng_from_seed, seed_from},
};

pub use self::{kind::TopologyKind, params::TopologyParameters};

/// Parameter key holding the row width of the rectangle topologies.
pub const WIDTH_PARAMETER: &str = "width";

/// A fully validated topology pass.
///
/// # Examples
/// ```
/// use modforge_core::{DependencyEdge, Topology, TopologyKind, TopologyParameters};
///
/// let params = TopologyParameters::new().with("width", "2");
/// let topology = Topology::from_parameters(TopologyKind::Rectangle, &params)
///     .expect("width is valid");
/// let edges = topology.generate(5);
/// assert_eq!(edges[0], DependencyEdge::new(0, 2));
/// assert_eq!(edges.len(), 6);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Topology {
    /// See [`TopologyKind::Full`].
    Full,
    /// See [`TopologyKind::Random`].
    Random {
        /// Seed of the coin flips.
        seed: i64,
    },
    /// See [`TopologyKind::RandomConnected`].
    RandomConnected {
        /// Seed of the coin flips.
        seed: i64,
    },
    /// See [`TopologyKind::Linear`].
    Linear,
    /// See [`TopologyKind::Star`].
    Star,
    /// See [`TopologyKind::BinaryTree`].
    BinaryTree,
    /// See [`TopologyKind::Rectangle`].
    Rectangle {
        /// Number of modules per row.
        width: NonZeroUsize,
    },
    /// See [`TopologyKind::RandomRectangle`].
    RandomRectangle {
        /// Number of modules per row.
        width: NonZeroUsize,
        /// Seed of the coin flips.
        seed: i64,
    },
    /// See [`TopologyKind::RandomConnectedRectangle`].
    RandomConnectedRectangle {
        /// Number of modules per row.
        width: NonZeroUsize,
        /// Seed of the coin flips.
        seed: i64,
    },
}

impl Topology {
    /// Validates `parameters` for `kind`.
    ///
    /// Only the keys the algorithm uses are read; anything else is ignored.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingParameter`] when a rectangle kind has no
    /// `width`, and [`ConfigError::InvalidParameter`] when `width` is not a
    /// positive integer or `seed` is not an integer.
    pub fn from_parameters(kind: TopologyKind, parameters: &TopologyParameters) -> Result<Self> {
        let topology = match kind {
            TopologyKind::Full => Self::Full,
            TopologyKind::Random => Self::Random {
                seed: seed_from(parameters)?,
            },
            TopologyKind::RandomConnected => Self::RandomConnected {
                seed: seed_from(parameters)?,
            },
            TopologyKind::Linear => Self::Linear,
            TopologyKind::Star => Self::Star,
            TopologyKind::BinaryTree => Self::BinaryTree,
            TopologyKind::Rectangle => Self::Rectangle {
                width: width_from(kind, parameters)?,
            },
            TopologyKind::RandomRectangle => Self::RandomRectangle {
                width: width_from(kind, parameters)?,
                seed: seed_from(parameters)?,
            },
            TopologyKind::RandomConnectedRectangle => Self::RandomConnectedRectangle {
                width: width_from(kind, parameters)?,
                seed: seed_from(parameters)?,
            },
        };
        Ok(topology)
    }

    /// Returns the algorithm this topology runs.
    #[must_use]
    pub const fn kind(&self) -> TopologyKind {
        match self {
            Self::Full => TopologyKind::Full,
            Self::Random { .. } => TopologyKind::Random,
            Self::RandomConnected { .. } => TopologyKind::RandomConnected,
            Self::Linear => TopologyKind::Linear,
            Self::Star => TopologyKind::Star,
            Self::BinaryTree => TopologyKind::BinaryTree,
            Self::Rectangle { .. } => TopologyKind::Rectangle,
            Self::RandomRectangle { .. } => TopologyKind::RandomRectangle,
            Self::RandomConnectedRectangle { .. } => TopologyKind::RandomConnectedRectangle,
        }
    }

    /// Generates the edges of this topology over `num_modules` modules.
    ///
    /// Edges come back in generation order: from-major for
    /// [`Topology::Full`] and [`Topology::Random`], ascending `to` then
    /// ascending `from` for everything else.
    #[must_use]
    #[instrument(name = "topology.generate", skip(self), fields(kind = %self.kind()))]
    pub fn generate(&self, num_modules: usize) -> Vec<DependencyEdge> {
        let edges = match *self {
            Self::Full => generators::full(num_modules),
            Self::Random { seed } => generators::random(&mut rng_from_seed(seed), num_modules),
            Self::RandomConnected { seed } => {
                generators::random_connected(&mut rng_from_seed(seed), num_modules)
            }
            Self::Linear => generators::linear(num_modules),
            Self::Star => generators::star(num_modules),
            Self::BinaryTree => generators::binary_tree(num_modules),
            Self::Rectangle { width } => generators::rectangle(width, num_modules),
            Self::RandomRectangle { width, seed } => {
                generators::random_rectangle(&mut rng_from_seed(seed), width, num_modules)
            }
            Self::RandomConnectedRectangle { width, seed } => {
                generators::random_connected_rectangle(&mut rng_from_seed(seed), width, num_modules)
            }
        };
        debug!(edges = edges.len(), "topology generated");
        edges
    }
}

/// Generates the edges of `kind` over `num_modules` modules.
///
/// Shorthand for [`Topology::from_parameters`] followed by
/// [`Topology::generate`].
///
/// # Errors
/// Propagates parameter validation failures from [`Topology::from_parameters`].
///
/// # Examples
/// ```
/// use modforge_core::{DependencyEdge, TopologyKind, TopologyParameters, generate};
///
/// let edges = generate(TopologyKind::Star, &TopologyParameters::new(), 3)
///     .expect("star takes no parameters");
/// assert_eq!(edges, vec![DependencyEdge::new(0, 1), DependencyEdge::new(0, 2)]);
/// ```
pub fn generate(
    kind: TopologyKind,
    parameters: &TopologyParameters,
    num_modules: usize,
) -> Result<Vec<DependencyEdge>> {
    Topology::from_parameters(kind, parameters).map(|topology| topology.generate(num_modules))
}

fn width_from(kind: TopologyKind, parameters: &TopologyParameters) -> Result<NonZeroUsize> {
    let raw = parameters
        .get(WIDTH_PARAMETER)
        .ok_or(ConfigError::MissingParameter {
            topology: kind,
            name: WIDTH_PARAMETER,
        })?;
    let width = raw.parse::<i64>().map_err(|_| {
        ConfigError::invalid_parameter(WIDTH_PARAMETER, raw, "expected an integer")
    })?;
    usize::try_from(width)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ConfigError::invalid_parameter(WIDTH_PARAMETER, raw, "must be greater than 0"))
}
