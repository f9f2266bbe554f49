//! Names of the supported topology algorithms.

use std::{fmt, str::FromStr, sync::Arc};

use crate::error::ConfigError;

/// Identifies one of the supported edge-generation algorithms.
///
/// Parsing is case-insensitive, so configuration files may spell the kind
/// `"random_connected"` or `"RANDOM_CONNECTED"`.
///
/// # Examples
/// ```
/// use modforge_core::TopologyKind;
///
/// let kind: TopologyKind = "binary_tree".parse().expect("known topology");
/// assert_eq!(kind, TopologyKind::BinaryTree);
/// assert_eq!(kind.to_string(), "binary_tree");
/// assert!("mesh".parse::<TopologyKind>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TopologyKind {
    /// Every lower-indexed module feeds every higher-indexed one.
    Full,
    /// Each forward pair is connected on a fair coin flip.
    Random,
    /// Like [`Self::Random`], but every module after the first gets at least
    /// one dependency.
    RandomConnected,
    /// A single chain `0 -> 1 -> ... -> n-1`.
    Linear,
    /// Module `0` feeds every other module.
    Star,
    /// Heap-ordered binary tree rooted at module `0`.
    BinaryTree,
    /// Rows of `width` modules, each row fully fed by the previous one.
    Rectangle,
    /// [`Self::Rectangle`] with each candidate edge kept on a coin flip.
    RandomRectangle,
    /// [`Self::RandomRectangle`], retrying a module until it gets a dependency.
    RandomConnectedRectangle,
}

impl TopologyKind {
    /// Every supported kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Full,
        Self::Random,
        Self::RandomConnected,
        Self::Linear,
        Self::Star,
        Self::BinaryTree,
        Self::Rectangle,
        Self::RandomRectangle,
        Self::RandomConnectedRectangle,
    ];

    /// Returns the configuration spelling of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Random => "random",
            Self::RandomConnected => "random_connected",
            Self::Linear => "linear",
            Self::Star => "star",
            Self::BinaryTree => "binary_tree",
            Self::Rectangle => "rectangle",
            Self::RandomRectangle => "random_rectangle",
            Self::RandomConnectedRectangle => "random_connected_rectangle",
        }
    }

    /// Whether the algorithm consumes the `seed` parameter.
    #[must_use]
    pub const fn is_randomized(self) -> bool {
        matches!(
            self,
            Self::Random
                | Self::RandomConnected
                | Self::RandomRectangle
                | Self::RandomConnectedRectangle
        )
    }

    /// Whether the algorithm requires the `width` parameter.
    #[must_use]
    pub const fn requires_width(self) -> bool {
        matches!(
            self,
            Self::Rectangle | Self::RandomRectangle | Self::RandomConnectedRectangle
        )
    }
}

impl fmt::Display for TopologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopologyKind {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| ConfigError::UnknownTopology {
                name: Arc::from(raw),
            })
    }
}
