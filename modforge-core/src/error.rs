//! Error types for the modforge core library.
//!
//! Every failure in the core is a configuration problem: the generator is a
//! pure computation, so there is nothing transient to retry. Each variant
//! carries the offending parameter so the operator can fix the input.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::topology::TopologyKind;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
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
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error raised when a project configuration cannot be turned into a
/// [`crate::ProjectBlueprint`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    /// The topology `type` did not name a supported algorithm.
    #[error("unknown topology `{name}`")]
    UnknownTopology {
        /// Name supplied by the configuration.
        name: Arc<str>,
    },
    /// A topology was missing a parameter it cannot run without.
    #[error("topology `{topology}` requires parameter `{name}`")]
    MissingParameter {
        /// Topology that needed the parameter.
        topology: TopologyKind,
        /// Name of the missing parameter.
        name: &'static str,
    },
    /// A parameter was present but could not be used.
    #[error("parameter `{name}` has invalid value `{value}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: Arc<str>,
        /// Raw value as supplied.
        value: Arc<str>,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A dependency referenced a module index outside `0..num_modules`.
    #[error("dependency {from} -> {to} references a module outside 0..{num_modules}")]
    EdgeOutOfRange {
        /// Source endpoint of the rejected edge.
        from: usize,
        /// Target endpoint of the rejected edge.
        to: usize,
        /// Number of modules in the project.
        num_modules: usize,
    },
    /// A code-mass total or count was negative.
    #[error("`{field}` must not be negative (got {value})")]
    NegativeTotal {
        /// Configuration field holding the negative value.
        field: &'static str,
        /// The negative value.
        value: i64,
    },
    /// The project declared no modules.
    #[error("numModules must be at least 1")]
    ZeroModules,
    /// More Android modules were requested than the project has modules.
    #[error("androidModules ({android_modules}) exceeds numModules ({num_modules})")]
    TooManyAndroidModules {
        /// Requested Android module count.
        android_modules: u64,
        /// Number of modules in the project.
        num_modules: usize,
    },
    /// The graph handed to the partitioner was built for another module count.
    #[error("dependency graph covers {graph} modules but the configuration declares {config}")]
    GraphSizeMismatch {
        /// Module count the graph was validated against.
        graph: usize,
        /// Module count declared by the configuration.
        config: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`ConfigError`] variants.
    enum ConfigErrorCode for ConfigError {
        /// The topology `type` did not name a supported algorithm.
        UnknownTopology => UnknownTopology { .. } => "CONFIG_UNKNOWN_TOPOLOGY",
        /// A topology was missing a parameter it cannot run without.
        MissingParameter => MissingParameter { .. } => "CONFIG_MISSING_PARAMETER",
        /// A parameter was present but could not be used.
        InvalidParameter => InvalidParameter { .. } => "CONFIG_INVALID_PARAMETER",
        /// A dependency referenced a module index outside the project.
        EdgeOutOfRange => EdgeOutOfRange { .. } => "CONFIG_EDGE_OUT_OF_RANGE",
        /// A code-mass total or count was negative.
        NegativeTotal => NegativeTotal { .. } => "CONFIG_NEGATIVE_TOTAL",
        /// The project declared no modules.
        ZeroModules => ZeroModules => "CONFIG_ZERO_MODULES",
        /// More Android modules were requested than the project has modules.
        TooManyAndroidModules => TooManyAndroidModules { .. } => "CONFIG_TOO_MANY_ANDROID_MODULES",
        /// The graph handed to the partitioner was built for another module count.
        GraphSizeMismatch => GraphSizeMismatch { .. } => "CONFIG_GRAPH_SIZE_MISMATCH",
    }
}

impl ConfigError {
    /// Builds a [`ConfigError::InvalidParameter`] for `name` holding `value`.
    ///
    /// # Examples
    /// ```
    /// use modforge_core::{ConfigError, ConfigErrorCode};
    ///
    /// let err = ConfigError::invalid_parameter("seed", "abc", "expected an integer");
    /// assert_eq!(err.code(), ConfigErrorCode::InvalidParameter);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "parameter `seed` has invalid value `abc`: expected an integer"
    /// );
    /// ```
    #[must_use]
    pub fn invalid_parameter(
        name: impl Into<Arc<str>>,
        value: impl Into<Arc<str>>,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.into(),
            reason,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ConfigError>;
