//! Seeded random sources for the randomised topologies.
//!
//! Every randomised topology builds its own generator from the `seed`
//! parameter, so two passes in one configuration never share state and a
//! given seed always replays the same coin flips.

use rand::{SeedableRng, rngs::StdRng};

use crate::{Result, error::ConfigError, topology::TopologyParameters};

/// Parameter key holding the seed of a randomised topology.
pub const SEED_PARAMETER: &str = "seed";

/// Seed used when a topology does not specify one.
pub const DEFAULT_SEED: i64 = 0;

/// Random source handed to the randomised topology generators.
pub type TopologyRng = StdRng;

/// Reads the `seed` parameter, falling back to [`DEFAULT_SEED`] when absent.
///
/// # Errors
/// Returns [`ConfigError::InvalidParameter`] when `seed` is present but is not
/// a base-10 `i64`.
///
/// # Examples
/// ```
/// use modforge_core::{TopologyParameters, seed_from};
///
/// let params = TopologyParameters::new().with("seed", "42");
/// assert_eq!(seed_from(&params).expect("seed parses"), 42);
/// assert_eq!(seed_from(&TopologyParameters::new()).expect("default"), 0);
/// assert!(seed_from(&TopologyParameters::new().with("seed", "x")).is_err());
/// ```
pub fn seed_from(parameters: &TopologyParameters) -> Result<i64> {
    let Some(raw) = parameters.get(SEED_PARAMETER) else {
        return Ok(DEFAULT_SEED);
    };
    raw.parse::<i64>()
        .map_err(|_| ConfigError::invalid_parameter(SEED_PARAMETER, raw, "expected an integer"))
}

/// Builds the random source for a topology pass from its parameters.
///
/// # Errors
/// Propagates the failures of [`seed_from`].
pub fn random_for(parameters: &TopologyParameters) -> Result<TopologyRng> {
    seed_from(parameters).map(rng_from_seed)
}

pub(crate) fn rng_from_seed(seed: i64) -> TopologyRng {
    StdRng::seed_from_u64(seed.cast_unsigned())
}
