//! Cache configuration

use serde::{Deserialize, Serialize};

use crate::cache::StringCache;
use crate::error::{Error, Result};

/// Environment variable read by [`CacheConfig::from_env`]
pub const CAPACITY_ENV: &str = "LRUCACHE_CAPACITY";

/// Default cache capacity (number of items)
pub const DEFAULT_CAPACITY: usize = 10_000;

/// Settings for building a [`StringCache`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Config with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Read capacity from `LRUCACHE_CAPACITY`, falling back to the default
    /// when the variable is unset
    pub fn from_env() -> Result<Self> {
        match std::env::var(CAPACITY_ENV) {
            Ok(raw) => Ok(Self::new(parse_capacity(&raw)?)),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(Error::InvalidConfig(format!("{}: {}", CAPACITY_ENV, e))),
        }
    }

    /// Build an empty cache from this config
    pub fn build(&self) -> Result<StringCache> {
        StringCache::new(self.capacity)
    }
}

/// Parse a capacity from text
///
/// Zero and negative numbers yield `Error::InvalidCapacity`; anything that is
/// not an integer yields `Error::InvalidConfig`.
pub fn parse_capacity(raw: &str) -> Result<usize> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|e| Error::InvalidConfig(format!("capacity {:?}: {}", raw, e)))?;

    if value <= 0 {
        return Err(Error::InvalidCapacity);
    }

    usize::try_from(value).map_err(|_| Error::InvalidConfig(format!("capacity {} out of range", value)))
}
