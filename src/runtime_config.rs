//! # Runtime Configuration Module
//!
//! Environment variable based configuration for request building.
//!
//! ## Environment Variables
//!
//! ### `REQWIRE_MAX_REF_DEPTH`
//!
//! Bounds how many `$ref` pointers one resolution chain may follow before
//! the build aborts with a reference-cycle error. Accepts values in:
//! - Decimal: `32`
//! - Hexadecimal: `0x20`
//!
//! Default: `32`
//!
//! Documents are author-controlled but not always author-trusted; the cap
//! keeps a pathologically nested (yet acyclic) components section from
//! stalling a build.
//!
//! ## Usage
//!
//! ```rust
//! use reqwire::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Max ref depth: {}", config.max_ref_depth);
//! ```

use crate::resolver::DEFAULT_MAX_REF_DEPTH;
use std::env;

/// Runtime configuration loaded from environment variables.
///
/// Load this at startup using [`RuntimeConfig::from_env()`].
#[derive(Debug, Clone, Copy)]
pub struct RuntimeConfig {
    /// Reference-chain depth bound (default: 32)
    pub max_ref_depth: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let max_ref_depth = match env::var("REQWIRE_MAX_REF_DEPTH") {
            Ok(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(DEFAULT_MAX_REF_DEPTH)
                } else {
                    val.parse().unwrap_or(DEFAULT_MAX_REF_DEPTH)
                }
            }
            Err(_) => DEFAULT_MAX_REF_DEPTH,
        };
        RuntimeConfig { max_ref_depth }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            max_ref_depth: DEFAULT_MAX_REF_DEPTH,
        }
    }
}
