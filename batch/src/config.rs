//! Batch execution settings.

use core::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::BatchError;

/// Scalar multiplication algorithm run on each lane.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Method {
    /// Double-and-add, one bit at a time.
    Binary,
    /// Fixed 4-bit windows over a per-item table.
    Windowed,
}

impl FromStr for Method {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(Method::Binary),
            "windowed" | "window" => Ok(Method::Windowed),
            _ => Err(BatchError::InvalidConfig("unknown method")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub method: Method,
    /// Spread items over worker threads at all.
    pub parallel: bool,
    /// Smallest batch that is worth dispatching in parallel.
    pub par_min: usize,
    /// Size of a dedicated worker pool. `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            method: Method::Windowed,
            parallel: true,
            par_min: 64,
            threads: None,
        }
    }
}

impl BatchConfig {
    /// Defaults overridden by `ECLOOP_BATCH_METHOD`, `ECLOOP_BATCH_PARALLEL`,
    /// `ECLOOP_BATCH_PAR_MIN` and `ECLOOP_BATCH_THREADS`. Unparseable values
    /// are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = BatchConfig::default();

        if let Some(method) = env_value::<Method>("ECLOOP_BATCH_METHOD") {
            config.method = method;
        }
        if let Ok(v) = std::env::var("ECLOOP_BATCH_PARALLEL") {
            config.parallel = !(v == "0" || v.eq_ignore_ascii_case("false"));
        }
        if let Some(par_min) = env_value::<usize>("ECLOOP_BATCH_PAR_MIN") {
            config.par_min = par_min;
        }
        config.threads = env_value::<usize>("ECLOOP_BATCH_THREADS").filter(|v| *v > 0);

        config
    }

    pub fn sequential() -> Self {
        BatchConfig {
            parallel: false,
            ..BatchConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), BatchError> {
        if self.threads == Some(0) {
            return Err(BatchError::InvalidConfig("thread count must be positive"));
        }
        Ok(())
    }

    /// Whether a batch of `len` items runs on more than one lane.
    pub fn dispatch_parallel(&self, len: usize) -> bool {
        self.parallel && len >= self.par_min.max(1) && len > 1
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {name}={raw:?}: not a valid value");
            None
        }
    }
}
