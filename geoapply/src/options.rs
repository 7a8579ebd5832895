//! Options of an apply call.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Scheduling mode of an apply call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "mode")]
pub enum Threading {
    /// Everything runs on the calling thread as one unit.
    #[default]
    Sequential,
    /// Top-level parts are split into `workers` contiguous chunks, each processed as one unit on the `rayon` pool.
    Parallel {
        /// Number of concurrency units.
        workers: NonZeroUsize,
    },
}

impl Threading {
    /// Parallel mode with the given number of units. Zero units means sequential execution.
    pub fn parallel(workers: usize) -> Self {
        match NonZeroUsize::new(workers) {
            Some(workers) => Self::Parallel { workers },
            None => Self::Sequential,
        }
    }

    /// Parallel mode with one unit per thread of the current `rayon` pool.
    pub fn available() -> Self {
        Self::parallel(rayon::current_num_threads())
    }

    /// Number of concurrency units the call is split into.
    pub fn units(&self) -> usize {
        match self {
            Threading::Sequential => 1,
            Threading::Parallel { workers } => workers.get(),
        }
    }
}

/// Options of an apply call.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApplyOptions {
    /// Scheduling mode.
    pub threading: Threading,
    /// If set, the bounding rectangle of all transformed nodes is computed during the traversal.
    pub calc_extent: bool,
}

impl ApplyOptions {
    /// Sets the scheduling mode.
    pub fn with_threading(mut self, threading: Threading) -> Self {
        self.threading = threading;
        self
    }

    /// Enables or disables extent calculation.
    pub fn with_extent(mut self, calc_extent: bool) -> Self {
        self.calc_extent = calc_extent;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units() {
        assert_eq!(Threading::Sequential.units(), 1);
        assert_eq!(Threading::parallel(4).units(), 4);
        assert_eq!(Threading::parallel(0), Threading::Sequential);
    }

    #[test]
    fn serde_round_trip() {
        let options = ApplyOptions::default()
            .with_threading(Threading::parallel(3))
            .with_extent(true);
        let json = serde_json::to_string(&options).expect("serialization failed");
        assert_eq!(
            json,
            r#"{"threading":{"mode":"Parallel","workers":3},"calc_extent":true}"#
        );

        let options: ApplyOptions =
            serde_json::from_str(r#"{"calc_extent":true}"#).expect("deserialization failed");
        assert_eq!(options.threading, Threading::Sequential);
        assert!(options.calc_extent);
    }
}
