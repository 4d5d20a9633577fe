//   Copyright (c) 2024-2026 Anton Kundenko <singaraiona@gmail.com>
//   All rights reserved.
//
//   Permission is hereby granted, free of charge, to any person obtaining a copy
//   of this software and associated documentation files (the "Software"), to deal
//   in the Software without restriction, including without limitation the rights
//   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//   copies of the Software, and to permit persons to whom the Software is
//   furnished to do so, subject to the following conditions:
//
//   The above copyright notice and this permission notice shall be included in all
//   copies or substantial portions of the Software.
//
//   THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//   SOFTWARE.

//! Evaluation-time configuration: `⎕CT`, `⎕IO`, and the parallel dispatch
//! thresholds.
//!
//! An interpreter traditionally reads these from global system-variable
//! storage. This core is a library embedded by a host that owns that
//! storage, so every entry point takes a `&Config` (directly, or via
//! [`EvalCtx`]) instead of reading ambient global state.

/// Default comparison tolerance, matching the conventional default `⎕CT`.
pub const DEFAULT_CT: f64 = 1e-13;

/// Maximum permitted comparison tolerance: `⎕CT ∈ [0, 2⁻³²]`.
pub const MAX_CT: f64 = 1.0 / 4294967296.0;

/// Default number of elements below which reduce/scan/inner/outer product
/// dispatch never splits work across a worker pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64 * 1024;

/// Evaluation-time configuration threaded through every primitive and
/// operator call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Comparison tolerance (`⎕CT`). Clamped to `[0, MAX_CT]` on construction.
    pub ct: f64,
    /// Index origin (`⎕IO`): `0` or `1`.
    pub io: i64,
    /// Result-volume threshold above which a monadic scalar primitive may
    /// dispatch to the worker pool (feature `parallel` only).
    pub parallel_threshold_monadic: usize,
    /// Same, for dyadic scalar primitives and the scalar fast path of
    /// inner/outer product.
    pub parallel_threshold_dyadic: usize,
    /// Number of worker threads; `0` lets the pool auto-detect.
    pub worker_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ct: DEFAULT_CT,
            io: 1,
            parallel_threshold_monadic: DEFAULT_PARALLEL_THRESHOLD,
            parallel_threshold_dyadic: DEFAULT_PARALLEL_THRESHOLD,
            worker_count: 0,
        }
    }
}

impl Config {
    /// Build a `Config`, clamping `ct` into `[0, MAX_CT]`.
    pub fn new(ct: f64, io: i64) -> Self {
        Config {
            ct: ct.clamp(0.0, MAX_CT),
            io,
            ..Config::default()
        }
    }

    /// True if a monadic scalar primitive producing `result_volume` cells
    /// should use the worker pool under the current thresholds.
    pub fn should_parallelize_monadic(&self, result_volume: usize) -> bool {
        cfg!(feature = "parallel") && result_volume > self.parallel_threshold_monadic
    }

    /// Same, for dyadic scalar primitives.
    pub fn should_parallelize_dyadic(&self, result_volume: usize) -> bool {
        cfg!(feature = "parallel") && result_volume > self.parallel_threshold_dyadic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ct_is_clamped() {
        let cfg = Config::new(10.0, 1);
        assert!(cfg.ct <= MAX_CT);
        let cfg = Config::new(-1.0, 1);
        assert_eq!(cfg.ct, 0.0);
    }

    #[test]
    fn default_io_is_one() {
        assert_eq!(Config::default().io, 1);
    }
}
