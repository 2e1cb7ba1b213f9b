//! Conditional fan-out of independent computations.
//!
//! Uses rayon when the `parallel` feature is enabled and the config allows it
//! for the snapshot size. Every closure reads the shared snapshot and returns
//! its own value, so the results combine without locking or ordering.

use crate::config::EngineConfig;

/// Runs `a` and `b`, concurrently when the config allows it for `count` records.
#[allow(unused_variables)]
pub(crate) fn maybe_join<A, B, RA, RB>(config: &EngineConfig, count: usize, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        if config.should_parallelize(count) {
            return rayon::join(a, b);
        }
    }

    (a(), b())
}
