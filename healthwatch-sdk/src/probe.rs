//! The measurement seam between sensors and the outside world.

use std::future::Future;

use async_trait::async_trait;
use healthwatch_types::Status;

/// A measurement capability backing a [`Sensor`].
///
/// Instrumentors supply probes at sensor construction: an HTTP call, a
/// lookup against a cached API snapshot, a constant. One `measure` call
/// performs exactly one measurement; nothing is cached on the probe's
/// behalf.
///
/// A probe owns its failure translation. If the target cannot be reached
/// it must resolve to [`Status::Down`], and if the target does not exist,
/// to [`Status::NotFound`] - never hang indefinitely or panic across the
/// scanner boundary.
///
/// [`Sensor`]: crate::Sensor
#[async_trait]
pub trait Probe: Send + Sync {
    /// Perform one measurement and report the verdict.
    async fn measure(&self) -> Status;
}

/// A probe that always reports the same verdict.
///
/// Useful for sensors whose status is determined elsewhere, e.g. an
/// instrumentor that has already fetched an alert's firing state.
#[derive(Debug, Clone, Copy)]
pub struct Constant(pub Status);

#[async_trait]
impl Probe for Constant {
    async fn measure(&self) -> Status {
        self.0
    }
}

/// Adapter turning an async closure into a [`Probe`].
///
/// ```rust
/// use healthwatch_sdk::{FnProbe, Probe, Status};
///
/// # #[tokio::main] async fn main() {
/// let probe = FnProbe(|| async { Status::Up });
/// assert_eq!(probe.measure().await, Status::Up);
/// # }
/// ```
pub struct FnProbe<F>(pub F);

#[async_trait]
impl<F, Fut> Probe for FnProbe<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Status> + Send,
{
    async fn measure(&self) -> Status {
        (self.0)().await
    }
}
