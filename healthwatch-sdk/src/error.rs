//! Error types for the scanner engine.

use healthwatch_types::Kind;
use thiserror::Error;

/// Errors raised while building a scanner tree.
///
/// Malformed trees are rejected at construction, before any evaluation
/// begins; they are never a per-call runtime condition.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A composite scanner was given no children. There is no sensible
    /// default verdict for it.
    #[error("composite scanner {name:?} must have at least one child")]
    EmptyComposite {
        /// Name of the offending composite.
        name: String,
    },
}

/// Failure of an evaluation pass itself, as opposed to an unhealthy
/// verdict.
///
/// Probes translate their own failures into [`Status::Down`] or
/// [`Status::NotFound`]; a `ScanError` means the engine could not
/// determine a verdict at all (e.g. a child evaluation task panicked).
///
/// [`Status::Down`]: healthwatch_types::Status::Down
/// [`Status::NotFound`]: healthwatch_types::Status::NotFound
#[derive(Debug, Error)]
pub enum ScanError {
    /// A child evaluation task failed to complete.
    #[error("child evaluation failed: {0}")]
    Evaluation(String),

    /// A composite scanner had no child verdicts to reduce. Unreachable
    /// for trees built through the public constructors, which reject
    /// empty composites.
    #[error("composite scanner {0:?} has no children")]
    NoChildren(String),
}

impl From<tokio::task::JoinError> for ScanError {
    fn from(err: tokio::task::JoinError) -> Self {
        ScanError::Evaluation(err.to_string())
    }
}

/// Errors raised by the instrumentor registry.
#[derive(Debug, Error)]
pub enum InstrumentorError {
    /// No instrumentor has been registered for the requested kind.
    #[error("no instrumentor registered for kind {0}")]
    NotRegistered(Kind),

    /// An instrumentor failed to build scanners for a resource.
    #[error("failed to instrument {kind}: {reason}")]
    Failed {
        /// Kind that was being instrumented.
        kind: Kind,
        /// Human-readable failure cause.
        reason: String,
    },

    /// The parameters supplied for a kind did not match what its
    /// instrumentor expects.
    #[error("invalid parameters for {kind}: {reason}")]
    InvalidParams {
        /// Kind that was being instrumented.
        kind: Kind,
        /// What was wrong with the parameters.
        reason: String,
    },

    /// An instrumentor produced a malformed scanner tree.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// A path lookup over a report tree did not match anything.
#[derive(Debug, Error)]
pub enum FindError {
    /// No scanner with the requested name at this path segment.
    #[error("no scanner named {segment:?} at path segment {index}")]
    NotFound {
        /// The segment that failed to match.
        segment: String,
        /// Zero-based index of the segment within the path.
        index: usize,
    },
}
