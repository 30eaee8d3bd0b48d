//! # healthwatch-sdk
//!
//! The scanner evaluation engine for healthwatch.
//!
//! Infrastructure health is modelled as a tree of scanners: a [`Sensor`]
//! is a leaf that probes one thing in the outside world, a [`System`]
//! composes scanners into a logical unit of infrastructure and derives its
//! health from theirs, and a [`Service`] marks a composite as an
//! externally consumable capability. Evaluating any node is a fresh,
//! fully concurrent pass over everything below it.
//!
//! ## Quick Start
//!
//! ```rust
//! use healthwatch_sdk::{Combinator, Sensor, Service, Status, System};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // A web tier that needs every check healthy, next to a cache
//!     // where one reachable replica suffices.
//!     let web = System::all("web", vec![
//!         Sensor::up("homepage"),
//!         Sensor::up("api"),
//!     ])?;
//!     let cache = System::any("cache", vec![
//!         Sensor::down("replica-1"),
//!         Sensor::up("replica-2"),
//!     ])?;
//!
//!     let shop = Service::new("shop", Combinator::All, vec![web, cache])?;
//!     assert_eq!(shop.status().await?, Status::Up);
//!     Ok(())
//! }
//! ```
//!
//! ## Evaluation contract
//!
//! - `status()` never caches: every call re-probes from that node down.
//! - Composites fan out to all children concurrently and wait for every
//!   verdict; a slow child bounds latency, it does not serialize it.
//! - A probe that cannot reach its target reports [`Status::Down`] (or
//!   [`Status::NotFound`]); only a failure of the evaluation machinery
//!   itself surfaces as a [`ScanError`], so callers can tell "the service
//!   is down" apart from "I could not determine whether it is down".
//! - Child order in [`Report`]s always matches construction order, no
//!   matter which probe finishes first.

mod error;
mod probe;
mod registry;
mod report;
mod scanner;

pub use error::{BuildError, FindError, InstrumentorError, ScanError};
pub use probe::{Constant, FnProbe, Probe};
pub use registry::{Instrumentor, Params, Registry};
pub use report::{NodeKind, Report};
pub use scanner::{Scanner, Sensor, Service, System};

// Re-export types for convenience
pub use healthwatch_types::{Combinator, Kind, Status};
