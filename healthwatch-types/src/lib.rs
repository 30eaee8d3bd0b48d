//! # healthwatch-types
//!
//! Core types for infrastructure health scanning. This crate defines the
//! status algebra and lookup keys shared by the healthwatch engine, its
//! instrumentors, and any renderer of scan results.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: the algebra works without any
//!   serialization framework
//! - **Optional serialization**: enable the `serde` feature as needed
//! - **Closed vocabulary**: a health verdict is `Up`, `Down`, or the
//!   `NotFound` refinement of `Down` - nothing else
//!
//! ## Example
//!
//! ```rust
//! use healthwatch_types::{Combinator, Status};
//!
//! // AND-reduce: every member must be up
//! let all = Combinator::All.reduce([Status::Up, Status::Down, Status::Up]);
//! assert_eq!(all, Some(Status::Down));
//!
//! // OR-reduce: one healthy member suffices
//! let any = Combinator::Any.reduce([Status::Down, Status::Up]);
//! assert_eq!(any, Some(Status::Up));
//! ```

mod combinator;
mod kind;
mod status;

pub use combinator::*;
pub use kind::*;
pub use status::*;
