//! # healthwatch-cli
//!
//! Command-line front end for healthwatch.
//!
//! Reads a service definition (TOML or JSON), builds the scanner tree
//! through the instrumentor registry, evaluates one report, and renders
//! it to the console or as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Evaluate the tree described in healthwatch.toml
//! healthwatch --config healthwatch.toml
//!
//! # Machine-readable output, failing subtrees only
//! healthwatch --config shop.toml --format json --show failing
//!
//! # Zoom in on part of the tree (* is a wildcard segment)
//! healthwatch --config shop.toml --path 'shop/*/postgres'
//! ```
//!
//! Exit codes: `0` when the root verdict is up, `1` when it is down or
//! not found, `2` when the evaluation itself failed and no verdict could
//! be determined.

pub mod config;
pub mod visualiser;
