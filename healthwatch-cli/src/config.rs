//! Service definitions and tree construction.
//!
//! A config file describes one service, the systems it is composed of,
//! and the leaf checks inside each system. Leaf checks are routed
//! through the instrumentor registry, so the file format and the
//! programmatic API build identical trees.
//!
//! ```toml
//! [service]
//! name = "shop"
//!
//! [[service.systems]]
//! name = "web"
//! mode = "all"
//!
//! [[service.systems.checks]]
//! type = "http"
//! name = "homepage"
//! url = "https://shop.example.com/healthz"
//!
//! [[service.systems]]
//! name = "cache"
//! mode = "any"
//!
//! [[service.systems.checks]]
//! type = "tcp"
//! name = "redis-1"
//! addr = "redis-1.example.com:6379"
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use serde_json::json;

use healthwatch_instrumentors::http::HttpInstrumentor;
use healthwatch_instrumentors::tcp::TcpInstrumentor;
use healthwatch_sdk::{Combinator, Registry, Scanner, Sensor, Service, Status, System};

/// Top level of a service definition file.
#[derive(Debug, Deserialize)]
pub struct RootConfig {
    /// The single service this file describes.
    pub service: ServiceConfig,
}

/// A service and the systems it is composed of.
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    /// Service name, used as the root of the rendered tree.
    pub name: String,
    /// How system verdicts combine (default: all required).
    #[serde(default)]
    pub mode: Mode,
    /// The systems making up this service.
    #[serde(default)]
    pub systems: Vec<SystemConfig>,
    /// Checks attached directly to the service, outside any system.
    #[serde(default)]
    pub checks: Vec<CheckConfig>,
}

/// A system and its leaf checks.
#[derive(Debug, Deserialize)]
pub struct SystemConfig {
    /// System name.
    pub name: String,
    /// How check verdicts combine (default: all required).
    #[serde(default)]
    pub mode: Mode,
    /// The checks inside this system.
    pub checks: Vec<CheckConfig>,
}

/// Config-file spelling of a combinator.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Every member must be up.
    #[default]
    All,
    /// One healthy member suffices.
    Any,
}

impl From<Mode> for Combinator {
    fn from(mode: Mode) -> Combinator {
        match mode {
            Mode::All => Combinator::All,
            Mode::Any => Combinator::Any,
        }
    }
}

/// One leaf check.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckConfig {
    /// Probe an HTTP health endpoint.
    Http {
        name: String,
        url: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
    /// Probe TCP reachability of a `host:port`.
    Tcp {
        name: String,
        addr: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },
    /// A fixed verdict, useful for annotations and testing.
    Static { name: String, status: Status },
}

/// Load a service definition from a TOML or JSON file.
pub fn load(path: &Path) -> anyhow::Result<RootConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .with_context(|| format!("failed to read config {}", path.display()))?;
    settings
        .try_deserialize()
        .with_context(|| format!("invalid service definition in {}", path.display()))
}

/// The registry of built-in instrumentors the CLI routes checks through.
pub fn default_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register_all(Arc::new(HttpInstrumentor));
    registry.register_all(Arc::new(TcpInstrumentor));
    registry
}

/// Build the scanner tree a service definition describes.
pub fn build_tree(cfg: &RootConfig) -> anyhow::Result<Arc<Scanner>> {
    let registry = default_registry();

    let mut children: Vec<Arc<Scanner>> = Vec::new();
    for system in &cfg.service.systems {
        let mut members = Vec::new();
        for check in &system.checks {
            members.extend(build_check(&registry, check)?);
        }
        children.push(System::new(&*system.name, system.mode.into(), members)?);
    }
    for check in &cfg.service.checks {
        children.extend(build_check(&registry, check)?);
    }

    Ok(Service::new(
        &*cfg.service.name,
        cfg.service.mode.into(),
        children,
    )?)
}

fn build_check(registry: &Registry, check: &CheckConfig) -> anyhow::Result<Vec<Arc<Scanner>>> {
    let scanners = match check {
        CheckConfig::Http {
            name,
            url,
            timeout_ms,
        } => registry.instrument(
            &HttpInstrumentor::kind(),
            &json!({ "name": name, "url": url, "timeout_ms": timeout_ms }),
        )?,
        CheckConfig::Tcp {
            name,
            addr,
            timeout_ms,
        } => registry.instrument(
            &TcpInstrumentor::kind(),
            &json!({ "name": name, "addr": addr, "timeout_ms": timeout_ms }),
        )?,
        CheckConfig::Static { name, status } => vec![Sensor::constant(&**name, *status)],
    };
    Ok(scanners)
}
