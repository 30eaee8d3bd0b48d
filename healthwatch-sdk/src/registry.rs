//! Routing of instrumentation requests to instrumentors.
//!
//! Instrumentors convert an external system into sensors, systems, and
//! services. For example: transforming Grafana dashboards into services
//! with alerts as their sensors, creating a system for a virtual machine
//! with sensors checking memory, CPU, and disk space, or transforming
//! Kubernetes objects into systems based on their dependent resources.
//!
//! The [`Registry`] is a plain keyed lookup with an explicit two-phase
//! lifecycle: populate it at startup with `&mut` registration calls, then
//! share it read-only for the whole evaluation phase.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

use healthwatch_types::{Combinator, Kind};

use crate::error::InstrumentorError;
use crate::scanner::{Scanner, System};

/// Free-form parameters passed through to an instrumentor, e.g. which
/// object to instrument.
pub type Params = serde_json::Value;

/// Builds scanners for one or more [`Kind`]s of external resource.
pub trait Instrumentor: Send + Sync {
    /// The kinds this instrumentor should be registered for.
    fn registrations(&self) -> Vec<Kind>;

    /// Build scanners for an instance of `kind`.
    ///
    /// The registry is passed back in so an instrumentor can delegate
    /// subresources to whatever is registered for their kinds.
    fn instrument(
        &self,
        registry: &Registry,
        kind: &Kind,
        params: &Params,
    ) -> Result<Vec<Arc<Scanner>>, InstrumentorError>;
}

enum Registration {
    Single(Arc<dyn Instrumentor>),
    /// Several instrumentors claimed the same kind; their outputs are
    /// composed under one all-children-required system.
    Composite(Vec<Arc<dyn Instrumentor>>),
}

/// Namespace+name keyed dispatch from resource kinds to instrumentors.
#[derive(Default)]
pub struct Registry {
    instrumentors: BTreeMap<Kind, Registration>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instrumentor for a kind.
    ///
    /// If the kind is already claimed, the registrations are merged: both
    /// instrumentors run and their scanners are wrapped in a single
    /// system named after the kind.
    pub fn register(&mut self, kind: Kind, instrumentor: Arc<dyn Instrumentor>) {
        match self.instrumentors.entry(kind) {
            Entry::Vacant(entry) => {
                entry.insert(Registration::Single(instrumentor));
            }
            Entry::Occupied(mut entry) => {
                let merged = match entry.get_mut() {
                    Registration::Single(existing) => {
                        Some(vec![Arc::clone(existing), instrumentor])
                    }
                    Registration::Composite(members) => {
                        members.push(instrumentor);
                        None
                    }
                };
                if let Some(members) = merged {
                    entry.insert(Registration::Composite(members));
                }
            }
        }
    }

    /// Register an instrumentor for every kind it claims.
    pub fn register_all(&mut self, instrumentor: Arc<dyn Instrumentor>) {
        for kind in instrumentor.registrations() {
            self.register(kind, Arc::clone(&instrumentor));
        }
    }

    /// Merge all registrations from another registry into this one.
    pub fn extend(&mut self, other: Registry) {
        for (kind, registration) in other.instrumentors {
            match registration {
                Registration::Single(instrumentor) => self.register(kind, instrumentor),
                Registration::Composite(members) => {
                    for member in members {
                        self.register(kind.clone(), member);
                    }
                }
            }
        }
    }

    /// Whether any instrumentor is registered for a kind.
    pub fn is_registered(&self, kind: &Kind) -> bool {
        self.instrumentors.contains_key(kind)
    }

    /// The kinds currently registered, in order.
    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.instrumentors.keys()
    }

    /// Instrument an external entity, producing scanners for it.
    pub fn instrument(
        &self,
        kind: &Kind,
        params: &Params,
    ) -> Result<Vec<Arc<Scanner>>, InstrumentorError> {
        match self.instrumentors.get(kind) {
            None => Err(InstrumentorError::NotRegistered(kind.clone())),
            Some(Registration::Single(instrumentor)) => instrumentor.instrument(self, kind, params),
            Some(Registration::Composite(members)) => {
                let mut scanners = Vec::new();
                for member in members {
                    scanners.extend(member.instrument(self, kind, params)?);
                }
                let composed = System::new(kind.to_string(), Combinator::All, scanners)?;
                Ok(vec![composed])
            }
        }
    }
}
