//! TCP reachability probing.
//!
//! Probes whether anything accepts a TCP connection at an address. A
//! successful connect is `Up`, a refused or timed-out connect is `Down`,
//! and a name that does not resolve is `NotFound`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::net::{lookup_host, TcpStream};

use healthwatch_sdk::{
    Instrumentor, InstrumentorError, Kind, Params, Probe, Registry, Scanner, Sensor, Status,
};

use crate::{ProbeError, NAMESPACE};

/// Probe for TCP reachability of a `host:port` address.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: String,
    timeout: Duration,
}

impl TcpProbe {
    /// Probe the given `host:port` with the default 5 second timeout.
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Set the connect timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn connect(&self) -> Result<Status, ProbeError> {
        let mut addrs = lookup_host(&self.addr)
            .await
            .map_err(|err| ProbeError::Resolution(err.to_string()))?;
        let Some(addr) = addrs.next() else {
            return Err(ProbeError::Resolution(format!(
                "{} resolved to no addresses",
                self.addr
            )));
        };

        match TcpStream::connect(addr).await {
            Ok(_) => Ok(Status::Up),
            Err(err) => Err(ProbeError::Connection(err.to_string())),
        }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn measure(&self) -> Status {
        let outcome = match tokio::time::timeout(self.timeout, self.connect()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout),
        };
        match outcome {
            Ok(status) => status,
            Err(err) => {
                tracing::debug!(addr = %self.addr, error = %err, "tcp probe failed");
                match err {
                    ProbeError::Resolution(_) => Status::NotFound,
                    _ => Status::Down,
                }
            }
        }
    }
}

/// Parameters accepted by [`TcpInstrumentor`].
#[derive(Debug, Deserialize)]
struct PortParams {
    name: String,
    addr: String,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

/// Instrumentor turning `host:port` descriptions into sensors.
///
/// Registers for `healthwatch.io/tcp/port` and expects parameters of the
/// form `{ "name": ..., "addr": ..., "timeout_ms": ... }`.
#[derive(Debug, Default)]
pub struct TcpInstrumentor;

impl TcpInstrumentor {
    /// The kind this instrumentor claims.
    pub fn kind() -> Kind {
        Kind::new(NAMESPACE, "tcp/port")
    }
}

impl Instrumentor for TcpInstrumentor {
    fn registrations(&self) -> Vec<Kind> {
        vec![Self::kind()]
    }

    fn instrument(
        &self,
        _registry: &Registry,
        kind: &Kind,
        params: &Params,
    ) -> Result<Vec<Arc<Scanner>>, InstrumentorError> {
        let port: PortParams = serde_json::from_value(params.clone()).map_err(|err| {
            InstrumentorError::InvalidParams {
                kind: kind.clone(),
                reason: err.to_string(),
            }
        })?;

        let mut probe = TcpProbe::new(port.addr);
        if let Some(ms) = port.timeout_ms {
            probe = probe.with_timeout(Duration::from_millis(ms));
        }

        Ok(vec![Sensor::new(port.name, probe)])
    }
}
