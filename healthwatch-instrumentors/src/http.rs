//! HTTP endpoint probing.
//!
//! Probes a health endpoint with a GET request and maps the response to a
//! verdict: any 2xx is `Up`, a 404 is `NotFound` (the endpoint does not
//! exist), everything else - including transport failures and timeouts -
//! is `Down`. Nothing escapes the probe as an error.
//!
//! ## Example
//!
//! ```rust,no_run
//! use healthwatch_instrumentors::http::HttpProbe;
//! use healthwatch_sdk::{Sensor, Status};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let probe = HttpProbe::builder()
//!         .url("https://example.com/healthz")
//!         .timeout(Duration::from_secs(5))
//!         .build();
//!
//!     let sensor = Sensor::new("homepage", probe);
//!     println!("homepage is {}", sensor.status().await?);
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use healthwatch_sdk::{
    Instrumentor, InstrumentorError, Kind, Params, Probe, Registry, Scanner, Sensor, Status,
};

use crate::{ProbeError, NAMESPACE};

/// Probe for an HTTP health endpoint.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    url: String,
    auth: Option<(String, String)>,
}

impl HttpProbe {
    /// Create a new builder for configuring the probe.
    pub fn builder() -> HttpProbeBuilder {
        HttpProbeBuilder::default()
    }

    async fn check(&self) -> Result<Status, ProbeError> {
        let mut request = self.client.get(&self.url);
        if let Some((username, password)) = &self.auth {
            request = request.basic_auth(username, Some(password));
        }
        let response = request.send().await?;
        Ok(classify(response.status()))
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn measure(&self) -> Status {
        match self.check().await {
            Ok(status) => status,
            Err(err) => {
                tracing::debug!(url = %self.url, error = %err, "http probe failed");
                Status::Down
            }
        }
    }
}

/// Map an HTTP response code to a verdict.
fn classify(code: StatusCode) -> Status {
    if code == StatusCode::NOT_FOUND {
        Status::NotFound
    } else {
        Status::from_bool(code.is_success())
    }
}

/// Builder for [`HttpProbe`].
#[derive(Debug, Default)]
pub struct HttpProbeBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
    auth: Option<(String, String)>,
}

impl HttpProbeBuilder {
    /// Set the endpoint URL to probe.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the request timeout (default: 10 seconds). A timed-out probe
    /// resolves to `Down`; it never hangs the evaluation.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set basic-auth credentials for the endpoint.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some((username.into(), password.into()));
        self
    }

    /// Build the probe.
    pub fn build(self) -> HttpProbe {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        HttpProbe {
            client,
            url: self.url.unwrap_or_else(|| "http://localhost/".to_string()),
            auth: self.auth,
        }
    }
}

/// Parameters accepted by [`HttpInstrumentor`].
#[derive(Debug, Deserialize)]
struct EndpointParams {
    name: String,
    url: String,
    #[serde(default)]
    timeout_ms: Option<u64>,
}

/// Instrumentor turning HTTP endpoint descriptions into sensors.
///
/// Registers for `healthwatch.io/http/endpoint` and expects parameters
/// of the form `{ "name": ..., "url": ..., "timeout_ms": ... }`.
#[derive(Debug, Default)]
pub struct HttpInstrumentor;

impl HttpInstrumentor {
    /// The kind this instrumentor claims.
    pub fn kind() -> Kind {
        Kind::new(NAMESPACE, "http/endpoint")
    }
}

impl Instrumentor for HttpInstrumentor {
    fn registrations(&self) -> Vec<Kind> {
        vec![Self::kind()]
    }

    fn instrument(
        &self,
        _registry: &Registry,
        kind: &Kind,
        params: &Params,
    ) -> Result<Vec<Arc<Scanner>>, InstrumentorError> {
        let endpoint: EndpointParams =
            serde_json::from_value(params.clone()).map_err(|err| {
                InstrumentorError::InvalidParams {
                    kind: kind.clone(),
                    reason: err.to_string(),
                }
            })?;

        let mut builder = HttpProbe::builder().url(&endpoint.url);
        if let Some(ms) = endpoint.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(vec![Sensor::new(endpoint.name, builder.build())])
    }
}
