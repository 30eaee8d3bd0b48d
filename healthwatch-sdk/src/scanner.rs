//! Sensors, systems, and services - the scanner tree and its evaluation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use healthwatch_types::{Combinator, Status};

use crate::error::{BuildError, ScanError};
use crate::probe::{Constant, Probe};
use crate::report::{NodeKind, Report};

/// A node in the health tree.
///
/// The set of node kinds is closed: a [`Sensor`] is a leaf backed by a
/// probe, a [`System`] derives health from an ordered set of children via
/// its combinator, and a [`Service`] is shaped like a system but marks an
/// externally consumable capability. Consumers should dispatch on the
/// variant only to choose labels or icons, never to derive health.
///
/// Children are shared by `Arc`, so a scanner may appear under several
/// parents (the tree is really a DAG - a shared database dependency is
/// one node, not a copy per consumer). Nothing in a scanner is mutable
/// after construction, which also makes cycles unconstructible.
#[derive(Debug)]
pub enum Scanner {
    /// Leaf node measuring one thing in the outside world.
    Sensor(Sensor),
    /// Composite node deriving health from its children.
    System(System),
    /// Composite node marking a capability boundary.
    Service(Service),
}

impl Scanner {
    /// The scanner's human-readable name. Stable, not required unique.
    pub fn name(&self) -> &str {
        match self {
            Scanner::Sensor(sensor) => &sensor.name,
            Scanner::System(system) => &system.name,
            Scanner::Service(service) => &service.name,
        }
    }

    /// Which kind of node this is, for presentation purposes.
    pub fn kind(&self) -> NodeKind {
        match self {
            Scanner::Sensor(_) => NodeKind::Sensor,
            Scanner::System(_) => NodeKind::System,
            Scanner::Service(_) => NodeKind::Service,
        }
    }

    /// The children this scanner derives its health from, in
    /// construction order. Empty for sensors.
    pub fn children(&self) -> &[Arc<Scanner>] {
        match self {
            Scanner::Sensor(_) => &[],
            Scanner::System(system) => &system.children,
            Scanner::Service(service) => &service.children,
        }
    }

    /// The reduction strategy of a composite, `None` for sensors.
    pub fn combinator(&self) -> Option<Combinator> {
        match self {
            Scanner::Sensor(_) => None,
            Scanner::System(system) => Some(system.combinator),
            Scanner::Service(service) => Some(service.combinator),
        }
    }

    /// Evaluate this scanner's health.
    ///
    /// Every call is a fresh, complete evaluation from this node down:
    /// sensors re-probe, composites fan out to all children concurrently
    /// and reduce the collected verdicts. Nothing is cached on the nodes.
    ///
    /// An `Err` means the evaluation machinery itself failed (a child
    /// task panicked or was cancelled), which is distinct from a healthy
    /// `Ok(Status::Down)` verdict.
    pub async fn status(&self) -> Result<Status, ScanError> {
        match self {
            Scanner::Sensor(sensor) => Ok(sensor.probe.measure().await),
            Scanner::System(system) => {
                reduce_children(&system.name, system.combinator, &system.children).await
            }
            Scanner::Service(service) => {
                reduce_children(&service.name, service.combinator, &service.children).await
            }
        }
    }

    /// Evaluate this scanner and every node below it in one pass,
    /// producing a [`Report`] tree for renderers.
    ///
    /// Each node is probed exactly once; composite verdicts are reduced
    /// from the same child verdicts the report carries, and child order
    /// matches construction order regardless of which probe finished
    /// first.
    pub async fn report(&self) -> Result<Report, ScanError> {
        match self {
            Scanner::Sensor(sensor) => Ok(Report {
                name: sensor.name.clone(),
                kind: NodeKind::Sensor,
                status: sensor.probe.measure().await,
                children: Vec::new(),
            }),
            Scanner::System(system) => {
                report_children(&system.name, NodeKind::System, system.combinator, &system.children)
                    .await
            }
            Scanner::Service(service) => {
                report_children(
                    &service.name,
                    NodeKind::Service,
                    service.combinator,
                    &service.children,
                )
                .await
            }
        }
    }
}

/// Boxed evaluation future, so the recursive fan-out type-erases at each
/// level of the tree.
type ScanFuture<T> = Pin<Box<dyn Future<Output = Result<T, ScanError>> + Send>>;

fn status_task(scanner: Arc<Scanner>) -> ScanFuture<Status> {
    Box::pin(async move { scanner.status().await })
}

fn report_task(scanner: Arc<Scanner>) -> ScanFuture<Report> {
    Box::pin(async move { scanner.report().await })
}

/// Fan out to all children concurrently and await every verdict.
///
/// No short-circuiting: renderers need each child's individual verdict
/// even when the aggregate is already determined, so every child is
/// always scanned. Handles are awaited in construction order.
async fn scan_children(children: &[Arc<Scanner>]) -> Result<Vec<Status>, ScanError> {
    let handles: Vec<_> = children
        .iter()
        .map(|child| tokio::spawn(status_task(Arc::clone(child))))
        .collect();

    let mut statuses = Vec::with_capacity(handles.len());
    for handle in handles {
        statuses.push(handle.await??);
    }
    Ok(statuses)
}

async fn reduce_children(
    name: &str,
    combinator: Combinator,
    children: &[Arc<Scanner>],
) -> Result<Status, ScanError> {
    let statuses = scan_children(children).await?;
    combinator
        .reduce(statuses)
        .ok_or_else(|| ScanError::NoChildren(name.to_string()))
}

async fn report_children(
    name: &str,
    kind: NodeKind,
    combinator: Combinator,
    children: &[Arc<Scanner>],
) -> Result<Report, ScanError> {
    let handles: Vec<_> = children
        .iter()
        .map(|child| tokio::spawn(report_task(Arc::clone(child))))
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(handle.await??);
    }

    let status = combinator
        .reduce(reports.iter().map(|child| child.status))
        .ok_or_else(|| ScanError::NoChildren(name.to_string()))?;

    Ok(Report {
        name: name.to_string(),
        kind,
        status,
        children: reports,
    })
}

/// Leaf scanner: reaches out to the world and measures one thing.
///
/// That could be a running process, available disk space, or the
/// reachability of a healthcheck endpoint. A sensor has no children and
/// owns no derivation logic, only raw measurement.
pub struct Sensor {
    name: String,
    probe: Arc<dyn Probe>,
}

impl Sensor {
    /// Create a sensor backed by the given probe.
    pub fn new(name: impl Into<String>, probe: impl Probe + 'static) -> Arc<Scanner> {
        Self::with_probe(name, Arc::new(probe))
    }

    /// Create a sensor sharing an already-constructed probe.
    pub fn with_probe(name: impl Into<String>, probe: Arc<dyn Probe>) -> Arc<Scanner> {
        Arc::new(Scanner::Sensor(Sensor {
            name: name.into(),
            probe,
        }))
    }

    /// A sensor that always reports the given verdict.
    ///
    /// Useful for sensors which don't determine their own status, e.g.
    /// when an instrumentor has already fetched the answer in bulk.
    pub fn constant(name: impl Into<String>, status: Status) -> Arc<Scanner> {
        Self::new(name, Constant(status))
    }

    /// Shorthand for a constantly healthy sensor.
    pub fn up(name: impl Into<String>) -> Arc<Scanner> {
        Self::constant(name, Status::Up)
    }

    /// Shorthand for a constantly unhealthy sensor.
    pub fn down(name: impl Into<String>) -> Arc<Scanner> {
        Self::constant(name, Status::Down)
    }

    /// The sensor's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sensor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Composite scanner: composes sensors and other scanners into a logical
/// unit of infrastructure and derives its health from theirs.
#[derive(Debug)]
pub struct System {
    name: String,
    combinator: Combinator,
    children: Vec<Arc<Scanner>>,
}

impl System {
    /// Create a system with an explicit combinator.
    ///
    /// The child sequence is fixed for the system's lifetime and must be
    /// non-empty; a childless composite has no well-defined status.
    pub fn new(
        name: impl Into<String>,
        combinator: Combinator,
        children: Vec<Arc<Scanner>>,
    ) -> Result<Arc<Scanner>, BuildError> {
        let name = name.into();
        if children.is_empty() {
            return Err(BuildError::EmptyComposite { name });
        }
        Ok(Arc::new(Scanner::System(System {
            name,
            combinator,
            children,
        })))
    }

    /// A system that is up only if every child is up.
    pub fn all(
        name: impl Into<String>,
        children: Vec<Arc<Scanner>>,
    ) -> Result<Arc<Scanner>, BuildError> {
        Self::new(name, Combinator::All, children)
    }

    /// A system that is up if any child is up.
    pub fn any(
        name: impl Into<String>,
        children: Vec<Arc<Scanner>>,
    ) -> Result<Arc<Scanner>, BuildError> {
        Self::new(name, Combinator::Any, children)
    }

    /// The system's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The system's reduction strategy.
    pub fn combinator(&self) -> Combinator {
        self.combinator
    }
}

/// Composite scanner marking a capability your infrastructure provides.
///
/// Structurally identical to a [`System`] but semantically distinct: a
/// service is the unit exposed to other services as a dependency. It
/// might be customer-facing (the actual application), internal-facing
/// (a message queue), or part of development infrastructure (build
/// servers). Most commonly it wraps exactly one system.
#[derive(Debug)]
pub struct Service {
    name: String,
    combinator: Combinator,
    children: Vec<Arc<Scanner>>,
}

impl Service {
    /// Create a service with an explicit combinator over its children.
    pub fn new(
        name: impl Into<String>,
        combinator: Combinator,
        children: Vec<Arc<Scanner>>,
    ) -> Result<Arc<Scanner>, BuildError> {
        let name = name.into();
        if children.is_empty() {
            return Err(BuildError::EmptyComposite { name });
        }
        Ok(Arc::new(Scanner::Service(Service {
            name,
            combinator,
            children,
        })))
    }

    /// A service that relies on a single scanner, usually a system.
    pub fn wrapping(name: impl Into<String>, inner: Arc<Scanner>) -> Arc<Scanner> {
        Arc::new(Scanner::Service(Service {
            name: name.into(),
            combinator: Combinator::All,
            children: vec![inner],
        }))
    }

    /// The service's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The service's reduction strategy.
    pub fn combinator(&self) -> Combinator {
        self.combinator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::FnProbe;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
    use std::time::Duration;

    fn laggy(name: &str, ms: u64, status: Status) -> Arc<Scanner> {
        Sensor::new(
            name,
            FnProbe(move || async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                status
            }),
        )
    }

    fn counting(name: &str, status: Status, calls: &Arc<AtomicU32>) -> Arc<Scanner> {
        let calls = Arc::clone(calls);
        Sensor::new(
            name,
            FnProbe(move || {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    status
                }
            }),
        )
    }

    #[tokio::test]
    async fn system_all_with_healthy_sensors_is_up() {
        let system = System::all("web", vec![Sensor::up("a"), Sensor::up("b")]).unwrap();
        assert_eq!(system.status().await.unwrap(), Status::Up);
    }

    #[tokio::test]
    async fn system_all_with_one_unhealthy_sensor_is_down() {
        let system = System::all("web", vec![Sensor::up("a"), Sensor::down("b")]).unwrap();
        assert_eq!(system.status().await.unwrap(), Status::Down);
    }

    #[tokio::test]
    async fn system_any_with_one_healthy_sensor_is_up() {
        let system = System::any("replicas", vec![Sensor::down("a"), Sensor::up("b")]).unwrap();
        assert_eq!(system.status().await.unwrap(), Status::Up);
    }

    #[tokio::test]
    async fn service_wraps_a_single_system() {
        let system = System::all("db", vec![Sensor::down("primary")]).unwrap();
        let service = Service::wrapping("X", Arc::clone(&system));

        assert_eq!(service.status().await.unwrap(), Status::Down);
        assert_eq!(service.children().len(), 1);
        assert!(Arc::ptr_eq(&service.children()[0], &system));
    }

    #[tokio::test]
    async fn three_level_tree_evaluates_bottom_up() {
        // Service -> System(Any) -> [System(All)[up, down], up-sensor]
        let inner = System::all("inner", vec![Sensor::up("a"), Sensor::down("b")]).unwrap();
        let outer = System::any("outer", vec![Arc::clone(&inner), Sensor::up("c")]).unwrap();
        let service = Service::wrapping("svc", outer);

        assert_eq!(inner.status().await.unwrap(), Status::Down);
        assert_eq!(service.status().await.unwrap(), Status::Up);
    }

    #[tokio::test]
    async fn single_child_composite_passes_status_through() {
        for status in [Status::Up, Status::Down, Status::NotFound] {
            for combinator in [Combinator::All, Combinator::Any] {
                let system =
                    System::new("one", combinator, vec![Sensor::constant("child", status)])
                        .unwrap();
                assert_eq!(system.status().await.unwrap(), status);
            }
        }
    }

    #[test]
    fn empty_composite_fails_at_construction() {
        let err = System::all("empty", vec![]).unwrap_err();
        assert!(matches!(err, BuildError::EmptyComposite { ref name } if name == "empty"));

        let err = Service::new("empty", Combinator::Any, vec![]).unwrap_err();
        assert!(matches!(err, BuildError::EmptyComposite { .. }));
    }

    #[tokio::test]
    async fn every_child_is_probed_even_when_aggregate_is_determined() {
        let calls = Arc::new(AtomicU32::new(0));
        let system = System::any(
            "redundant",
            vec![
                counting("a", Status::Up, &calls),
                counting("b", Status::Down, &calls),
                counting("c", Status::Down, &calls),
            ],
        )
        .unwrap();

        assert_eq!(system.status().await.unwrap(), Status::Up);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn status_is_a_fresh_read_each_call() {
        let healthy = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&healthy);
        let sensor = Sensor::new(
            "flapping",
            FnProbe(move || {
                let flag = Arc::clone(&flag);
                async move { Status::from_bool(flag.load(Ordering::SeqCst)) }
            }),
        );

        assert_eq!(sensor.status().await.unwrap(), Status::Up);
        healthy.store(false, Ordering::SeqCst);
        assert_eq!(sensor.status().await.unwrap(), Status::Down);
    }

    #[tokio::test(start_paused = true)]
    async fn fan_out_takes_as_long_as_the_slowest_child() {
        let system = System::all(
            "slow",
            vec![
                laggy("a", 100, Status::Up),
                laggy("b", 200, Status::Up),
                laggy("c", 300, Status::Up),
            ],
        )
        .unwrap();

        let started = tokio::time::Instant::now();
        assert_eq!(system.status().await.unwrap(), Status::Up);
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(300));
        assert!(
            elapsed < Duration::from_millis(600),
            "children were scanned sequentially: {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn report_preserves_construction_order_despite_latency() {
        let system = System::all(
            "ordered",
            vec![
                laggy("slowest", 50, Status::Up),
                laggy("middle", 20, Status::Up),
                laggy("fastest", 0, Status::Up),
            ],
        )
        .unwrap();

        let report = system.report().await.unwrap();
        let names: Vec<&str> = report.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["slowest", "middle", "fastest"]);
    }

    #[tokio::test]
    async fn panicking_probe_is_an_evaluation_failure_not_a_verdict() {
        struct Exploding;

        #[async_trait]
        impl Probe for Exploding {
            async fn measure(&self) -> Status {
                panic!("probe blew up")
            }
        }

        let system =
            System::all("fragile", vec![Sensor::new("bad", Exploding), Sensor::up("good")])
                .unwrap();

        let err = system.status().await.unwrap_err();
        assert!(matches!(err, ScanError::Evaluation(_)));
    }

    #[tokio::test]
    async fn shared_scanner_may_appear_under_multiple_parents() {
        let database = Sensor::up("postgres");
        let checkout =
            System::all("checkout", vec![Arc::clone(&database), Sensor::up("cart")]).unwrap();
        let reporting = System::all(
            "reporting",
            vec![Arc::clone(&database), Sensor::down("warehouse-sync")],
        )
        .unwrap();

        let shop =
            Service::new("shop", Combinator::All, vec![Arc::clone(&checkout), reporting]).unwrap();

        // Both parents hold the same node, not copies.
        assert!(Arc::ptr_eq(&checkout.children()[0], &database));
        assert_eq!(checkout.status().await.unwrap(), Status::Up);
        assert_eq!(shop.status().await.unwrap(), Status::Down);
    }

    #[tokio::test]
    async fn report_carries_kinds_and_statuses() {
        let system = System::all("web", vec![Sensor::up("a"), Sensor::down("b")]).unwrap();
        let service = Service::wrapping("svc", system);

        let report = service.report().await.unwrap();
        assert_eq!(report.kind, NodeKind::Service);
        assert_eq!(report.status, Status::Down);

        let system_report = &report.children[0];
        assert_eq!(system_report.kind, NodeKind::System);
        assert_eq!(system_report.children[0].kind, NodeKind::Sensor);
        assert_eq!(system_report.children[0].status, Status::Up);
        assert_eq!(system_report.children[1].status, Status::Down);
    }

    #[test]
    fn accessors_expose_identity() {
        let sensor = Sensor::up("probe");
        assert_eq!(sensor.name(), "probe");
        assert_eq!(sensor.kind(), NodeKind::Sensor);
        assert!(sensor.children().is_empty());
        assert_eq!(sensor.combinator(), None);

        let system = System::any("pool", vec![sensor]).unwrap();
        assert_eq!(system.name(), "pool");
        assert_eq!(system.combinator(), Some(Combinator::Any));
        assert_eq!(system.children().len(), 1);
    }
}
