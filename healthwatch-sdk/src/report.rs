//! The evaluated form of a scanner tree, as consumed by renderers.

use core::fmt;

use healthwatch_types::Status;
use serde::Serialize;

use crate::error::FindError;

/// Which kind of scanner produced a report node.
///
/// Carried for presentation only (labels, icons); health is always in
/// [`Report::status`], never derived from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Leaf measurement.
    Sensor,
    /// Composite unit of infrastructure.
    System,
    /// Externally consumable capability.
    Service,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Sensor => write!(f, "sensor"),
            NodeKind::System => write!(f, "system"),
            NodeKind::Service => write!(f, "service"),
        }
    }
}

/// One evaluation pass over a scanner tree, flattened into plain data.
///
/// A report is produced by [`Scanner::report`] and holds a verdict for
/// every node. Renderers walk this instead of the live tree, so drawing
/// output never re-probes anything. Children appear in construction
/// order.
///
/// [`Scanner::report`]: crate::Scanner::report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Name of the scanner that produced this node.
    pub name: String,
    /// Node kind, for labelling.
    pub kind: NodeKind,
    /// The verdict for this node.
    pub status: Status,
    /// Reports of the scanner's children, in construction order.
    pub children: Vec<Report>,
}

impl Report {
    /// Resolve a path of names through the report tree.
    ///
    /// Each segment matches children of the previous matches by name,
    /// starting from this node itself; `*` matches everything at that
    /// level. Several nodes may share a name, so a path can resolve to
    /// more than one report.
    ///
    /// ```rust
    /// # use healthwatch_sdk::{Report, NodeKind, Status};
    /// # fn leaf(name: &str) -> Report {
    /// #     Report { name: name.into(), kind: NodeKind::Sensor, status: Status::Up, children: vec![] }
    /// # }
    /// let report = Report {
    ///     name: "shop".into(),
    ///     kind: NodeKind::Service,
    ///     status: Status::Up,
    ///     children: vec![leaf("web"), leaf("db")],
    /// };
    /// let found = report.find_path(&["shop", "db"]).unwrap();
    /// assert_eq!(found[0].name, "db");
    /// ```
    pub fn find_path<'a>(&'a self, path: &[&str]) -> Result<Vec<&'a Report>, FindError> {
        let mut candidates: Vec<&Report> = vec![self];
        let mut targets: Vec<&Report> = Vec::new();

        for (index, segment) in path.iter().enumerate() {
            targets = if *segment == "*" {
                candidates.clone()
            } else {
                candidates
                    .iter()
                    .copied()
                    .filter(|report| report.name == *segment)
                    .collect()
            };

            if targets.is_empty() {
                return Err(FindError::NotFound {
                    segment: (*segment).to_string(),
                    index,
                });
            }

            candidates = targets
                .iter()
                .flat_map(|target| target.children.iter())
                .collect();
        }

        Ok(targets)
    }

    /// Total number of nodes in this report, including itself.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Report::len).sum::<usize>()
    }

    /// Whether the report has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
