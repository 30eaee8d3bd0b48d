//! Namespaced keys for routing instrumentation requests.

use core::fmt;

/// The kind of resource an instrumentor knows how to instrument.
///
/// A kind has a domain-like `namespace` (the project it belongs to, e.g.
/// `kubernetes.io`) and a path-like `name` (e.g. `StorageClass`), plus an
/// optional `fragment` for subresources. It is purely a lookup key for the
/// instrumentor registry; the evaluation engine itself never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kind {
    /// The project this kind belongs to, e.g. `healthwatch.io`.
    pub namespace: String,
    /// The name of the kind within its namespace, e.g. `http/endpoint`.
    pub name: String,
    /// Optional subresource discriminator.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    #[cfg_attr(feature = "serde", serde(default))]
    pub fragment: Option<String>,
}

impl Kind {
    /// Create a kind from a namespace and name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            fragment: None,
        }
    }

    /// Return a copy of this kind with a subresource fragment attached.
    pub fn with_fragment(&self, fragment: impl Into<String>) -> Self {
        Self {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            fragment: Some(fragment.into()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
