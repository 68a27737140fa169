use kube::ResourceExt;
use std::collections::BTreeMap;
use std::fmt;

/// The kinds of installed object the teardown removes.  Nodes are not in this
/// list: they are never deleted, only relabelled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    StatefulSet,
    Service,
    Secret,
    ClusterRole,
}

impl ResourceKind {
    /// Every kind, in no particular order.
    pub const ALL: [ResourceKind; 5] = [
        Self::Deployment,
        Self::StatefulSet,
        Self::Service,
        Self::Secret,
        Self::ClusterRole,
    ];

    /// The kind name, as the cluster API spells it.
    pub fn name(self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::Service => "Service",
            Self::Secret => "Secret",
            Self::ClusterRole => "ClusterRole",
        }
    }

    /// Whether an object's identity includes a namespace.
    pub fn is_namespaced(self) -> bool {
        !matches!(self, Self::ClusterRole)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

///////////////////////////////////////////////////////////////////////////////

/// A live installed object.  Identity is `(kind, namespace, name)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadResource {
    pub kind: ResourceKind,
    pub name: String,
    /// Absent for cluster-scoped kinds.
    pub namespace: Option<String>,
    pub labels: BTreeMap<String, String>,
}

impl WorkloadResource {
    /// Construct a resource with no labels.
    pub fn new(kind: ResourceKind, namespace: Option<&str>, name: &str) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            namespace: namespace.map(str::to_owned),
            labels: BTreeMap::new(),
        }
    }

    /// Set a label, overwriting any existing value.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Take the identity and labels of a live object.  Any namespace on a
    /// cluster-scoped kind is dropped.
    pub fn from_object<K: ResourceExt>(kind: ResourceKind, object: &K) -> Self {
        Self {
            kind,
            name: object.name_any(),
            namespace: object.namespace().filter(|_| kind.is_namespaced()),
            labels: object.labels().clone(),
        }
    }

    /// `namespace/name`, or just `name` for cluster-scoped objects.
    pub fn identity(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}/{name}", name = self.name),
            None => self.name.clone(),
        }
    }
}
