pub mod client;
pub mod config;

// convenience re-exports
pub use client::KubeClient;
pub use config::Config;

use crate::error::{Error, ScopeError};
use crate::resources::{Node, ResourceKind, WorkloadResource};
use crate::selector::Selector;

/// The cluster operations the teardown needs.  Every call is a single
/// blocking round trip.
///
/// Implementations report a missing object as an error for which
/// `Error::is_not_found` holds, and pass every other failure through
/// unchanged.
pub trait ClusterApi {
    /// Check that a namespace exists.
    fn get_namespace(&self, name: &str) -> Result<(), Error>;

    /// List objects of one kind matching the selector.  `namespace` must be
    /// given for namespaced kinds and omitted for cluster-scoped ones.
    fn list(
        &self,
        kind: ResourceKind,
        selector: &Selector,
        namespace: Option<&str>,
    ) -> Result<Vec<WorkloadResource>, Error>;

    /// Delete an object by identity.
    fn delete(&self, resource: &WorkloadResource) -> Result<(), Error>;

    /// List nodes matching the selector.
    fn list_nodes(&self, selector: &Selector) -> Result<Vec<Node>, Error>;

    /// Remove the given label keys from a node, leaving everything else as it
    /// is.
    fn remove_node_labels(&self, name: &str, keys: &[String]) -> Result<(), Error>;
}

/// Check that a namespace is given exactly when the kind needs one.
pub fn check_scope(kind: ResourceKind, namespace: Option<&str>) -> Result<(), ScopeError> {
    match (kind.is_namespaced(), namespace) {
        (true, None) => Err(ScopeError::NamespaceRequired(kind.name())),
        (false, Some(_)) => Err(ScopeError::NamespaceNotAllowed(kind.name())),
        _ => Ok(()),
    }
}
