use crate::error::Error;
use crate::cluster::{check_scope, ClusterApi};
use crate::resources::{Node, ResourceKind, WorkloadResource};
use crate::selector::Selector;
use crate::util::check_namespace;

/// Find all live objects of a kind matching the selector, in the order the
/// cluster returns them.  Finding nothing is not an error; a failed list is,
/// and is returned as-is.
pub fn find<A: ClusterApi + ?Sized>(
    api: &A,
    kind: ResourceKind,
    selector: &Selector,
    namespace: Option<&str>,
) -> Result<Vec<WorkloadResource>, Error> {
    check_scope(kind, namespace)?;

    let found = api.list(kind, selector, namespace)?;
    tracing::debug!(
        %kind,
        %selector,
        namespace,
        count = found.len(),
        "discovered resources"
    );

    Ok(found)
}

/// Find all nodes matching the selector.
pub fn find_nodes<A: ClusterApi + ?Sized>(
    api: &A,
    selector: &Selector,
) -> Result<Vec<Node>, Error> {
    let found = api.list_nodes(selector)?;
    tracing::debug!(%selector, count = found.len(), "discovered nodes");

    Ok(found)
}

/// Check, before anything is touched, that the target namespace is a valid
/// name and exists.
pub fn ensure_namespace<A: ClusterApi + ?Sized>(api: &A, namespace: &str) -> Result<(), Error> {
    check_namespace(namespace)?;
    api.get_namespace(namespace)
}
