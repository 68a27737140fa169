//! In-memory cluster for driving the teardown without a real API server.
//!
//! Records every call made against it, and can be told to fail lists or
//! deletes of particular kinds, or to have objects vanish underneath a delete.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use teardownlib::error::{ApiStatus, Error};
use teardownlib::cluster::ClusterApi;
use teardownlib::resources::{Node, ResourceKind, WorkloadResource};
use teardownlib::selector::Selector;
use teardownlib::{LABEL_SELECTOR, NODE_LABEL};

pub const NAMESPACE: &str = "karmada-system";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    GetNamespace(String),
    List(ResourceKind, Option<String>),
    Delete(ResourceKind, String),
    ListNodes,
    RemoveNodeLabels(String, Vec<String>),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Delete(..) | Self::RemoveNodeLabels(..))
    }

    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::List(kind, _) | Self::Delete(kind, _) => Some(*kind),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeCluster {
    namespaces: BTreeSet<String>,
    resources: RefCell<Vec<WorkloadResource>>,
    nodes: RefCell<Vec<Node>>,
    calls: RefCell<Vec<Call>>,
    failing_lists: HashMap<ResourceKind, ApiStatus>,
    failing_deletes: HashMap<ResourceKind, ApiStatus>,
    failing_node_list: Option<ApiStatus>,
    failing_node_patch: Option<ApiStatus>,
    vanishing: RefCell<BTreeSet<String>>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default().with_namespace(NAMESPACE)
    }

    pub fn with_namespace(mut self, name: &str) -> Self {
        self.namespaces.insert(name.to_owned());
        self
    }

    pub fn with_resource(self, resource: WorkloadResource) -> Self {
        self.resources.borrow_mut().push(resource);
        self
    }

    /// An object the installer created in the target namespace.
    pub fn with_installed(self, kind: ResourceKind, name: &str) -> Self {
        let namespace = kind.is_namespaced().then_some(NAMESPACE);
        self.with_resource(
            WorkloadResource::new(kind, namespace, name).with_label(LABEL_SELECTOR, "app-defaults"),
        )
    }

    pub fn with_node(self, node: Node) -> Self {
        self.nodes.borrow_mut().push(node);
        self
    }

    pub fn failing_list(mut self, kind: ResourceKind, status: ApiStatus) -> Self {
        self.failing_lists.insert(kind, status);
        self
    }

    pub fn failing_delete(mut self, kind: ResourceKind, status: ApiStatus) -> Self {
        self.failing_deletes.insert(kind, status);
        self
    }

    pub fn failing_node_list(mut self, status: ApiStatus) -> Self {
        self.failing_node_list = Some(status);
        self
    }

    pub fn failing_node_patch(mut self, status: ApiStatus) -> Self {
        self.failing_node_patch = Some(status);
        self
    }

    /// The named object is removed by someone else between being listed and
    /// being deleted.
    pub fn vanishing(self, name: &str) -> Self {
        self.vanishing.borrow_mut().insert(name.to_owned());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn resources(&self) -> Vec<WorkloadResource> {
        self.resources.borrow().clone()
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.nodes.borrow().clone()
    }

    pub fn node(&self, name: &str) -> Option<Node> {
        self.nodes.borrow().iter().find(|n| n.name == name).cloned()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl ClusterApi for FakeCluster {
    fn get_namespace(&self, name: &str) -> Result<(), Error> {
        self.record(Call::GetNamespace(name.to_owned()));
        if self.namespaces.contains(name) {
            Ok(())
        } else {
            Err(not_found(&format!("namespaces \"{name}\" not found")).into())
        }
    }

    fn list(
        &self,
        kind: ResourceKind,
        selector: &Selector,
        namespace: Option<&str>,
    ) -> Result<Vec<WorkloadResource>, Error> {
        self.record(Call::List(kind, namespace.map(str::to_owned)));
        if let Some(status) = self.failing_lists.get(&kind) {
            return Err(status.clone().into());
        }

        Ok(self
            .resources
            .borrow()
            .iter()
            .filter(|r| r.kind == kind && r.namespace.as_deref() == namespace)
            .filter(|r| r.labels.contains_key(selector.key()))
            .cloned()
            .collect())
    }

    fn delete(&self, resource: &WorkloadResource) -> Result<(), Error> {
        self.record(Call::Delete(resource.kind, resource.name.clone()));
        if let Some(status) = self.failing_deletes.get(&resource.kind) {
            return Err(status.clone().into());
        }

        let mut resources = self.resources.borrow_mut();
        if self.vanishing.borrow_mut().remove(&resource.name) {
            resources.retain(|r| r.name != resource.name);
        }

        let before = resources.len();
        resources.retain(|r| {
            !(r.kind == resource.kind && r.namespace == resource.namespace && r.name == resource.name)
        });
        if resources.len() == before {
            Err(not_found(&format!("{} \"{}\" not found", resource.kind, resource.name)).into())
        } else {
            Ok(())
        }
    }

    fn list_nodes(&self, selector: &Selector) -> Result<Vec<Node>, Error> {
        self.record(Call::ListNodes);
        if let Some(status) = &self.failing_node_list {
            return Err(status.clone().into());
        }

        Ok(self
            .nodes
            .borrow()
            .iter()
            .filter(|n| n.labels.contains_key(selector.key()))
            .cloned()
            .collect())
    }

    fn remove_node_labels(&self, name: &str, keys: &[String]) -> Result<(), Error> {
        self.record(Call::RemoveNodeLabels(name.to_owned(), keys.to_vec()));
        if let Some(status) = &self.failing_node_patch {
            return Err(status.clone().into());
        }

        let mut nodes = self.nodes.borrow_mut();
        match nodes.iter_mut().find(|n| n.name == name) {
            Some(node) => {
                for key in keys {
                    node.labels.remove(key);
                }
                Ok(())
            }
            None => Err(not_found(&format!("nodes \"{name}\" not found")).into()),
        }
    }
}

///////////////////////////////////////////////////////////////////////////////

fn failure(code: u16, reason: &str, message: &str) -> ApiStatus {
    ApiStatus {
        status: "Failure".to_string(),
        message: message.to_string(),
        reason: reason.to_string(),
        code,
    }
}

pub fn not_found(message: &str) -> ApiStatus {
    failure(404, "NotFound", message)
}

pub fn forbidden(message: &str) -> ApiStatus {
    failure(403, "Forbidden", message)
}

/// A node the installer marked as an etcd host.
pub fn etcd_node(name: &str) -> Node {
    Node::new(name)
        .with_label(NODE_LABEL, "")
        .with_label("kubernetes.io/hostname", name)
}

/// A cluster with one installed object of every kind, some unrelated objects,
/// and one marked node.
pub fn installed_cluster() -> FakeCluster {
    FakeCluster::new()
        .with_namespace("default")
        .with_installed(ResourceKind::Deployment, "karmada-apiserver")
        .with_installed(ResourceKind::Deployment, "karmada-controller-manager")
        .with_installed(ResourceKind::StatefulSet, "etcd")
        .with_installed(ResourceKind::Service, "karmada-apiserver")
        .with_installed(ResourceKind::Service, "etcd-client")
        .with_installed(ResourceKind::Secret, "karmada-cert")
        .with_installed(ResourceKind::ClusterRole, "karmada-controller-manager")
        .with_resource(
            WorkloadResource::new(ResourceKind::Deployment, Some(NAMESPACE), "unrelated")
                .with_label("app", "unrelated"),
        )
        .with_resource(
            WorkloadResource::new(ResourceKind::Deployment, Some("default"), "elsewhere")
                .with_label(LABEL_SELECTOR, "app-defaults"),
        )
        .with_resource(
            WorkloadResource::new(ResourceKind::StatefulSet, Some(NAMESPACE), "member-etcd")
                .with_label("app", "etcd"),
        )
        .with_node(etcd_node("host-control-plane"))
        .with_node(Node::new("host-worker").with_label("kubernetes.io/hostname", "host-worker"))
}
