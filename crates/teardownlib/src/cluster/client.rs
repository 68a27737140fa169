use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::{Namespace, Node as KubeNode, Secret, Service};
use k8s_openapi::api::rbac::v1::ClusterRole;
use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, ListParams, Patch, PatchParams};
use kube::{Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::future::Future;
use tokio::runtime::{self, Runtime};

use crate::error::Error;
use crate::cluster::config::Config;
use crate::cluster::{check_scope, ClusterApi};
use crate::resources::{Node, ResourceKind, WorkloadResource};
use crate::selector::Selector;

/// A blocking client for the cluster API.  Each call drives one request to
/// completion on a private single-threaded runtime.
pub struct KubeClient {
    runtime: Runtime,
    client: Client,
}

impl KubeClient {
    /// Resolve the kubeconfig and build a client.  Credentials that cannot be
    /// used (a failing exec plugin, an unreadable key) are reported here,
    /// before any request is made.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let runtime = runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let client = runtime.block_on(async {
            let resolved = config.resolve().await?;
            Ok::<_, Error>(Client::try_from(resolved)?)
        })?;

        Ok(Self { runtime, client })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// An API handle for a namespaced kind.  Scope has already been checked,
    /// so `None` never reaches here for these kinds.
    fn scoped<K>(&self, namespace: Option<&str>) -> Api<K>
    where
        K: Resource<Scope = NamespaceResourceScope>,
        K::DynamicType: Default,
    {
        match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::default_namespaced(self.client.clone()),
        }
    }

    fn nodes(&self) -> Api<KubeNode> {
        Api::all(self.client.clone())
    }
}

impl ClusterApi for KubeClient {
    fn get_namespace(&self, name: &str) -> Result<(), Error> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        self.block_on(namespaces.get(name))?;
        Ok(())
    }

    fn list(
        &self,
        kind: ResourceKind,
        selector: &Selector,
        namespace: Option<&str>,
    ) -> Result<Vec<WorkloadResource>, Error> {
        check_scope(kind, namespace)?;
        let params = ListParams::default().labels(&selector.to_string());

        self.block_on(async {
            match kind {
                ResourceKind::Deployment => {
                    list_as::<Deployment>(self.scoped(namespace), kind, &params).await
                }
                ResourceKind::StatefulSet => {
                    list_as::<StatefulSet>(self.scoped(namespace), kind, &params).await
                }
                ResourceKind::Service => {
                    list_as::<Service>(self.scoped(namespace), kind, &params).await
                }
                ResourceKind::Secret => {
                    list_as::<Secret>(self.scoped(namespace), kind, &params).await
                }
                ResourceKind::ClusterRole => {
                    list_as::<ClusterRole>(Api::all(self.client.clone()), kind, &params).await
                }
            }
        })
    }

    fn delete(&self, resource: &WorkloadResource) -> Result<(), Error> {
        let namespace = resource.namespace.as_deref();
        check_scope(resource.kind, namespace)?;
        let name = resource.name.as_str();

        self.block_on(async {
            match resource.kind {
                ResourceKind::Deployment => {
                    delete_as::<Deployment>(self.scoped(namespace), name).await
                }
                ResourceKind::StatefulSet => {
                    delete_as::<StatefulSet>(self.scoped(namespace), name).await
                }
                ResourceKind::Service => delete_as::<Service>(self.scoped(namespace), name).await,
                ResourceKind::Secret => delete_as::<Secret>(self.scoped(namespace), name).await,
                ResourceKind::ClusterRole => {
                    delete_as::<ClusterRole>(Api::all(self.client.clone()), name).await
                }
            }
        })
    }

    fn list_nodes(&self, selector: &Selector) -> Result<Vec<Node>, Error> {
        let params = ListParams::default().labels(&selector.to_string());
        let nodes = self.block_on(self.nodes().list(&params))?;
        Ok(nodes.items.iter().map(Node::from_object).collect())
    }

    fn remove_node_labels(&self, name: &str, keys: &[String]) -> Result<(), Error> {
        let patch = label_removal_patch(keys);
        self.block_on(
            self.nodes()
                .patch(name, &PatchParams::default(), &Patch::Merge(&patch)),
        )?;
        Ok(())
    }
}

///////////////////////////////////////////////////////////////////////////////

async fn list_as<K>(
    api: Api<K>,
    kind: ResourceKind,
    params: &ListParams,
) -> Result<Vec<WorkloadResource>, Error>
where
    K: Resource + ResourceExt + Clone + DeserializeOwned + Debug,
{
    let list = api.list(params).await?;
    Ok(list
        .items
        .iter()
        .map(|object| WorkloadResource::from_object(kind, object))
        .collect())
}

/// The server may answer a delete with the object (still finalising) or a
/// status; either way the delete was accepted.
async fn delete_as<K>(api: Api<K>, name: &str) -> Result<(), Error>
where
    K: Resource + Clone + DeserializeOwned + Debug,
{
    api.delete(name, &DeleteParams::default()).await?;
    Ok(())
}

/// A merge patch that deletes the given label keys: `null` removes a key.
pub fn label_removal_patch(keys: &[String]) -> Value {
    let labels: Map<String, Value> = keys.iter().map(|k| (k.clone(), Value::Null)).collect();
    serde_json::json!({ "metadata": { "labels": labels } })
}
