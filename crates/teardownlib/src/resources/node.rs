use k8s_openapi::api::core::v1::Node as KubeNode;
use kube::ResourceExt;
use std::collections::BTreeMap;

/// A cluster member.  Nodes are mutated in place, never deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

impl Node {
    /// Construct a node with no labels.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            labels: BTreeMap::new(),
        }
    }

    /// Take the name and labels of a live node.
    pub fn from_object(node: &KubeNode) -> Self {
        Self {
            name: node.name_any(),
            labels: node.labels().clone(),
        }
    }

    /// Set a label, overwriting any existing value.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Label keys containing `marker`, in key order.
    pub fn marked_labels(&self, marker: &str) -> Vec<String> {
        self.labels
            .keys()
            .filter(|key| key.contains(marker))
            .cloned()
            .collect()
    }

    /// Remove every label whose key contains `marker`.  Returns the removed
    /// keys; a node with no such label is left untouched.
    pub fn strip_labels(&mut self, marker: &str) -> Vec<String> {
        let removed = self.marked_labels(marker);
        for key in &removed {
            self.labels.remove(key);
        }
        removed
    }
}
