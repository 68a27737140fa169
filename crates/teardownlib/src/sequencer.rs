use std::io::Write;

use crate::confirm::Confirmation;
use crate::discovery;
use crate::error::{ConfigError, Error};
use crate::executor::{self, Retired, DRY_RUN_PREFIX};
use crate::cluster::ClusterApi;
use crate::resources::ResourceKind;
use crate::selector::Selector;
use crate::util::check_namespace;
use crate::{LABEL_SELECTOR, NODE_LABEL};

/// Kinds in deletion order: workloads first, so nothing is left reconciling
/// against the services and secrets they use, then auxiliary objects, then
/// cluster-scoped roles.
pub const TEARDOWN_ORDER: [ResourceKind; 5] = [
    ResourceKind::Deployment,
    ResourceKind::StatefulSet,
    ResourceKind::Service,
    ResourceKind::Secret,
    ResourceKind::ClusterRole,
];

/// Where the teardown is up to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    Confirming,
    DeletingWorkloads,
    DeletingAuxiliary,
    DeletingAccessRoles,
    StrippingNodeLabels,
    Done,
    Aborted,
}

impl Stage {
    /// The stage in which a kind is deleted.
    pub fn of(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Deployment | ResourceKind::StatefulSet => Self::DeletingWorkloads,
            ResourceKind::Service | ResourceKind::Secret => Self::DeletingAuxiliary,
            ResourceKind::ClusterRole => Self::DeletingAccessRoles,
        }
    }
}

/// The parameters of one teardown.
#[derive(Clone, Debug)]
pub struct TeardownRequest {
    namespace: String,
    dry_run: bool,
    confirmation: Confirmation,
}

impl TeardownRequest {
    pub fn new(
        namespace: &str,
        dry_run: bool,
        confirmation: Confirmation,
    ) -> Result<Self, ConfigError> {
        check_namespace(namespace)?;

        Ok(Self {
            namespace: namespace.to_owned(),
            dry_run,
            confirmation,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn confirmation(&self) -> Confirmation {
        self.confirmation
    }
}

/// Counts of what the teardown did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Objects and nodes reported but left alone because of dry-run.
    pub previewed: usize,
    pub deleted: usize,
    pub already_gone: usize,
    pub nodes_relabelled: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user said no; nothing was read or changed.
    Declined,
    Completed(Summary),
}

/// Drives discovery and deletion across kinds, then strips node labels.
/// Strictly ordered and fail-fast: the first error ends the teardown, and
/// nothing already done is undone.
pub struct Teardown<'a, A: ?Sized, W> {
    api: &'a A,
    request: &'a TeardownRequest,
    out: W,
    installed: Selector,
    node_role: Selector,
    stage: Stage,
}

impl<'a, A: ClusterApi + ?Sized, W: Write> Teardown<'a, A, W> {
    /// Progress is written to `out`.
    pub fn new(api: &'a A, request: &'a TeardownRequest, out: W) -> Result<Self, Error> {
        Ok(Self {
            api,
            request,
            out,
            installed: Selector::exists(LABEL_SELECTOR)?,
            node_role: Selector::exists(NODE_LABEL)?,
            stage: Stage::Confirming,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the whole sequence.
    pub fn run(&mut self) -> Result<Outcome, Error> {
        if self.request.confirmation == Confirmation::Declined {
            tracing::info!("teardown declined, nothing to do");
            self.enter(Stage::Aborted);
            return Ok(Outcome::Declined);
        }

        let mut summary = Summary::default();
        if let Err(error) = self.sequence(&mut summary) {
            tracing::error!(stage = ?self.stage, %error, "teardown aborted");
            self.enter(Stage::Aborted);
            return Err(error);
        }

        self.enter(Stage::Done);
        writeln!(
            self.out,
            "remove Karmada from Kubernetes successfully.\n\
             deinit will not delete etcd data, if the etcd data is persistent, please delete it yourself."
        )?;

        Ok(Outcome::Completed(summary))
    }

    fn sequence(&mut self, summary: &mut Summary) -> Result<(), Error> {
        for kind in TEARDOWN_ORDER {
            self.enter(Stage::of(kind));
            self.discover_and_retire(kind, summary)?;
        }

        self.enter(Stage::StrippingNodeLabels);
        self.strip_node_labels(summary)
    }

    fn enter(&mut self, stage: Stage) {
        if self.stage != stage {
            tracing::debug!(from = ?self.stage, to = ?stage, "entering stage");
            self.stage = stage;
        }
    }

    /// Find every installed object of one kind and retire each in turn.
    fn discover_and_retire(&mut self, kind: ResourceKind, summary: &mut Summary) -> Result<(), Error> {
        let namespace = kind
            .is_namespaced()
            .then_some(self.request.namespace.as_str());
        let found = discovery::find(self.api, kind, &self.installed, namespace)?;

        if found.is_empty() {
            tracing::info!(%kind, namespace, "no installed resources found");
            writeln!(
                self.out,
                "{kind} not found by label \"{selector}\"",
                selector = self.installed
            )?;
            return Ok(());
        }

        for resource in &found {
            match executor::retire(self.api, resource, self.request.dry_run, &mut self.out)? {
                Retired::Previewed => summary.previewed += 1,
                Retired::Deleted => summary.deleted += 1,
                Retired::AlreadyGone => summary.already_gone += 1,
            }
        }

        Ok(())
    }

    /// Remove the installer's marker labels from every node carrying one.
    fn strip_node_labels(&mut self, summary: &mut Summary) -> Result<(), Error> {
        let nodes = discovery::find_nodes(self.api, &self.node_role)?;

        if nodes.is_empty() {
            tracing::info!(label = NODE_LABEL, "no labelled nodes found");
            writeln!(self.out, "node not found by label \"{NODE_LABEL}\"")?;
            return Ok(());
        }

        for mut node in nodes {
            let removed = node.strip_labels(NODE_LABEL);
            if removed.is_empty() {
                tracing::info!(node = %node.name, "node has no marker labels, leaving it alone");
                continue;
            }

            let prefix = if self.request.dry_run { DRY_RUN_PREFIX } else { "" };
            writeln!(
                self.out,
                "{prefix}remove node {name:?} labels {removed:?}",
                name = node.name
            )?;

            if self.request.dry_run {
                summary.previewed += 1;
                continue;
            }

            match self.api.remove_node_labels(&node.name, &removed) {
                Ok(()) => {
                    tracing::info!(node = %node.name, ?removed, "removed node labels");
                    summary.nodes_relabelled += 1;
                }
                Err(error) if error.is_not_found() => {
                    tracing::info!(node = %node.name, "node already gone");
                    writeln!(self.out, "node {name:?} already deleted", name = node.name)?;
                }
                Err(error) => {
                    tracing::error!(node = %node.name, %error, "could not remove node labels");
                    return Err(error);
                }
            }
        }

        Ok(())
    }
}
