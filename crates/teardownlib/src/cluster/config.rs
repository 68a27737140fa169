use kube::config::{KubeConfigOptions, Kubeconfig};
use std::env;
use std::path::PathBuf;

use crate::error::{ConfigError, Error};
use crate::cluster::client::KubeClient;

#[derive(Clone, Debug, clap::Args)]
pub struct Config {
    /// Path to the kubeconfig file, or a list of paths to merge, separated as
    /// in `PATH`.  If unspecified, `$HOME/.kube/config` is used.
    #[clap(long, env = "KUBECONFIG")]
    pub kubeconfig: Option<PathBuf>,

    /// The name of the kubeconfig context to use.  If unspecified, the
    /// kubeconfig's current context is used.
    #[clap(long)]
    pub context: Option<String>,
}

impl Config {
    /// Read the kubeconfig.  Several paths are merged in order: the first file
    /// to set a value wins.
    pub fn load(&self) -> Result<Kubeconfig, Error> {
        let Some(paths) = &self.kubeconfig else {
            return Ok(Kubeconfig::read()?);
        };

        let mut merged: Option<Kubeconfig> = None;
        for path in env::split_paths(paths).filter(|p| !p.as_os_str().is_empty()) {
            let next = Kubeconfig::read_from(&path)?;
            merged = Some(match merged {
                Some(kubeconfig) => kubeconfig.merge(next)?,
                None => next,
            });
        }

        merged.ok_or_else(|| ConfigError::NoKubeconfig.into())
    }

    /// Resolve the selected context into everything needed to reach the
    /// cluster: server, TLS settings, and credentials of any kind the
    /// kubeconfig format allows.
    pub async fn resolve(&self) -> Result<kube::Config, Error> {
        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..KubeConfigOptions::default()
        };
        let config = kube::Config::from_custom_kubeconfig(self.load()?, &options).await?;
        tracing::debug!(server = %config.cluster_url, "resolved cluster access");

        Ok(config)
    }

    /// Build a client for the selected context.
    pub fn client(&self) -> Result<KubeClient, Error> {
        KubeClient::new(self)
    }
}
