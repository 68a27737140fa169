use clap::Parser;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use teardownlib::confirm::Prompt;
use teardownlib::discovery;
use teardownlib::error::Error;
use teardownlib::cluster;
use teardownlib::sequencer::{Outcome, Teardown, TeardownRequest};
use teardownlib::{DEFAULT_NAMESPACE, EXIT_CODE_TEARDOWN_FAILED};

/// Environment variable holding the log filter.
static LOG_FILTER_VAR: &str = "DEINIT_LOG";

/// Removes Karmada from Kubernetes.
///
/// Everything the installer created is found by its labels and deleted:
/// deployments and statefulsets first, then services, secrets, and cluster
/// roles.  Finally the installer's labels are taken off any nodes.  etcd data
/// on persistent volumes is not touched.
#[derive(Debug, Parser)]
struct Args {
    /// Namespace where Karmada components are installed.
    #[clap(short, long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Print what would be removed, without removing anything.
    #[clap(long)]
    dry_run: bool,

    #[command(flatten)]
    cluster: cluster::Config,
}

fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    match deinit(args) {
        Ok(Outcome::Declined) => tracing::info!("declined"),
        Ok(Outcome::Completed(summary)) => tracing::info!(?summary, "finished"),
        Err(error) => {
            eprintln!("error: {error}");
            process::exit(EXIT_CODE_TEARDOWN_FAILED);
        }
    }
}

/// Check the cluster and namespace, ask for confirmation, then tear down.
fn deinit(args: Args) -> Result<Outcome, Error> {
    let client = args.cluster.client()?;
    discovery::ensure_namespace(&client, &args.namespace)?;

    let mut out = io::stdout().lock();
    writeln!(out, "removes Karmada from Kubernetes")?;
    let confirmation = Prompt::new(io::stdin().lock(), &mut out).ask()?;

    let request = TeardownRequest::new(&args.namespace, args.dry_run, confirmation)?;
    let outcome = Teardown::new(&client, &request, &mut out)?.run()?;
    Ok(outcome)
}
