use std::io::Write;

use crate::error::Error;
use crate::cluster::ClusterApi;
use crate::resources::WorkloadResource;

/// Prefix for progress lines describing a mutation that is not performed.
pub static DRY_RUN_PREFIX: &str = "[dry-run] ";

/// What happened to a discovered object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Retired {
    /// Dry-run: reported, not deleted.
    Previewed,
    Deleted,
    /// The delete found nothing: someone else got there first.
    AlreadyGone,
}

/// Report and (unless `dry_run`) delete a discovered object.  Progress lines
/// name the kind and the object's `namespace/name`.  At most one
/// delete call is made.  "Not found" counts as success; any other failure is
/// returned.
pub fn retire<A: ClusterApi + ?Sized, W: Write>(
    api: &A,
    resource: &WorkloadResource,
    dry_run: bool,
    out: &mut W,
) -> Result<Retired, Error> {
    let prefix = if dry_run { DRY_RUN_PREFIX } else { "" };
    writeln!(
        out,
        "{prefix}delete {kind} {identity:?}",
        kind = resource.kind,
        identity = resource.identity()
    )?;

    if dry_run {
        return Ok(Retired::Previewed);
    }

    match api.delete(resource) {
        Ok(()) => {
            tracing::info!(
                kind = %resource.kind,
                name = %resource.name,
                namespace = resource.namespace.as_deref(),
                "deleted resource"
            );
            Ok(Retired::Deleted)
        }
        Err(error) if error.is_not_found() => {
            tracing::info!(
                kind = %resource.kind,
                name = %resource.name,
                namespace = resource.namespace.as_deref(),
                "resource already gone"
            );
            writeln!(
                out,
                "{kind} {identity:?} already deleted",
                kind = resource.kind,
                identity = resource.identity()
            )?;
            Ok(Retired::AlreadyGone)
        }
        Err(error) => {
            tracing::error!(
                kind = %resource.kind,
                name = %resource.name,
                namespace = resource.namespace.as_deref(),
                %error,
                "could not delete resource"
            );
            Err(error)
        }
    }
}
