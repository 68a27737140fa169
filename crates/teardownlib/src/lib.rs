pub mod cluster;
pub mod confirm;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod resources;
pub mod selector;
pub mod sequencer;
pub mod util;

/// Label applied by the installer to every object it creates.  Matched by
/// existence.
pub static LABEL_SELECTOR: &str = "karmada.io/bootstrapping";

/// Label applied by the installer to nodes hosting etcd.  Any label key
/// containing this string is removed during teardown.
pub static NODE_LABEL: &str = "karmada.io/etcd";

/// Namespace the control plane is installed into, unless told otherwise.
pub static DEFAULT_NAMESPACE: &str = "karmada-system";

/// Exit code in case the teardown failed.
pub static EXIT_CODE_TEARDOWN_FAILED: i32 = 1;
