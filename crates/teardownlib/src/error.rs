use kube::config::KubeconfigError;
use std::fmt;

/// A failed request, as reported by the cluster API.
pub use kube::core::ErrorResponse as ApiStatus;

/// Generic error type
#[derive(Debug)]
pub enum Error {
    Api(ApiStatus),
    Config(ConfigError),
    Io(std::io::Error),
    Kube(kube::Error),
    Kubeconfig(KubeconfigError),
    Scope(ScopeError),
    Selector(SelectorError),
}

impl Error {
    /// "Not found" is benign absence: deleting something already gone is not a
    /// failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(status) if status.code == 404)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(s) => write!(
                f,
                "api status {code} ({reason}): {msg}",
                code = s.code,
                reason = s.reason,
                msg = s.message
            ),
            Self::Config(s) => write!(f, "config: {s}"),
            Self::Io(s) => write!(f, "io: {s}"),
            Self::Kube(s) => write!(f, "cluster: {s}"),
            Self::Kubeconfig(s) => write!(f, "kubeconfig: {s}"),
            Self::Scope(s) => write!(f, "scope: {s}"),
            Self::Selector(s) => write!(f, "selector: {s}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ApiStatus> for Error {
    fn from(status: ApiStatus) -> Self {
        Self::Api(status)
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

/// A status response from the server is kept apart from transport and
/// credential failures, so that "not found" can be recognised.
impl From<kube::Error> for Error {
    fn from(error: kube::Error) -> Self {
        match error {
            kube::Error::Api(status) => Self::Api(status),
            other => Self::Kube(other),
        }
    }
}

impl From<KubeconfigError> for Error {
    fn from(error: KubeconfigError) -> Self {
        Self::Kubeconfig(error)
    }
}

impl From<ScopeError> for Error {
    fn from(error: ScopeError) -> Self {
        Self::Scope(error)
    }
}

impl From<SelectorError> for Error {
    fn from(error: SelectorError) -> Self {
        Self::Selector(error)
    }
}

/// Errors specific to resolving cluster-access configuration.
#[derive(Debug)]
pub enum ConfigError {
    BadNamespace(String),
    NoKubeconfig,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadNamespace(ns) => write!(f, "'{ns}' is not a valid namespace name"),
            Self::NoKubeconfig => write!(f, "kubeconfig path list is empty, please specify one"),
        }
    }
}

/// A namespace was given for a cluster-scoped kind, or omitted for a
/// namespaced one.
#[derive(Debug)]
pub enum ScopeError {
    NamespaceRequired(&'static str),
    NamespaceNotAllowed(&'static str),
}

impl fmt::Display for ScopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamespaceRequired(kind) => write!(f, "{kind} is namespaced, a namespace is required"),
            Self::NamespaceNotAllowed(kind) => write!(f, "{kind} is cluster-scoped, no namespace allowed"),
        }
    }
}

/// Errors specific to label selectors.
#[derive(Debug)]
pub enum SelectorError {
    BadKey(String),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadKey(k) => write!(f, "'{k}' is not a valid label key"),
        }
    }
}
