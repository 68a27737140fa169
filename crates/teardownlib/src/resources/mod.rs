pub mod node;
pub mod types;

// convenience re-exports
pub use crate::resources::node::Node;
pub use crate::resources::types::{ResourceKind, WorkloadResource};
