use std::fmt;

use crate::error::SelectorError;
use crate::util::is_valid_label_key;

/// A label-existence predicate used for discovery: an object matches if it
/// carries the key, with any value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    key: String,
}

impl Selector {
    /// Match any object carrying the label key.
    pub fn exists(key: &str) -> Result<Self, SelectorError> {
        if !is_valid_label_key(key) {
            return Err(SelectorError::BadKey(key.to_owned()));
        }

        Ok(Self {
            key: key.to_owned(),
        })
    }

    /// The label key this selector tests.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Renders in the `labelSelector` query syntax.
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}
