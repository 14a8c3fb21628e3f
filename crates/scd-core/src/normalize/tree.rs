//! Canonical multi-file representation of a contract's sources.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// File path → file entry. Sorted so archives and logs are deterministic.
pub type ContractTree = BTreeMap<String, SourceFile>;

/// Field holding a file's source text.
pub const CONTENT_KEY: &str = "content";

/// One file of a contract tree. `content` is required; any other fields the
/// explorer sent (e.g. `keccak256`, `urls`) are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub content: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SourceFile {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            extra: BTreeMap::new(),
        }
    }
}
