//! Brace-wrapped standard JSON input.
//!
//! The explorer stores `"{" + json + "}"`; one brace is removed from each end
//! and the inner object's `sources` becomes the tree.

use serde::Deserialize;

use crate::error::{Result, ScdError};

use super::tree::ContractTree;

/// Subset of solc standard JSON input that is needed here. `settings` and
/// other top-level keys are ignored.
#[derive(Debug, Deserialize)]
struct StandardJsonInput {
    #[serde(default)]
    language: Option<String>,
    sources: ContractTree,
}

pub(super) fn parse(raw_source: &str) -> Result<ContractTree> {
    let inner = strip_outer_braces(raw_source)?;
    let input: StandardJsonInput =
        serde_json::from_str(inner).map_err(|e| ScdError::MalformedStandardJsonInput {
            reason: e.to_string(),
            text: inner.to_string(),
        })?;
    tracing::debug!(
        language = input.language.as_deref().unwrap_or("unspecified"),
        "parsed standard JSON input"
    );
    Ok(input.sources)
}

/// Removes exactly one leading `{` and one trailing `}`.
///
/// The raw text must open with `{{` and close with `}}`: the wrapper brace on
/// each side plus the inner object's own brace.
fn strip_outer_braces(raw_source: &str) -> Result<&str> {
    if !raw_source.starts_with("{{") || !raw_source.ends_with("}}") {
        return Err(ScdError::MalformedStandardJsonInput {
            reason: "expected `{{ ... }}` around standard JSON input".to_string(),
            text: raw_source.to_string(),
        });
    }
    Ok(&raw_source[1..raw_source.len() - 1])
}
