//! Source normalization: turn an explorer `SourceCode` string into a
//! [`ContractTree`] whichever of the three encodings it uses.
//!
//! Pure and deterministic; no I/O.

mod encoding;
mod standard_json;
mod tree;

pub use encoding::{classify, Classified, SourceEncoding, STANDARD_JSON_PREFIX};
pub use tree::{ContractTree, SourceFile, CONTENT_KEY};

use crate::error::Result;

/// File name used for single-file sources, placed under the contract name.
pub const SINGLE_FILE_NAME: &str = "Contract.sol";

/// Normalizes `raw_source` into a tree of files.
///
/// - multi-file JSON is returned unchanged;
/// - `{{...}}` standard JSON input yields its `sources` object, or
///   [`ScdError::MalformedStandardJsonInput`](crate::error::ScdError::MalformedStandardJsonInput);
/// - anything else becomes `<contract_name>/Contract.sol` holding the raw text.
///
/// `contract_name` is used verbatim in the single-file path.
pub fn normalize(raw_source: &str, contract_name: &str) -> Result<ContractTree> {
    normalize_with_encoding(raw_source, contract_name).map(|(tree, _)| tree)
}

/// Like [`normalize`] but also reports which encoding was detected.
pub fn normalize_with_encoding(
    raw_source: &str,
    contract_name: &str,
) -> Result<(ContractTree, SourceEncoding)> {
    let classified = classify(raw_source);
    let encoding = classified.encoding();
    let tree = match classified {
        Classified::MultiFile(tree) => tree,
        Classified::StandardJsonInput => standard_json::parse(raw_source)?,
        Classified::SingleFile => single_file(raw_source, contract_name),
    };
    tracing::debug!(%encoding, files = tree.len(), "normalized contract source");
    Ok((tree, encoding))
}

/// Path of the synthesized entry for a single-file contract.
pub fn single_file_path(contract_name: &str) -> String {
    format!("{contract_name}/{SINGLE_FILE_NAME}")
}

fn single_file(raw_source: &str, contract_name: &str) -> ContractTree {
    let mut tree = ContractTree::new();
    tree.insert(single_file_path(contract_name), SourceFile::new(raw_source));
    tree
}
