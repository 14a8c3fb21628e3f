//! Explorer source encodings and the trial-parse classifier.

use super::tree::ContractTree;

/// How the explorer packed a contract's `SourceCode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// JSON object of path → `{ "content": ... }`.
    MultiFile,
    /// Standard JSON input wrapped in an extra pair of braces (`{{ ... }}`).
    StandardJsonInput,
    /// Plain Solidity text of a single file.
    SingleFile,
}

impl SourceEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceEncoding::MultiFile => "multi-file",
            SourceEncoding::StandardJsonInput => "standard-json-input",
            SourceEncoding::SingleFile => "single-file",
        }
    }
}

impl std::fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix that marks the brace-wrapped standard JSON input encoding.
pub const STANDARD_JSON_PREFIX: &str = "{{";

/// Outcome of classification. The multi-file variant carries the tree that
/// was already parsed while deciding, so it is not parsed twice.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    MultiFile(ContractTree),
    StandardJsonInput,
    SingleFile,
}

impl Classified {
    pub fn encoding(&self) -> SourceEncoding {
        match self {
            Classified::MultiFile(_) => SourceEncoding::MultiFile,
            Classified::StandardJsonInput => SourceEncoding::StandardJsonInput,
            Classified::SingleFile => SourceEncoding::SingleFile,
        }
    }
}

/// Decides the encoding of `raw_source`.
///
/// A successful multi-file parse wins. Otherwise the `{{` prefix selects
/// standard JSON input and anything else is a single file. A structural
/// parse failure is final; nothing is retried.
pub fn classify(raw_source: &str) -> Classified {
    if let Ok(tree) = serde_json::from_str::<ContractTree>(raw_source) {
        return Classified::MultiFile(tree);
    }
    if raw_source.starts_with(STANDARD_JSON_PREFIX) {
        Classified::StandardJsonInput
    } else {
        Classified::SingleFile
    }
}
