//! Archive output: one zip per contract, written to a `.part` file and
//! atomically renamed into place so a failed run leaves no partial archive.

mod sanitize;
mod writer;

pub use sanitize::sanitize_file_name;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ArchiveWriteError, Result, ScdError};
use crate::normalize::ContractTree;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Archive extension, appended after the stem is sanitized.
const ARCHIVE_EXTENSION: &str = ".zip";

/// Stem used when sanitizing leaves nothing usable.
const DEFAULT_ARCHIVE_STEM: &str = "contract";

/// Linux NAME_MAX, in bytes.
const NAME_MAX: usize = 255;

/// Path for the temp file: appends `.part` to the final path (e.g. `a.zip` → `a.zip.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// `<contract_name>_<address>.zip`, sanitized for Linux.
///
/// Only the stem is sanitized, so the result always ends in `.zip` and never
/// starts with a dot. An empty stem falls back to `contract`.
pub fn archive_file_name(contract_name: &str, address: &str) -> String {
    let mut stem = sanitize_file_name(&format!("{contract_name}_{address}"));
    if stem.is_empty() {
        stem = DEFAULT_ARCHIVE_STEM.to_string();
    }
    let max_stem = NAME_MAX - ARCHIVE_EXTENSION.len();
    if stem.len() > max_stem {
        let mut cut = max_stem;
        while !stem.is_char_boundary(cut) {
            cut -= 1;
        }
        stem.truncate(cut);
    }
    format!("{stem}{ARCHIVE_EXTENSION}")
}

/// Writes `tree` to `<output_dir>/<contract_name>_<address>.zip` and returns that path.
///
/// Entry paths are the tree keys verbatim; entry bytes are each file's
/// `content`. `output_dir` is created if missing. Any failure removes the
/// temp file and reports [`ScdError::ArchiveWriteFailed`].
pub fn write_contract_archive(
    output_dir: &Path,
    contract_name: &str,
    address: &str,
    tree: &ContractTree,
) -> Result<PathBuf> {
    let final_path = output_dir.join(archive_file_name(contract_name, address));
    let part = temp_path(&final_path);

    let written = fs::create_dir_all(output_dir)
        .map_err(ArchiveWriteError::from)
        .and_then(|()| writer::write_zip(&part, tree))
        .and_then(|()| fs::rename(&part, &final_path).map_err(ArchiveWriteError::from));

    if let Err(source) = written {
        if part.exists() {
            if let Err(e) = fs::remove_file(&part) {
                tracing::warn!(path = %part.display(), "failed to remove partial archive: {}", e);
            }
        }
        return Err(ScdError::ArchiveWriteFailed {
            path: final_path,
            source,
        });
    }

    tracing::info!(
        path = %final_path.display(),
        files = tree.len(),
        "archive written"
    );
    Ok(final_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::SourceFile;
    use std::collections::BTreeMap;
    use std::io::Read;

    fn read_entries(path: &Path) -> BTreeMap<String, String> {
        let mut zip = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        let mut out = BTreeMap::new();
        for i in 0..zip.len() {
            let mut entry = zip.by_index(i).unwrap();
            let mut content = String::new();
            entry.read_to_string(&mut content).unwrap();
            out.insert(entry.name().to_string(), content);
        }
        out
    }

    fn tree(entries: &[(&str, &str)]) -> ContractTree {
        entries
            .iter()
            .map(|(p, c)| (p.to_string(), SourceFile::new(*c)))
            .collect()
    }

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("/tmp/Token_0x1.zip"));
        assert_eq!(p.to_string_lossy(), "/tmp/Token_0x1.zip.part");
    }

    #[test]
    fn archive_file_name_is_name_and_address() {
        assert_eq!(archive_file_name("Token", "0xAbC"), "Token_0xAbC.zip");
        assert_eq!(archive_file_name("a/b", "0x1"), "a_b_0x1.zip");
    }

    #[test]
    fn empty_or_dot_names_fall_back_to_contract_zip() {
        assert_eq!(archive_file_name("", ""), "contract.zip");
        assert_eq!(archive_file_name("..", ""), "contract.zip");
        assert_eq!(archive_file_name(".", "."), "contract.zip");
        assert_eq!(archive_file_name("", "0x1"), "0x1.zip");
    }

    #[test]
    fn long_names_keep_the_zip_extension() {
        let name = archive_file_name(&"é".repeat(200), "0x1");
        assert!(name.len() <= 255);
        assert!(name.ends_with(".zip"));
        assert!(name.starts_with('é'));
    }

    #[test]
    fn roundtrip_preserves_paths_and_contents() {
        let dir = tempfile::tempdir().unwrap();
        let t = tree(&[
            ("contracts/Token.sol", "pragma solidity ^0.8.0;\ncontract Token {}"),
            ("@openzeppelin/contracts/token/ERC20/ERC20.sol", "// erc20"),
            ("Empty.sol", ""),
        ]);
        let path = write_contract_archive(dir.path(), "Token", "0x1", &t).unwrap();
        assert_eq!(path, dir.path().join("Token_0x1.zip"));
        assert!(!temp_path(&path).exists());

        let expected: BTreeMap<String, String> = t
            .iter()
            .map(|(k, v)| (k.clone(), v.content.clone()))
            .collect();
        assert_eq!(read_entries(&path), expected);
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("output");
        let path = write_contract_archive(&out, "A", "0x2", &tree(&[("A/Contract.sol", "x")])).unwrap();
        assert!(path.starts_with(&out));
        assert!(path.exists());
    }

    #[test]
    fn empty_tree_writes_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_contract_archive(dir.path(), "E", "0x3", &ContractTree::new()).unwrap();
        assert!(read_entries(&path).is_empty());
    }

    #[test]
    fn failure_reports_archive_write_failed_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be.
        let blocker = dir.path().join("output");
        fs::write(&blocker, b"not a dir").unwrap();
        let err = write_contract_archive(&blocker, "A", "0x4", &tree(&[("a", "b")])).unwrap_err();
        assert!(matches!(err, ScdError::ArchiveWriteFailed { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn overwrites_existing_archive() {
        let dir = tempfile::tempdir().unwrap();
        write_contract_archive(dir.path(), "A", "0x5", &tree(&[("old.sol", "old")])).unwrap();
        let path = write_contract_archive(dir.path(), "A", "0x5", &tree(&[("new.sol", "new")])).unwrap();
        let entries = read_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["new.sol"], "new");
    }
}
