//! Zip encoding of a contract tree.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::FileOptions;
use zip::CompressionMethod;

use crate::error::ArchiveWriteError;
use crate::normalize::ContractTree;

/// Writes one deflated entry per tree key, in key order, and syncs the file.
pub(crate) fn write_zip(path: &Path, tree: &ContractTree) -> Result<(), ArchiveWriteError> {
    let file = File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, source) in tree {
        zip.start_file(name.as_str(), opts)?;
        zip.write_all(source.content.as_bytes())?;
    }

    let file = zip.finish()?;
    file.sync_all()?;
    Ok(())
}
