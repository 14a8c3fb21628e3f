pub mod explorer_server;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Reads every entry of a zip archive as (path, UTF-8 content).
pub fn read_archive(path: &Path) -> BTreeMap<String, String> {
    let file = std::fs::File::open(path).expect("open archive");
    let mut zip = zip::ZipArchive::new(file).expect("valid zip");
    let mut out = BTreeMap::new();
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).expect("entry");
        let mut content = String::new();
        entry.read_to_string(&mut content).expect("utf-8 entry");
        out.insert(entry.name().to_string(), content);
    }
    out
}
