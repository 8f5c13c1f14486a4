//! Source unit discovery.
//!
//! Lists the source units of one directory (no recursion) and puts them in
//! processing order: `main` first if present, everything else ascending by
//! code point.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::CompileError;

/// Name of the unit that always sorts first.
pub const ENTRY_COMPONENT: &str = "main";

/// List the file names in `dir` ending with `suffix`, in processing order.
///
/// Entries that are not regular files, and names that are not valid UTF-8,
/// are skipped.
pub fn discover_sources(dir: &Path, suffix: &str) -> Result<Vec<String>, CompileError> {
    let read_dir_err = |source: std::io::Error| CompileError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !file_name.ends_with(suffix) || !entry.path().is_file() {
            continue;
        }
        debug!(file = %file_name, "discovered source unit");
        files.push(file_name);
    }

    Ok(order_sources(files, suffix))
}

/// Apply the processing order to a set of file names.
pub fn order_sources(mut files: Vec<String>, suffix: &str) -> Vec<String> {
    let entry_file = format!("{ENTRY_COMPONENT}{suffix}");
    files.sort_by(|a, b| processing_cmp(a, b, &entry_file));
    files
}

/// `entry` sorts before everything, the rest by code point.
pub(crate) fn processing_cmp(a: &str, b: &str, entry: &str) -> Ordering {
    (a != entry).cmp(&(b != entry)).then_with(|| a.cmp(b))
}

/// Component name of a source file: the file name without the suffix.
pub fn component_name<'a>(file_name: &'a str, suffix: &str) -> &'a str {
    file_name.strip_suffix(suffix).unwrap_or(file_name)
}
