//! JSON writer for the annotated function index.
//!
//! The document is a single object mapping qualified name to record, keys in
//! byte-wise order, pretty-printed with two-space indentation. The same index
//! always renders to the same bytes.

use crate::model::index::AnnotatedIndex;
use anyhow::{Context, Result};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

/// Artifact path for an output base name: `<base>.json`.
pub fn output_path_for(base: impl AsRef<Path>) -> PathBuf {
    let mut s = base.as_ref().as_os_str().to_owned();
    s.push(".json");
    PathBuf::from(s)
}

/// Render the index exactly as [`export_index`] writes it.
pub fn render_index(index: &AnnotatedIndex) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(index).context("serialize function index")
}

/// Serialize `index` and write it to `path`.
///
/// The bytes go to a temporary sibling first and are renamed over `path` only
/// after a successful flush, so a failed export never replaces an existing
/// artifact with a partial one.
pub fn export_index(index: &AnnotatedIndex, path: &Path) -> Result<PathBuf> {
    let bytes = render_index(index)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create_dir_all {}", parent.display()))?;
    }

    let tmp = temp_sibling(path);
    if let Err(err) = write_synced(&tmp, &bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("rename {} -> {}", tmp.display(), path.display()));
    }

    info!(records = index.len(), path = %path.display(), "json: wrote function index");
    Ok(path.to_path_buf())
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    w.write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    let f = w
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("flush {}", path.display()))?;
    f.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;
    Ok(())
}

/// `.<name>.<pid>.tmp` next to `path`.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index.json".to_string());
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::MissingCallerPolicy;
    use crate::model::{descriptor::CallEdge, index::FunctionIndex, record::FunctionRecord};

    fn sample() -> AnnotatedIndex {
        let mut idx = FunctionIndex::new();
        for k in ["pkg.B", "pkg.A"] {
            idx.insert(FunctionRecord::placeholder(k));
        }
        let edges = [CallEdge::new("pkg.A", "pkg.B", "a.go:5:2")];
        idx.annotate(&edges, MissingCallerPolicy::Skip).0
    }

    #[test]
    fn appends_json_suffix() {
        assert_eq!(output_path_for("out/funcs"), PathBuf::from("out/funcs.json"));
        assert_eq!(output_path_for("funcs.v2"), PathBuf::from("funcs.v2.json"));
    }

    #[test]
    fn uses_two_space_indent_and_sorted_keys() {
        let text = String::from_utf8(render_index(&sample()).unwrap()).unwrap();
        assert!(text.starts_with("{\n  \"pkg.A\": {\n    \"qualifiedName\": \"pkg.A\","));
        let a = text.find("\"pkg.A\":").unwrap();
        let b = text.find("\"pkg.B\":").unwrap();
        assert!(a < b);
    }

    #[test]
    fn re_export_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let index = sample();
        let first = export_index(&index, &dir.path().join("one.json")).unwrap();
        let second = export_index(&index, &dir.path().join("two.json")).unwrap();
        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
    }

    #[test]
    fn overwrites_existing_artifact_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("funcs.json");
        fs::write(&path, b"stale").unwrap();

        export_index(&sample(), &path).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(v["pkg.A"]["calls"], serde_json::json!(["pkg.B"]));
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn unwritable_destination_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, b"x").unwrap();
        assert!(export_index(&sample(), &blocker.join("funcs.json")).is_err());
    }
}
