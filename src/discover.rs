//! Discovery of binding-declaration configuration files.
//!
//! A root passed on the command line is either a directory (searched
//! recursively for `Gir*.toml` files, any depth) or a single `Gir*.toml`
//! file. Anything else is an input error; a misspelled path must never be
//! silently skipped.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// One configuration file to regenerate from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Path to the `Gir*.toml` file, as discovered.
    pub config: PathBuf,
    /// Directory the generator writes into (the file's parent).
    pub out_dir: PathBuf,
    /// Whether the parent directory names a `*sys` crate.
    pub is_sys: bool,
    /// Target path for the documentation pass; `None` for sys crates,
    /// which get no documentation.
    pub doc_target: Option<PathBuf>,
}

impl WorkItem {
    fn new(config: &Path) -> Self {
        let out_dir = match config.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let is_sys = out_dir
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with("sys"));
        let doc_target = (!is_sys).then(|| doc_target_path(&out_dir));
        WorkItem {
            config: config.to_path_buf(),
            out_dir,
            is_sys,
            doc_target,
        }
    }
}

/// `Gir` + anything + `.toml`, case-sensitive.
fn is_config_name(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("Gir") && name.ends_with(".toml"))
}

/// Where the documentation for a crate in `parent` goes: climb out of
/// `parent` with one `..` per component, then mirror it under `docs/`.
/// `pkg` → `../docs/pkg/docs.md`, `a/b` → `../../docs/a/b/docs.md`.
fn doc_target_path(parent: &Path) -> PathBuf {
    let parts: Vec<_> = parent
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    let mut path = PathBuf::new();
    for _ in &parts {
        path.push("..");
    }
    path.push("docs");
    for part in &parts {
        path.push(part);
    }
    path.push("docs.md");
    path
}

/// Collect every work item under `path`.
///
/// Returns the full sequence or the first error; callers can rely on an
/// `Err` meaning nothing from this root should be regenerated.
pub fn discover(path: &Path) -> Result<Vec<WorkItem>> {
    let mut items = Vec::new();
    if path.is_dir() {
        collect(path, &mut items)?;
    } else if path.is_file() && is_config_name(path) {
        items.push(WorkItem::new(path));
    } else {
        bail!(
            "`{}` is not a directory nor a Gir*.toml configuration file",
            path.display()
        );
    }
    Ok(items)
}

fn collect(dir: &Path, items: &mut Vec<WorkItem>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory `{}`", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in `{}`", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect(&path, items)?;
        } else if is_config_name(&path) {
            items.push(WorkItem::new(&path));
        }
    }
    Ok(())
}
