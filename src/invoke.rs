//! Construction of generator command lines.
//!
//! Argument vectors are built explicitly and handed to the process spawner
//! as-is; nothing here goes through a shell.

use crate::discover::WorkItem;
use std::ffi::OsString;
use std::path::PathBuf;

/// The external generator executable and the settings forwarded to every
/// invocation of it.
pub struct Generator {
    pub path: PathBuf,
    /// Passed as one `-d` flag each, in order.
    pub search_directories: Vec<PathBuf>,
}

/// One fully-constructed generator command.
pub struct Invocation {
    /// Progress line printed when the process is drained.
    pub description: String,
    pub args: Vec<OsString>,
}

/// Build the commands for one work item: the regeneration pass, plus a
/// documentation pass for non-sys crates.
pub fn invocations(item: &WorkItem, generator: &Generator) -> Vec<Invocation> {
    let mut base: Vec<OsString> = vec![
        "-c".into(),
        item.config.clone().into(),
        "-o".into(),
        item.out_dir.clone().into(),
    ];
    for dir in &generator.search_directories {
        base.push("-d".into());
        base.push(dir.clone().into());
    }
    if item.is_sys {
        base.extend([OsString::from("-m"), "sys".into()]);
    }

    let mut list = Vec::new();
    if let Some(doc_target) = &item.doc_target {
        let mut doc_args = base.clone();
        doc_args.extend([
            OsString::from("-m"),
            "doc".into(),
            "--doc-target-path".into(),
            doc_target.clone().into(),
        ]);
        list.push(Invocation {
            description: format!(
                "Regenerating documentation for `{}` into `{}`...",
                item.config.display(),
                doc_target.display()
            ),
            args: doc_args,
        });
    }
    list.push(Invocation {
        description: format!("Regenerating `{}`...", item.config.display()),
        args: base,
    });
    list
}
