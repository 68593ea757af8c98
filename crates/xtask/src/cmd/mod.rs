pub(crate) mod check;
pub(crate) mod generate;

pub(crate) use check::*;
pub(crate) use generate::*;

use std::path::PathBuf;

pub(crate) fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub(crate) fn fixtures_dir() -> PathBuf {
    workspace_root().join("fixtures").join("graphs")
}
