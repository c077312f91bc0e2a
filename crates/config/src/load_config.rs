// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use path_clean::clean;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "prio.config.yaml";

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

/// Walks from `path` up to the filesystem root looking for `filename`.
pub fn find_in_parent(path: &Path, filename: &str) -> Option<PathBuf> {
    path.ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

/// Picks the submission config file.
///
/// An explicit file wins, made absolute against `cwd` when relative. Otherwise
/// `cwd` and its parents are searched for [`DEFAULT_CONFIG_NAME`].
pub fn resolve_config_path(
    find_in_parent: FindInParent,
    cwd: &Path,
    explicit: Option<&Path>,
) -> Option<PathBuf> {
    match explicit {
        Some(file) if file.is_absolute() => Some(file.to_path_buf()),
        Some(file) => Some(clean(cwd.join(file))),
        None => find_in_parent(cwd, DEFAULT_CONFIG_NAME),
    }
}
