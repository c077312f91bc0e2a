// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a YAML file and substitutes `${VAR}` references from the environment.
pub fn load_yaml_with_env(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Configuration file not found: {}", path.display()))?;
    let expanded = shellexpand::env(&content).with_context(|| {
        format!("Could not expand environment variables in {}", path.display())
    })?;
    Ok(expanded.into_owned())
}
