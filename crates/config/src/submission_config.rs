// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::load_config::{find_in_parent, resolve_config_path};
use crate::schema::{Field, SubmissionSchema};
use crate::yaml::load_yaml_with_env;
use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use prio_types::{BoolType, IntPowType, IntUnsafeType, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Widest integer a field may declare.
pub const MAX_INT_BITS: usize = 64;

/// Environment prefix for overrides, e.g. `PRIO_FIELDS`.
pub const ENV_PREFIX: &str = "PRIO_";

/// The value type of a submission field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    /// Bounded integer passed through unchecked
    Int,
    /// Bounded integer carrying its successive squares
    IntPow,
}

/// One named field of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Width for `int` and `int_pow`
    #[serde(default)]
    pub int_bits: usize,
    /// Highest power for `int_pow`
    #[serde(default)]
    pub pow: u32,
}

impl FieldConfig {
    /// Resolves the field into a validated value type.
    ///
    /// Keys that do not apply to the field's type are rejected rather than
    /// ignored.
    pub fn value_type(&self) -> Result<Arc<dyn ValueType>> {
        let value_type: Arc<dyn ValueType> = match self.kind {
            FieldKind::Bool => {
                if self.int_bits != 0 || self.pow != 0 {
                    bail!("fields of type bool take neither int_bits nor pow");
                }
                Arc::new(BoolType)
            }
            FieldKind::Int => {
                if self.pow != 0 {
                    bail!("fields of type int take no pow, use int_pow instead");
                }
                check_int(self.int_bits)?;
                Arc::new(IntUnsafeType::new(self.int_bits)?)
            }
            FieldKind::IntPow => {
                check_int(self.int_bits)?;
                Arc::new(IntPowType::new(self.int_bits, self.pow)?)
            }
        };
        Ok(value_type)
    }
}

fn check_int(int_bits: usize) -> Result<()> {
    if int_bits == 0 {
        bail!("fields of type int or int_pow must have int_bits > 0");
    }
    if int_bits > MAX_INT_BITS {
        bail!("only integers up to {MAX_INT_BITS} bits are supported, got {int_bits}");
    }
    Ok(())
}

/// Declared layout of a client submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct SubmissionConfig {
    pub fields: Vec<FieldConfig>,
}

impl SubmissionConfig {
    /// Parses and validates a YAML document layered over the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::extract_validated(Self::figment(yaml))
    }

    /// Loads the configuration at `path`, or the nearest `prio.config.yaml`
    /// above the current directory when no path is given.
    ///
    /// `${VAR}` references in the file are expanded, and `PRIO_FIELDS` replaces
    /// the field list when set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir()?;
        let Some(resolved) = resolve_config_path(find_in_parent, &cwd, path) else {
            bail!("No submission configuration found from {}", cwd.display());
        };

        let yaml = load_yaml_with_env(&resolved)?;
        let config = Self::extract_validated(
            Self::figment(&yaml).merge(Env::prefixed(ENV_PREFIX).only(&["fields"])),
        )?;
        info!(
            path = %resolved.display(),
            fields = config.fields.len(),
            "loaded submission configuration"
        );
        Ok(config)
    }

    /// Checks every field; the first problem is reported with the field name.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                bail!("field names must not be empty");
            }
            if !seen.insert(field.name.as_str()) {
                bail!("duplicate field name '{}'", field.name);
            }
            field
                .value_type()
                .with_context(|| format!("invalid field '{}'", field.name))?;
        }
        Ok(())
    }

    /// Resolves every field and builds the combined verification circuit.
    pub fn schema(&self) -> Result<SubmissionSchema> {
        if self.fields.is_empty() {
            bail!("a submission needs at least one field");
        }
        let fields = self
            .fields
            .iter()
            .map(|field| {
                Ok(Field {
                    name: field.name.clone(),
                    value_type: field
                        .value_type()
                        .with_context(|| format!("invalid field '{}'", field.name))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        SubmissionSchema::new(fields)
    }

    fn figment(yaml: &str) -> Figment {
        Figment::from(Serialized::defaults(SubmissionConfig::default())).merge(Yaml::string(yaml))
    }

    fn extract_validated(figment: Figment) -> Result<Self> {
        let config: SubmissionConfig = figment
            .extract()
            .context("Could not parse submission configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    const FIELDS: &str = r#"
fields:
  - name: "age"
    type: int
    int_bits: 8
  - name: "smoker"
    type: bool
  - name: "weight"
    type: int_pow
    int_bits: 10
    pow: 4
"#;

    #[test]
    fn test_deserialization() -> Result<()> {
        let config = SubmissionConfig::from_yaml_str(FIELDS)?;
        assert_eq!(
            config.fields,
            vec![
                FieldConfig {
                    name: "age".to_string(),
                    kind: FieldKind::Int,
                    int_bits: 8,
                    pow: 0,
                },
                FieldConfig {
                    name: "smoker".to_string(),
                    kind: FieldKind::Bool,
                    int_bits: 0,
                    pow: 0,
                },
                FieldConfig {
                    name: "weight".to_string(),
                    kind: FieldKind::IntPow,
                    int_bits: 10,
                    pow: 4,
                },
            ]
        );

        let raw: SubmissionConfig = serde_yaml::from_str(FIELDS)?;
        assert_eq!(raw, config);
        Ok(())
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let config = SubmissionConfig::from_yaml_str("fields: []")?;
        assert!(config.fields.is_empty());
        assert!(config.schema().is_err());
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let cases = [
            ("fields: [{name: a, type: int}]", "int_bits > 0"),
            ("fields: [{name: a, type: int, int_bits: 65}]", "up to 64 bits"),
            ("fields: [{name: a, type: int_pow, int_bits: 8, pow: 3}]", "power must be one of"),
            ("fields: [{name: a, type: bool}, {name: a, type: bool}]", "duplicate field name"),
            ("fields: [{name: ' ', type: bool}]", "must not be empty"),
            ("fields: [{name: a, type: float}]", "Could not parse"),
            ("fields: [{name: a, type: bool, bits: 3}]", "Could not parse"),
            ("fields: [{name: a, type: bool, int_bits: 1}]", "take neither int_bits nor pow"),
            ("fields: [{name: a, type: bool, pow: 2}]", "take neither int_bits nor pow"),
            ("fields: [{name: a, type: int, int_bits: 8, pow: 2}]", "take no pow"),
        ];

        for (yaml, expected) in cases {
            let err = SubmissionConfig::from_yaml_str(yaml).unwrap_err();
            assert!(
                format!("{err:#}").contains(expected),
                "{yaml}: expected '{expected}' in '{err:#}'"
            );
        }
    }

    #[test]
    fn test_load_with_env_substitution() {
        Jail::expect_with(|jail| {
            jail.set_env("WEIGHT_BITS", "12");
            jail.create_file(
                "fields.yaml",
                r#"
fields:
  - name: "weight"
    type: int_pow
    int_bits: ${WEIGHT_BITS}
    pow: 2
"#,
            )?;

            let path = jail.directory().join("fields.yaml");
            let config = SubmissionConfig::load(Some(&path)).map_err(|err| err.to_string())?;
            assert_eq!(config.fields[0].int_bits, 12);
            Ok(())
        });
    }

    #[test]
    fn test_load_finds_default_file() {
        Jail::expect_with(|jail| {
            jail.create_file("prio.config.yaml", "fields: [{name: flag, type: bool}]")?;
            let config = SubmissionConfig::load(None).map_err(|err| err.to_string())?;
            assert_eq!(config.fields[0].kind, FieldKind::Bool);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_fields() {
        Jail::expect_with(|jail| {
            jail.create_file("prio.config.yaml", FIELDS)?;
            jail.set_env("PRIO_FIELDS", "[{name=count,type=int,int_bits=16}]");
            let config = SubmissionConfig::load(None).map_err(|err| err.to_string())?;
            assert_eq!(config.fields.len(), 1);
            assert_eq!(config.fields[0].name, "count");
            assert_eq!(config.fields[0].int_bits, 16);
            Ok(())
        });
    }

    #[test]
    fn test_undefined_variable_is_not_a_missing_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "fields.yaml",
                "fields: [{name: a, type: int, int_bits: ${PRIO_TEST_UNSET_BITS}}]",
            )?;

            let path = jail.directory().join("fields.yaml");
            let Err(err) = SubmissionConfig::load(Some(&path)) else {
                return Err("error expected".to_string().into());
            };
            let message = format!("{err:#}");
            assert!(message.contains("Could not expand environment variables"), "{message}");
            assert!(!message.contains("Configuration file not found"), "{message}");
            Ok(())
        });
    }

    #[test]
    fn test_file_not_found() -> Result<()> {
        let Err(err) = SubmissionConfig::load(Some(Path::new("/nope/prio.config.yaml"))) else {
            bail!("error expected");
        };
        let Some(e) = err.downcast_ref::<std::io::Error>() else {
            bail!("io error expected");
        };
        assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        Ok(())
    }
}
