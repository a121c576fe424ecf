use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use aeolus_dayfile::{Column, ColumnKind, Profile};
use aeolus_values::TimeMode;

/// Top-level profiles file: a list of `[[profile]]` tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfilesConfig {
    /// Station profiles, selectable by name.
    #[serde(default, rename = "profile")]
    pub profiles: Vec<ProfileToml>,
}

/// One station profile as written in TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileToml {
    pub name: String,
    pub location_id: u32,
    pub location_name: String,
    /// 0 for slot-start time stamps, 1 for slot-end.
    pub time_mode: u32,
    #[serde(rename = "column")]
    pub columns: Vec<ColumnToml>,
}

/// One column declaration as written in TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnToml {
    pub id: u32,
    /// `TEMP`, `RAIN` or `EVNT`.
    pub kind: String,
    pub name: String,
}

impl ProfileToml {
    fn into_profile(self) -> Result<Profile> {
        let time_mode = TimeMode::from_number(self.time_mode)
            .with_context(|| format!("profile '{}'", self.name))?;
        let columns = self
            .columns
            .into_iter()
            .map(|c| {
                let kind = ColumnKind::from_token(&c.kind).with_context(|| {
                    format!("profile '{}': unknown column kind '{}'", self.name, c.kind)
                })?;
                Ok(Column {
                    kind,
                    id: c.id,
                    name: c.name,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if columns.is_empty() {
            bail!("profile '{}' declares no columns", self.name);
        }
        Ok(Profile {
            name: self.name,
            location_id: self.location_id,
            location_name: self.location_name,
            time_mode,
            columns,
        })
    }
}

/// Resolves a profile by name, first from the optional TOML file, then
/// from the built-in legacy table.
pub fn resolve_profile(name: &str, profiles_file: Option<&Path>) -> Result<Profile> {
    if let Some(path) = profiles_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profiles file: {}", path.display()))?;
        let config: ProfilesConfig =
            toml::from_str(&text).context("failed to parse profiles TOML")?;
        for profile in config.profiles {
            if profile.name == name {
                return profile.into_profile();
            }
        }
    }
    Profile::builtin(name)
        .with_context(|| format!("unknown profile '{name}' (not in file, not built in)"))
}
