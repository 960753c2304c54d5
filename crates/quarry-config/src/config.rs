// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

static CONFIG: OnceCell<RwLock<Arc<Config>>> = OnceCell::new();

/// The spec unification policy used when concretizing several
/// requests together.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UnifyMode {
    /// All requests are concretized in one joint solve.
    #[default]
    All,
    /// Requests are concretized without any shared-dependency
    /// constraint between them.
    None,
    /// Joint concretization is preferred but not mandatory; requests
    /// that cannot be unified are deferred to incremental rounds.
    WhenPossible,
}

impl FromStr for UnifyMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // booleans are accepted for compatibility with older configs
        match s {
            "all" | "true" => Ok(Self::All),
            "none" | "false" => Ok(Self::None),
            "when_possible" | "when-possible" => Ok(Self::WhenPossible),
            _ => Err(Error::InvalidUnifyMode {
                given: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for UnifyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::None => f.write_str("none"),
            Self::WhenPossible => f.write_str("when_possible"),
        }
    }
}

impl Serialize for UnifyMode {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UnifyMode {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct UnifyModeVisitor;

        impl serde::de::Visitor<'_> for UnifyModeVisitor {
            type Value = UnifyMode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("one of all, none, when_possible, or a boolean")
            }

            fn visit_bool<E: serde::de::Error>(
                self,
                v: bool,
            ) -> std::result::Result<Self::Value, E> {
                Ok(match v {
                    true => UnifyMode::All,
                    false => UnifyMode::None,
                })
            }

            fn visit_str<E: serde::de::Error>(
                self,
                v: &str,
            ) -> std::result::Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(UnifyModeVisitor)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Solver {
    /// How requests given together are unified during a solve.
    pub unify: UnifyMode,

    /// Cap on the number of candidate models the engine examines
    /// before selecting the optimum.
    pub max_models: usize,

    /// Completed solves that took longer than this many seconds are
    /// logged as unusually long. Zero disables the check.
    pub long_solve_threshold: u64,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            unify: UnifyMode::default(),
            max_models: 64,
            long_solve_threshold: 30,
        }
    }
}

/// Configuration values for quarry.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    // These sub-types should aim to only have one level of values
    // within them, otherwise they become impossible to address with
    // environment variables.
    pub solver: Solver,
}

impl Config {
    /// Get the current loaded config, loading it if needed.
    pub fn current() -> Result<Arc<Self>> {
        get_config()
    }

    /// Load the config from disk, even if it's already been loaded before.
    pub fn load() -> Result<Self> {
        load_config()
    }

    /// Make this config the current global one.
    pub fn make_current(self) -> Result<Arc<Self>> {
        // Note we don't know if we won the race to set the value here,
        // so we still need to try to update it.
        let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
            Ok(RwLock::new(Arc::new(self.clone())))
        })?;

        let mut lock = config
            .write()
            .map_err(|err| Error::LockPoisonedWrite(err.to_string()))?;
        *Arc::make_mut(&mut lock) = self;
        Ok(Arc::clone(&lock))
    }
}

/// Get the current quarry config, fetching it from disk if needed.
pub fn get_config() -> Result<Arc<Config>> {
    let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
        Ok(RwLock::new(Arc::new(load_config()?)))
    })?;
    let lock = config
        .read()
        .map_err(|err| Error::LockPoisonedRead(err.to_string()))?;
    Ok(Arc::clone(&lock))
}

/// Load the quarry configuration from disk, even if it has already
/// been loaded.
///
/// This includes the default, user, and system configurations (if
/// they exist).
pub fn load_config() -> Result<Config> {
    use config::{Config as RawConfig, File};

    let user_config = shellexpand::tilde("~/.config/quarry/quarry").to_string();

    let mut config_builder = RawConfig::builder()
        // the system config can be in any supported format: toml, yaml, json, ini, etc
        .add_source(File::with_name("/etc/quarry").required(false))
        // the user config can be in any supported format: toml, yaml, json, ini, etc
        .add_source(File::with_name(&user_config).required(false));

    for (var, value) in std::env::vars() {
        let Some(tail) = var.strip_prefix("QUARRY_") else {
            continue;
        };
        let Some((section, name)) = tail.split_once('_') else {
            // typically, a value with no section is not a configuration
            // value, and can be skipped (eg: QUARRY_LOG)
            continue;
        };

        let key = format!("{}.{}", section.to_lowercase(), name.to_lowercase());
        config_builder = config_builder.set_override(key, value)?;
    }

    let config = config_builder.build()?;
    Ok(Config::deserialize(config)?)
}
