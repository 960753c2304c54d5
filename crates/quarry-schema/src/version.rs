// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./version_test.rs"]
mod version_test;

pub const VERSION_SEP: &str = ".";

fn parse_parts(given: &str) -> Result<Vec<u32>> {
    given
        .split(VERSION_SEP)
        .map(|part| {
            part.parse::<u32>().map_err(|_| Error::InvalidVersion {
                given: given.to_string(),
            })
        })
        .collect()
}

/// A dotted numeric package version, eg `1.2.3`.
///
/// Trailing zero parts are not significant for ordering or equality:
/// `1.2` and `1.2.0` name the same version but keep their own display
/// form.
#[derive(Clone, Debug, Default)]
pub struct Version {
    pub parts: Vec<u32>,
}

impl Version {
    pub fn new(parts: impl IntoIterator<Item = u32>) -> Self {
        Self {
            parts: parts.into_iter().collect(),
        }
    }

    fn significant(&self) -> &[u32] {
        let mut end = self.parts.len();
        while end > 0 && self.parts[end - 1] == 0 {
            end -= 1;
        }
        &self.parts[..end]
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidVersion {
                given: s.to_string(),
            });
        }
        Ok(Self {
            parts: parse_parts(s)?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .parts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(VERSION_SEP);
        f.write_str(&rendered)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let lhs = self.parts.get(i).copied().unwrap_or(0);
            let rhs = other.parts.get(i).copied().unwrap_or(0);
            match lhs.cmp(&rhs) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A version prefix constraint; empty admits any version.
///
/// `1.2` admits `1.2`, `1.2.3` and so on, but not `1.20`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct VersionFilter {
    pub parts: Vec<u32>,
}

impl VersionFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_any(&self) -> bool {
        self.parts.is_empty()
    }

    /// True if the given version falls inside this filter.
    pub fn matches(&self, version: &Version) -> bool {
        self.parts
            .iter()
            .enumerate()
            .all(|(i, part)| version.parts.get(i).copied().unwrap_or(0) == *part)
    }
}

impl FromStr for VersionFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidVersion {
                given: s.to_string(),
            });
        }
        Ok(Self {
            parts: parse_parts(s)?,
        })
    }
}

impl fmt::Display for VersionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .parts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(VERSION_SEP);
        f.write_str(&rendered)
    }
}

impl Serialize for VersionFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VersionFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(Self::any());
        }
        raw.parse().map_err(serde::de::Error::custom)
    }
}
