// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./name_test.rs"]
mod name_test;

/// An owned, validated package name.
///
/// Names are non-empty lowercase alphanumerics and may contain
/// internal dashes.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PkgNameBuf(String);

impl PkgNameBuf {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_pkg_name(name: &str) -> Result<()> {
    let invalid = |reason: String| Error::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("names cannot be empty".to_string()));
    }
    if name.starts_with('-') || name.ends_with('-') {
        return Err(invalid("names cannot start or end with a dash".to_string()));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !matches!(c, 'a'..='z' | '0'..='9' | '-'))
    {
        return Err(invalid(format!(
            "invalid character {c:?}, expected lowercase letters, digits or dashes"
        )));
    }
    Ok(())
}

impl FromStr for PkgNameBuf {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        validate_pkg_name(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for PkgNameBuf {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        validate_pkg_name(&s)?;
        Ok(Self(s))
    }
}

impl Deref for PkgNameBuf {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for PkgNameBuf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PkgNameBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PkgNameBuf {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PkgNameBuf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}
