// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

mod error;
mod format;
mod name;
mod request;
mod resolved;
mod spec;
mod version;

pub use error::{Error, Result};
pub use format::{CoverMode, FormatError, InstallStatus, StatusFn, TreeFormat};
pub use name::PkgNameBuf;
pub use request::{Request, RequestedBy};
pub use resolved::{Digest, ResolvedEdge, ResolvedSpec, StructuredFormat, SHORT_DIGEST_LEN};
pub use spec::{DepKind, Dependency, Spec};
pub use version::{Version, VersionFilter, VERSION_SEP};
