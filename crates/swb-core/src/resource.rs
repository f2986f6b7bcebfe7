//! # Resources and Projects
//!
//! A [`ResourceRef`] names the solver configuration document under
//! validation; a [`Project`] is the build unit that owns it. Both compute
//! canonical `file://` URIs so that the resource's path inside the built
//! module can be derived by prefix arithmetic.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Conventional location of packaged resources inside a project root.
pub const SOURCE_RESOURCES_DIR: &str = "src/main/resources";

/// A location that cannot be turned into a `file://` URI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("location ({0}) cannot be expressed as a file URI")]
pub struct UriError(pub String);

/// `path` made absolute against the working directory, with `.` and `..`
/// resolved lexically. Symlinks are not followed.
pub fn absolute_path(path: &Path) -> Result<PathBuf, UriError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|_| UriError(path.display().to_string()))?
            .join(path)
    };
    let mut normal = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other.as_os_str()),
        }
    }
    Ok(normal)
}

fn file_uri(path: &Path) -> Result<Url, UriError> {
    let absolute = absolute_path(path)?;
    Url::from_file_path(&absolute).map_err(|()| UriError(path.display().to_string()))
}

/// Reference to the document being validated.
///
/// Immutable and supplied by the caller on every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRef(PathBuf);

impl ResourceRef {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self(location.into())
    }

    /// The opaque location this reference was created from.
    pub fn location(&self) -> &Path {
        &self.0
    }

    /// The location as an absolute, lexically normalized path.
    pub fn absolute_location(&self) -> Result<PathBuf, UriError> {
        absolute_path(&self.0)
    }

    /// Canonical `file://` URI of this resource. Relative locations are
    /// taken against the working directory.
    pub fn to_uri(&self) -> Result<Url, UriError> {
        file_uri(&self.0)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<&Path> for ResourceRef {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

/// The build unit that owns a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: String,
    root: PathBuf,
}

impl Project {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Project name, used for allow-list lookup and sample payload keys.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root directory of the project.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The root as an absolute, lexically normalized path.
    pub fn absolute_root(&self) -> Result<PathBuf, UriError> {
        absolute_path(&self.root)
    }

    /// Canonical `file://` URI of the project root, without a trailing slash.
    pub fn root_uri(&self) -> Result<Url, UriError> {
        file_uri(&self.root)
    }

    /// Directory holding the resources that get packaged into the module.
    pub fn resources_dir(&self) -> PathBuf {
        self.root.join(SOURCE_RESOURCES_DIR)
    }
}
