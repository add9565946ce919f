// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error type for scene setup and update.

use std::fmt;
use std::path::PathBuf;

use indexa_core::math::MathError;

use crate::geometry::GeometryError;

/// Errors raised while configuring or updating a [`crate::CubeScene`].
#[derive(Debug)]
pub enum SceneError {
    /// A matrix could not be built (singular camera, bad projection).
    Math(MathError),
    /// The mesh handed to the scene references vertices it does not have.
    Geometry(GeometryError),
    /// The configuration text is not valid JSON for [`crate::SceneConfig`].
    Config(serde_json::Error),
    /// The configuration file could not be read.
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Math(e) => write!(f, "Scene math failed: {e}"),
            SceneError::Geometry(e) => write!(f, "Invalid scene geometry: {e}"),
            SceneError::Config(e) => write!(f, "Invalid scene configuration: {e}"),
            SceneError::Io { path, source } => {
                write!(f, "Failed to read {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Math(e) => Some(e),
            SceneError::Geometry(e) => Some(e),
            SceneError::Config(e) => Some(e),
            SceneError::Io { source, .. } => Some(source),
        }
    }
}

impl From<MathError> for SceneError {
    fn from(e: MathError) -> Self {
        SceneError::Math(e)
    }
}

impl From<GeometryError> for SceneError {
    fn from(e: GeometryError) -> Self {
        SceneError::Geometry(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::Config(e)
    }
}
