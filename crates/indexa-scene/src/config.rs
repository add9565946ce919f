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

//! Scene configuration, loadable from JSON.

use std::path::Path;

use indexa_core::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Camera, projection and control settings for a [`crate::CubeScene`].
///
/// Every field has a default, so a JSON file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// World position of the camera. It looks down +Z.
    pub camera_position: Vec3,
    /// How fast a held key spins the cube, in degrees per second.
    pub rotation_speed_degrees: f32,
    /// Vertical field of view, in degrees.
    pub fov_y_degrees: f32,
    /// Back buffer width in pixels.
    pub viewport_width: u32,
    /// Back buffer height in pixels.
    pub viewport_height: u32,
    /// Near clip distance.
    pub z_near: f32,
    /// Far clip distance.
    pub z_far: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 0.0, -5.0),
            rotation_speed_degrees: 120.0,
            fov_y_degrees: 60.0,
            viewport_width: 1280,
            viewport_height: 720,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

impl SceneConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        log::info!("Loaded scene configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Viewport width over height. A zero height yields a non-finite ratio,
    /// which the projection rejects.
    pub fn aspect_ratio(&self) -> f32 {
        self.viewport_width as f32 / self.viewport_height as f32
    }
}
