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

//! The spinning cube: per-frame state and the data a renderer uploads.

use indexa_core::math::{degrees_to_radians, Mat4};

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::geometry::{IndexedMesh, PrimitiveTopology};
use crate::input::{InputState, Key};
use crate::uniforms::{PerFrameConstants, PerModelConstants};

/// Everything a renderer copies to the GPU for one frame of the cube.
#[derive(Debug, Clone, Copy)]
pub struct FrameUpload<'a> {
    /// Contents of the per-frame constant buffer.
    pub per_frame: &'a [u8],
    /// Contents of the per-model constant buffer.
    pub per_model: &'a [u8],
    /// Vertex buffer contents.
    pub vertices: &'a [u8],
    /// Index buffer contents, as 32-bit indices.
    pub indices: &'a [u8],
    /// Number of indices to draw.
    pub index_count: u32,
    /// Topology the indices are drawn with.
    pub topology: PrimitiveTopology,
}

/// A cube in front of a fixed camera, spun by the W/S and A/D keys.
#[derive(Debug, Clone)]
pub struct CubeScene {
    config: SceneConfig,
    mesh: IndexedMesh<'static>,
    rotation_x: f32,
    rotation_y: f32,
    cube_matrix: Mat4,
    per_frame: PerFrameConstants,
    per_model: PerModelConstants,
    frame_count: u64,
    elapsed: f32,
}

impl CubeScene {
    /// Builds the scene and the constants for its first frame.
    pub fn new(config: SceneConfig) -> Result<Self, SceneError> {
        let mesh = IndexedMesh::cube();
        mesh.validate()?;

        let mut scene = Self {
            config,
            mesh,
            rotation_x: 0.0,
            rotation_y: 0.0,
            cube_matrix: Mat4::IDENTITY,
            per_frame: PerFrameConstants::default(),
            per_model: PerModelConstants::default(),
            frame_count: 0,
            elapsed: 0.0,
        };
        scene.refresh_camera()?;
        scene.refresh_cube();

        log::info!(
            "Cube scene ready: {} vertices, {} indices, camera at {:?}",
            scene.mesh.vertices.len(),
            scene.mesh.index_count(),
            scene.config.camera_position
        );
        Ok(scene)
    }

    /// Advances the scene by `frame_time` seconds.
    ///
    /// W/S turn the cube about X and A/D about Y at the configured speed. A
    /// negative or non-finite `frame_time` is treated as zero.
    pub fn update(&mut self, frame_time: f32, input: &InputState) -> Result<(), SceneError> {
        let frame_time = if frame_time.is_finite() && frame_time >= 0.0 {
            frame_time
        } else {
            log::warn!("Ignoring invalid frame time {frame_time}");
            0.0
        };

        self.refresh_camera()?;

        let step = degrees_to_radians(self.config.rotation_speed_degrees) * frame_time;
        if input.is_held(Key::W) {
            self.rotation_x += step;
        }
        if input.is_held(Key::S) {
            self.rotation_x -= step;
        }
        if input.is_held(Key::A) {
            self.rotation_y += step;
        }
        if input.is_held(Key::D) {
            self.rotation_y -= step;
        }
        self.refresh_cube();

        self.frame_count += 1;
        self.elapsed += frame_time;
        log::trace!(
            "Frame {}: rotation ({:.4}, {:.4})",
            self.frame_count,
            self.rotation_x,
            self.rotation_y
        );
        Ok(())
    }

    fn refresh_camera(&mut self) -> Result<(), SceneError> {
        let camera = Mat4::from_translation(self.config.camera_position);
        self.per_frame.view_matrix = camera.inverse_affine()?;
        self.per_frame.projection_matrix = Mat4::perspective_fov_lh(
            degrees_to_radians(self.config.fov_y_degrees),
            self.config.aspect_ratio(),
            self.config.z_near,
            self.config.z_far,
        )?;
        Ok(())
    }

    fn refresh_cube(&mut self) {
        self.cube_matrix =
            Mat4::from_rotation_x(self.rotation_x) * Mat4::from_rotation_y(self.rotation_y);
        self.per_model.world_matrix = self.cube_matrix;
    }

    /// The configuration the scene was built with.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The mesh drawn each frame.
    pub fn mesh(&self) -> &IndexedMesh<'static> {
        &self.mesh
    }

    /// Camera constants for the current frame.
    pub fn per_frame_constants(&self) -> &PerFrameConstants {
        &self.per_frame
    }

    /// Cube constants for the current frame.
    pub fn per_model_constants(&self) -> &PerModelConstants {
        &self.per_model
    }

    /// The cube's world matrix.
    pub fn cube_matrix(&self) -> Mat4 {
        self.cube_matrix
    }

    /// Accumulated rotation about X and Y, in radians.
    pub fn rotation(&self) -> (f32, f32) {
        (self.rotation_x, self.rotation_y)
    }

    /// Number of completed [`CubeScene::update`] calls.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total simulated time, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Borrows the bytes a renderer has to copy for the current frame.
    pub fn frame_upload(&self) -> FrameUpload<'_> {
        FrameUpload {
            per_frame: self.per_frame.as_bytes(),
            per_model: self.per_model.as_bytes(),
            vertices: self.mesh.vertex_bytes(),
            indices: self.mesh.index_bytes(),
            index_count: self.mesh.index_count(),
            topology: self.mesh.topology,
        }
    }
}
