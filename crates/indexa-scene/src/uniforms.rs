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

//! Constant-buffer blocks shared with the cube shaders.

use bytemuck::{Pod, Zeroable};
use indexa_core::math::Mat4;

/// Camera data, rewritten once per frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PerFrameConstants {
    /// World-to-view transform.
    pub view_matrix: Mat4,
    /// View-to-clip transform.
    pub projection_matrix: Mat4,
}

impl Default for PerFrameConstants {
    fn default() -> Self {
        Self {
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        }
    }
}

impl PerFrameConstants {
    /// The block as it is copied into the constant buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Object data, rewritten for every drawn model.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PerModelConstants {
    /// Model-to-world transform.
    pub world_matrix: Mat4,
}

impl Default for PerModelConstants {
    fn default() -> Self {
        Self {
            world_matrix: Mat4::IDENTITY,
        }
    }
}

impl PerModelConstants {
    /// The block as it is copied into the constant buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
