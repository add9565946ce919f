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

//! Vertex layout and the indexed cube mesh.
//!
//! The cube shares its eight corners between all six faces. A single
//! fourteen-index triangle strip walks every face, so the vertex buffer stays
//! at eight entries instead of the thirty-six a non-indexed cube would need.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use indexa_core::math::Vec3;

/// The format of a single vertex attribute as the input assembler reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// Three 32-bit floats.
    Float32x3,
    /// Four 32-bit floats.
    Float32x4,
}

impl VertexFormat {
    /// Size in bytes of one attribute of this format.
    pub const fn size(&self) -> u64 {
        match self {
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// Describes one attribute inside a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttributeDescriptor {
    /// Input slot in the vertex shader.
    pub shader_location: u32,
    /// Element format of the attribute.
    pub format: VertexFormat,
    /// Byte offset from the start of the vertex.
    pub offset: u64,
}

/// How the index buffer is assembled into triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTopology {
    /// Every three indices form an independent triangle.
    TriangleList,
    /// Each index after the first two forms a triangle with the two before it.
    TriangleStrip,
}

/// A position with a per-vertex colour, laid out as the shader expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    /// Model-space position.
    pub position: Vec3,
    /// RGBA colour.
    pub colour: [f32; 4],
}

impl ColorVertex {
    /// Attribute table matching the `#[repr(C)]` field layout.
    pub const ATTRIBUTES: [VertexAttributeDescriptor; 2] = [
        VertexAttributeDescriptor {
            shader_location: 0,
            format: VertexFormat::Float32x3,
            offset: 0,
        },
        VertexAttributeDescriptor {
            shader_location: 1,
            format: VertexFormat::Float32x4,
            offset: 12,
        },
    ];

    /// Distance in bytes between consecutive vertices.
    pub const STRIDE: u64 = std::mem::size_of::<Self>() as u64;

    /// Creates a vertex.
    pub const fn new(position: Vec3, colour: [f32; 4]) -> Self {
        Self { position, colour }
    }
}

/// The corners of the `[-1, 1]` cube, front face (z = -1) first.
pub const CUBE_VERTICES: [ColorVertex; 8] = [
    ColorVertex::new(Vec3::new(-1.0, 1.0, -1.0), [1.0, 0.3, 0.3, 0.0]),
    ColorVertex::new(Vec3::new(1.0, 1.0, -1.0), [1.0, 0.5, 0.5, 0.0]),
    ColorVertex::new(Vec3::new(-1.0, -1.0, -1.0), [1.0, 0.6, 0.6, 0.0]),
    ColorVertex::new(Vec3::new(1.0, -1.0, -1.0), [1.0, 0.8, 0.8, 0.0]),
    ColorVertex::new(Vec3::new(1.0, -1.0, 1.0), [1.0, 0.8, 0.8, 0.0]),
    ColorVertex::new(Vec3::new(1.0, 1.0, 1.0), [1.0, 0.8, 0.8, 0.0]),
    ColorVertex::new(Vec3::new(-1.0, 1.0, 1.0), [1.0, 0.8, 0.8, 0.0]),
    ColorVertex::new(Vec3::new(-1.0, -1.0, 1.0), [1.0, 0.8, 0.8, 0.0]),
];

/// One strip over all six faces of [`CUBE_VERTICES`].
pub const CUBE_INDICES: [u32; 14] = [0, 1, 2, 3, 4, 1, 5, 0, 6, 2, 7, 4, 6, 5];

/// Problems found when validating an [`IndexedMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// An index points past the end of the vertex slice.
    IndexOutOfBounds {
        /// Position of the offending entry in the index slice.
        position: usize,
        /// The offending index value.
        index: u32,
        /// Number of vertices available.
        vertex_count: usize,
    },
    /// A triangle list whose length is not a multiple of three.
    IncompleteList {
        /// Number of indices in the list.
        len: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::IndexOutOfBounds {
                position,
                index,
                vertex_count,
            } => write!(
                f,
                "Index {index} at position {position} is out of bounds for {vertex_count} vertices"
            ),
            GeometryError::IncompleteList { len } => write!(
                f,
                "Triangle list has {len} indices, which is not a multiple of 3"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Borrowed vertex and index data plus the topology used to draw them.
#[derive(Debug, Clone, Copy)]
pub struct IndexedMesh<'a> {
    /// Vertex buffer contents.
    pub vertices: &'a [ColorVertex],
    /// Index buffer contents.
    pub indices: &'a [u32],
    /// How `indices` are assembled.
    pub topology: PrimitiveTopology,
}

impl<'a> IndexedMesh<'a> {
    /// Wraps the given slices after checking that they form valid triangles.
    pub fn new(
        vertices: &'a [ColorVertex],
        indices: &'a [u32],
        topology: PrimitiveTopology,
    ) -> Result<Self, GeometryError> {
        let mesh = Self {
            vertices,
            indices,
            topology,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Raw bytes for the vertex buffer.
    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    /// Raw bytes for the index buffer.
    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }

    /// Checks every index against the vertex count and the list length
    /// against the topology.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.topology == PrimitiveTopology::TriangleList && self.indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteList {
                len: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        match self
            .indices
            .iter()
            .position(|&index| index as usize >= vertex_count)
        {
            Some(position) => Err(GeometryError::IndexOutOfBounds {
                position,
                index: self.indices[position],
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Expands the indices into triangles.
    ///
    /// Odd strip triangles have their first two indices swapped, which is what
    /// the rasterizer does, so every triangle comes out with the same winding.
    /// Degenerate strip triangles (a repeated index) produce no area and are
    /// skipped.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        match self.topology {
            PrimitiveTopology::TriangleList => self
                .indices
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            PrimitiveTopology::TriangleStrip => self
                .indices
                .windows(3)
                .enumerate()
                .filter(|(_, w)| w[0] != w[1] && w[1] != w[2] && w[0] != w[2])
                .map(|(i, w)| {
                    if i % 2 == 0 {
                        [w[0], w[1], w[2]]
                    } else {
                        [w[1], w[0], w[2]]
                    }
                })
                .collect(),
        }
    }
}

impl IndexedMesh<'static> {
    /// The eight-vertex cube drawn as a single strip.
    pub fn cube() -> Self {
        Self {
            vertices: &CUBE_VERTICES,
            indices: &CUBE_INDICES,
            topology: PrimitiveTopology::TriangleStrip,
        }
    }
}
