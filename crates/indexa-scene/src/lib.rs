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

//! # Indexa Scene
//!
//! CPU side of the indexed cube sample: the eight-vertex cube and its shared
//! index list, the constant blocks the shaders read, held-key input and the
//! per-frame update that spins the cube in front of a fixed camera.
//!
//! Nothing here talks to a graphics API. [`CubeScene::frame_upload`] hands a
//! renderer the exact bytes it has to copy each frame.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod uniforms;

pub use config::SceneConfig;
pub use error::SceneError;
pub use geometry::{ColorVertex, IndexedMesh, PrimitiveTopology};
pub use input::{InputEvent, InputState, Key};
pub use scene::{CubeScene, FrameUpload};
pub use uniforms::{PerFrameConstants, PerModelConstants};
