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

use anyhow::Result;
use approx::assert_abs_diff_eq;
use indexa_core::math::{Mat4, Vec3, Vec4};
use indexa_scene::geometry::{CUBE_INDICES, CUBE_VERTICES};
use indexa_scene::{
    ColorVertex, CubeScene, InputEvent, InputState, Key, PerFrameConstants, PerModelConstants,
    SceneConfig,
};
use tempfile::tempdir;

#[test]
fn test_scene_from_config_file() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("scene.json");
    std::fs::write(
        &path,
        r#"{ "camera_position": { "x": 0.0, "y": 1.0, "z": -8.0 }, "rotation_speed_degrees": 90.0 }"#,
    )?;

    let config = SceneConfig::load(&path)?;
    let mut scene = CubeScene::new(config)?;

    let mut input = InputState::new();
    input.handle_event(&InputEvent::KeyPressed { key: Key::A });
    for _ in 0..10 {
        scene.update(0.1, &input)?;
    }

    // 90 degrees/s for one second.
    let (rx, ry) = scene.rotation();
    assert_eq!(rx, 0.0);
    assert_abs_diff_eq!(ry, std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
    assert_eq!(scene.frame_count(), 10);

    // The view matrix undoes the camera placement.
    let camera = Mat4::from_translation(Vec3::new(0.0, 1.0, -8.0));
    let view = scene.per_frame_constants().view_matrix;
    assert_abs_diff_eq!(camera * view, Mat4::IDENTITY, epsilon = 1e-5);
    Ok(())
}

#[test]
fn test_releasing_a_key_stops_rotation() -> Result<()> {
    let mut scene = CubeScene::new(SceneConfig::default())?;
    let mut input = InputState::new();

    input.handle_event(&InputEvent::KeyPressed { key: Key::W });
    scene.update(0.5, &input)?;
    let tilted = scene.cube_matrix();

    input.handle_event(&InputEvent::KeyReleased { key: Key::W });
    scene.update(0.5, &input)?;
    assert_eq!(scene.cube_matrix(), tilted);
    Ok(())
}

#[test]
fn test_cube_stays_inside_the_clip_volume() -> Result<()> {
    let mut scene = CubeScene::new(SceneConfig::default())?;
    let mut input = InputState::new();
    input.press(Key::W);
    input.press(Key::D);

    for _ in 0..50 {
        scene.update(1.0 / 60.0, &input)?;

        let frame = scene.per_frame_constants();
        let world_view_proj =
            scene.per_model_constants().world_matrix * frame.view_matrix * frame.projection_matrix;

        for vertex in &CUBE_VERTICES {
            let clip = Vec4::from_vec3(vertex.position, 1.0) * world_view_proj;
            assert!(clip.w > 0.0);
            assert!(clip.x.abs() <= clip.w && clip.y.abs() <= clip.w);
            assert!(clip.z >= 0.0 && clip.z <= clip.w);
        }
    }
    Ok(())
}

#[test]
fn test_frame_upload_bytes_round_trip() -> Result<()> {
    let mut scene = CubeScene::new(SceneConfig::default())?;
    let mut input = InputState::new();
    input.press(Key::S);
    scene.update(0.2, &input)?;

    let upload = scene.frame_upload();

    let per_frame: &PerFrameConstants = bytemuck::from_bytes(upload.per_frame);
    assert_eq!(per_frame, scene.per_frame_constants());

    let per_model: &PerModelConstants = bytemuck::from_bytes(upload.per_model);
    assert_eq!(per_model.world_matrix, scene.cube_matrix());

    let vertices: &[ColorVertex] = bytemuck::cast_slice(upload.vertices);
    assert_eq!(vertices, &CUBE_VERTICES[..]);

    let indices: &[u32] = bytemuck::cast_slice(upload.indices);
    assert_eq!(indices, &CUBE_INDICES[..]);
    assert_eq!(upload.index_count as usize, indices.len());
    Ok(())
}
