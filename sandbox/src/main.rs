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

// Indexed cube sandbox
// Runs the cube scene for a fixed number of frames without a window.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indexa_core::math::radians_to_degrees;
use indexa_scene::{CubeScene, InputEvent, InputState, Key, SceneConfig};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON scene configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 120)]
    frames: u32,
    /// Seconds per simulated frame
    #[arg(short = 't', long, default_value_t = 1.0 / 60.0)]
    frame_time: f32,
    /// Keys held for the whole run (W, S, A, D), comma separated
    #[arg(short, long, value_delimiter = ',')]
    keys: Vec<Key>,
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene configuration {}", path.display()))?,
        None => SceneConfig::default(),
    };

    let mut scene = CubeScene::new(config).context("building the cube scene")?;

    let mut input = InputState::new();
    for &key in &cli.keys {
        input.handle_event(&InputEvent::KeyPressed { key });
    }

    for _ in 0..cli.frames {
        scene.update(cli.frame_time, &input)?;
        log::debug!(
            "Frame {} cube matrix: {:?}",
            scene.frame_count(),
            scene.cube_matrix().rows
        );
    }

    let upload = scene.frame_upload();
    let (rx, ry) = scene.rotation();
    log::info!(
        "Simulated {} frames ({:.2}s): rotation ({:.1}, {:.1}) degrees",
        scene.frame_count(),
        scene.elapsed(),
        radians_to_degrees(rx),
        radians_to_degrees(ry)
    );
    log::info!(
        "Upload per frame: {} + {} constant bytes, {} vertex bytes, {} index bytes, {} indices as {:?}",
        upload.per_frame.len(),
        upload.per_model.len(),
        upload.vertices.len(),
        upload.indices.len(),
        upload.index_count,
        upload.topology
    );
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}
