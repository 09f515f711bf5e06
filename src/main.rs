use anyhow::{Context, Result};
use glam::Vec2;
use log::info;
use std::path::PathBuf;
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use pest_control::engine::assets::{AssetManager, AssetType};
use pest_control::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use pest_control::engine::input::PointerInput;
use pest_control::game::{load_level_from_path, GameScene};

const DEFAULT_LEVEL: &str = "pest_control.json";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Pest Control...");

    // Usage: pest-control [level.json] [asset_root]
    let mut args = std::env::args().skip(1);
    let level_arg = args.next();
    let asset_root = args.next().unwrap_or_else(|| "assets".to_string());

    let mut assets = AssetManager::new(&asset_root);
    assets
        .scan_textures()
        .with_context(|| format!("Failed to load textures from {}", asset_root))?;
    info!("{} textures available", assets.stats().texture_count);

    let level_path = level_arg
        .map(PathBuf::from)
        .unwrap_or_else(|| assets.loader().resolve_path(AssetType::Level, DEFAULT_LEVEL));
    let level = load_level_from_path(&level_path)
        .with_context(|| format!("Failed to load level {}", level_path.display()))?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Pest Control")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    let size = window.inner_size();
    let mut scene = GameScene::new(
        &level,
        &assets,
        Vec2::new(size.width as f32, size.height as f32),
    )?;
    let mut pointer = PointerInput::new();
    let mut game_loop = GameLoop::new();

    info!("Level '{}' loaded, click or touch to walk", level.level_id);

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key: Key::Named(NamedKey::Space),
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => game_loop.toggle_pause(),
                WindowEvent::Focused(focused) => {
                    if focused {
                        game_loop.resume();
                    } else {
                        game_loop.pause();
                    }
                }
                WindowEvent::Resized(physical_size) => {
                    info!("Window resized to {:?}", physical_size);
                    scene.resize(physical_size.width as f32, physical_size.height as f32);
                }
                WindowEvent::RedrawRequested => {
                    let player = scene.player();
                    if let Some(position) = player.position(scene.physics()) {
                        window.set_title(&format!(
                            "Pest Control - {} at ({:.0}, {:.0}) facing {}",
                            player.name,
                            position.x,
                            position.y,
                            scene.movement().facing().name()
                        ));
                    }
                }
                other => pointer.process_window_event(&other, scene.camera()),
            },
            Event::AboutToWait => {
                for pointer_event in pointer.drain() {
                    scene.handle_pointer(pointer_event);
                }

                for _ in 0..game_loop.begin_frame() {
                    scene.fixed_update(FIXED_TIMESTEP);
                }

                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
