// Game scene: wires the level, the player, physics and the camera together

use glam::Vec2;
use log::{info, warn};

use super::characters::{Character, MovementController, StatusEffect, HERO_STATS};
use super::level::LevelFile;
use super::obstacles::{generate_obstacle_colliders, spawn_obstacle_colliders, ObstacleCollider};
use crate::engine::assets::{AssetError, AssetManager};
use crate::engine::game_loop::FIXED_TIMESTEP;
use crate::engine::input::PointerEvent;
use crate::engine::physics::{body::presets, ColliderHandle, ContactEvent, PhysicsWorld};
use crate::engine::renderer::Camera;
use crate::engine::tilemap::{TileGrid, TileMap, TileMapError};

/// Tile layer that defines the world bounds
pub const TERRAIN_MAP: &str = "terrain";
/// Tile layer whose flagged tiles become obstacles
pub const OBSTACLES_MAP: &str = "obstacles";
/// Tile layer of bug spray pickups
pub const BUGSPRAY_MAP: &str = "bugspray";

/// Camera stays exactly on the player
const CAMERA_LOCK_DISTANCE: f32 = 0.0;

/// Scene setup errors
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Level '{level}' has no '{map}' tile map")]
    MissingTileMap { level: String, map: String },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    TileMap(#[from] TileMapError),
}

/// One running level
pub struct GameScene {
    physics: PhysicsWorld,

    /// Terrain layer; its frame is the world
    background: TileMap,
    obstacles: Option<TileMap>,
    bugspray: Option<TileMap>,
    obstacle_colliders: Vec<ObstacleCollider>,
    obstacle_handles: Vec<ColliderHandle>,

    player: Character,
    movement: MovementController,

    camera: Camera,
}

impl GameScene {
    /// Build the scene for `level`. The terrain layer and every texture of
    /// the player character are required.
    pub fn new(level: &LevelFile, assets: &AssetManager, viewport: Vec2) -> Result<Self, SceneError> {
        let background = level
            .build_tile_map(TERRAIN_MAP)
            .ok_or_else(|| SceneError::MissingTileMap {
                level: level.level_id.clone(),
                map: TERRAIN_MAP.to_string(),
            })??;

        let obstacles = level.build_tile_map(OBSTACLES_MAP).transpose()?;
        if obstacles.is_none() {
            warn!(
                "Level '{}' has no '{}' tile map, no obstacles will be created",
                level.level_id, OBSTACLES_MAP
            );
        }
        let bugspray = level.build_tile_map(BUGSPRAY_MAP).transpose()?;

        let mut physics = PhysicsWorld::new();
        physics.set_timestep(FIXED_TIMESTEP);

        let spawn = Vec2::new(level.player.x, level.player.y);
        let mut player = Character::new(&level.player.character, HERO_STATS, assets)?;
        player.attach_to_world(&mut physics, spawn);

        let mut camera = Camera::new(spawn, viewport.x, viewport.y);
        if let Some(settings) = &level.camera {
            camera.set_scale(Vec2::new(settings.scale_x, settings.scale_y));
        }

        let mut scene = Self {
            physics,
            background,
            obstacles,
            bugspray,
            obstacle_colliders: Vec::new(),
            obstacle_handles: Vec::new(),
            movement: MovementController::from_stats(&player.stats),
            player,
            camera,
        };

        scene.setup_camera();
        scene.setup_world_physics();
        scene.setup_obstacle_physics();

        info!(
            "Level '{}' ready: {}x{} terrain, {} obstacles",
            level.level_id,
            scene.background.columns(),
            scene.background.rows(),
            scene.obstacle_colliders.len()
        );
        Ok(scene)
    }

    fn setup_camera(&mut self) {
        self.camera
            .constrain(self.background.frame(), CAMERA_LOCK_DISTANCE);
        if let Some(position) = self.player.position(&self.physics) {
            self.camera.follow(position);
        }
    }

    fn setup_world_physics(&mut self) {
        let edge = self.physics.add_rigid_body(presets::edge_body());
        self.physics
            .add_collider(presets::edge_collider(self.background.frame()), edge);
    }

    fn setup_obstacle_physics(&mut self) {
        let Some(obstacles) = &self.obstacles else {
            return;
        };

        self.obstacle_colliders = generate_obstacle_colliders(obstacles);
        self.obstacle_handles = spawn_obstacle_colliders(&self.obstacle_colliders, &mut self.physics);
    }

    /// Send the player toward a world position
    pub fn touch_began(&mut self, location: Vec2) {
        self.movement
            .move_to(&mut self.player, &mut self.physics, location);
    }

    /// Presses and drags retarget the player; releases change nothing
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(location) | PointerEvent::Moved(location) => {
                self.touch_began(location)
            }
            PointerEvent::Up(_) => {}
        }
    }

    /// Advance the scene by one fixed step
    pub fn fixed_update(&mut self, dt: f32) {
        self.physics.step();

        let contacts = self.physics.contact_events();
        self.handle_contacts(&contacts);

        if self.movement.tick(&mut self.player, &mut self.physics) {
            // Arrival cancelled every action, status blinks included
            self.player.status.restore(&mut self.player.sprite);
        }

        self.collect_bugspray();

        self.player.update(&self.physics, dt);
        if let Some(position) = self.player.position(&self.physics) {
            self.camera.follow(position);
        }
    }

    /// Every new contact involving the player resyncs its walk animation
    fn handle_contacts(&mut self, contacts: &[ContactEvent]) {
        let Some(player_collider) = self.player.collider_handle() else {
            return;
        };

        for contact in contacts {
            if contact.is_began() && contact.involves(player_collider) {
                self.movement.on_contact(&mut self.player, &self.physics);
            }
        }
    }

    /// Pick up the bug spray under the player, if any
    fn collect_bugspray(&mut self) {
        let Some(map) = &mut self.bugspray else {
            return;
        };
        let Some(coordinates) = self
            .player
            .position(&self.physics)
            .and_then(|position| map.tile_coordinates(position))
        else {
            return;
        };

        if map.tile_definition(coordinates).is_some() && map.set_tile(coordinates, None).is_ok() {
            info!(
                "Bug spray picked up at ({}, {})",
                coordinates.column, coordinates.row
            );
            self.player.apply_status(StatusEffect::Bugspray);
        }
    }

    /// The window changed size; the camera region follows
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        if let Some(position) = self.player.position(&self.physics) {
            self.camera.follow(position);
        }
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn background(&self) -> &TileMap {
        &self.background
    }

    pub fn obstacles(&self) -> Option<&TileMap> {
        self.obstacles.as_ref()
    }

    pub fn bugspray(&self) -> Option<&TileMap> {
        self.bugspray.as_ref()
    }

    pub fn obstacle_colliders(&self) -> &[ObstacleCollider] {
        &self.obstacle_colliders
    }

    pub fn obstacle_handles(&self) -> &[ColliderHandle] {
        &self.obstacle_handles
    }
}
