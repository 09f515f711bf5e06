// Static colliders for obstacle tiles

use glam::Vec2;
use log::debug;

use crate::engine::physics::{body::presets, ColliderHandle, PhysicsCategory, PhysicsWorld};
use crate::engine::tilemap::{TileCoordinates, TileGrid};

/// User data key marking a tile definition as an obstacle
pub const OBSTACLE_KEY: &str = "obstacle";

/// A static box collider for one obstacle tile
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleCollider {
    pub coordinates: TileCoordinates,
    /// World-space center of the tile
    pub center: Vec2,
    /// Size of the tile's image
    pub size: Vec2,
    pub friction: f32,
    pub category: PhysicsCategory,
}

/// Scan `grid` row by row and describe a collider for every tile whose
/// definition carries the obstacle marker
pub fn generate_obstacle_colliders<G: TileGrid + ?Sized>(grid: &G) -> Vec<ObstacleCollider> {
    let mut colliders = Vec::new();

    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let coordinates = TileCoordinates::new(column, row);
            let Some(tile) = grid.tile_definition(coordinates) else {
                continue;
            };
            if !tile.has_flag(OBSTACLE_KEY) {
                continue;
            }

            colliders.push(ObstacleCollider {
                coordinates,
                center: grid.center_of_tile(coordinates),
                size: tile.size,
                friction: 0.0,
                category: PhysicsCategory::Breakable,
            });
        }
    }

    colliders
}

/// Add each obstacle to the world as a fixed body with a box collider
pub fn spawn_obstacle_colliders(
    obstacles: &[ObstacleCollider],
    physics: &mut PhysicsWorld,
) -> Vec<ColliderHandle> {
    let handles: Vec<ColliderHandle> = obstacles
        .iter()
        .map(|obstacle| {
            let body = physics.add_rigid_body(presets::obstacle_body(obstacle.center));
            physics.add_collider(presets::obstacle_collider(obstacle.size), body)
        })
        .collect();

    debug!("Spawned {} obstacle colliders", handles.len());
    handles
}
