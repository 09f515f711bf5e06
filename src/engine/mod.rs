// Engine modules: physics, sprites and camera, tile maps, input, assets, timing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod tilemap;
