// Top-down tile RPG movement layer: a character walks to where the pointer
// goes, animates by facing and bumps into obstacle tiles

pub mod core;
pub mod engine;
pub mod game;
