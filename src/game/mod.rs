//! Game Module
//!
//! A small side-scrolling platformer: one level built from tile grids, a
//! player that runs, jumps and shoots, and a parallax backdrop.
//!
//! Key concepts:
//! - GameObject: tagged entity (level tile, player or bullet)
//! - GameState: owns every layer plus camera and backdrop
//! - Resources: read-only texture sizes and animation templates
//! - DrawCall: backend-agnostic output of a frame
//!
//! Everything in here runs headless; only `gfx` talks to the GPU.

pub mod animation;
pub mod timer;
pub mod resources;
pub mod entity;
pub mod collision;
pub mod camera;
pub mod tilemap;
pub mod world;
pub mod player;
pub mod runtime;
pub mod renderer;

/// Edge length of a level cell in logical units
pub const TILE_SIZE: f32 = 32.0;
/// Logical viewport size; the window is scaled to fit
pub const LOGICAL_WIDTH: f32 = 640.0;
pub const LOGICAL_HEIGHT: f32 = 320.0;

// Re-export main types
pub use renderer::{build_draw_list, DrawCall};
pub use resources::{Resources, TextureKey};
pub use tilemap::{build_world, WorldError};
pub use world::GameState;
