//! Tile Map and World Builder
//!
//! The level is three fixed 5×50 grids of tile codes (level geometry,
//! foreground decoration, background decoration). The bottom grid row sits on
//! the bottom edge of the logical viewport and rows stack upward.
//!
//! Tile codes:
//! - 0: empty
//! - 1: grass
//! - 2: deep grass
//! - 3: right corner
//! - 4: left corner
//! - 5: right corner connector
//! - 6: left corner connector
//! - 7: player spawn

use macroquad::prelude::{Rect, Vec2};
use crate::config::Settings;
use super::entity::{GameObject, ObjectData, PlayerData};
use super::resources::{player_anim, Resources, TextureKey};
use super::world::GameState;
use super::{LOGICAL_HEIGHT, TILE_SIZE};

pub const MAP_ROWS: usize = 5;
pub const MAP_COLS: usize = 50;

/// One grid of tile codes, one ASCII digit per cell
pub type TileGrid = [&'static [u8; MAP_COLS]; MAP_ROWS];

pub const TILE_EMPTY: u8 = 0;
pub const TILE_PLAYER: u8 = 7;

pub const LEVEL_MAP: TileGrid = [
    b"00000000000000000000000000000000000000000000000000",
    b"00000000000000000000000001000000000000000000000000",
    b"00700000000000000000000010000000000000000000000000",
    b"04130000000000041111130100000000000000000000000000",
    b"16251111111101162222251000000000000000000000000000",
];

pub const FOREGROUND_MAP: TileGrid = [
    b"00000000000000000000000000000000000000000000000000",
    b"00000000000000000000000001000000000000000000000000",
    b"00000000000000000000000000000000000000000000000000",
    b"00000000000000000000000000000000000000000000000000",
    b"00000000000000000000000000000000000000000000000000",
];

pub const BACKGROUND_MAP: TileGrid = [
    b"00000000000000000000000000000000000000000000000000",
    b"00000000000000000000000001000000000000000000000000",
    b"00000000000000000000000000000000000000000000000000",
    b"00000000000000000000000000000000000000000000000000",
    b"00000000000000000000000000000000000000000000000000",
];

/// Player hitbox inside the 32×32 sprite
const PLAYER_COLLIDER: Rect = Rect { x: 6.0, y: 6.0, w: 20.0, h: 26.0 };

/// Error type for world construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// No spawn cell in any grid
    MissingPlayer,
    /// More than one spawn cell
    DuplicatePlayer { count: usize },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::MissingPlayer => write!(f, "no player spawn cell in the tile map"),
            WorldError::DuplicatePlayer { count } => {
                write!(f, "tile map has {} player spawn cells, expected exactly one", count)
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// Tile code stored at a cell
pub fn tile_code(grid: &TileGrid, row: usize, col: usize) -> u8 {
    grid[row][col].wrapping_sub(b'0')
}

/// Texture for a decorative/level tile code
pub fn tile_texture(code: u8) -> Option<TextureKey> {
    match code {
        1 => Some(TextureKey::Grass),
        2 => Some(TextureKey::DeepGrass),
        3 => Some(TextureKey::GrassRight),
        4 => Some(TextureKey::GrassLeft),
        5 => Some(TextureKey::GrassConnectRight),
        6 => Some(TextureKey::GrassConnectLeft),
        _ => None,
    }
}

/// World-space top-left of a cell
pub fn cell_position(row: usize, col: usize) -> Vec2 {
    Vec2::new(
        col as f32 * TILE_SIZE,
        LOGICAL_HEIGHT - (MAP_ROWS - row) as f32 * TILE_SIZE,
    )
}

fn create_tile(row: usize, col: usize, texture: TextureKey) -> GameObject {
    let mut tile = GameObject::new(ObjectData::Level, cell_position(row, col), texture);
    tile.collider = Rect::new(0.0, 0.0, TILE_SIZE, TILE_SIZE);
    tile
}

fn create_player(row: usize, col: usize, res: &Resources, settings: &Settings) -> GameObject {
    let physics = &settings.physics;
    let mut player = GameObject::new(
        ObjectData::Player(PlayerData::new(physics.weapon_cooldown)),
        cell_position(row, col),
        TextureKey::PlayerIdle,
    );
    player.animations = res.player_anims.clone();
    player.current_animation = player_anim::IDLE;
    player.acceleration = Vec2::new(physics.player_acceleration, 0.0);
    player.max_speed_x = physics.player_max_speed;
    player.dynamic = true;
    player.collider = PLAYER_COLLIDER;
    player
}

/// Instantiate one grid. Tiles go to `tiles`, spawn cells to `characters`.
fn load_grid(
    grid: &TileGrid,
    tiles: &mut Vec<GameObject>,
    characters: &mut Vec<GameObject>,
    res: &Resources,
    settings: &Settings,
) {
    for row in 0..MAP_ROWS {
        for col in 0..MAP_COLS {
            let code = tile_code(grid, row, col);
            if code == TILE_EMPTY {
                continue;
            }
            if code == TILE_PLAYER {
                characters.push(create_player(row, col, res, settings));
            } else if let Some(texture) = tile_texture(code) {
                tiles.push(create_tile(row, col, texture));
            }
        }
    }
}

/// Build the world from the built-in maps
pub fn build_world(res: &Resources, settings: &Settings) -> Result<GameState, WorldError> {
    build_world_from(&LEVEL_MAP, &FOREGROUND_MAP, &BACKGROUND_MAP, res, settings)
}

/// Build a world from explicit grids. Exactly one spawn cell must exist
/// across all three grids.
pub fn build_world_from(
    level_map: &TileGrid,
    foreground_map: &TileGrid,
    background_map: &TileGrid,
    res: &Resources,
    settings: &Settings,
) -> Result<GameState, WorldError> {
    let mut level = Vec::new();
    let mut foreground = Vec::new();
    let mut background = Vec::new();
    let mut characters = Vec::new();

    load_grid(level_map, &mut level, &mut characters, res, settings);
    load_grid(foreground_map, &mut foreground, &mut characters, res, settings);
    load_grid(background_map, &mut background, &mut characters, res, settings);

    let player_index = match characters.iter().filter(|c| c.is_player()).count() {
        0 => return Err(WorldError::MissingPlayer),
        1 => characters.iter().position(|c| c.is_player()).unwrap_or(0),
        count => return Err(WorldError::DuplicatePlayer { count }),
    };

    Ok(GameState::new(
        level,
        characters,
        foreground,
        background,
        player_index,
        settings,
    ))
}
