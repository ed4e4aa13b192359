//! World state and simulation types

use super::geom::Rect;
use crate::consts::*;

/// Current phase of a world's life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldState {
    /// Waiting on the title screen for the first input
    Starting,
    /// Active gameplay
    Running,
    /// Dead, waiting for the scheduled restart
    GameOver,
}

/// The player-controlled bubble: a hitbox plus 1-D vertical velocity
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub rect: Rect,
    /// Pixels/second, positive is downward
    pub velocity_y: f32,
}

/// Fixed screen dimensions for a world's lifetime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenInfo {
    pub width: f32,
    pub height: f32,
}

/// Last-event markers gating the periodic parts of the tick (all ms)
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamps {
    /// Set on game over: when a fresh world replaces this one
    pub next_game_start_at: Option<f64>,
    pub last_obstacle_spawned: f64,
    pub last_debug: f64,
    pub last_collision_check: f64,
    pub last_score_increase: f64,
}

/// Tunables frozen at world creation
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Vertical opening between the members of a pipe pair, pixels
    pub gap: f32,
    /// Downward acceleration, pixels/s²
    pub gravity: f32,
    /// Velocity assigned by a flap, pixels/s (negative = upward)
    pub jump_speed: f32,
    /// Downward velocity cap, pixels/s
    pub max_fall_speed: f32,
    /// Interval before the first obstacle pair, ms
    pub obstacle_spawn_interval: f64,
    /// Re-roll range for subsequent spawn intervals, ms
    pub obstacle_spawn_interval_range: (i32, i32),
    /// Pipe width is re-rolled per pair within this range, pixels
    pub obstacle_min_width: i32,
    pub obstacle_max_width: i32,
    /// Pipe segment height, pixels
    pub obstacle_height: f32,
    /// Leftward obstacle scroll speed, pixels/s
    pub scroll_speed: f32,
    /// Points added each time the score interval elapses
    pub score_increase: u64,
    pub score_increase_interval: f64,
    /// Hitbox forgiveness, pixels
    pub collision_tolerance: f32,
    /// Minimum spacing between collision sweeps, ms
    pub collision_check_interval: f64,
    /// Spacing between diagnostic reports, ms
    pub debug_interval: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gap: 200.0,
            gravity: 500.0,
            jump_speed: -300.0,
            max_fall_speed: 5000.0,
            obstacle_spawn_interval: 2000.0,
            obstacle_spawn_interval_range: (1800, 2200),
            obstacle_min_width: 50,
            obstacle_max_width: 200,
            obstacle_height: 827.0,
            scroll_speed: 200.0,
            score_increase: 100,
            score_increase_interval: 1000.0,
            collision_tolerance: 30.0,
            collision_check_interval: 100.0,
            debug_interval: 1000.0,
        }
    }
}

/// The authoritative simulation snapshot. One live world per engine; a new
/// world replaces the old one wholesale, never a partial reset.
#[derive(Debug, Clone)]
pub struct World {
    pub state: WorldState,
    pub player: Player,
    /// Obstacle segments in spawn order. Pair members are adjacent and share
    /// x and width, so they also leave the screen together.
    pub boxes: Vec<Rect>,
    pub score: u64,
    /// Currently rolled spawn interval, ms. Lives outside `config` because
    /// the config is frozen while this re-rolls per spawn.
    pub spawn_interval: f64,
    pub timestamps: Timestamps,
    pub screen: ScreenInfo,
    pub config: WorldConfig,
}

impl World {
    /// Fresh world on the title screen
    pub fn new(screen: ScreenInfo, config: WorldConfig) -> Self {
        let spawn_interval = config.obstacle_spawn_interval;
        Self {
            state: WorldState::Starting,
            player: Player {
                rect: Rect::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_W, PLAYER_H),
                velocity_y: 0.0,
            },
            boxes: Vec::new(),
            score: 0,
            spawn_interval,
            timestamps: Timestamps::default(),
            screen,
            config,
        }
    }
}
