//! Simulation engine
//!
//! Advances the world from one wall-clock timestamp to the next, given the
//! batch of actions buffered since the previous frame. The engine is an
//! explicit instance: it owns the world, the seeded RNG and the tick clock,
//! so independent instances can run side by side (and in tests).

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::action::Action;
use super::geom::{Rect, pixels_moved, random_int, rects_overlap_with_tolerance};
use super::state::{ScreenInfo, World, WorldConfig, WorldState};
use crate::consts::*;

/// State-machine driver for the game world
pub struct Engine {
    world: Option<World>,
    rng: Pcg32,
    /// Timestamp of the previous running tick, ms
    last_update: f64,
    /// Per-tick frame rate samples since the last diagnostic report
    fps_samples: Vec<u32>,
    fps_avg: u32,
}

impl Engine {
    /// Create an engine with no live world. [`Engine::update`] stays a no-op
    /// until [`Engine::init`] is called.
    pub fn new(seed: u64) -> Self {
        Self {
            world: None,
            rng: Pcg32::seed_from_u64(seed),
            last_update: 0.0,
            fps_samples: Vec::new(),
            fps_avg: 0,
        }
    }

    /// Start a fresh world with default tunables
    pub fn init(&mut self, screen: ScreenInfo) {
        self.init_with(screen, WorldConfig::default());
    }

    /// Start a fresh world with explicit tunables, frozen for its lifetime
    pub fn init_with(&mut self, screen: ScreenInfo, config: WorldConfig) {
        log::info!("initializing world ({}x{})", screen.width, screen.height);
        self.world = Some(World::new(screen, config));
    }

    /// The live world, if any
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    /// Last reported rolling average frame rate
    pub fn fps(&self) -> u32 {
        self.fps_avg
    }

    /// Advance the simulation to `time` (ms), consuming this frame's action
    /// batch. Safe no-op while no world exists.
    pub fn update(&mut self, time: f64, actions: &[Action]) {
        let Some(world) = self.world.as_mut() else {
            return;
        };

        match world.state {
            WorldState::Starting => {
                if !actions.is_empty() {
                    world.state = WorldState::Running;
                    // Seed the tick clock so the first physics delta does not
                    // include the time spent on the title screen.
                    self.last_update = time;
                }
            }
            WorldState::GameOver => {
                if world
                    .timestamps
                    .next_game_start_at
                    .is_some_and(|at| time >= at)
                {
                    let screen = world.screen;
                    let config = world.config.clone();
                    self.init_with(screen, config);
                }
            }
            WorldState::Running => self.tick(time, actions),
        }
    }

    /// One running tick: integrate, spawn, scroll, collide, score, report.
    /// Each step reads state the previous step may have just written.
    fn tick(&mut self, time: f64, actions: &[Action]) {
        let delta = ((time - self.last_update) / 1000.0) as f32;
        self.last_update = time;

        let Some(world) = self.world.as_mut() else {
            return;
        };

        update_player(world, delta, actions);

        if time - world.timestamps.last_obstacle_spawned > world.spawn_interval {
            spawn_obstacle_pair(world, &mut self.rng);
            world.timestamps.last_obstacle_spawned = time;
            let (lo, hi) = world.config.obstacle_spawn_interval_range;
            world.spawn_interval = random_int(&mut self.rng, lo, hi) as f64;
        }

        scroll_obstacles(world, pixels_moved(world.config.scroll_speed, delta));
        check_collisions(world, time);
        update_score(world, time);

        // Diagnostics: rolling average frame rate, reported at a throttled
        // interval. Observability only.
        if delta > 0.0 {
            self.fps_samples.push((1.0 / delta).round() as u32);
        }
        if time - world.timestamps.last_debug > world.config.debug_interval {
            if !self.fps_samples.is_empty() {
                let sum: u32 = self.fps_samples.iter().sum();
                self.fps_avg = sum / self.fps_samples.len() as u32;
                self.fps_samples.clear();
            }
            log::debug!(
                "tick: fps={} score={} player=({:.1}, {:.1}) v={:.1} boxes={}",
                self.fps_avg,
                world.score,
                world.player.rect.pos.x,
                world.player.rect.pos.y,
                world.player.velocity_y,
                world.boxes.len(),
            );
            world.timestamps.last_debug = time;
        }
    }
}

fn update_player(world: &mut World, delta: f32, actions: &[Action]) {
    let config = &world.config;
    let player = &mut world.player;

    player.velocity_y += config.gravity * delta;

    // Last flap in the batch wins: assignment, not an impulse sum
    for action in actions {
        if *action == Action::Up {
            player.velocity_y = config.jump_speed;
        }
    }

    // Cap downward speed only
    if player.velocity_y > config.max_fall_speed {
        player.velocity_y = config.max_fall_speed;
    }

    player.rect.pos.y += player.velocity_y * delta;
}

/// Generate one pipe pair just past the right screen edge. The gap center and
/// pipe width are rolled per pair; both members share x and width.
fn spawn_obstacle_pair<R: Rng>(world: &mut World, rng: &mut R) {
    let config = &world.config;
    let half_gap = (config.gap / 2.0).floor();
    let gap_center = random_int(
        rng,
        GAP_EDGE_MARGIN,
        world.screen.height as i32 - GAP_EDGE_MARGIN,
    ) as f32;
    let width = random_int(rng, config.obstacle_min_width, config.obstacle_max_width) as f32;
    let x = world.screen.width + SPAWN_X_MARGIN;

    let upper = Rect::new(
        x,
        gap_center - half_gap - config.obstacle_height,
        width,
        config.obstacle_height,
    );
    let lower = Rect::new(x, gap_center + half_gap, width, config.obstacle_height);

    world.boxes.push(upper);
    world.boxes.push(lower);
}

fn scroll_obstacles(world: &mut World, movement: f32) {
    for bx in &mut world.boxes {
        bx.pos.x -= movement;
    }
    world.boxes.retain(|b| b.right() > 0.0);
}

/// Throttled collision sweep: player vs every live obstacle, plus the
/// fell-off-the-bottom check.
fn check_collisions(world: &mut World, time: f64) {
    if time - world.timestamps.last_collision_check < world.config.collision_check_interval {
        return;
    }
    world.timestamps.last_collision_check = time;

    let player = world.player.rect;
    let tolerance = world.config.collision_tolerance;
    if world
        .boxes
        .iter()
        .any(|b| rects_overlap_with_tolerance(&player, b, tolerance))
    {
        game_over(world, time);
        return;
    }

    if world.player.rect.pos.y > world.screen.height + OUT_OF_BOUNDS_MARGIN {
        game_over(world, time);
    }
}

fn game_over(world: &mut World, time: f64) {
    log::info!("game over: score={}", world.score);
    world.state = WorldState::GameOver;
    world.timestamps.next_game_start_at = Some(time + RESTART_DELAY_MS);
}

fn update_score(world: &mut World, time: f64) {
    if time - world.timestamps.last_score_increase > world.config.score_increase_interval {
        world.score += world.config.score_increase;
        world.timestamps.last_score_increase = time;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenInfo = ScreenInfo {
        width: 1024.0,
        height: 768.0,
    };

    /// Engine already past the title screen, tick clock seeded at t=0
    fn running_engine(config: WorldConfig) -> Engine {
        let mut engine = Engine::new(7);
        engine.init_with(SCREEN, config);
        engine.update(0.0, &[Action::Up]);
        assert_eq!(engine.world().unwrap().state, WorldState::Running);
        engine
    }

    #[test]
    fn update_without_world_is_noop() {
        let mut engine = Engine::new(1);
        for step in 0..10 {
            engine.update(step as f64 * 16.0, &[Action::Up]);
        }
        assert!(engine.world().is_none());
    }

    #[test]
    fn starting_world_runs_on_first_action() {
        let mut engine = Engine::new(1);
        engine.init(SCREEN);
        assert_eq!(engine.world().unwrap().state, WorldState::Starting);

        engine.update(100.0, &[]);
        assert_eq!(engine.world().unwrap().state, WorldState::Starting);

        engine.update(200.0, &[Action::Up]);
        assert_eq!(engine.world().unwrap().state, WorldState::Running);
    }

    #[test]
    fn gravity_integrates_over_delta() {
        let mut engine = running_engine(WorldConfig::default());
        engine.update(100.0, &[]);
        let player = &engine.world().unwrap().player;
        assert!((player.velocity_y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn flap_overrides_velocity() {
        let mut engine = running_engine(WorldConfig::default());
        engine.update(100.0, &[]);
        // Two actions in one batch: the flap wins regardless of position
        engine.update(200.0, &[Action::Down, Action::Up]);
        let player = &engine.world().unwrap().player;
        assert!((player.velocity_y - (-300.0)).abs() < 1e-3);
    }

    #[test]
    fn fall_speed_is_capped() {
        let config = WorldConfig {
            max_fall_speed: 100.0,
            ..WorldConfig::default()
        };
        let mut engine = running_engine(config);
        // Gravity alone would reach 500 px/s over one second
        engine.update(1000.0, &[]);
        let player = &engine.world().unwrap().player;
        assert!((player.velocity_y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn non_up_actions_are_ignored() {
        let mut engine = running_engine(WorldConfig::default());
        engine.update(100.0, &[Action::Down, Action::Left, Action::Right]);
        let player = &engine.world().unwrap().player;
        assert!((player.velocity_y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn score_accrues_per_interval() {
        let config = WorldConfig {
            // Keep the field clear of obstacles for the whole run
            obstacle_spawn_interval: 1_000_000.0,
            ..WorldConfig::default()
        };
        let mut engine = running_engine(config);

        // 3500 ms of running ticks at 100 ms cadence, flapping to stay aloft:
        // the 1000 ms score gate elapses exactly three times.
        for step in 1..=35 {
            engine.update(step as f64 * 100.0, &[Action::Up]);
        }

        let world = engine.world().unwrap();
        assert_eq!(world.state, WorldState::Running);
        assert_eq!(world.score, 300);
    }

    #[test]
    fn obstacles_spawn_scroll_and_expire() {
        let config = WorldConfig {
            obstacle_spawn_interval: 500.0,
            // Re-roll far enough out that only one pair ever spawns
            obstacle_spawn_interval_range: (1_000_000, 1_000_000),
            ..WorldConfig::default()
        };
        let mut engine = running_engine(config);

        engine.update(1000.0, &[Action::Up]);
        {
            let world = engine.world().unwrap();
            assert_eq!(world.boxes.len(), 2);
            let upper = world.boxes[0];
            let lower = world.boxes[1];
            assert!((upper.pos.x - (SCREEN.width + 10.0)).abs() < 1e-3);
            assert!((lower.pos.x - upper.pos.x).abs() < 1e-3);
            assert!((lower.size.x - upper.size.x).abs() < 1e-3);
            // The gap opens between the upper pipe's bottom and the lower's top
            assert!((lower.pos.y - upper.bottom() - 200.0).abs() < 1.0);
        }

        // At 200 px/s the pair is gone once its right edge crosses zero
        let mut time = 1000.0;
        for _ in 0..10 {
            time += 1000.0;
            engine.update(time, &[Action::Up]);
        }
        let world = engine.world().unwrap();
        assert!(world.boxes.is_empty());
        assert_eq!(world.state, WorldState::Running);
    }

    #[test]
    fn collision_triggers_game_over() {
        let config = WorldConfig {
            obstacle_spawn_interval: 1_000_000.0,
            ..WorldConfig::default()
        };
        let mut engine = running_engine(config);

        // Plant a box over the spawn point and let the next sweep find it
        engine
            .world
            .as_mut()
            .unwrap()
            .boxes
            .push(Rect::new(50.0, 0.0, 200.0, 200.0));
        engine.update(200.0, &[]);

        let world = engine.world().unwrap();
        assert_eq!(world.state, WorldState::GameOver);
        assert_eq!(world.timestamps.next_game_start_at, Some(200.0 + 3000.0));
    }

    #[test]
    fn game_over_schedules_and_restarts() {
        let config = WorldConfig {
            obstacle_spawn_interval: 1_000_000.0,
            ..WorldConfig::default()
        };
        let mut engine = running_engine(config);

        // No flaps: gravity drags the player below the screen
        let mut time = 0.0;
        loop {
            time += 100.0;
            engine.update(time, &[]);
            if engine.world().unwrap().state == WorldState::GameOver {
                break;
            }
            assert!(time < 20_000.0, "player never fell out of bounds");
        }

        let restart_at = engine
            .world()
            .unwrap()
            .timestamps
            .next_game_start_at
            .expect("restart not scheduled");
        assert_eq!(restart_at, time + 3000.0);

        engine.update(restart_at - 1.0, &[]);
        assert_eq!(engine.world().unwrap().state, WorldState::GameOver);

        engine.update(restart_at, &[]);
        let world = engine.world().unwrap();
        assert_eq!(world.state, WorldState::Starting);
        assert_eq!(world.score, 0);
        assert!(world.boxes.is_empty());
        assert_eq!(world.player.velocity_y, 0.0);
    }

    #[test]
    fn score_frozen_outside_running() {
        let mut engine = Engine::new(3);
        engine.init(SCREEN);

        // Starting: time passes, nothing accrues
        engine.update(5000.0, &[]);
        assert_eq!(engine.world().unwrap().score, 0);
        assert_eq!(engine.world().unwrap().state, WorldState::Starting);
    }

    #[test]
    fn same_seed_same_world() {
        let mut a = Engine::new(42);
        let mut b = Engine::new(42);
        a.init(SCREEN);
        b.init(SCREEN);

        for step in 0..200 {
            let time = step as f64 * 16.0;
            let actions: &[Action] = if step % 20 == 0 { &[Action::Up] } else { &[] };
            a.update(time, actions);
            b.update(time, actions);
        }

        let wa = a.world().unwrap();
        let wb = b.world().unwrap();
        assert_eq!(wa.state, wb.state);
        assert_eq!(wa.score, wb.score);
        assert_eq!(wa.boxes.len(), wb.boxes.len());
        for (ba, bb) in wa.boxes.iter().zip(&wb.boxes) {
            assert_eq!(ba, bb);
        }
        assert!((wa.player.rect.pos.y - wb.player.rect.pos.y).abs() < 1e-6);
    }
}
