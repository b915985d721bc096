use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{GameId, GameRng, RandomSource, Rect, Vec2};
use crate::error::{ArcadeError, Result};
use crate::rules::{ArcadeGame, GameStatus, RealtimeEngine, TickDelta};

/// Flap game configuration. Distances in pixels, times in seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FlapConfig {
    pub width: f32,
    pub height: f32,

    /// Fixed horizontal position of the body.
    pub body_x: f32,
    pub radius: f32,

    /// Downward acceleration, px/s².
    pub gravity: f32,
    /// Velocity set by `flap`; negative is upwards.
    pub flap_impulse: f32,

    /// Leftward obstacle speed, px/s.
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub gap_height: f32,
    /// Clearance kept free of the gap at the top and bottom of the field.
    pub gap_margin: f32,
    pub spawn_interval: f32,
    /// Distance beyond the right edge at which obstacles appear.
    pub spawn_offset: f32,
}

impl Default for FlapConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
            body_x: 120.0,
            radius: 14.0,
            gravity: 2160.0,
            flap_impulse: -570.0,
            obstacle_speed: 144.0,
            obstacle_width: 60.0,
            gap_height: 150.0,
            gap_margin: 80.0,
            spawn_interval: 1.5,
            spawn_offset: 20.0,
        }
    }
}

impl FlapConfig {
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_gap(mut self, gap_height: f32, gap_margin: f32) -> Self {
        self.gap_height = gap_height;
        self.gap_margin = gap_margin;
        self
    }

    pub fn with_spawn_interval(mut self, seconds: f32) -> Self {
        self.spawn_interval = seconds;
        self
    }

    /// Vertical range the top of a gap may start in.
    fn gap_band(&self) -> (f32, f32) {
        let low = self.gap_margin;
        (low, self.height - self.gap_margin - self.gap_height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0.0 || self.height <= 0.0 || self.radius <= 0.0 {
            return Err(ArcadeError::Config("flap field and body must have positive size".to_string()));
        }
        let (low, high) = self.gap_band();
        if high < low {
            return Err(ArcadeError::Config(format!(
                "flap gap {} with margin {} does not fit a field of height {}",
                self.gap_height, self.gap_margin, self.height
            )));
        }
        if self.spawn_interval <= 0.0 || self.obstacle_speed < 0.0 {
            return Err(ArcadeError::Config("flap spawn interval must be positive".to_string()));
        }
        Ok(())
    }
}

/// A pair of pipes with a vertical gap between them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_height: f32,
    /// Set once the body has passed the trailing edge.
    pub scored: bool,
}

impl Obstacle {
    #[must_use]
    pub const fn new(x: f32, width: f32, gap_top: f32, gap_height: f32) -> Self {
        Self { x, width, gap_top, gap_height, scored: false }
    }

    #[must_use]
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.gap_top)
    }

    #[must_use]
    pub fn bottom_rect(&self, field_height: f32) -> Rect {
        let y = self.gap_top + self.gap_height;
        Rect::new(self.x, y, self.width, (field_height - y).max(0.0))
    }

    #[must_use]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Clone, Debug)]
struct FlightState {
    y: f32,
    v: f32,
    /// Oldest, leftmost obstacle first.
    obstacles: VecDeque<Obstacle>,
    spawn_timer: f32,
    score: u32,
    status: GameStatus,
}

impl FlightState {
    fn fresh(config: &FlapConfig) -> Self {
        Self {
            y: config.height / 2.0,
            v: 0.0,
            obstacles: VecDeque::new(),
            spawn_timer: 0.0,
            score: 0,
            status: GameStatus::Ready,
        }
    }
}

/// A flap run.
#[derive(Clone, Debug)]
pub struct FlapGame<R: RandomSource = GameRng> {
    config: FlapConfig,
    rng: R,
    state: FlightState,
}

impl<R: RandomSource> FlapGame<R> {
    /// New run waiting for its first flap, body centred vertically.
    pub fn new(config: FlapConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let state = FlightState::fresh(&config);
        Ok(Self { config, rng, state })
    }

    /// A run already in flight with the given height and velocity.
    pub fn in_flight(config: FlapConfig, y: f32, v: f32, rng: R) -> Result<Self> {
        let mut game = Self::new(config, rng)?;
        game.state.y = y;
        game.state.v = v;
        game.state.status = GameStatus::Playing;
        Ok(game)
    }

    /// Place obstacles directly, oldest first.
    #[must_use]
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Obstacle>) -> Self {
        self.state.obstacles.extend(obstacles);
        self
    }

    /// Set the velocity to the flap impulse. Starts a waiting run.
    ///
    /// Returns `false` once the run is over.
    pub fn flap(&mut self) -> bool {
        match self.state.status {
            GameStatus::Ready => {
                self.state.status = GameStatus::Playing;
                info!("flap run started");
            }
            GameStatus::Playing => {}
            GameStatus::Won | GameStatus::Lost => return false,
        }
        self.state.v = self.config.flap_impulse;
        true
    }

    fn spawn_obstacle(&mut self) {
        let (low, high) = self.config.gap_band();
        let gap_top = self.rng.gen_range_f32(low, high);
        let obstacle = Obstacle::new(
            self.config.width + self.config.spawn_offset,
            self.config.obstacle_width,
            gap_top,
            self.config.gap_height,
        );
        debug!(gap_top, "obstacle spawned");
        self.state.obstacles.push_back(obstacle);
    }

    /// Body leaves the field or touches a pipe.
    #[must_use]
    pub fn is_colliding(&self) -> bool {
        let (y, r, h) = (self.state.y, self.config.radius, self.config.height);
        if y <= r || y >= h - r {
            return true;
        }
        let center = self.body();
        self.state
            .obstacles
            .iter()
            .any(|o| o.top_rect().intersects_circle(center, r) || o.bottom_rect(h).intersects_circle(center, r))
    }

    /// Centre of the body.
    #[must_use]
    pub fn body(&self) -> Vec2 {
        Vec2::new(self.config.body_x, self.state.y)
    }

    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.state.v
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.state.obstacles.iter()
    }

    #[must_use]
    pub fn config(&self) -> &FlapConfig {
        &self.config
    }
}

impl<R: RandomSource> ArcadeGame for FlapGame<R> {
    fn game_id(&self) -> GameId {
        GameId::Flap
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn status(&self) -> GameStatus {
        self.state.status
    }

    fn restart(&mut self) {
        self.state = FlightState::fresh(&self.config);
        info!("flap restarted");
    }
}

impl<R: RandomSource> RealtimeEngine for FlapGame<R> {
    fn tick(&mut self, dt: f32) -> TickDelta {
        if self.state.status != GameStatus::Playing {
            return TickDelta::idle(self.state.status);
        }

        // Velocity first, then position.
        self.state.v += self.config.gravity * dt;
        self.state.y += self.state.v * dt;

        let shift = self.config.obstacle_speed * dt;
        for obstacle in &mut self.state.obstacles {
            obstacle.x -= shift;
        }
        while self.state.obstacles.front().is_some_and(|o| o.trailing_edge() < 0.0) {
            self.state.obstacles.pop_front();
        }

        self.state.spawn_timer += dt;
        if self.state.spawn_timer > self.config.spawn_interval {
            self.state.spawn_timer = 0.0;
            self.spawn_obstacle();
        }

        let mut gained = 0;
        for obstacle in &mut self.state.obstacles {
            if !obstacle.scored && obstacle.trailing_edge() < self.config.body_x {
                obstacle.scored = true;
                gained += 1;
            }
        }
        self.state.score += gained;

        if self.is_colliding() {
            self.state.status = GameStatus::Lost;
            info!(score = self.state.score, "flap run over");
        }
        TickDelta { score_gained: gained, status: self.state.status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceRng;

    fn flying(y: f32, v: f32) -> FlapGame<SequenceRng> {
        let config = FlapConfig::default().with_gravity(1600.0);
        FlapGame::in_flight(config, y, v, SequenceRng::constant(0.5)).unwrap()
    }

    #[test]
    fn test_semi_implicit_euler() {
        let mut game = flying(200.0, 0.0);
        let delta = game.tick(0.1);
        assert!((game.velocity() - 160.0).abs() < 1e-3);
        assert!((game.body().y - 216.0).abs() < 1e-3);
        assert_eq!(delta.status, GameStatus::Playing);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let mut game = flying(300.0, 250.0);
        assert!(game.flap());
        assert_eq!(game.velocity(), -570.0);
        assert!(game.flap());
        assert_eq!(game.velocity(), -570.0);
    }

    #[test]
    fn test_ready_until_first_flap() {
        let mut game = FlapGame::new(FlapConfig::default(), SequenceRng::constant(0.5)).unwrap();
        assert_eq!(game.status(), GameStatus::Ready);
        game.tick(0.5);
        assert_eq!(game.body().y, 320.0);

        game.flap();
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_floor_ends_run() {
        let mut game = flying(620.0, 300.0);
        let delta = game.tick(0.05);
        assert!(delta.game_over());
        assert!(!game.flap());
        // Frozen after the loss.
        let y = game.body().y;
        game.tick(0.1);
        assert_eq!(game.body().y, y);
    }

    #[test]
    fn test_boundary_contact_is_a_collision() {
        let game = flying(14.0, 0.0);
        assert!(game.is_colliding());
        let game = flying(15.0, 0.0);
        assert!(!game.is_colliding());
    }

    #[test]
    fn test_pipe_collision() {
        // Gap spans 100..250; body at y 300 hits the bottom pipe.
        let game = flying(300.0, 0.0).with_obstacles([Obstacle::new(100.0, 60.0, 100.0, 150.0)]);
        assert!(game.is_colliding());

        let game = flying(175.0, 0.0).with_obstacles([Obstacle::new(100.0, 60.0, 100.0, 150.0)]);
        assert!(!game.is_colliding());
    }

    #[test]
    fn test_scored_once() {
        let config = FlapConfig::default().with_gravity(0.0);
        let mut game = FlapGame::in_flight(config, 320.0, 0.0, SequenceRng::constant(0.5))
            .unwrap()
            .with_obstacles([Obstacle::new(59.0, 60.0, 245.0, 150.0)]);

        let first = game.tick(0.01);
        assert_eq!(first.score_gained, 1);
        for _ in 0..10 {
            assert_eq!(game.tick(0.01).score_gained, 0);
        }
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_spawn_and_discard() {
        let config = FlapConfig::default().with_gravity(0.0).with_spawn_interval(0.1);
        let mut game = FlapGame::in_flight(config, 320.0, 0.0, SequenceRng::constant(0.5))
            .unwrap()
            .with_obstacles([Obstacle::new(-59.0, 60.0, 245.0, 150.0)]);

        game.tick(0.06);
        // The old obstacle has fully left the field; nothing new yet.
        assert_eq!(game.obstacles().count(), 0);

        game.tick(0.06);
        let spawned: Vec<_> = game.obstacles().copied().collect();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].x, 500.0);
        // Midpoint of the 80..410 band.
        assert!((spawned[0].gap_top - 245.0).abs() < 1e-3);
    }

    #[test]
    fn test_config_validation() {
        assert!(FlapConfig::default().validate().is_ok());
        assert!(FlapConfig::default().with_gap(600.0, 80.0).validate().is_err());
    }

    #[test]
    fn test_restart_returns_to_ready() {
        let mut game = flying(620.0, 300.0);
        game.tick(0.05);
        game.restart();
        assert_eq!(game.status(), GameStatus::Ready);
        assert_eq!(game.score(), 0);
        assert_eq!(game.obstacles().count(), 0);
    }
}
