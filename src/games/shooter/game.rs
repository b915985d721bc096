use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Direction, GameId, GameRng, RandomSource, Rect, Vec2};
use crate::error::{ArcadeError, Result};
use crate::rules::{ArcadeGame, GameStatus, RealtimeEngine, TickDelta};

/// How many targets one projectile may destroy within a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitPolicy {
    /// Every overlapping target is hit, even after the projectile was used.
    #[default]
    Piercing,
    /// The projectile stops at its first hit.
    SingleHit,
}

/// Shooter configuration. Distances in pixels, times in seconds.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub width: f32,
    pub height: f32,

    /// Player start; `x` is the ship's centre, `y` its top edge.
    pub player_start: Vec2,
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal distance of one `move_player` call.
    pub player_step: f32,

    pub projectile_speed: f32,
    pub target_speed: f32,
    pub target_size: f32,
    pub spawn_interval: f32,
    pub hit_policy: HitPolicy,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 640.0,
            player_start: Vec2::new(240.0, 560.0),
            player_width: 40.0,
            player_height: 20.0,
            player_step: 10.0,
            projectile_speed: 400.0,
            target_speed: 150.0,
            target_size: 30.0,
            spawn_interval: 1.0,
            hit_policy: HitPolicy::Piercing,
        }
    }
}

impl ShooterConfig {
    pub fn with_hit_policy(mut self, policy: HitPolicy) -> Self {
        self.hit_policy = policy;
        self
    }

    pub fn with_spawn_interval(mut self, seconds: f32) -> Self {
        self.spawn_interval = seconds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.target_size <= 0.0 || self.target_size >= self.width {
            return Err(ArcadeError::Config(format!(
                "shooter target size {} must fit the field width {}",
                self.target_size, self.width
            )));
        }
        if self.height <= 0.0 || self.player_width <= 0.0 || self.player_height <= 0.0 {
            return Err(ArcadeError::Config("shooter field and ship must have positive size".to_string()));
        }
        if self.spawn_interval <= 0.0 {
            return Err(ArcadeError::Config("shooter spawn interval must be positive".to_string()));
        }
        Ok(())
    }
}

/// A shot travelling upwards. Hit-tested as a point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub consumed: bool,
}

/// A falling enemy; `pos` is its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub size: f32,
    pub consumed: bool,
}

impl Target {
    #[must_use]
    pub const fn new(x: f32, y: f32, size: f32) -> Self {
        Self { pos: Vec2::new(x, y), size, consumed: false }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

#[derive(Clone, Debug)]
struct BattleState {
    player: Vec2,
    projectiles: Vec<Projectile>,
    targets: Vec<Target>,
    spawn_timer: f32,
    score: u32,
    status: GameStatus,
}

impl BattleState {
    fn fresh(config: &ShooterConfig) -> Self {
        Self {
            player: config.player_start,
            projectiles: Vec::new(),
            targets: Vec::new(),
            spawn_timer: 0.0,
            score: 0,
            status: GameStatus::Playing,
        }
    }
}

/// A vertical shooter run.
#[derive(Clone, Debug)]
pub struct ShooterGame<R: RandomSource = GameRng> {
    config: ShooterConfig,
    rng: R,
    state: BattleState,
}

impl<R: RandomSource> ShooterGame<R> {
    pub fn new(config: ShooterConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let state = BattleState::fresh(&config);
        Ok(Self { config, rng, state })
    }

    /// Place targets directly.
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.state.targets.extend(targets);
        self
    }

    /// Launch a projectile from the nose of the ship. Ignored once the run
    /// is over.
    pub fn fire(&mut self) -> bool {
        if self.state.status.is_over() {
            return false;
        }
        let pos = Vec2::new(self.state.player.x, self.state.player.y - self.config.player_height);
        self.state.projectiles.push(Projectile { pos, consumed: false });
        true
    }

    /// Shift the ship one step left or right, clamped to the field.
    ///
    /// Vertical directions are ignored.
    pub fn move_player(&mut self, dir: Direction) {
        if self.state.status.is_over() || !dir.is_horizontal() {
            return;
        }
        let (dx, _) = dir.delta();
        let half = self.config.player_width / 2.0;
        let x = self.state.player.x + dx as f32 * self.config.player_step;
        self.state.player.x = x.clamp(half, self.config.width - half);
    }

    fn spawn_target(&mut self) {
        let size = self.config.target_size;
        let x = self.rng.gen_range_f32(0.0, self.config.width - size);
        debug!(x, "target spawned");
        self.state.targets.push(Target::new(x, -size, size));
    }

    /// Pairwise projectile/target hits. Returns the number of targets hit.
    fn resolve_hits(&mut self) -> u32 {
        let policy = self.config.hit_policy;
        let BattleState { projectiles, targets, .. } = &mut self.state;
        let mut hits = 0;
        for projectile in projectiles.iter_mut() {
            for target in targets.iter_mut() {
                if target.consumed || (projectile.consumed && policy == HitPolicy::SingleHit) {
                    continue;
                }
                if target.bounds().contains(projectile.pos) {
                    target.consumed = true;
                    projectile.consumed = true;
                    hits += 1;
                }
            }
        }
        hits
    }

    /// The ship's bounding box.
    #[must_use]
    pub fn player_bounds(&self) -> Rect {
        let half = self.config.player_width / 2.0;
        Rect::new(
            self.state.player.x - half,
            self.state.player.y,
            self.config.player_width,
            self.config.player_height,
        )
    }

    #[must_use]
    pub fn player(&self) -> Vec2 {
        self.state.player
    }

    pub fn projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.state.projectiles.iter()
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.state.targets.iter()
    }

    #[must_use]
    pub fn config(&self) -> &ShooterConfig {
        &self.config
    }
}

impl<R: RandomSource> ArcadeGame for ShooterGame<R> {
    fn game_id(&self) -> GameId {
        GameId::Shooter
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn status(&self) -> GameStatus {
        self.state.status
    }

    fn restart(&mut self) {
        self.state = BattleState::fresh(&self.config);
        info!("shooter restarted");
    }
}

impl<R: RandomSource> RealtimeEngine for ShooterGame<R> {
    fn tick(&mut self, dt: f32) -> TickDelta {
        if self.state.status != GameStatus::Playing {
            return TickDelta::idle(self.state.status);
        }

        // Sweep what the previous tick consumed.
        self.state.projectiles.retain(|p| !p.consumed);
        self.state.targets.retain(|t| !t.consumed);

        let rise = self.config.projectile_speed * dt;
        for projectile in &mut self.state.projectiles {
            projectile.pos.y -= rise;
        }
        self.state.projectiles.retain(|p| p.pos.y > 0.0);

        let fall = self.config.target_speed * dt;
        for target in &mut self.state.targets {
            target.pos.y += fall;
        }
        let height = self.config.height;
        self.state.targets.retain(|t| t.pos.y <= height);

        self.state.spawn_timer += dt;
        if self.state.spawn_timer > self.config.spawn_interval {
            self.state.spawn_timer = 0.0;
            self.spawn_target();
        }

        let hits = self.resolve_hits();
        self.state.score += hits;

        let ship = self.player_bounds();
        if self.state.targets.iter().any(|t| !t.consumed && t.bounds().intersects(&ship)) {
            self.state.status = GameStatus::Lost;
            info!(score = self.state.score, "shooter run over");
        }
        TickDelta { score_gained: hits, status: self.state.status }
    }
}
