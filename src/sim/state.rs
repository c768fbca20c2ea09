//! Game state and core simulation types
//!
//! Entities are a closed set (`Ball`, `Paddle`, `Block`) held in one ordered
//! list inside `World`. The list order is the collision scan order.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionRecord, merge_projections};
use super::rect::Rect;
use super::tick::generate_round;
use crate::consts::PADDLE_LIFT;
use crate::settings::{BoundaryPolicy, HitboxScale, InputPolicy, Settings};

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Sprite origin (lower-left corner)
    pub pos: Vec2,
    /// Sprite extent (diameter x diameter)
    pub size: Vec2,
    /// Unit direction
    pub velocity: Vec2,
    /// Distance per tick
    pub speed: f32,
    pub hitbox_scale: HitboxScale,
}

impl Ball {
    /// Ball centred on `center`, heading straight down
    pub fn new(radius: f32, center: Vec2, speed: f32, hitbox_scale: HitboxScale) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            size: Vec2::splat(radius * 2.0),
            velocity: Vec2::new(0.0, -1.0),
            speed,
            hitbox_scale,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Collision box (may be smaller than the sprite)
    pub fn hitbox(&self) -> Rect {
        let (pos, size) = self.hitbox_scale.apply(self.pos, self.size);
        Rect::from_pos_size(pos, size)
    }

    /// Move one tick and apply stage edges
    ///
    /// Returns true when the ball fell through the bottom edge.
    pub fn advance(&mut self, stage: Vec2, boundary: BoundaryPolicy) -> bool {
        self.pos += self.velocity * self.speed;

        match boundary {
            BoundaryPolicy::Bounce => {
                if self.pos.x + self.size.x > stage.x {
                    self.pos.x = stage.x - self.size.x;
                    self.velocity.x = -self.velocity.x;
                }
                if self.pos.x < 0.0 {
                    self.pos.x = 0.0;
                    self.velocity.x = -self.velocity.x;
                }
            }
            BoundaryPolicy::Wrap => {
                if self.pos.x > stage.x {
                    self.pos.x -= stage.x;
                } else if self.pos.x < 0.0 {
                    self.pos.x += stage.x;
                }
            }
        }

        if self.pos.y + self.size.y > stage.y {
            self.pos.y = stage.y - self.size.y;
            self.velocity.y = -self.velocity.y;
        }

        let missed = self.pos.y < 0.0;
        if missed {
            self.pos.y = stage.y / 2.0;
        }

        // A zero velocity stays zero
        if let Some(dir) = self.velocity.try_normalize() {
            self.velocity = dir;
        }
        missed
    }

    /// Apply the merged correction and reflect on every pushed axis
    ///
    /// Velocity is deliberately not renormalized here.
    pub fn resolve_collision(&mut self, projections: &[Vec2]) {
        let Some(merged) = merge_projections(projections) else {
            return;
        };
        self.pos += merged;
        if merged.x != 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if merged.y != 0.0 {
            self.velocity.y = -self.velocity.y;
        }
    }

    pub fn impulse(&mut self, v: Vec2) {
        self.velocity += v;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Sum of held directions: negative is left, positive is right
    pub velocity: i32,
    /// Distance per tick per unit of `velocity`
    pub speed: f32,
    pub input: InputPolicy,
}

impl Paddle {
    /// Paddle centred horizontally near the bottom of the stage
    pub fn new(size: Vec2, stage: Vec2, speed: f32, input: InputPolicy) -> Self {
        Self {
            pos: Vec2::new((stage.x - size.x) / 2.0, PADDLE_LIFT * stage.y),
            size,
            velocity: 0,
            speed,
            input,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Add a direction (+1 right, -1 left) to the accumulator
    pub fn steer(&mut self, dir: i32) {
        self.velocity += dir;
        if self.input == InputPolicy::Clamp {
            self.velocity = self.velocity.clamp(-1, 1);
        }
    }

    /// Move one tick and apply stage edges
    pub fn advance(&mut self, stage: Vec2, boundary: BoundaryPolicy) {
        self.pos.x += self.speed * self.velocity as f32;
        match boundary {
            BoundaryPolicy::Wrap => {
                if self.pos.x > stage.x {
                    self.pos.x -= stage.x;
                } else if self.pos.x < 0.0 {
                    self.pos.x += stage.x;
                }
            }
            BoundaryPolicy::Bounce => {
                self.pos.x = self.pos.x.clamp(0.0, (stage.x - self.size.x).max(0.0));
            }
        }
    }
}

/// A breakable block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub pos: Vec2,
    pub size: Vec2,
    pub alive: bool,
    /// Grid cell, row 0 at the top
    pub row: u32,
    pub col: u32,
}

impl Block {
    pub fn new(pos: Vec2, size: Vec2, row: u32, col: u32) -> Self {
        Self {
            pos,
            size,
            alive: true,
            row,
            col,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Entity discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Paddle,
    Block,
}

/// What a collision hook learns about the other party
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peer {
    /// Position in the world's entity list this tick
    pub index: usize,
    pub kind: EntityKind,
    pub hitbox: Rect,
}

/// A collidable entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    Ball(Ball),
    Paddle(Paddle),
    Block(Block),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Ball(_) => EntityKind::Ball,
            Entity::Paddle(_) => EntityKind::Paddle,
            Entity::Block(_) => EntityKind::Block,
        }
    }

    pub fn hitbox(&self) -> Rect {
        match self {
            Entity::Ball(b) => b.hitbox(),
            Entity::Paddle(p) => p.hitbox(),
            Entity::Block(b) => b.hitbox(),
        }
    }

    /// Origin corner of the collision box
    pub fn pos(&self) -> Vec2 {
        self.hitbox().lower
    }

    /// Extent of the collision box
    pub fn size(&self) -> Vec2 {
        self.hitbox().size()
    }

    /// Notification for one colliding pair
    pub fn collided(&mut self, other: &Peer, overlap: Rect) {
        match self {
            Entity::Block(block) => {
                if block.alive {
                    log::trace!(
                        "block ({}, {}) hit by {:?} over {:?}",
                        block.row,
                        block.col,
                        other.kind,
                        overlap
                    );
                }
                block.alive = false;
            }
            Entity::Ball(_) | Entity::Paddle(_) => {}
        }
    }

    /// Apply all projection vectors gathered against this entity in one tick
    pub fn resolve_collision(&mut self, projections: &[Vec2]) {
        match self {
            Entity::Ball(ball) => ball.resolve_collision(projections),
            Entity::Paddle(_) | Entity::Block(_) => {}
        }
    }

    pub fn impulse(&mut self, v: Vec2) {
        match self {
            Entity::Ball(ball) => ball.impulse(v),
            Entity::Paddle(_) | Entity::Block(_) => {}
        }
    }

    /// False once a block has been hit
    pub fn is_alive(&self) -> bool {
        match self {
            Entity::Block(block) => block.alive,
            Entity::Ball(_) | Entity::Paddle(_) => true,
        }
    }
}

/// Serve RNG state (seed plus number of serves drawn so far)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// RNG for the next draw; advances the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        self.stream += 1;
        rng
    }
}

/// Running totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub blocks_broken: u64,
    pub misses: u64,
    pub rounds_cleared: u32,
}

/// Everything one round of play mutates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub settings: Settings,
    /// Scan order: paddle, ball, then blocks row by row
    pub entities: Vec<Entity>,
    /// Current round (0-based)
    pub round: u32,
    /// Simulation tick counter
    pub tick_count: u64,
    pub stats: Stats,
    pub rng_state: RngState,
    /// Per-tick projection vectors, parallel to `entities`
    #[serde(skip)]
    pub(crate) record: CollisionRecord,
}

impl World {
    /// Fresh world: paddle, served ball and a full block grid
    pub fn new(settings: Settings) -> Self {
        let stage = settings.stage;
        let paddle = Paddle::new(
            settings.paddle_size,
            stage,
            settings.paddle_step(),
            settings.paddle_input,
        );
        let ball = Ball::new(
            settings.ball_radius,
            stage * 0.5,
            settings.ball_step(),
            settings.ball_hitbox,
        );

        let mut world = Self {
            rng_state: RngState::new(settings.seed),
            settings,
            entities: vec![Entity::Paddle(paddle), Entity::Ball(ball)],
            round: 0,
            tick_count: 0,
            stats: Stats::default(),
            record: CollisionRecord::default(),
        };
        world.serve();
        generate_round(&mut world);
        world
    }

    /// Centre the ball and launch it downward with seeded jitter
    pub fn serve(&mut self) {
        let spread = self.settings.serve_spread.abs();
        let angle = if spread > 0.0 {
            self.rng_state.next_rng().random_range(-spread..=spread)
        } else {
            0.0
        };
        let center = self.settings.stage * 0.5;
        if let Some(ball) = self.ball_mut() {
            let half = ball.size * 0.5;
            ball.pos = center - half;
            ball.velocity = Vec2::from_angle(angle).rotate(Vec2::new(0.0, -1.0));
        }
        log::info!("Serve at angle {:.3} rad", angle);
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.entities.iter().find_map(|e| match e {
            Entity::Ball(b) => Some(b),
            _ => None,
        })
    }

    pub fn ball_mut(&mut self) -> Option<&mut Ball> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Ball(b) => Some(b),
            _ => None,
        })
    }

    pub fn paddle(&self) -> Option<&Paddle> {
        self.entities.iter().find_map(|e| match e {
            Entity::Paddle(p) => Some(p),
            _ => None,
        })
    }

    pub fn paddle_mut(&mut self) -> Option<&mut Paddle> {
        self.entities.iter_mut().find_map(|e| match e {
            Entity::Paddle(p) => Some(p),
            _ => None,
        })
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.entities.iter().filter_map(|e| match e {
            Entity::Block(b) => Some(b),
            _ => None,
        })
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    /// Serialized state, for diffing runs
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
