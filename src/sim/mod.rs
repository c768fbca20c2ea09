//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies beyond the input event model

pub mod collision;
pub mod driver;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionRecord, Contact, collide, collide_all, merge_axis, merge_projections};
pub use driver::{Driver, FrameClock, FrameReport};
pub use rect::Rect;
pub use state::{Ball, Block, Entity, EntityKind, Paddle, Peer, Stats, World};
pub use tick::{TickReport, block_grid, generate_round, tick};
