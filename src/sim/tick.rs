//! Fixed timestep simulation tick
//!
//! One tick: advance paddle and ball, run the collision pass, prune dead
//! blocks, and start a new round if none are left.

use glam::Vec2;

use super::collision::collide_all;
use super::state::{Block, Entity, World};
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Colliding pairs found
    pub contacts: usize,
    /// Blocks removed at the end of the tick
    pub blocks_broken: usize,
    /// Ball fell through the bottom edge
    pub missed: bool,
    /// Last block went and a new grid was laid out
    pub round_cleared: bool,
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World) -> TickReport {
    let mut report = TickReport::default();
    world.tick_count += 1;

    let stage = world.settings.stage;
    let boundary = world.settings.boundary;
    for entity in &mut world.entities {
        match entity {
            Entity::Paddle(paddle) => paddle.advance(stage, boundary),
            Entity::Ball(ball) => report.missed |= ball.advance(stage, boundary),
            Entity::Block(_) => {}
        }
    }
    if report.missed {
        world.stats.misses += 1;
        log::info!("Ball missed at tick {}", world.tick_count);
    }

    report.contacts = collide_all(&mut world.entities, &mut world.record);

    let before = world.entities.len();
    world.entities.retain(Entity::is_alive);
    report.blocks_broken = before - world.entities.len();
    world.stats.blocks_broken += report.blocks_broken as u64;

    // An empty layout has no round to clear
    if world.block_count() == 0 && world.settings.grid.block_count() > 0 {
        world.stats.rounds_cleared += 1;
        world.round += 1;
        generate_round(world);
        report.round_cleared = true;
    }

    report
}

/// Block positions for one round, row-major from the top row
///
/// The grid is centred horizontally and hangs `top_margin` below the stage top.
pub fn block_grid(settings: &Settings) -> Vec<Block> {
    let grid = &settings.grid;
    let extent = grid.extent();
    let left = (settings.stage.x - extent.x) / 2.0;
    let top = settings.stage.y - grid.top_margin;
    let step = grid.block_size + Vec2::splat(grid.gap);

    let mut blocks = Vec::with_capacity(grid.block_count());
    for row in 0..grid.rows {
        let y = top - row as f32 * step.y - grid.block_size.y;
        for col in 0..grid.cols {
            let x = left + col as f32 * step.x;
            blocks.push(Block::new(Vec2::new(x, y), grid.block_size, row, col));
        }
    }
    blocks
}

/// Append a fresh block grid; ball and paddle are left as they are
pub fn generate_round(world: &mut World) {
    let blocks = block_grid(&world.settings);
    log::info!("Round {}: {} blocks", world.round, blocks.len());
    world.entities.extend(blocks.into_iter().map(Entity::Block));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GridLayout;

    #[test]
    fn test_grid_fits_stage() {
        let settings = Settings::default();
        let blocks = block_grid(&settings);
        assert_eq!(blocks.len(), settings.grid.block_count());
        for block in &blocks {
            let hb = block.hitbox();
            assert!(hb.lower.x >= 0.0 && hb.upper.x <= settings.stage.x);
            assert!(hb.upper.y <= settings.stage.y - settings.grid.top_margin + 1e-5);
        }
    }

    #[test]
    fn test_grid_blocks_do_not_overlap() {
        let settings = Settings::default();
        let blocks = block_grid(&settings);
        for (i, a) in blocks.iter().enumerate() {
            for b in &blocks[i + 1..] {
                assert!(!a.hitbox().overlap(&b.hitbox()).has_area());
            }
        }
    }

    #[test]
    fn test_tick_advances_ball() {
        let mut world = World::new(Settings::default());
        let before = world.ball().unwrap().pos;
        let report = tick(&mut world);
        assert_eq!(world.tick_count, 1);
        assert!(!report.missed);
        assert_ne!(world.ball().unwrap().pos, before);
    }

    #[test]
    fn test_block_hit_is_pruned_same_tick() {
        let settings = Settings {
            grid: GridLayout {
                rows: 1,
                cols: 2,
                ..GridLayout::default()
            },
            ..Settings::default()
        };
        let mut world = World::new(settings);
        let target = world.blocks().next().unwrap().hitbox();

        // Park the ball just under the first block, moving up
        let ball = world.ball_mut().unwrap();
        ball.velocity = Vec2::new(0.0, 1.0);
        ball.pos = Vec2::new(target.center().x - ball.size.x / 2.0, target.lower.y - ball.size.y * 0.7);

        let report = tick(&mut world);
        assert_eq!(report.blocks_broken, 1);
        assert_eq!(world.block_count(), 1);
        assert!(world.blocks().all(|b| b.alive));
        assert!(world.ball().unwrap().velocity.y < 0.0);
        assert_eq!(world.stats.blocks_broken, 1);
    }

    #[test]
    fn test_last_block_starts_new_round() {
        let settings = Settings {
            grid: GridLayout {
                rows: 1,
                cols: 1,
                ..GridLayout::default()
            },
            ..Settings::default()
        };
        let mut world = World::new(settings);
        let original: Vec<Vec2> = world.blocks().map(|b| b.pos).collect();
        let target = world.blocks().next().unwrap().hitbox();

        let ball = world.ball_mut().unwrap();
        ball.velocity = Vec2::new(0.0, 1.0);
        ball.pos = Vec2::new(target.center().x - ball.size.x / 2.0, target.lower.y - ball.size.y * 0.7);

        let report = tick(&mut world);
        assert!(report.round_cleared);
        assert_eq!(world.round, 1);
        assert_eq!(world.stats.rounds_cleared, 1);
        let regenerated: Vec<Vec2> = world.blocks().map(|b| b.pos).collect();
        assert_eq!(regenerated, original);
    }

    #[test]
    fn test_empty_grid_never_clears_a_round() {
        let settings = Settings {
            grid: GridLayout {
                rows: 0,
                ..GridLayout::default()
            },
            ..Settings::default()
        };
        let mut world = World::new(settings);
        for _ in 0..10 {
            let report = tick(&mut world);
            assert!(!report.round_cleared);
        }
        assert_eq!(world.round, 0);
        assert_eq!(world.stats.rounds_cleared, 0);
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn test_miss_counts() {
        let mut world = World::new(Settings::default());
        let ball = world.ball_mut().unwrap();
        ball.pos.y = 0.001;
        ball.pos.x = 0.0;
        ball.velocity = Vec2::new(0.0, -1.0);
        // Move the paddle out of the way
        if let Some(paddle) = world.paddle_mut() {
            paddle.pos.x = 3.0;
        }
        let report = tick(&mut world);
        assert!(report.missed);
        assert_eq!(world.stats.misses, 1);
        assert_eq!(world.ball().unwrap().pos.y, world.settings.stage.y / 2.0);
    }
}
