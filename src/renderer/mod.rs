//! Renderer-facing draw data
//!
//! The GPU side lives elsewhere. Once per frame the world is flattened into a
//! `DrawList`: one textured quad per entity plus the stage view-projection.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use glam::{Mat4, Vec2};

use crate::sim::{Entity, World};

/// Which texture a quad uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ball,
    Paddle,
    Block,
}

impl Sprite {
    pub fn texture(&self) -> &'static str {
        match self {
            Sprite::Ball => vertex::textures::BALL,
            Sprite::Paddle => vertex::textures::PADDLE,
            Sprite::Block => vertex::textures::BLOCK,
        }
    }
}

/// Anything that draws as one sprite
pub trait Renderable {
    fn sprite(&self) -> Sprite;
    /// Drawn origin; may differ from the collision box
    fn draw_pos(&self) -> Vec2;
    fn draw_size(&self) -> Vec2;
}

impl Renderable for Entity {
    fn sprite(&self) -> Sprite {
        match self {
            Entity::Ball(_) => Sprite::Ball,
            Entity::Paddle(_) => Sprite::Paddle,
            Entity::Block(_) => Sprite::Block,
        }
    }

    fn draw_pos(&self) -> Vec2 {
        match self {
            Entity::Ball(b) => b.pos,
            Entity::Paddle(p) => p.pos,
            Entity::Block(b) => b.pos,
        }
    }

    fn draw_size(&self) -> Vec2 {
        match self {
            Entity::Ball(b) => b.size,
            Entity::Paddle(p) => p.size,
            Entity::Block(b) => b.size,
        }
    }
}

/// Orthographic projection mapping the stage onto clip space
pub fn view_projection(stage: Vec2) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, stage.x, 0.0, stage.y, -1.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub sprite: Sprite,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct DrawList {
    pub view_proj: Mat4,
    pub commands: Vec<DrawCommand>,
    /// Collision boxes as line-list vertices, when requested
    pub hitbox_lines: Vec<Vertex>,
}

impl DrawList {
    pub fn build(world: &World, show_hitboxes: bool) -> Self {
        let commands = world
            .entities
            .iter()
            .map(|e| DrawCommand {
                sprite: e.sprite(),
                pos: e.draw_pos(),
                size: e.draw_size(),
            })
            .collect();

        let hitbox_lines = if show_hitboxes {
            world
                .entities
                .iter()
                .flat_map(|e| {
                    let hitbox = e.hitbox();
                    shapes::outline(hitbox.lower, hitbox.size())
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            view_proj: view_projection(world.settings.stage),
            commands,
            hitbox_lines,
        }
    }

    /// Quads for one sprite, batched into a single vertex list
    pub fn vertices(&self, sprite: Sprite) -> Vec<Vertex> {
        self.commands
            .iter()
            .filter(|c| c.sprite == sprite)
            .flat_map(|c| shapes::quad(c.pos, c.size))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
