//! AABB collision detection and response
//!
//! Runs once per tick in two phases:
//! 1. Every unordered pair `(i, j)`, `i < j`, in entity-list order is tested.
//!    Colliding pairs notify both sides and push a projection vector onto
//!    each side's record.
//! 2. Every entity with a non-empty record resolves it exactly once.

use glam::Vec2;

use super::rect::Rect;
use super::state::{Entity, Peer};
use crate::{negate, sign};

/// Result of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Intersection of the two boxes
    pub overlap: Rect,
    /// Minimum translation for the first box; negate for the second
    pub projection: Vec2,
}

/// Test two boxes for overlap
///
/// Boxes that only share an edge do not collide.
pub fn collide(a: &Rect, b: &Rect) -> Option<Contact> {
    let overlap = a.overlap(b);
    if !overlap.has_area() {
        return None;
    }
    Some(Contact {
        overlap,
        projection: projection_vector(a, b, &overlap),
    })
}

/// Minimum translation separating `a` from `b` along the shallower axis
///
/// Equal width and height push along X. On the chosen axis `a` is pushed
/// negative unless its centre is strictly greater than `b`'s, so boxes with
/// a shared centre on that axis get the same vector from either call order.
/// `collide_all` still hands the pair opposite vectors: the second entity
/// receives the first one's projection through `negate`.
pub fn projection_vector(a: &Rect, b: &Rect, overlap: &Rect) -> Vec2 {
    let ca = a.center();
    let cb = b.center();
    if overlap.height() < overlap.width() {
        let dir = if ca.y > cb.y { 1.0 } else { -1.0 };
        Vec2::new(0.0, dir * overlap.height())
    } else {
        let dir = if ca.x > cb.x { 1.0 } else { -1.0 };
        Vec2::new(dir * overlap.width(), 0.0)
    }
}

/// Combine two corrections on one axis
///
/// Same sign keeps the larger magnitude; opposite signs are averaged.
/// Zero counts as positive.
#[inline]
pub fn merge_axis(a: f32, b: f32) -> f32 {
    if sign(a) == sign(b) {
        if a.abs() >= b.abs() { a } else { b }
    } else {
        (a + b) / 2.0
    }
}

/// Fold a tick's projection vectors into one, left to right per axis
pub fn merge_projections(projections: &[Vec2]) -> Option<Vec2> {
    let (first, rest) = projections.split_first()?;
    Some(rest.iter().fold(*first, |acc, pv| {
        Vec2::new(merge_axis(acc.x, pv.x), merge_axis(acc.y, pv.y))
    }))
}

/// Projection vectors gathered during one tick, indexed like the entity list
#[derive(Debug, Clone, Default)]
pub struct CollisionRecord {
    vectors: Vec<Vec<Vec2>>,
}

impl CollisionRecord {
    /// Empty every slot and size the record for `len` entities
    pub fn reset(&mut self, len: usize) {
        for slot in &mut self.vectors {
            slot.clear();
        }
        self.vectors.resize_with(len, Vec::new);
    }

    pub fn push(&mut self, index: usize, projection: Vec2) {
        self.vectors[index].push(projection);
    }

    pub fn get(&self, index: usize) -> &[Vec2] {
        self.vectors.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Slots with at least one vector, in index order
    pub fn non_empty(&self) -> impl Iterator<Item = (usize, &[Vec2])> {
        self.vectors
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_empty())
            .map(|(i, v)| (i, v.as_slice()))
    }
}

/// Detect and resolve all collisions among `entities`
///
/// Returns the number of colliding pairs.
pub fn collide_all(entities: &mut [Entity], record: &mut CollisionRecord) -> usize {
    record.reset(entities.len());

    // Boxes don't move during detection
    let peers: Vec<Peer> = entities
        .iter()
        .enumerate()
        .map(|(index, e)| Peer {
            index,
            kind: e.kind(),
            hitbox: e.hitbox(),
        })
        .collect();

    let mut pairs = 0;
    for i in 0..peers.len() {
        for j in (i + 1)..peers.len() {
            let (a, b) = (&peers[i], &peers[j]);
            if let Some(contact) = collide(&a.hitbox, &b.hitbox) {
                entities[i].collided(b, contact.overlap);
                entities[j].collided(a, contact.overlap);
                record.push(i, contact.projection);
                record.push(j, negate(contact.projection));
                pairs += 1;
            }
        }
    }

    for (index, projections) in record.non_empty() {
        entities[index].resolve_collision(projections);
    }

    if pairs > 0 {
        log::debug!("{} colliding pair(s)", pairs);
    }
    pairs
}
