//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering `pos..pos + size`, texture mapped 0..1
///
/// Texture v runs top to bottom, so it is flipped against world y.
pub fn quad(pos: Vec2, size: Vec2) -> [Vertex; 6] {
    let lo = pos;
    let hi = pos + size;
    [
        Vertex::new(lo.x, lo.y, 0.0, 1.0),
        Vertex::new(hi.x, lo.y, 1.0, 1.0),
        Vertex::new(lo.x, hi.y, 0.0, 0.0),
        Vertex::new(hi.x, lo.y, 1.0, 1.0),
        Vertex::new(hi.x, hi.y, 1.0, 0.0),
        Vertex::new(lo.x, hi.y, 0.0, 0.0),
    ]
}

/// Outline of a rect as line-list vertices (debug hitboxes)
pub fn outline(pos: Vec2, size: Vec2) -> [Vertex; 8] {
    let lo = pos;
    let hi = pos + size;
    let corners = [
        Vec2::new(lo.x, lo.y),
        Vec2::new(hi.x, lo.y),
        Vec2::new(hi.x, hi.y),
        Vec2::new(lo.x, hi.y),
    ];
    let mut out = [Vertex::new(0.0, 0.0, 0.0, 0.0); 8];
    for i in 0..4 {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        out[i * 2] = Vertex::new(a.x, a.y, 0.0, 0.0);
        out[i * 2 + 1] = Vertex::new(b.x, b.y, 0.0, 0.0);
    }
    out
}
