//! Axis-aligned rectangle geometry.
//!
//! Walls, actors, sword hitboxes, and interactables all share this one
//! rectangle type, so every collision test in the game goes through
//! [`Rect::intersects`].

use glam::Vec2;

/// An axis-aligned rectangle in window coordinates (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One of the four cardinal swing directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cardinal {
    Right,
    Left,
    Up,
    Down,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from its center point.
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overlap test with exclusive edges (touching rectangles do not collide).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Copy of this rectangle shifted by an offset.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// True if this rectangle overlaps any rectangle in the slice.
    pub fn intersects_any(&self, others: &[Rect]) -> bool {
        others.iter().any(|o| self.intersects(o))
    }
}

/// Place a sword hitbox flush against `attacker` on its `direction` side.
///
/// `length` extends away from the attacker and `width` spans across it; for
/// vertical swings the two are swapped so the blade always points outward.
pub fn sword_hitbox(attacker: &Rect, direction: Cardinal, length: f32, width: f32) -> Rect {
    let center = attacker.center();
    match direction {
        Cardinal::Right => Rect::new(attacker.right(), center.y - width / 2.0, length, width),
        Cardinal::Left => Rect::new(attacker.x - length, center.y - width / 2.0, length, width),
        Cardinal::Up => Rect::new(center.x - width / 2.0, attacker.y - length, width, length),
        Cardinal::Down => Rect::new(center.x - width / 2.0, attacker.bottom(), width, length),
    }
}

/// Snap a direction vector to the dominant axis: horizontal wins ties.
pub fn cardinal_toward(delta: Vec2) -> Cardinal {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Cardinal::Right
        } else {
            Cardinal::Left
        }
    } else if delta.y > 0.0 {
        Cardinal::Down
    } else {
        Cardinal::Up
    }
}

/// Snap an angle in degrees (`[0, 360)`, y-down screen space) to a cardinal.
///
/// Boundaries sit at 45/135/225/315 degrees; each quadrant includes its lower
/// boundary, so exactly 45 degrees swings down and exactly 315 swings right.
pub fn cardinal_from_angle(angle: f32) -> Cardinal {
    if !(45.0..315.0).contains(&angle) {
        Cardinal::Right
    } else if angle < 135.0 {
        Cardinal::Down
    } else if angle < 225.0 {
        Cardinal::Left
    } else {
        Cardinal::Up
    }
}
