use glam::Vec2;

/// Computes the 2D determinant of `a` and `b`, aka the 2D cross product.
pub fn determinant(a: Vec2, b: Vec2) -> f32 {
  a.x * b.y - a.y * b.x
}

/// Rotates `v` counter-clockwise by `radians`.
pub fn rotate_radians(v: Vec2, radians: f32) -> Vec2 {
  let (sin, cos) = radians.sin_cos();
  Vec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

/// Computes the signed area of the triangle `v0`, `v1`, `v2`. The area is
/// positive when the vertices wind counter-clockwise.
pub fn signed_area(v0: Vec2, v1: Vec2, v2: Vec2) -> f32 {
  0.5 * determinant(v1 - v0, v2 - v0)
}

#[cfg(test)]
#[path = "common_test.rs"]
mod test;
