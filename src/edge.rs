use glam::Vec2;

/// What happens to a sample that lies exactly on an edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TieBreak {
  Include,
  Exclude,
}

/// The half-plane to the left of the directed edge `v0 -> v1`, written as
/// `a * x + b * y + c`. The value is positive on the left of the edge, zero
/// on it, and negative on the right.
///
/// Samples that land exactly on the edge are claimed according to `tie`. The
/// rule depends only on the edge's direction, so two triangles sharing an edge
/// (traversed in opposite directions) never both claim, nor both miss, a
/// sample on it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EdgeEquation {
  pub a: f32,
  pub b: f32,
  pub c: f32,
  pub tie: TieBreak,
}

impl EdgeEquation {
  pub fn new(v0: Vec2, v1: Vec2) -> Self {
    let a = v0.y - v1.y;
    let b = v1.x - v0.x;
    let c = -(a * (v0.x + v1.x) + b * (v0.y + v1.y)) / 2.0;
    let include = if a != 0.0 { a > 0.0 } else { b > 0.0 };
    Self {
      a,
      b,
      c,
      tie: if include { TieBreak::Include } else { TieBreak::Exclude },
    }
  }

  pub fn evaluate(&self, point: Vec2) -> f32 {
    self.a * point.x + self.b * point.y + self.c
  }

  /// Whether `point` is inside the half-plane.
  pub fn test(&self, point: Vec2) -> bool {
    self.test_value(self.evaluate(point))
  }

  /// Like [`EdgeEquation::test`], for a value already returned by
  /// [`EdgeEquation::evaluate`].
  pub fn test_value(&self, value: f32) -> bool {
    value > 0.0 || (value == 0.0 && self.tie == TieBreak::Include)
  }
}

/// A triangle in velocity space. Only counter-clockwise (front-facing)
/// triangles have an interior as far as the rasterizer is concerned.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Triangle {
  pub v0: Vec2,
  pub v1: Vec2,
  pub v2: Vec2,
}

impl Triangle {
  pub fn new(v0: Vec2, v1: Vec2, v2: Vec2) -> Self {
    Self { v0, v1, v2 }
  }

  /// The edge equations for `(v1, v2)`, `(v2, v0)` and `(v0, v1)`.
  pub fn edges(&self) -> [EdgeEquation; 3] {
    [
      EdgeEquation::new(self.v1, self.v2),
      EdgeEquation::new(self.v2, self.v0),
      EdgeEquation::new(self.v0, self.v1),
    ]
  }

  pub fn signed_area(&self) -> f32 {
    signed_area_of_edges(&self.edges())
  }

  pub fn min(&self) -> Vec2 {
    self.v0.min(self.v1).min(self.v2)
  }

  pub fn max(&self) -> Vec2 {
    self.v0.max(self.v1).max(self.v2)
  }

  /// The same triangle with every vertex scaled by `factor`.
  pub fn scaled(&self, factor: f32) -> Self {
    Self::new(self.v0 * factor, self.v1 * factor, self.v2 * factor)
  }
}

/// Signed area of the triangle bounded by `edges`, as returned by
/// [`Triangle::edges`]. Each `c` is the cross product of the edge's endpoints,
/// so their sum is twice the area.
pub fn signed_area_of_edges(edges: &[EdgeEquation; 3]) -> f32 {
  0.5 * (edges[0].c + edges[1].c + edges[2].c)
}

#[cfg(test)]
#[path = "edge_test.rs"]
mod test;
