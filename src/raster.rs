use glam::Vec2;

use crate::edge::{signed_area_of_edges, Triangle};

/// An inclusive rectangle of integer grid coordinates. Cells outside it are
/// never visited.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridBounds {
  pub min_x: i32,
  pub max_x: i32,
  pub min_y: i32,
  pub max_y: i32,
}

impl GridBounds {
  /// The square `[-half_range, half_range - 1]` on both axes.
  pub fn centered(half_range: i32) -> Self {
    Self {
      min_x: -half_range,
      max_x: half_range - 1,
      min_y: -half_range,
      max_y: half_range - 1,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.min_x > self.max_x || self.min_y > self.max_y
  }

  pub fn contains(&self, x: i32, y: i32) -> bool {
    (self.min_x..=self.max_x).contains(&x)
      && (self.min_y..=self.max_y).contains(&y)
  }

  /// The overlap of `self` and `other`. May be empty.
  pub fn intersect(&self, other: &GridBounds) -> Self {
    Self {
      min_x: self.min_x.max(other.min_x),
      max_x: self.max_x.min(other.max_x),
      min_y: self.min_y.max(other.min_y),
      max_y: self.max_y.min(other.max_y),
    }
  }

  /// The cells whose lower corner lies in the box spanned by `min` and `max`.
  /// Float to int casts saturate, so huge triangles still clip correctly.
  pub fn covering(min: Vec2, max: Vec2) -> Self {
    Self {
      min_x: min.x.floor() as i32,
      max_x: max.x.floor() as i32,
      min_y: min.y.floor() as i32,
      max_y: max.y.floor() as i32,
    }
  }
}

/// Calls `visit` for every cell in `scissor` whose centre lies inside
/// `triangle`. Triangle coordinates are in cell units, so cell `(x, y)` is
/// sampled at `(x + 0.5, y + 0.5)`.
///
/// Samples on an edge shared by two triangles go to exactly one of them.
/// Back-facing or degenerate triangles, and triangles outside `scissor`, are
/// skipped. Returns whether the triangle was rasterized at all.
pub fn for_each_covered_cell(
  triangle: &Triangle,
  scissor: &GridBounds,
  mut visit: impl FnMut(i32, i32),
) -> bool {
  let bounds =
    GridBounds::covering(triangle.min(), triangle.max()).intersect(scissor);
  if bounds.is_empty() {
    log::trace!("triangle {:?} is outside {:?}", triangle, scissor);
    return false;
  }

  let edges = triangle.edges();
  let area = signed_area_of_edges(&edges);
  if area.is_nan() || area <= 0.0 {
    log::trace!("triangle {:?} is back-facing (area {})", triangle, area);
    return false;
  }

  for y in bounds.min_y..=bounds.max_y {
    for x in bounds.min_x..=bounds.max_x {
      let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
      if edges.iter().all(|edge| edge.test(sample)) {
        visit(x, y);
      }
    }
  }
  true
}

#[cfg(test)]
#[path = "raster_test.rs"]
mod test;
