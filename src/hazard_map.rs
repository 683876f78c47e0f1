use glam::Vec2;

use crate::{
  edge::Triangle,
  raster::{for_each_covered_cell, GridBounds},
  ConfigError, HazardConfig, VelocityObstacle,
};

/// The value of a cell no obstacle has claimed.
pub const SAFE: f32 = 1.0;
/// The value of a cell that collides with some obstacle within the time
/// cutoff.
pub const HAZARDOUS: f32 = 0.0;

/// A square grid over one agent's candidate velocities. Each cell holds
/// [`SAFE`] or [`HAZARDOUS`].
///
/// Grid coordinates run over `[-half_range, half_range - 1]` on both axes.
/// Cell `(x, y)` stands for the velocity `(x + 0.5, y + 0.5) * cell_size`.
/// Cells are stored row by row, one row per x coordinate, so the buffer's
/// cell `[i][j]` is grid coordinate `(i - half_range, j - half_range)`.
///
/// Rasterizing obstacles only ever lowers cells, so a cell stays safe only if
/// it is safe with respect to every obstacle since the last
/// [`HazardMap::clear`].
#[derive(Clone, PartialEq, Debug)]
pub struct HazardMap {
  config: HazardConfig,
  half_range: i32,
  cells: Vec<f32>,
}

impl HazardMap {
  /// Creates a map with every cell safe.
  pub fn new(config: HazardConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self {
      config,
      half_range: config.half_range(),
      cells: vec![SAFE; config.resolution * config.resolution],
    })
  }

  pub fn config(&self) -> &HazardConfig {
    &self.config
  }

  pub fn resolution(&self) -> usize {
    self.config.resolution
  }

  pub fn half_range(&self) -> i32 {
    self.half_range
  }

  pub fn cell_size(&self) -> f32 {
    self.config.cell_size
  }

  /// The valid grid coordinates.
  pub fn bounds(&self) -> GridBounds {
    GridBounds::centered(self.half_range)
  }

  /// Marks every cell safe again.
  pub fn clear(&mut self) {
    self.cells.fill(SAFE);
  }

  /// Marks every covered cell whose velocity collides with the obstacle's
  /// other agent sooner than the time cutoff.
  pub fn rasterize(&mut self, velocity_obstacle: &VelocityObstacle) {
    let triangle = self
      .covering_triangle(velocity_obstacle)
      .scaled(1.0 / self.cell_size());
    let bounds = self.bounds();
    let time_cutoff = self.config.time_cutoff;
    let cell_size = self.config.cell_size;
    let half_range = self.half_range;
    let resolution = self.config.resolution;
    let cells = &mut self.cells;

    for_each_covered_cell(&triangle, &bounds, |x, y| {
      let velocity = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * cell_size;
      if velocity_obstacle.time_to_collision(velocity) < time_cutoff {
        cells[flat_index(resolution, half_range, x, y)] = HAZARDOUS;
      }
    });
  }

  /// The obstacle's triangle, lengthened if its far edge would cut through
  /// the grid. This happens for wide cones and for apexes far outside the
  /// grid.
  fn covering_triangle(
    &self,
    velocity_obstacle: &VelocityObstacle,
  ) -> Triangle {
    let extent = self.half_range as f32 * self.config.cell_size;
    let apex = velocity_obstacle.apex();
    let axis = velocity_obstacle.axis();
    let required_reach = [
      Vec2::new(-extent, -extent),
      Vec2::new(extent, -extent),
      Vec2::new(extent, extent),
      Vec2::new(-extent, extent),
    ]
    .into_iter()
    .map(|corner| (corner - apex).dot(axis))
    .fold(f32::NEG_INFINITY, f32::max);

    if required_reach < velocity_obstacle.reach() {
      *velocity_obstacle.triangle()
    } else {
      velocity_obstacle
        .triangle_with_reach(required_reach + self.config.cell_size)
    }
  }

  /// Combines `other` into `self`, keeping the lower value of every cell.
  /// Both maps must share the same configuration.
  pub fn merge(&mut self, other: &HazardMap) -> Result<(), ConfigError> {
    if self.config != other.config {
      return Err(ConfigError::Mismatch);
    }
    for (cell, other_cell) in self.cells.iter_mut().zip(&other.cells) {
      *cell = cell.min(*other_cell);
    }
    Ok(())
  }

  fn index(&self, x: i32, y: i32) -> Option<usize> {
    if !self.bounds().contains(x, y) {
      return None;
    }
    Some(flat_index(self.config.resolution, self.half_range, x, y))
  }

  /// The value of grid cell `(x, y)`, or `None` if it is outside the grid.
  pub fn get(&self, x: i32, y: i32) -> Option<f32> {
    self.index(x, y).map(|index| self.cells[index])
  }

  /// The grid cell containing `velocity`, if the grid samples it.
  pub fn cell_for_velocity(&self, velocity: Vec2) -> Option<(i32, i32)> {
    let scaled = (velocity / self.config.cell_size).floor();
    if !scaled.is_finite() {
      return None;
    }
    let (x, y) = (scaled.x as i32, scaled.y as i32);
    self.bounds().contains(x, y).then_some((x, y))
  }

  /// The velocity sampled by grid cell `(x, y)`.
  pub fn velocity_for_cell(&self, x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5) * self.config.cell_size
  }

  pub fn value_at_velocity(&self, velocity: Vec2) -> Option<f32> {
    self.cell_for_velocity(velocity).and_then(|(x, y)| self.get(x, y))
  }

  /// Whether choosing `velocity` avoids every rasterized obstacle. `None` if
  /// the velocity is outside the sampled range.
  pub fn is_velocity_safe(&self, velocity: Vec2) -> Option<bool> {
    self.value_at_velocity(velocity).map(|value| value > HAZARDOUS)
  }

  /// All cells, one row per x coordinate. The value of grid cell `(x, y)` is
  /// at `(x + half_range) * resolution + (y + half_range)`.
  pub fn values(&self) -> &[f32] {
    &self.cells
  }

  pub fn hazardous_cell_count(&self) -> usize {
    self.cells.iter().filter(|&&value| value <= HAZARDOUS).count()
  }

  /// The map as an RGBA8 image, one grey pixel per cell. Image rows follow
  /// the y velocity and columns the x velocity, starting at
  /// `(-half_range, -half_range)`.
  #[cfg(feature = "debug")]
  pub fn to_rgba8(&self) -> Vec<u8> {
    let bounds = self.bounds();
    (bounds.min_y..=bounds.max_y)
      .flat_map(|y| (bounds.min_x..=bounds.max_x).map(move |x| (x, y)))
      .flat_map(|(x, y)| {
        let value = self.get(x, y).unwrap_or(SAFE);
        let grey = (value.clamp(0.0, 1.0) * 255.0) as u8;
        [grey, grey, grey, 255]
      })
      .collect()
  }
}

/// Index of grid coordinate `(x, y)`, with one row per x coordinate. The
/// coordinate must be inside the grid.
fn flat_index(resolution: usize, half_range: i32, x: i32, y: i32) -> usize {
  (x + half_range) as usize * resolution + (y + half_range) as usize
}

#[cfg(test)]
#[path = "hazard_map_test.rs"]
mod test;
