#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// The default number of cells along each axis of a hazard map.
pub const DEFAULT_RESOLUTION: usize = 128;
/// The default length used to extend the cone edges into a triangle.
pub const DEFAULT_EDGE_LENGTH: f32 = 1000.0;
/// The default time (in simulation time units) under which a collision makes
/// a velocity hazardous.
pub const DEFAULT_TIME_CUTOFF: f32 = 1.0;

/// Tunables shared by every hazard map of a simulation.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct HazardConfig {
  /// Number of cells along each axis. Must be even so the grid is centred on
  /// the zero velocity.
  pub resolution: usize,
  /// Velocity units covered by one cell.
  pub cell_size: f32,
  /// How far the cone edges are extended. Must exceed the grid's extent in
  /// velocity units, otherwise the triangle no longer over-approximates the
  /// cone inside the grid.
  pub edge_length: f32,
  /// Collisions sooner than this mark a velocity as hazardous.
  pub time_cutoff: f32,
}

impl Default for HazardConfig {
  fn default() -> Self {
    Self {
      resolution: DEFAULT_RESOLUTION,
      cell_size: 1.0,
      edge_length: DEFAULT_EDGE_LENGTH,
      time_cutoff: DEFAULT_TIME_CUTOFF,
    }
  }
}

impl HazardConfig {
  pub fn with_resolution(mut self, resolution: usize) -> Self {
    self.resolution = resolution;
    self
  }

  pub fn with_cell_size(mut self, cell_size: f32) -> Self {
    self.cell_size = cell_size;
    self
  }

  pub fn with_edge_length(mut self, edge_length: f32) -> Self {
    self.edge_length = edge_length;
    self
  }

  pub fn with_time_cutoff(mut self, time_cutoff: f32) -> Self {
    self.time_cutoff = time_cutoff;
    self
  }

  /// Half the resolution, i.e. the grid coordinates span
  /// `[-half_range, half_range - 1]` on each axis.
  pub fn half_range(&self) -> i32 {
    (self.resolution / 2) as i32
  }

  /// The diagonal of the grid in velocity units. Any triangle edge longer than
  /// this reaches past the grid from any apex inside it.
  pub fn extent(&self) -> f32 {
    self.resolution as f32 * self.cell_size * std::f32::consts::SQRT_2
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.resolution == 0
      || self.resolution % 2 != 0
      || self.resolution > i32::MAX as usize
    {
      return Err(ConfigError::Resolution(self.resolution));
    }
    if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
      return Err(ConfigError::CellSize(self.cell_size));
    }
    if !(self.time_cutoff.is_finite() && self.time_cutoff > 0.0) {
      return Err(ConfigError::TimeCutoff(self.time_cutoff));
    }
    let required = self.extent();
    if !(self.edge_length.is_finite() && self.edge_length > required) {
      return Err(ConfigError::EdgeTooShort {
        edge_length: self.edge_length,
        required,
      });
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod test;
