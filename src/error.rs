use thiserror::Error;

/// Reasons a [`HazardConfig`](crate::HazardConfig) is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
  #[error("resolution must be even and non-zero, was {0}")]
  Resolution(usize),

  #[error("cell_size must be finite and positive, was {0}")]
  CellSize(f32),

  #[error("time_cutoff must be finite and positive, was {0}")]
  TimeCutoff(f32),

  #[error("edge_length {edge_length} must be greater than {required}")]
  EdgeTooShort { edge_length: f32, required: f32 },

  #[error("hazard maps have different configurations")]
  Mismatch,
}

/// Reasons a [`VelocityObstacle`](crate::VelocityObstacle) cannot be built for
/// a pair of agents.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum BuildError {
  #[error("agents share the same position")]
  Coincident,

  #[error("agents overlap: distance {distance}, radii {combined_radius}")]
  Overlapping { distance: f32, combined_radius: f32 },

  #[error("agent radii sum to a negative {combined_radius}")]
  NegativeRadius { combined_radius: f32 },

  #[error("agent velocity, position or radius is not finite")]
  NonFinite,
}

impl BuildError {
  /// Whether the agents are physically touching, i.e. an active collision
  /// rather than bad input.
  pub fn is_contact(&self) -> bool {
    matches!(self, BuildError::Coincident | BuildError::Overlapping { .. })
  }
}
