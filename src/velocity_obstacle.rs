use glam::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{common::rotate_radians, edge::Triangle, BuildError};

/// Returned by [`VelocityObstacle::time_to_collision`] when the candidate
/// velocity never leads to a collision.
pub const NO_COLLISION: f32 = f32::INFINITY;

/// A snapshot of one agent, taken once per simulation step.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
  /// The position of the agent.
  pub position: Vec2,
  /// The current velocity of the agent.
  pub velocity: Vec2,
  /// The radius of the agent's circular footprint.
  pub radius: f32,
  /// The share of avoidance this agent takes on, in `[0, 1]`. An agent with a
  /// bias of 1 has right of way and keeps its velocity. An agent with a bias
  /// of 0 gives way entirely.
  pub bias: f32,
}

/// The set of velocities of `agent` that lead to a collision with `other`.
///
/// The true obstacle is a cone opening from `apex` towards `other`. It is
/// stored as a triangle whose far edge lies `reach` past the apex, measured
/// along the cone's axis.
#[derive(Clone, PartialEq, Debug)]
pub struct VelocityObstacle {
  agent: Obstacle,
  other: Obstacle,
  apex: Vec2,
  axis: Vec2,
  half_angle: f32,
  cos_half_angle: f32,
  left_edge_direction: Vec2,
  right_edge_direction: Vec2,
  reach: f32,
  triangle: Triangle,
}

impl VelocityObstacle {
  /// Builds the velocity obstacle `other` induces on `agent`. The cone is cut
  /// off `edge_length` past the apex along its axis, so the edges themselves
  /// grow as the cone widens.
  ///
  /// The apex blends both velocities by their bias, so the biases of the pair
  /// do not need to sum to one. Agents that touch or overlap have no cone and
  /// are rejected.
  pub fn new(
    agent: &Obstacle,
    other: &Obstacle,
    edge_length: f32,
  ) -> Result<Self, BuildError> {
    let apex = agent.velocity * agent.bias + other.velocity * other.bias;
    if !apex.is_finite() {
      return Err(BuildError::NonFinite);
    }

    let offset = other.position - agent.position;
    let distance = offset.length();
    let combined_radius = agent.radius + other.radius;
    if !distance.is_finite() || !combined_radius.is_finite() {
      return Err(BuildError::NonFinite);
    }
    if combined_radius < 0.0 {
      return Err(BuildError::NegativeRadius { combined_radius });
    }

    if distance <= f32::EPSILON {
      return Err(BuildError::Coincident);
    }

    // The ratio can round up to one for agents a hair apart.
    let sin_half_angle = combined_radius / distance;
    if distance <= combined_radius || sin_half_angle >= 1.0 {
      return Err(BuildError::Overlapping { distance, combined_radius });
    }

    let half_angle = sin_half_angle.asin();
    let cos_half_angle = half_angle.cos();
    let axis = offset / distance;
    let left_edge_direction = rotate_radians(offset, -half_angle).normalize();
    let right_edge_direction = rotate_radians(offset, half_angle).normalize();

    let triangle = truncated_cone(
      apex,
      left_edge_direction,
      right_edge_direction,
      edge_length / cos_half_angle,
    );

    Ok(Self {
      agent: *agent,
      other: *other,
      apex,
      axis,
      half_angle,
      cos_half_angle,
      left_edge_direction,
      right_edge_direction,
      reach: edge_length,
      triangle,
    })
  }

  /// The truncated cone, cut off `reach` past the apex along the axis.
  pub fn triangle_with_reach(&self, reach: f32) -> Triangle {
    truncated_cone(
      self.apex,
      self.left_edge_direction,
      self.right_edge_direction,
      reach / self.cos_half_angle,
    )
  }

  pub fn agent(&self) -> &Obstacle {
    &self.agent
  }

  pub fn other(&self) -> &Obstacle {
    &self.other
  }

  pub fn apex(&self) -> Vec2 {
    self.apex
  }

  /// Unit direction from `agent` towards `other`, the cone's axis.
  pub fn axis(&self) -> Vec2 {
    self.axis
  }

  /// How far past the apex, along the axis, the stored triangle reaches.
  pub fn reach(&self) -> f32 {
    self.reach
  }

  /// Half the opening angle of the cone, in radians.
  pub fn half_angle(&self) -> f32 {
    self.half_angle
  }

  pub fn left_edge_direction(&self) -> Vec2 {
    self.left_edge_direction
  }

  pub fn right_edge_direction(&self) -> Vec2 {
    self.right_edge_direction
  }

  pub fn left_vertex(&self) -> Vec2 {
    self.triangle.v1
  }

  pub fn right_vertex(&self) -> Vec2 {
    self.triangle.v2
  }

  /// The truncated cone as `(apex, left_vertex, right_vertex)`.
  pub fn triangle(&self) -> &Triangle {
    &self.triangle
  }

  /// Computes the earliest non-negative time at which `agent`, moving at
  /// `candidate_velocity` relative to the apex, touches `other`. Returns
  /// [`NO_COLLISION`] if that never happens.
  pub fn time_to_collision(&self, candidate_velocity: Vec2) -> f32 {
    let relative_velocity = candidate_velocity - self.apex;
    let relative_position = self.agent.position - self.other.position;
    let combined_radius = self.agent.radius + self.other.radius;

    // Solve |relative_position + t * relative_velocity| = combined_radius.
    let a = relative_velocity.length_squared();
    if a == 0.0 {
      // No relative motion, and the agents were not overlapping to begin with.
      return NO_COLLISION;
    }
    let b = 2.0 * relative_velocity.dot(relative_position);
    let c =
      relative_position.length_squared() - combined_radius * combined_radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
      return NO_COLLISION;
    }

    let discriminant_sqrt = discriminant.sqrt();
    let forward_time =
      |root: f32| if root >= 0.0 { root } else { NO_COLLISION };
    let time_1 = forward_time((-b + discriminant_sqrt) / (2.0 * a));
    let time_2 = forward_time((-b - discriminant_sqrt) / (2.0 * a));
    time_1.min(time_2)
  }

  /// Whether `candidate_velocity` collides with `other` sooner than
  /// `time_cutoff`.
  pub fn contains_velocity(
    &self,
    candidate_velocity: Vec2,
    time_cutoff: f32,
  ) -> bool {
    self.time_to_collision(candidate_velocity) < time_cutoff
  }
}

fn truncated_cone(
  apex: Vec2,
  left_edge_direction: Vec2,
  right_edge_direction: Vec2,
  edge_length: f32,
) -> Triangle {
  Triangle::new(
    apex,
    apex + left_edge_direction * edge_length,
    apex + right_edge_direction * edge_length,
  )
}

#[cfg(test)]
#[path = "velocity_obstacle_test.rs"]
mod test;
