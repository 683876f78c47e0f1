#![doc = include_str!("../README.md")]

mod common;
mod config;
mod edge;
mod error;
mod hazard_map;
mod simulator;
mod velocity_obstacle;

pub mod raster;

pub use glam::Vec2;

pub use common::{determinant, rotate_radians, signed_area};
pub use config::{
  HazardConfig, DEFAULT_EDGE_LENGTH, DEFAULT_RESOLUTION, DEFAULT_TIME_CUTOFF,
};
pub use edge::{signed_area_of_edges, EdgeEquation, TieBreak, Triangle};
pub use error::{BuildError, ConfigError};
pub use hazard_map::{HazardMap, HAZARDOUS, SAFE};
pub use simulator::{BiasPolicy, Contact, Simulator};
pub use velocity_obstacle::{Obstacle, VelocityObstacle, NO_COLLISION};
