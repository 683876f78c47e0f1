use rayon::prelude::*;

use crate::{
  BuildError, ConfigError, HazardConfig, HazardMap, Obstacle, VelocityObstacle,
};

/// Chooses the biases used for each pair of agents.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum BiasPolicy {
  /// Use the bias stored on each agent.
  #[default]
  PerAgent,
  /// Every agent gives way to every other agent (plain velocity obstacles).
  Yield,
  /// Use the same biases for every pair.
  Fixed { agent: f32, other: f32 },
}

impl BiasPolicy {
  fn apply(&self, agent: &Obstacle, other: &Obstacle) -> (Obstacle, Obstacle) {
    let (agent_bias, other_bias) = match *self {
      BiasPolicy::PerAgent => (agent.bias, other.bias),
      BiasPolicy::Yield => (0.0, 1.0),
      BiasPolicy::Fixed { agent, other } => (agent, other),
    };
    (
      Obstacle { bias: agent_bias, ..*agent },
      Obstacle { bias: other_bias, ..*other },
    )
  }
}

/// A pair of agents for which no velocity obstacle could be built, usually
/// because they are already touching.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Contact {
  pub agent: usize,
  pub other: usize,
  pub error: BuildError,
}

/// Keeps one hazard map per agent and refreshes all of them from the current
/// agent snapshots. Moving the agents is up to the caller.
pub struct Simulator {
  bias_policy: BiasPolicy,
  agents: Vec<Obstacle>,
  hazard_maps: Vec<HazardMap>,
  /// An all-safe map that new agents start from.
  blank_map: HazardMap,
}

impl Simulator {
  pub fn new(config: HazardConfig) -> Result<Simulator, ConfigError> {
    Ok(Self {
      bias_policy: BiasPolicy::default(),
      agents: Vec::new(),
      hazard_maps: Vec::new(),
      blank_map: HazardMap::new(config)?,
    })
  }

  pub fn config(&self) -> &HazardConfig {
    self.blank_map.config()
  }

  pub fn bias_policy(&self) -> BiasPolicy {
    self.bias_policy
  }

  pub fn set_bias_policy(&mut self, bias_policy: BiasPolicy) {
    self.bias_policy = bias_policy;
  }

  /// Adds an agent and returns its index. Its hazard map starts out safe.
  pub fn add_agent(&mut self, agent: Obstacle) -> usize {
    self.agents.push(agent);
    self.hazard_maps.push(self.blank_map.clone());
    self.agents.len() - 1
  }

  pub fn remove_agent(&mut self, agent_index: usize) {
    self.agents.remove(agent_index);
    self.hazard_maps.remove(agent_index);
  }

  pub fn get_agent(&self, agent_index: usize) -> &Obstacle {
    &self.agents[agent_index]
  }

  pub fn get_agent_mut(&mut self, agent_index: usize) -> &mut Obstacle {
    &mut self.agents[agent_index]
  }

  pub fn get_agent_count(&self) -> usize {
    self.agents.len()
  }

  /// The hazard map computed for `agent_index` by the last [`Simulator::step`].
  pub fn get_hazard_map(&self, agent_index: usize) -> &HazardMap {
    &self.hazard_maps[agent_index]
  }

  /// Recomputes every agent's hazard map from the current snapshots. Agents
  /// are evaluated in parallel; none of them is modified.
  ///
  /// Pairs that are already touching contribute nothing to the maps and are
  /// returned instead, so the caller can resolve the collision.
  pub fn step(&mut self) -> Vec<Contact> {
    let agents = &self.agents;
    let bias_policy = self.bias_policy;
    let edge_length = self.blank_map.config().edge_length;

    let contacts = self
      .hazard_maps
      .par_iter_mut()
      .enumerate()
      .flat_map_iter(|(index, hazard_map)| {
        fill_hazard_map(hazard_map, index, agents, bias_policy, edge_length)
      })
      .collect::<Vec<Contact>>();

    log::debug!(
      "updated {} hazard maps, {} contacts",
      self.hazard_maps.len(),
      contacts.len()
    );
    contacts
  }
}

/// Clears `hazard_map` and accumulates the velocity obstacles of every other
/// agent into it.
fn fill_hazard_map(
  hazard_map: &mut HazardMap,
  index: usize,
  agents: &[Obstacle],
  bias_policy: BiasPolicy,
  edge_length: f32,
) -> Vec<Contact> {
  hazard_map.clear();

  let mut contacts = Vec::new();
  for (other_index, other) in agents.iter().enumerate() {
    if other_index == index {
      continue;
    }

    let (agent, other) = bias_policy.apply(&agents[index], other);
    match VelocityObstacle::new(&agent, &other, edge_length) {
      Ok(velocity_obstacle) => hazard_map.rasterize(&velocity_obstacle),
      Err(error) => {
        log::warn!(
          "skipping agent {} for agent {}: {}",
          other_index,
          index,
          error
        );
        contacts.push(Contact { agent: index, other: other_index, error });
      }
    }
  }
  contacts
}

#[cfg(test)]
#[path = "simulator_test.rs"]
mod test;
