//! # Cloud Balancing
//!
//! The domain behind the `optacloud` project. Class names follow the
//! `cloudbalancing::` namespace that solver configurations refer to.

mod model;
mod score;

pub use model::{CloudBalance, CloudComputer, CloudProcess, Usage};
pub use score::{CapacityConstraint, CloudBalancingEasyScoreCalculator, ComputerCost};

use swb_solver::{ClassRegistry, ImportError, PlanningSolution};

pub const SOLUTION_CLASS: &str = "cloudbalancing::CloudBalance";
pub const ENTITY_CLASS: &str = "cloudbalancing::CloudProcess";
pub const EASY_SCORE_CALCULATOR_CLASS: &str = "cloudbalancing::CloudBalancingEasyScoreCalculator";

pub const REQUIRED_CPU_POWER: &str = "cloudbalancing::RequiredCpuPower";
pub const REQUIRED_MEMORY: &str = "cloudbalancing::RequiredMemory";
pub const REQUIRED_NETWORK_BANDWIDTH: &str = "cloudbalancing::RequiredNetworkBandwidth";
pub const COMPUTER_COST: &str = "cloudbalancing::ComputerCost";

/// Session declared by the module descriptor below.
pub const SESSION_NAME: &str = "cloudBalancingSession";

/// `META-INF/module.yaml` for a cloud balancing module.
pub const MODULE_DESCRIPTOR: &str = "\
sessions:
  - name: cloudBalancingSession
    default: true
    constraints:
      - cloudbalancing::RequiredCpuPower
      - cloudbalancing::RequiredMemory
      - cloudbalancing::RequiredNetworkBandwidth
      - cloudbalancing::ComputerCost
";

fn import(payload: &[u8]) -> Result<Box<dyn PlanningSolution>, ImportError> {
    Ok(Box::new(CloudBalance::from_json_slice(payload)?))
}

/// Register every cloud balancing class.
pub fn register(registry: &mut ClassRegistry) {
    registry.register_solution(SOLUTION_CLASS, &[ENTITY_CLASS], import);
    registry.register_easy_score_calculator(EASY_SCORE_CALCULATOR_CLASS, || {
        Box::new(CloudBalancingEasyScoreCalculator)
    });
    registry.register_constraint(REQUIRED_CPU_POWER, || {
        Box::new(CapacityConstraint::required_cpu_power())
    });
    registry.register_constraint(REQUIRED_MEMORY, || {
        Box::new(CapacityConstraint::required_memory())
    });
    registry.register_constraint(REQUIRED_NETWORK_BANDWIDTH, || {
        Box::new(CapacityConstraint::required_network_bandwidth())
    });
    registry.register_constraint(COMPUTER_COST, || Box::new(ComputerCost));
}
