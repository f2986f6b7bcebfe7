//! Cloud balancing problem model: assign every process to a computer
//! without exceeding any computer's CPU, memory or network capacity, while
//! keeping the total cost of the computers in use low.

use std::any::Any;

use serde::{Deserialize, Serialize};
use swb_solver::{ImportError, PlanningSolution};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudComputer {
    pub id: u64,
    pub cpu_power: i64,
    pub memory: i64,
    pub network_bandwidth: i64,
    /// Cost of keeping this computer running, paid once if any process uses it.
    pub cost: i64,
}

/// The planning entity. `computer` is an index into
/// [`CloudBalance::computers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudProcess {
    pub id: u64,
    pub required_cpu_power: i64,
    pub required_memory: i64,
    pub required_network_bandwidth: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computer: Option<usize>,
}

impl CloudProcess {
    pub fn difficulty(&self) -> i64 {
        self.required_cpu_power
            .saturating_mul(self.required_memory)
            .saturating_mul(self.required_network_bandwidth)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudBalance {
    pub computers: Vec<CloudComputer>,
    pub processes: Vec<CloudProcess>,
}

/// Resource usage of one computer under the current assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub cpu_power: i64,
    pub memory: i64,
    pub network_bandwidth: i64,
    pub process_count: usize,
}

impl CloudBalance {
    /// Parse a JSON problem.
    ///
    /// # Errors
    ///
    /// `Malformed` if the payload is not a cloud balance document and
    /// `Inconsistent` if it assigns a process to a computer that does not
    /// exist.
    pub fn from_json_slice(payload: &[u8]) -> Result<Self, ImportError> {
        let problem: CloudBalance =
            serde_json::from_slice(payload).map_err(|e| ImportError::Malformed(e.to_string()))?;
        for process in &problem.processes {
            if let Some(index) = process.computer {
                if index >= problem.computers.len() {
                    return Err(ImportError::Inconsistent(format!(
                        "process {} is assigned to computer index {index}, but there are only {} computers",
                        process.id,
                        problem.computers.len()
                    )));
                }
            }
        }
        Ok(problem)
    }

    /// Usage per computer, indexed like `computers`.
    pub fn usage(&self) -> Vec<Usage> {
        let mut usage = vec![Usage::default(); self.computers.len()];
        for process in &self.processes {
            if let Some(u) = process.computer.and_then(|i| usage.get_mut(i)) {
                u.cpu_power += process.required_cpu_power;
                u.memory += process.required_memory;
                u.network_bandwidth += process.required_network_bandwidth;
                u.process_count += 1;
            }
        }
        usage
    }
}

impl PlanningSolution for CloudBalance {
    fn entity_count(&self) -> usize {
        self.processes.len()
    }

    fn value_count(&self) -> usize {
        self.computers.len()
    }

    fn value(&self, entity: usize) -> Option<usize> {
        self.processes.get(entity).and_then(|p| p.computer)
    }

    fn set_value(&mut self, entity: usize, value: Option<usize>) {
        if let Some(process) = self.processes.get_mut(entity) {
            process.computer = value;
        }
    }

    fn difficulty(&self, entity: usize) -> i64 {
        self.processes
            .get(entity)
            .map(CloudProcess::difficulty)
            .unwrap_or_default()
    }

    fn clone_box(&self) -> Box<dyn PlanningSolution> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
