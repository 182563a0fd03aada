//! Optimizer configuration section.

use serde::{Deserialize, Serialize};

use crate::optimizer::OptimizerConfig;

use super::defaults;

/// 2-opt settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptimizerSection {
    /// Smallest saving (pixels) that triggers a reversal
    #[serde(default = "defaults::min_improvement")]
    pub min_improvement: u64,

    /// Cap on 2-opt scans
    #[serde(default = "defaults::max_iterations")]
    pub max_iterations: usize,
}

impl Default for OptimizerSection {
    fn default() -> Self {
        Self {
            min_improvement: defaults::min_improvement(),
            max_iterations: defaults::max_iterations(),
        }
    }
}

impl OptimizerSection {
    /// Convert to OptimizerConfig
    pub fn to_optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            min_improvement: self.min_improvement,
            max_iterations: self.max_iterations,
        }
    }
}
