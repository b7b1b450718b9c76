//! Ordered stack of stages, base stage first (§3 "Stage" ordering,
//! §4.7 "stack position from base").

use super::stage::Stage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageStack {
    pub stages: Vec<Stage>,
}

impl StageStack {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn total_mass(&self) -> f64 {
        self.stages.iter().map(|s| s.total_mass()).sum()
    }

    pub fn active_stage(&self, idx: usize) -> Option<&Stage> {
        self.stages.get(idx)
    }

    pub fn active_stage_mut(&mut self, idx: usize) -> Option<&mut Stage> {
        self.stages.get_mut(idx)
    }

    pub fn upper_stages_mass(&self, current_idx: usize) -> f64 {
        self.stages
            .get(current_idx + 1..)
            .map(|rest| rest.iter().map(|s| s.total_mass()).sum())
            .unwrap_or(0.0)
    }
}
