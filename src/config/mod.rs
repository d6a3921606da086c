#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_group_names, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DROPPED_GROUPS: usize = 1;
pub const DEFAULT_CARS_PER_GROUP: usize = 1;
pub const DEFAULT_LANE_COUNT: usize = 4;

/// Fully resolved scoring parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringOptions {
    pub excluded_groups: Vec<String>,
    pub dropped_groups: usize,
    pub cars_per_group: usize,
    pub lane_count: usize,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            excluded_groups: Vec::new(),
            dropped_groups: DEFAULT_DROPPED_GROUPS,
            cars_per_group: DEFAULT_CARS_PER_GROUP,
            lane_count: DEFAULT_LANE_COUNT,
        }
    }
}

impl ConfigProvider for ScoringOptions {
    fn excluded_groups(&self) -> &[String] {
        &self.excluded_groups
    }

    fn dropped_groups(&self) -> usize {
        self.dropped_groups
    }

    fn cars_per_group(&self) -> usize {
        self.cars_per_group
    }

    fn lane_count(&self) -> usize {
        self.lane_count
    }
}

impl Validate for ScoringOptions {
    fn validate(&self) -> Result<()> {
        validate_group_names("exclude", &self.excluded_groups)?;
        validate_positive_number("cars_per_group", self.cars_per_group, 1)?;
        validate_positive_number("lanes", self.lane_count, 1)?;
        Ok(())
    }
}
