pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{toml_config::TomlConfig, ScoringOptions};
pub use crate::core::{
    engine::StandingsEngine,
    ranking::rank,
    record_builder::RaceRecordBuilder,
};
pub use crate::domain::model::{
    CarEntry, CategoryEntry, CategoryStanding, GroupEntry, GroupScore, GroupTime, HeatResult,
    RaceRecord, Standings,
};
pub use crate::utils::error::{Result, StandingsError};
