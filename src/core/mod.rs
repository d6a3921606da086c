pub mod engine;
pub mod ranking;
pub mod record_builder;
pub mod report;

pub use crate::domain::model::{RaceRecord, Standings};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
