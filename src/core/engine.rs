use crate::core::ranking::rank_with;
use crate::core::record_builder::RaceRecordBuilder;
use crate::domain::model::Standings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a heat results export and ranks it with the configured scoring rules.
pub struct StandingsEngine<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> StandingsEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn run<P: AsRef<Path>>(&self, csv_path: P) -> Result<Standings> {
        let csv_path = csv_path.as_ref();
        tracing::debug!("Opening {}", csv_path.display());

        // 檔案在此函式結束時關閉
        let file = File::open(csv_path)?;
        self.run_reader(BufReader::new(file))
    }

    pub fn run_reader<R: Read>(&self, reader: R) -> Result<Standings> {
        let builder = RaceRecordBuilder::new(self.config.excluded_groups().iter().cloned());
        let record = builder.build_from_reader(reader)?;
        tracing::info!(
            "Parsed {} categories across {} groups",
            record.categories().len(),
            record.observed_groups().len()
        );

        let standings = rank_with(&record, &self.config)?;
        tracing::info!(
            "Ranked {} categories ({} disqualified)",
            standings.len(),
            standings.disqualified.len()
        );

        Ok(standings)
    }
}
