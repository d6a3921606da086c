use crate::config::toml_config::TomlConfig;
use crate::config::ScoringOptions;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "derby-standings")]
#[command(about = "Process a CSV file from GPRM v17+ to calculate team standings")]
pub struct CliConfig {
    /// Heat results CSV exported from the race manager
    pub csv_path: String,

    /// The number of groups to drop the worst scores of [default: 1]
    #[arg(long)]
    pub drop: Option<usize>,

    /// A comma-separated list of groups to exclude from the calculations
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// The number of lanes on the track [default: 4]
    #[arg(long)]
    pub lanes: Option<usize>,

    /// TOML file with [scoring] and [report] settings
    #[arg(long)]
    pub config: Option<String>,

    /// Report format: text or json [default: text]
    #[arg(long)]
    pub format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_file_config(&self) -> Result<Option<TomlConfig>> {
        self.config
            .as_deref()
            .map(TomlConfig::from_file)
            .transpose()
    }

    /// File settings first, then explicit flags on top.
    pub fn scoring_options(&self, file: Option<&TomlConfig>) -> ScoringOptions {
        let mut options = file
            .map(TomlConfig::scoring_options)
            .unwrap_or_default();

        if let Some(drop) = self.drop {
            options.dropped_groups = drop;
        }
        if let Some(lanes) = self.lanes {
            options.lane_count = lanes;
        }
        let exclude: Vec<String> = self
            .exclude
            .iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        if !exclude.is_empty() {
            options.excluded_groups = exclude;
        }
        options
    }

    pub fn report_format(&self, file: Option<&TomlConfig>) -> String {
        self.format
            .clone()
            .or_else(|| file.map(|f| f.report_format().to_string()))
            .unwrap_or_else(|| "text".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = CliConfig::parse_from(["derby-standings", "results.csv"]);
        let options = cli.scoring_options(None);

        assert_eq!(options, ScoringOptions::default());
        assert_eq!(cli.report_format(None), "text");
    }

    #[test]
    fn test_flags_are_parsed() {
        let cli = CliConfig::parse_from([
            "derby-standings",
            "--drop",
            "2",
            "--exclude",
            "Lions, Tigers",
            "--lanes",
            "6",
            "results.csv",
        ]);
        let options = cli.scoring_options(None);

        assert_eq!(cli.csv_path, "results.csv");
        assert_eq!(options.dropped_groups, 2);
        assert_eq!(options.lane_count, 6);
        assert_eq!(options.excluded_groups, vec!["Lions", "Tigers"]);
        assert_eq!(options.cars_per_group, 1);
    }

    #[test]
    fn test_flags_override_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[scoring]
drop = 3
lanes = 8
cars_per_group = 2
exclude = ["Bears"]

[report]
format = "json"
"#,
        )
        .unwrap();
        let cli = CliConfig::parse_from(["derby-standings", "--lanes", "6", "results.csv"]);
        let options = cli.scoring_options(Some(&file));

        assert_eq!(options.dropped_groups, 3);
        assert_eq!(options.lane_count, 6);
        assert_eq!(options.cars_per_group, 2);
        assert_eq!(options.excluded_groups, vec!["Bears"]);
        assert_eq!(cli.report_format(Some(&file)), "json");
    }
}
