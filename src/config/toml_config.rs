use crate::config::{
    ScoringOptions, DEFAULT_CARS_PER_GROUP, DEFAULT_DROPPED_GROUPS, DEFAULT_LANE_COUNT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, StandingsError};
use crate::utils::validation::{validate_allowed_value, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const REPORT_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub scoring: ScoringSection,
    pub report: Option<ReportSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringSection {
    pub drop: Option<usize>,
    pub exclude: Option<Vec<String>>,
    pub lanes: Option<usize>,
    pub cars_per_group: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StandingsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DERBY_LANES})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StandingsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn scoring_options(&self) -> ScoringOptions {
        ScoringOptions {
            excluded_groups: self.excluded_groups().to_vec(),
            dropped_groups: self.dropped_groups(),
            cars_per_group: self.cars_per_group(),
            lane_count: self.lane_count(),
        }
    }

    pub fn report_format(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|r| r.format.as_deref())
            .unwrap_or("text")
    }
}

impl ConfigProvider for TomlConfig {
    fn excluded_groups(&self) -> &[String] {
        self.scoring.exclude.as_deref().unwrap_or(&[])
    }

    fn dropped_groups(&self) -> usize {
        self.scoring.drop.unwrap_or(DEFAULT_DROPPED_GROUPS)
    }

    fn cars_per_group(&self) -> usize {
        self.scoring.cars_per_group.unwrap_or(DEFAULT_CARS_PER_GROUP)
    }

    fn lane_count(&self) -> usize {
        self.scoring.lanes.unwrap_or(DEFAULT_LANE_COUNT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.scoring_options().validate()?;
        validate_allowed_value("report.format", self.report_format(), &REPORT_FORMATS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_scoring_section() {
        let toml_content = r#"
[scoring]
drop = 2
exclude = ["Siblings", "Adults"]
lanes = 6
cars_per_group = 2
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dropped_groups(), 2);
        assert_eq!(config.lane_count(), 6);
        assert_eq!(config.cars_per_group(), 2);
        assert_eq!(config.excluded_groups(), &["Siblings", "Adults"]);
        assert_eq!(config.report_format(), "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.scoring_options(), ScoringOptions::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DERBY_STANDINGS_TEST_LANES", "8");

        let toml_content = r#"
[scoring]
lanes = ${DERBY_STANDINGS_TEST_LANES}
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.lane_count(), 8);

        std::env::remove_var("DERBY_STANDINGS_TEST_LANES");
    }

    #[test]
    fn test_config_validation() {
        let zero_lanes = TomlConfig::from_toml_str("[scoring]\nlanes = 0\n").unwrap();
        assert!(zero_lanes.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[report]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[scoring\ndrop = 1");
        assert!(matches!(result, Err(StandingsError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[scoring]\ndrop = 0\n\n[report]\nformat = \"json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.dropped_groups(), 0);
        assert_eq!(config.report_format(), "json");
    }
}
