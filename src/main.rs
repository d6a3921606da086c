use anyhow::Context;
use clap::Parser;
use derby_standings::core::report::{render_config_summary, render_json, render_text};
use derby_standings::config::toml_config::REPORT_FORMATS;
use derby_standings::utils::logger;
use derby_standings::utils::validation::{validate_allowed_value, Validate};
use derby_standings::{CliConfig, ScoringOptions, StandingsEngine, StandingsError};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting derby-standings");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        let category = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<StandingsError>())
            .map(StandingsError::category);
        tracing::error!(
            "❌ Standings calculation failed: {:#} (Category: {:?})",
            e,
            category
        );
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    // 載入並驗證配置
    let file_config = config
        .load_file_config()
        .with_context(|| {
            format!(
                "failed to load config file {}",
                config.config.as_deref().unwrap_or_default()
            )
        })?;
    if let Some(file_config) = &file_config {
        file_config.validate()?;
    }

    let options: ScoringOptions = config.scoring_options(file_config.as_ref());
    options.validate()?;
    let format = config.report_format(file_config.as_ref());
    validate_allowed_value("format", &format, &REPORT_FORMATS)?;

    if format == "text" {
        println!("{}", render_config_summary(&options));
    }

    let engine = StandingsEngine::new(options);
    let standings = engine
        .run(&config.csv_path)
        .with_context(|| format!("failed to process {}", config.csv_path))?;

    let output = match format.as_str() {
        "json" => render_json(&standings, engine.config())?,
        _ => render_text(&standings),
    };
    print!("{}", output);

    tracing::info!("✅ Ranked {} categories", standings.len());
    Ok(())
}
