use crate::domain::model::{GroupScore, Standings};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Write;

pub fn render_config_summary<C: ConfigProvider>(config: &C) -> String {
    format!(
        "Excluding groups: {}\n\
         Dropping the worst {} group(s)\n\
         Each group contains {} car(s)\n\
         Each car runs on {} lanes\n",
        config.excluded_groups().join(", "),
        config.dropped_groups(),
        config.cars_per_group(),
        config.lane_count()
    )
}

/// One block per ranked category, best first.
pub fn render_text(standings: &Standings) -> String {
    let mut out = String::new();
    for (index, standing) in standings.ranking().iter().enumerate() {
        // String 寫入不會失敗
        let _ = writeln!(
            out,
            "#{} {}, cumulative time: {:.3} seconds",
            index + 1,
            standing.category,
            standing.adjusted_total
        );
        for score in &standing.group_times {
            let _ = writeln!(out, "    {}", describe_group(score));
        }
        let _ = writeln!(
            out,
            "    raw total: {:.3}, adjusted total: {:.3}\n",
            standing.raw_total, standing.adjusted_total
        );
    }
    out
}

fn describe_group(score: &GroupScore) -> String {
    if score.time.is_penalty() {
        format!("{}: {:.3} (did not race)", score.group_id, score.time.seconds())
    } else {
        format!("{}: {:.3}", score.group_id, score.time.seconds())
    }
}

#[derive(Serialize)]
struct ScoringSummary<'a> {
    excluded_groups: &'a [String],
    dropped_groups: usize,
    cars_per_group: usize,
    lane_count: usize,
}

#[derive(Serialize)]
struct RankedEntry<'a> {
    rank: usize,
    category: &'a str,
    adjusted_total: f64,
    raw_total: f64,
    groups: &'a [GroupScore],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    scoring: ScoringSummary<'a>,
    group_order: &'a [String],
    disqualified: &'a [String],
    standings: Vec<RankedEntry<'a>>,
}

pub fn render_json<C: ConfigProvider>(standings: &Standings, config: &C) -> Result<String> {
    let report = JsonReport {
        scoring: ScoringSummary {
            excluded_groups: config.excluded_groups(),
            dropped_groups: config.dropped_groups(),
            cars_per_group: config.cars_per_group(),
            lane_count: config.lane_count(),
        },
        group_order: &standings.group_order,
        disqualified: &standings.disqualified,
        standings: standings
            .ranking()
            .into_iter()
            .enumerate()
            .map(|(index, standing)| RankedEntry {
                rank: index + 1,
                category: &standing.category,
                adjusted_total: standing.adjusted_total,
                raw_total: standing.raw_total,
                groups: &standing.group_times,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
