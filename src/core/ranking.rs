use crate::domain::model::{CategoryStanding, GroupScore, GroupTime, RaceRecord, Standings};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, StandingsError};
use tracing::{debug, warn};

/// Seconds per lane charged for a group a category never raced.
pub const PENALTY_SECONDS_PER_LANE: f64 = 9.9;

pub fn penalty_time(lane_count: usize) -> f64 {
    PENALTY_SECONDS_PER_LANE * lane_count as f64
}

/// Scores every category of `record`.
///
/// `group_count` is the largest number of groups any category raced. A category that raced
/// fewer than `group_count - dropped_groups` groups is disqualified and left out. Groups a
/// ranked category missed are charged [`penalty_time`], then its worst `dropped_groups`
/// entries are left out of the adjusted total.
pub fn rank(
    record: &RaceRecord,
    dropped_groups: usize,
    cars_per_group: usize,
    lane_count: usize,
) -> Result<Standings> {
    let group_count = record
        .categories()
        .iter()
        .map(|c| c.group_count())
        .max()
        .unwrap_or(0);

    let mut group_order: Vec<String> = Vec::new();
    for category in record.categories() {
        for group in category.groups() {
            if !group_order.contains(&group.group_id) {
                group_order.push(group.group_id.clone());
            }
        }
    }

    let kept = group_count.saturating_sub(dropped_groups);
    let penalty = penalty_time(lane_count);
    debug!(
        "Ranking {} categories over {} groups, keeping best {}",
        record.categories().len(),
        group_count,
        kept
    );

    let mut disqualified = Vec::new();
    let mut standings = Vec::new();

    for category in record.categories() {
        if category.group_count() < kept {
            warn!(
                "Disqualifying {}: raced {} of {} groups",
                category.name,
                category.group_count(),
                group_count
            );
            disqualified.push(category.name.clone());
            continue;
        }

        let mut group_times = Vec::with_capacity(group_order.len());
        for group_id in &group_order {
            let time = match category.group(group_id) {
                None => GroupTime::Penalty(penalty),
                Some(group) => {
                    if group.car_count() != cars_per_group {
                        return Err(StandingsError::GroupSizeError {
                            found: group.car_count(),
                            group: group_id.clone(),
                            expected: cars_per_group,
                        });
                    }
                    GroupTime::Raced(group.cumulative_time())
                }
            };
            group_times.push(GroupScore {
                group_id: group_id.clone(),
                time,
            });
        }

        let mut times: Vec<f64> = group_times.iter().map(|g| g.time.seconds()).collect();
        times.sort_by(f64::total_cmp);
        let raw_total = times.iter().fold(0.0, |acc, t| acc + t);
        let adjusted_total = times.iter().take(kept).fold(0.0, |acc, t| acc + t);

        standings.push(CategoryStanding {
            category: category.name.clone(),
            group_times,
            raw_total,
            adjusted_total,
        });
    }

    Ok(Standings::new(group_order, group_count, disqualified, standings))
}

/// [`rank`] with parameters taken from a config provider.
pub fn rank_with<C: ConfigProvider>(record: &RaceRecord, config: &C) -> Result<Standings> {
    rank(
        record,
        config.dropped_groups(),
        config.cars_per_group(),
        config.lane_count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::HeatResult;

    fn record(entries: &[(&str, &str, u32, f64)]) -> RaceRecord {
        let mut record = RaceRecord::new("Den");
        for (heat, (category, group, car, time)) in entries.iter().enumerate() {
            record.observe_group(group);
            record
                .category_or_insert(category)
                .group_or_insert(group)
                .car_or_insert(*car, "Last", "First")
                .push_heat(HeatResult {
                    heat_number: heat as u32 + 1,
                    elapsed_time: *time,
                    finish_place: 1,
                });
        }
        record
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_penalty_time() {
        assert!(close(penalty_time(4), 39.6));
        assert!(close(penalty_time(6), 59.4));
    }

    #[test]
    fn test_missing_group_is_penalized_and_dropped_first() {
        let record = record(&[
            ("A", "g1", 1, 10.0),
            ("A", "g2", 1, 12.0),
            ("A", "g3", 1, 11.0),
            ("B", "g1", 2, 9.0),
            ("B", "g3", 2, 10.0),
        ]);
        let standings = rank(&record, 1, 1, 4).unwrap();

        assert_eq!(standings.group_count, 3);
        assert_eq!(standings.group_order, vec!["g1", "g2", "g3"]);

        let b = standings.get("B").unwrap();
        assert_eq!(b.group_time("g2"), Some(GroupTime::Penalty(penalty_time(4))));
        assert!(close(b.adjusted_total, 19.0));
        assert!(close(b.raw_total, 58.6));
    }

    #[test]
    fn test_heats_across_cars_are_summed() {
        let record = record(&[
            ("A", "g1", 1, 3.0),
            ("A", "g1", 2, 4.0),
            ("A", "g1", 1, 3.5),
        ]);
        let standings = rank(&record, 0, 2, 4).unwrap();
        assert!(close(standings.get("A").unwrap().raw_total, 10.5));
    }

    #[test]
    fn test_group_size_mismatch_aborts() {
        let record = record(&[("A", "g1", 1, 3.0), ("A", "g1", 2, 4.0)]);
        match rank(&record, 0, 1, 4) {
            Err(StandingsError::GroupSizeError {
                found,
                group,
                expected,
            }) => {
                assert_eq!((found, group.as_str(), expected), (2, "g1", 1));
            }
            other => panic!("expected group size error, got {:?}", other),
        }
    }

    #[test]
    fn test_disqualified_category_is_left_out() {
        let record = record(&[
            ("A", "g1", 1, 10.0),
            ("A", "g2", 1, 10.0),
            ("A", "g3", 1, 10.0),
            ("B", "g1", 2, 9.0),
        ]);
        let standings = rank(&record, 1, 1, 4).unwrap();

        assert!(standings.get("B").is_none());
        assert_eq!(standings.disqualified, vec!["B"]);
        assert_eq!(standings.len(), 1);
    }

    #[test]
    fn test_dropping_every_group_keeps_nothing() {
        let record = record(&[("A", "g1", 1, 10.0), ("A", "g2", 1, 12.0)]);
        let standings = rank(&record, 2, 1, 4).unwrap();
        let a = standings.get("A").unwrap();
        assert_eq!(a.adjusted_total, 0.0);
        assert!(close(a.raw_total, 22.0));
    }

    #[test]
    fn test_empty_record_ranks_nothing() {
        let standings = rank(&RaceRecord::new("Den"), 1, 1, 4).unwrap();
        assert!(standings.is_empty());
        assert_eq!(standings.group_count, 0);
    }
}
