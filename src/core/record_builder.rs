//! Builds a [`RaceRecord`] from the rows of a heat results export.
//!
//! The export starts with an arbitrary preamble (report title, event name,
//! blank lines). The header row is found by scanning for a row that carries
//! every required column label; everything after it is heat data where a
//! non-empty first cell opens a new heat for the group named in the second
//! cell, and following rows with an empty first cell belong to that heat.

use crate::domain::model::{HeatResult, RaceRecord};
use crate::utils::error::{Result, StandingsError};
use csv::StringRecord;
use std::io::Read;
use tracing::debug;

/// Column labels a row must carry to be recognised as the header.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "Place",
    "Lane",
    "Times",
    "Speed (MPH)",
    "Last Name",
    "First Name",
    "Car#",
    "Group",
];

const COL_HEAT: usize = 0;
const COL_GROUP: usize = 1;
const COL_LAST_NAME: usize = 3;
const COL_FIRST_NAME: usize = 4;
const COL_CAR: usize = 5;
const COL_CATEGORY: usize = 6;
const COL_TIME: usize = 7;
const COL_PLACE: usize = 8;

/// Collapses runs of whitespace to a single space and trims the ends.
pub fn normalize_cell(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}

// "Car#", "Car #" and " Car# " compare equal.
fn label_key(cell: &str) -> String {
    cell.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_required(label: &str) -> bool {
    let key = label_key(label);
    REQUIRED_FIELDS.iter().any(|field| label_key(field) == key)
}

pub fn is_header_row(row: &StringRecord) -> bool {
    let keys: Vec<String> = row.iter().map(label_key).collect();
    REQUIRED_FIELDS
        .iter()
        .all(|field| keys.contains(&label_key(field)))
}

/// The first column after the heat-name column that is not a required field.
pub fn detect_round_label(row: &StringRecord) -> Option<String> {
    row.iter()
        .skip(1)
        .map(normalize_cell)
        .find(|label| !label.is_empty() && !is_required(label))
}

fn row_number(row: &StringRecord, index: usize) -> usize {
    row.position()
        .map(|p| p.line() as usize)
        .unwrap_or(index + 1)
}

fn cell<'r>(row: &'r StringRecord, index: usize, field: &str, row_no: usize) -> Result<&'r str> {
    row.get(index)
        .map(str::trim)
        .ok_or_else(|| StandingsError::MissingColumnError {
            row: row_no,
            index,
            field: field.to_string(),
        })
}

fn parse_count(value: &str, field: &str, row_no: usize) -> Result<u32> {
    let parsed: u32 = value
        .parse()
        .map_err(|e| StandingsError::parse(field, value, row_no, e))?;
    if parsed == 0 {
        return Err(StandingsError::parse(field, value, row_no, "must be at least 1"));
    }
    Ok(parsed)
}

fn parse_seconds(value: &str, field: &str, row_no: usize) -> Result<f64> {
    let parsed: f64 = value
        .parse()
        .map_err(|e| StandingsError::parse(field, value, row_no, e))?;
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(StandingsError::parse(
            field,
            value,
            row_no,
            "must be a non-negative number of seconds",
        ));
    }
    Ok(parsed)
}

/// Accumulates heat rows into a race record, skipping excluded groups.
#[derive(Debug)]
pub struct RaceRecordBuilder {
    excluded_groups: Vec<String>,
    record: RaceRecord,
    current_heat: Option<u32>,
    current_group: Option<String>,
}

impl RaceRecordBuilder {
    pub fn new<I, S>(excluded_groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_groups: excluded_groups.into_iter().map(Into::into).collect(),
            record: RaceRecord::default(),
            current_heat: None,
            current_group: None,
        }
    }

    /// Reads a CSV export. Rows may have differing field counts.
    pub fn build_from_reader<R: Read>(self, reader: R) -> Result<RaceRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        self.build(reader.records())
    }

    pub fn build<I>(mut self, rows: I) -> Result<RaceRecord>
    where
        I: IntoIterator<Item = csv::Result<StringRecord>>,
    {
        let mut rows = rows.into_iter().enumerate();

        let (header_row, round_label) = Self::locate_header(&mut rows)?;
        debug!(
            "Found header at row {}, round column is '{}'",
            header_row, round_label
        );
        self.record = RaceRecord::new(&round_label);

        for (index, row) in rows {
            let row = row?;
            self.consume_row(&row, row_number(&row, index))?;
        }

        self.finish()
    }

    fn locate_header<I>(rows: &mut I) -> Result<(usize, String)>
    where
        I: Iterator<Item = (usize, csv::Result<StringRecord>)>,
    {
        for (index, row) in rows {
            let row = row?;
            if !is_header_row(&row) {
                continue;
            }
            let row_no = row_number(&row, index);
            let label =
                detect_round_label(&row).ok_or(StandingsError::SchemaError { row: row_no })?;
            return Ok((row_no, label));
        }

        Err(StandingsError::FormatError {
            reason: format!(
                "no header row containing all of: {}",
                REQUIRED_FIELDS.join(", ")
            ),
        })
    }

    fn consume_row(&mut self, row: &StringRecord, row_no: usize) -> Result<()> {
        let marker = cell(row, COL_HEAT, "heat", row_no)?;
        if !marker.is_empty() {
            let heat = parse_count(marker, "heat", row_no)?;
            let group = cell(row, COL_GROUP, "group", row_no)?;
            debug!("Heat {} opens group '{}' at row {}", heat, group, row_no);
            self.record.observe_group(group);
            self.current_heat = Some(heat);
            self.current_group = Some(group.to_string());
        }

        let (heat_number, group) = match (self.current_heat, self.current_group.as_deref()) {
            (Some(heat), Some(group)) => (heat, group),
            _ => return Err(StandingsError::OrphanRowError { row: row_no }),
        };

        if self.excluded_groups.iter().any(|g| g == group) {
            return Ok(());
        }

        let category = cell(row, COL_CATEGORY, "category", row_no)?;
        let car_number = cell(row, COL_CAR, "car number", row_no)?;
        let car_number: u32 = car_number
            .parse()
            .map_err(|e| StandingsError::parse("car number", car_number, row_no, e))?;
        let last_name = cell(row, COL_LAST_NAME, "last name", row_no)?;
        let first_name = cell(row, COL_FIRST_NAME, "first name", row_no)?;
        let elapsed_time = cell(row, COL_TIME, "time", row_no)?;
        let elapsed_time = parse_seconds(elapsed_time, "time", row_no)?;
        let finish_place = cell(row, COL_PLACE, "place", row_no)?;
        let finish_place = parse_count(finish_place, "place", row_no)?;

        self.record
            .category_or_insert(category)
            .group_or_insert(group)
            .car_or_insert(car_number, last_name, first_name)
            .push_heat(HeatResult {
                heat_number,
                elapsed_time,
                finish_place,
            });

        Ok(())
    }

    fn finish(self) -> Result<RaceRecord> {
        if let Some(missing) = self
            .excluded_groups
            .iter()
            .find(|g| !self.record.has_group(g))
        {
            return Err(StandingsError::ValidationError {
                group: missing.clone(),
            });
        }
        Ok(self.record)
    }
}
