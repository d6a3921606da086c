use crate::utils::error::{Result, StandingsError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(StandingsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StandingsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_allowed_value(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();
    if !allowed_set.contains(value) {
        return Err(StandingsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

/// Every excluded group name must be non-empty and listed once.
pub fn validate_group_names(field_name: &str, groups: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for group in groups {
        validate_non_empty_string(field_name, group)?;
        if !seen.insert(group.as_str()) {
            return Err(StandingsError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: group.clone(),
                reason: "Group is listed more than once".to_string(),
            });
        }
    }
    Ok(())
}
