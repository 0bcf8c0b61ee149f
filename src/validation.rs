use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;
use crate::models::{NewScheduleEntry, ScheduleEntryPatch};

// Zero-padded 24-hour HH:MM. The schedule core compares times as strings, so
// any shape deviation must be rejected here before it reaches the core.
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("regex compiles"));

pub fn validate_time(field: &str, value: &str) -> Result<(), ApiError> {
    if TIME_RE.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "{field} must be a zero-padded 24-hour HH:MM time, got '{value}'"
        )))
    }
}

pub fn validate_required(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::BadRequest(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

pub fn validate_max_students(value: u32) -> Result<(), ApiError> {
    if (1..=50).contains(&value) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(
            "maxStudents must be between 1 and 50".into(),
        ))
    }
}

pub fn validate_new_entry(entry: &NewScheduleEntry) -> Result<(), ApiError> {
    validate_time("startTime", &entry.start_time)?;
    validate_time("endTime", &entry.end_time)?;
    validate_required("classId", &entry.class_id)?;
    validate_required("className", &entry.class_name)?;
    validate_required("instructor", &entry.instructor)?;
    validate_max_students(entry.max_students)
}

pub fn validate_entry_patch(patch: &ScheduleEntryPatch) -> Result<(), ApiError> {
    if let Some(start_time) = &patch.start_time {
        validate_time("startTime", start_time)?;
    }
    if let Some(end_time) = &patch.end_time {
        validate_time("endTime", end_time)?;
    }
    if let Some(class_id) = &patch.class_id {
        validate_required("classId", class_id)?;
    }
    if let Some(class_name) = &patch.class_name {
        validate_required("className", class_name)?;
    }
    if let Some(instructor) = &patch.instructor {
        validate_required("instructor", instructor)?;
    }
    if let Some(max_students) = patch.max_students {
        validate_max_students(max_students)?;
    }
    Ok(())
}

pub fn validate_program_name(name: &str) -> Result<(), ApiError> {
    validate_required("name", name)
}
