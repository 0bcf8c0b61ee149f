use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schedule::ScheduleError;

/// Day of the week, lowercase on the wire (`"monday"`..`"sunday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn parse(name: &str) -> Result<Day, ScheduleError> {
        match name {
            "monday" => Ok(Day::Monday),
            "tuesday" => Ok(Day::Tuesday),
            "wednesday" => Ok(Day::Wednesday),
            "thursday" => Ok(Day::Thursday),
            "friday" => Ok(Day::Friday),
            "saturday" => Ok(Day::Saturday),
            "sunday" => Ok(Day::Sunday),
            other => Err(ScheduleError::InvalidDay(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    /// Bucket index, monday = 0.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    #[serde(rename = "All Levels")]
    AllLevels,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::AllLevels => "All Levels",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub day: Day,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "10:00")]
    pub end_time: String,
    pub class_id: String,
    pub class_name: String,
    pub instructor: String,
    pub level: Level,
    pub max_students: u32,
    pub is_active: bool,
}

/// Request body for adding a schedule entry; the day comes from the path and
/// the id is assigned on insert.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleEntry {
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "10:00")]
    pub end_time: String,
    pub class_id: String,
    pub class_name: String,
    pub instructor: String,
    pub level: Level,
    pub max_students: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryPatch {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub class_id: Option<String>,
    pub class_name: Option<String>,
    pub instructor: Option<String>,
    pub level: Option<Level>,
    pub max_students: Option<u32>,
    pub is_active: Option<bool>,
}

impl ScheduleEntryPatch {
    pub fn changes_times(&self) -> bool {
        self.start_time.is_some() || self.end_time.is_some()
    }
}

/// One day's public listing: active entries sorted by start time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DayListing {
    pub day: Day,
    pub entries: Vec<ScheduleEntry>,
}

/// Full-week listing; every day is present, empty days as empty arrays.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekListing {
    pub monday: Vec<ScheduleEntry>,
    pub tuesday: Vec<ScheduleEntry>,
    pub wednesday: Vec<ScheduleEntry>,
    pub thursday: Vec<ScheduleEntry>,
    pub friday: Vec<ScheduleEntry>,
    pub saturday: Vec<ScheduleEntry>,
    pub sunday: Vec<ScheduleEntry>,
}

impl WeekListing {
    pub fn days(&self) -> [(Day, &[ScheduleEntry]); 7] {
        [
            (Day::Monday, self.monday.as_slice()),
            (Day::Tuesday, self.tuesday.as_slice()),
            (Day::Wednesday, self.wednesday.as_slice()),
            (Day::Thursday, self.thursday.as_slice()),
            (Day::Friday, self.friday.as_slice()),
            (Day::Saturday, self.saturday.as_slice()),
            (Day::Sunday, self.sunday.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.days().iter().all(|(_, entries)| entries.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassProgram {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub level: Level,
    pub order: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewClassProgram {
    pub name: String,
    pub description: String,
    pub level: Level,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassProgramPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<Level>,
    pub order: Option<u32>,
    pub is_active: Option<bool>,
}

/// One requested display position in a bulk reorder.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderAssignment {
    #[schema(value_type = String, format = "uuid")]
    pub id: Uuid,
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parse_roundtrip() {
        for day in Day::ALL {
            assert_eq!(Day::parse(day.as_str()).unwrap(), day);
        }
        assert!(Day::parse("funday").is_err());
        assert!(Day::parse("Monday").is_err());
    }

    #[test]
    fn test_level_wire_names() {
        assert_eq!(
            serde_json::to_string(&Level::AllLevels).unwrap(),
            r#""All Levels""#
        );
        assert_eq!(
            serde_json::from_str::<Level>(r#""Beginner""#).unwrap(),
            Level::Beginner
        );
    }
}
