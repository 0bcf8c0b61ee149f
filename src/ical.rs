use chrono::{Datelike, Duration, Local, NaiveTime};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::WeekListing;

/// Renders the weekly schedule as an iCal feed, placing each entry on its
/// weekday of the current calendar week.
#[derive(Clone)]
pub struct ScheduleExporter {
    academy_name: String,
    location: String,
}

impl ScheduleExporter {
    pub fn new(academy_name: String, location: String) -> Self {
        Self {
            academy_name,
            location,
        }
    }

    pub fn generate(&self, week: &WeekListing) -> Vec<u8> {
        if week.is_empty() {
            return Vec::new();
        }

        let today = Local::now().date_naive();
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);

        let mut calendar = Calendar::new();
        calendar.name(&format!("{} Weekly Schedule", self.academy_name));

        for (day, entries) in week.days() {
            let date = monday + Duration::days(day.index() as i64);
            for entry in entries {
                // Times are validated at the API boundary; skip rather than
                // fail the whole feed if something malformed slipped through.
                let Ok(start) = NaiveTime::parse_from_str(&entry.start_time, "%H:%M") else {
                    continue;
                };
                let Ok(end) = NaiveTime::parse_from_str(&entry.end_time, "%H:%M") else {
                    continue;
                };

                let mut event = Event::new();
                event.summary(&format!("{}: {}", self.academy_name, entry.class_name));
                event.starts(date.and_time(start));
                event.ends(date.and_time(end));
                event.location(&self.location);
                event.description(&format!(
                    "Instructor: {}\nLevel: {}\nCapacity: {} students",
                    entry.instructor,
                    entry.level.label(),
                    entry.max_students
                ));
                event.uid(&format!("{}@academy-schedule", entry.id));
                calendar.push(event);
            }
        }

        calendar.to_string().into_bytes()
    }
}
