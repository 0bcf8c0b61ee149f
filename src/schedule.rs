use thiserror::Error;
use uuid::Uuid;

use crate::models::{Day, NewScheduleEntry, ScheduleEntry, ScheduleEntryPatch, WeekListing};

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("'{0}' is not a day of the week")]
    InvalidDay(String),
    #[error("startTime {start} must be earlier than endTime {end}")]
    InvalidInterval { start: String, end: String },
    #[error("time conflict with '{class_name}' ({start} - {end})")]
    TimeConflict {
        class_name: String,
        start: String,
        end: String,
    },
    #[error("no entry with id {0} on that day")]
    NotFound(Uuid),
}

/// Day-bucketed weekly schedule. Buckets keep insertion order; the public
/// listings are sorted at read time. The one invariant owned here: no two
/// entries in the same bucket overlap in `[start, end)` time.
///
/// Every mutation is validate-then-commit: on error the schedule is unchanged.
#[derive(Debug, Clone)]
pub struct WeeklySchedule {
    days: [Vec<ScheduleEntry>; 7],
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self {
            days: std::array::from_fn(|_| Vec::new()),
        }
    }
}

/// Half-open interval intersection: `e1 == s2` is back-to-back, not a clash.
/// Lexicographic comparison is sound because both sides are zero-padded HH:MM.
fn overlaps(s1: &str, e1: &str, s2: &str, e2: &str) -> bool {
    s1 < e2 && s2 < e1
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    fn conflict(
        &self,
        day: Day,
        start: &str,
        end: &str,
        exclude: Option<Uuid>,
    ) -> Option<&ScheduleEntry> {
        self.days[day.index()]
            .iter()
            .filter(|entry| Some(entry.id) != exclude)
            .find(|entry| overlaps(start, end, &entry.start_time, &entry.end_time))
    }

    fn conflict_error(entry: &ScheduleEntry) -> ScheduleError {
        ScheduleError::TimeConflict {
            class_name: entry.class_name.clone(),
            start: entry.start_time.clone(),
            end: entry.end_time.clone(),
        }
    }

    /// Appends `new` to the day's bucket with a fresh id. Rejects intervals
    /// that are empty/backwards or that overlap an existing entry that day.
    pub fn add_entry(
        &mut self,
        day: Day,
        new: NewScheduleEntry,
    ) -> Result<ScheduleEntry, ScheduleError> {
        if new.start_time >= new.end_time {
            return Err(ScheduleError::InvalidInterval {
                start: new.start_time,
                end: new.end_time,
            });
        }
        if let Some(existing) = self.conflict(day, &new.start_time, &new.end_time, None) {
            return Err(Self::conflict_error(existing));
        }

        let entry = ScheduleEntry {
            id: Uuid::new_v4(),
            day,
            start_time: new.start_time,
            end_time: new.end_time,
            class_id: new.class_id,
            class_name: new.class_name,
            instructor: new.instructor,
            level: new.level,
            max_students: new.max_students,
            is_active: new.is_active,
        };
        self.days[day.index()].push(entry.clone());
        Ok(entry)
    }

    /// Merges `patch` into the entry in place, keeping its bucket position.
    /// A time change re-runs the overlap test against every *other* entry on
    /// the same day, so an entry never conflicts with its own old slot.
    pub fn update_entry(
        &mut self,
        day: Day,
        id: Uuid,
        patch: ScheduleEntryPatch,
    ) -> Result<ScheduleEntry, ScheduleError> {
        let position = self.days[day.index()]
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(ScheduleError::NotFound(id))?;

        if patch.changes_times() {
            let current = &self.days[day.index()][position];
            let start = patch
                .start_time
                .clone()
                .unwrap_or_else(|| current.start_time.clone());
            let end = patch
                .end_time
                .clone()
                .unwrap_or_else(|| current.end_time.clone());
            if start >= end {
                return Err(ScheduleError::InvalidInterval { start, end });
            }
            if let Some(existing) = self.conflict(day, &start, &end, Some(id)) {
                return Err(Self::conflict_error(existing));
            }
        }

        let entry = &mut self.days[day.index()][position];
        if let Some(start_time) = patch.start_time {
            entry.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            entry.end_time = end_time;
        }
        if let Some(class_id) = patch.class_id {
            entry.class_id = class_id;
        }
        if let Some(class_name) = patch.class_name {
            entry.class_name = class_name;
        }
        if let Some(instructor) = patch.instructor {
            entry.instructor = instructor;
        }
        if let Some(level) = patch.level {
            entry.level = level;
        }
        if let Some(max_students) = patch.max_students {
            entry.max_students = max_students;
        }
        if let Some(is_active) = patch.is_active {
            entry.is_active = is_active;
        }
        Ok(entry.clone())
    }

    pub fn remove_entry(&mut self, day: Day, id: Uuid) -> Result<(), ScheduleError> {
        let bucket = &mut self.days[day.index()];
        let position = bucket
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        bucket.remove(position);
        Ok(())
    }

    /// Active entries for one day, ascending by start time. The sort is
    /// stable, so equal start times keep insertion order.
    pub fn list_for_day(&self, day: Day) -> Vec<ScheduleEntry> {
        let mut entries: Vec<ScheduleEntry> = self.days[day.index()]
            .iter()
            .filter(|entry| entry.is_active)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        entries
    }

    pub fn list_all(&self) -> WeekListing {
        WeekListing {
            monday: self.list_for_day(Day::Monday),
            tuesday: self.list_for_day(Day::Tuesday),
            wednesday: self.list_for_day(Day::Wednesday),
            thursday: self.list_for_day(Day::Thursday),
            friday: self.list_for_day(Day::Friday),
            saturday: self.list_for_day(Day::Saturday),
            sunday: self.list_for_day(Day::Sunday),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;

    fn entry(start: &str, end: &str) -> NewScheduleEntry {
        NewScheduleEntry {
            start_time: start.to_string(),
            end_time: end.to_string(),
            class_id: "bjj-fundamentals".to_string(),
            class_name: "BJJ Fundamentals".to_string(),
            instructor: "Ana Silva".to_string(),
            level: Level::Beginner,
            max_students: 20,
            is_active: true,
        }
    }

    fn assert_no_overlap(schedule: &WeeklySchedule, day: Day) {
        let bucket = &schedule.days[day.index()];
        for (i, a) in bucket.iter().enumerate() {
            for b in &bucket[i + 1..] {
                assert!(
                    !overlaps(&a.start_time, &a.end_time, &b.start_time, &b.end_time),
                    "{} - {} overlaps {} - {}",
                    a.start_time,
                    a.end_time,
                    b.start_time,
                    b.end_time
                );
            }
        }
    }

    #[test]
    fn test_add_back_to_back_allowed() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        schedule.add_entry(Day::Monday, entry("10:00", "11:00")).unwrap();
        assert_no_overlap(&schedule, Day::Monday);
    }

    #[test]
    fn test_add_overlap_rejected() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        let err = schedule
            .add_entry(Day::Monday, entry("09:30", "10:30"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::TimeConflict { .. }));
        assert_eq!(schedule.days[Day::Monday.index()].len(), 1);
    }

    #[test]
    fn test_add_containing_interval_rejected() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        let err = schedule
            .add_entry(Day::Monday, entry("08:00", "12:00"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::TimeConflict { .. }));
    }

    #[test]
    fn test_no_cross_day_conflict() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        schedule.add_entry(Day::Monday, entry("10:00", "11:00")).unwrap();
        assert!(
            schedule
                .add_entry(Day::Monday, entry("09:30", "10:30"))
                .is_err()
        );
        schedule.add_entry(Day::Tuesday, entry("10:00", "11:00")).unwrap();
        assert_no_overlap(&schedule, Day::Monday);
        assert_no_overlap(&schedule, Day::Tuesday);
    }

    #[test]
    fn test_add_backwards_interval_rejected() {
        let mut schedule = WeeklySchedule::new();
        let err = schedule
            .add_entry(Day::Monday, entry("10:00", "09:00"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInterval { .. }));
        let err = schedule
            .add_entry(Day::Monday, entry("10:00", "10:00"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInterval { .. }));
    }

    #[test]
    fn test_update_excludes_self_from_conflict_check() {
        let mut schedule = WeeklySchedule::new();
        let stored = schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();

        // Shift within the entry's own old slot: conflicts only with itself.
        let patch = ScheduleEntryPatch {
            start_time: Some("09:30".to_string()),
            end_time: Some("10:30".to_string()),
            ..Default::default()
        };
        let updated = schedule.update_entry(Day::Monday, stored.id, patch).unwrap();
        assert_eq!(updated.start_time, "09:30");
        assert_eq!(updated.end_time, "10:30");
        assert_no_overlap(&schedule, Day::Monday);
    }

    #[test]
    fn test_update_conflict_with_other_entry() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        let second = schedule.add_entry(Day::Monday, entry("10:00", "11:00")).unwrap();

        let patch = ScheduleEntryPatch {
            start_time: Some("09:30".to_string()),
            ..Default::default()
        };
        let err = schedule
            .update_entry(Day::Monday, second.id, patch)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::TimeConflict { .. }));
        // Rejected update leaves the entry untouched.
        let listing = schedule.list_for_day(Day::Monday);
        assert_eq!(listing[1].start_time, "10:00");
    }

    #[test]
    fn test_update_keeps_position_and_merges_fields() {
        let mut schedule = WeeklySchedule::new();
        let first = schedule.add_entry(Day::Friday, entry("18:00", "19:00")).unwrap();
        schedule.add_entry(Day::Friday, entry("19:00", "20:00")).unwrap();

        let patch = ScheduleEntryPatch {
            instructor: Some("Marco Reyes".to_string()),
            max_students: Some(12),
            ..Default::default()
        };
        let updated = schedule.update_entry(Day::Friday, first.id, patch).unwrap();
        assert_eq!(updated.instructor, "Marco Reyes");
        assert_eq!(updated.max_students, 12);
        assert_eq!(updated.start_time, "18:00");
        assert_eq!(schedule.days[Day::Friday.index()][0].id, first.id);
    }

    #[test]
    fn test_update_unknown_id_not_found() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        let err = schedule
            .update_entry(Day::Monday, Uuid::new_v4(), ScheduleEntryPatch::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::NotFound(_)));
    }

    #[test]
    fn test_remove_unknown_id_leaves_day_unchanged() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        let err = schedule.remove_entry(Day::Monday, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ScheduleError::NotFound(_)));
        assert_eq!(schedule.days[Day::Monday.index()].len(), 1);
    }

    #[test]
    fn test_remove_then_slot_reusable() {
        let mut schedule = WeeklySchedule::new();
        let stored = schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
        schedule.remove_entry(Day::Monday, stored.id).unwrap();
        schedule.add_entry(Day::Monday, entry("09:00", "10:00")).unwrap();
    }

    #[test]
    fn test_list_for_day_sorted_and_active_only() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Monday, entry("18:00", "19:00")).unwrap();
        schedule.add_entry(Day::Monday, entry("06:00", "07:00")).unwrap();
        let mut inactive = entry("12:00", "13:00");
        inactive.is_active = false;
        schedule.add_entry(Day::Monday, inactive).unwrap();

        let listing = schedule.list_for_day(Day::Monday);
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].start_time, "06:00");
        assert_eq!(listing[1].start_time, "18:00");
    }

    #[test]
    fn test_inactive_entry_still_blocks_its_slot() {
        // Inactive entries are retained in storage, so they still count for
        // the overlap check.
        let mut schedule = WeeklySchedule::new();
        let mut inactive = entry("12:00", "13:00");
        inactive.is_active = false;
        schedule.add_entry(Day::Monday, inactive).unwrap();
        let err = schedule
            .add_entry(Day::Monday, entry("12:30", "13:30"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::TimeConflict { .. }));
    }

    #[test]
    fn test_list_all_covers_every_day() {
        let mut schedule = WeeklySchedule::new();
        schedule.add_entry(Day::Wednesday, entry("09:00", "10:00")).unwrap();
        let week = schedule.list_all();
        assert_eq!(week.wednesday.len(), 1);
        assert!(week.monday.is_empty());
        assert!(week.sunday.is_empty());
        assert_eq!(week.days().len(), 7);
    }
}
