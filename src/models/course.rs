use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: u32,
    pub name: String,
    pub instructor: String,
    #[serde(default)]
    pub location: Option<String>,
    pub credits: u32,
    pub color: String,
    pub semester: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
    /// Cached weighted percentage, 0 while the course has no grades.
    #[serde(default)]
    pub current_grade: u32,
}

/// One recurring weekly meeting of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    #[serde(with = "weekday_name")]
    pub day_of_week: Weekday,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
}

impl ScheduleSlot {
    pub fn new(day_of_week: Weekday, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self { day_of_week, start_time, end_time }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub name: String,
    pub instructor: String,
    #[serde(default)]
    pub location: Option<String>,
    pub credits: u32,
    pub color: String,
    pub semester: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleSlot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub name: Option<String>,
    pub instructor: Option<String>,
    pub location: Option<Option<String>>,
    pub credits: Option<u32>,
    pub color: Option<String>,
    pub semester: Option<String>,
    pub schedule: Option<Vec<ScheduleSlot>>,
}

impl Course {
    pub fn from_request(id: u32, req: NewCourseRequest) -> Self {
        Self {
            id,
            name: req.name,
            instructor: req.instructor,
            location: req.location,
            credits: req.credits,
            color: req.color,
            semester: req.semester,
            schedule: req.schedule,
            current_grade: 0,
        }
    }

    pub fn apply(&mut self, req: UpdateCourseRequest) {
        if let Some(name) = req.name {
            self.name = name;
        }
        if let Some(instructor) = req.instructor {
            self.instructor = instructor;
        }
        if let Some(location) = req.location {
            self.location = location;
        }
        if let Some(credits) = req.credits {
            self.credits = credits;
        }
        if let Some(color) = req.color {
            self.color = color;
        }
        if let Some(semester) = req.semester {
            self.semester = semester;
        }
        if let Some(schedule) = req.schedule {
            self.schedule = schedule;
        }
    }

    pub fn slots_on(&self, day: Weekday) -> impl Iterator<Item = &ScheduleSlot> {
        self.schedule.iter().filter(move |s| s.day_of_week == day)
    }
}

/// Minutes since midnight; the ordering key for everything on a timeline.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Full English weekday names on output, full or short names on input.
pub mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn full_name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(full_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<Weekday>()
            .map_err(|_| D::Error::custom(format!("unknown day of week: {raw}")))
    }
}

/// `"HH:MM"` on output; single-digit hours are accepted on input.
pub mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map_err(|e| D::Error::custom(format!("invalid time {raw:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot_json(day: &str, start: &str, end: &str) -> String {
        format!(r#"{{"dayOfWeek":"{day}","startTime":"{start}","endTime":"{end}"}}"#)
    }

    #[test]
    fn slot_accepts_short_day_and_unpadded_time() {
        let slot: ScheduleSlot = serde_json::from_str(&slot_json("Tue", "9:05", "10:20")).unwrap();
        assert_eq!(slot.day_of_week, Weekday::Tue);
        assert_eq!(minute_of_day(slot.start_time), 9 * 60 + 5);
    }

    #[test]
    fn slot_serializes_full_day_and_padded_time() {
        let slot = ScheduleSlot::new(
            Weekday::Wed,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        );
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, slot_json("Wednesday", "08:00", "09:15"));
    }

    #[test]
    fn slot_rejects_unknown_day() {
        let err = serde_json::from_str::<ScheduleSlot>(&slot_json("Funday", "09:00", "10:00"));
        assert!(err.is_err());
    }

    #[test]
    fn update_merges_only_given_fields() {
        let mut course = Course::from_request(
            3,
            NewCourseRequest {
                name: "Linear Algebra".to_string(),
                instructor: "Dr. Okafor".to_string(),
                location: Some("Hall B".to_string()),
                credits: 3,
                color: "#2563eb".to_string(),
                semester: "Fall 2026".to_string(),
                schedule: Vec::new(),
            },
        );

        course.apply(UpdateCourseRequest {
            credits: Some(4),
            location: Some(None),
            ..Default::default()
        });

        assert_eq!(course.credits, 4);
        assert_eq!(course.location, None);
        assert_eq!(course.name, "Linear Algebra");
        assert_eq!(course.id, 3);
    }
}
