//! Day- and week-bucketed timelines built from courses and assignments.
//!
//! Everything here is a pure function of its inputs and a reference instant.
//! Calendar-day comparisons happen in the reference instant's UTC offset.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Serialize, Serializer};

use crate::models::course::{clock_time, weekday_name};
use crate::models::{Assignment, Course, CourseRef, Priority, minute_of_day};

pub const DEFAULT_HORIZON_DAYS: i64 = 7;
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;
pub const MAX_HORIZON_DAYS: i64 = 3650;

/// Deadlines have no time of their own; they sit at the end of the day.
pub fn deadline_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Event {
    Class {
        course: CourseRef,
        location: Option<String>,
        #[serde(serialize_with = "clock_time::serialize")]
        start_time: NaiveTime,
        #[serde(serialize_with = "clock_time::serialize")]
        end_time: NaiveTime,
        display_time: String,
    },
    Deadline {
        assignment_id: u32,
        title: String,
        course: CourseRef,
        priority: Priority,
        #[serde(serialize_with = "clock_time::serialize")]
        time: NaiveTime,
        display_time: String,
    },
}

impl Event {
    pub fn time(&self) -> NaiveTime {
        match self {
            Event::Class { start_time, .. } => *start_time,
            Event::Deadline { time, .. } => *time,
        }
    }

    pub fn course(&self) -> &CourseRef {
        match self {
            Event::Class { course, .. } | Event::Deadline { course, .. } => course,
        }
    }
}

/// Classes meeting on `date` plus open deadlines falling on it, ordered by
/// minute of day. Equal times keep enumeration order, so classes come before
/// that day's deadlines.
pub fn day_events(
    courses: &[Course],
    assignments: &[Assignment],
    date: NaiveDate,
    offset: &FixedOffset,
) -> Vec<Event> {
    let weekday = date.weekday();

    let classes = courses.iter().flat_map(|course| {
        course.slots_on(weekday).map(move |slot| Event::Class {
            course: CourseRef::from(course),
            location: course.location.clone(),
            start_time: slot.start_time,
            end_time: slot.end_time,
            display_time: format_12h(slot.start_time),
        })
    });

    let deadlines = assignments
        .iter()
        .filter(|a| !a.is_completed() && a.due_date.with_timezone(offset).date_naive() == date)
        .map(|a| Event::Deadline {
            assignment_id: a.id,
            title: a.title.clone(),
            course: CourseRef::resolve(courses, a.course_id),
            priority: a.priority,
            time: deadline_time(),
            display_time: format_12h(deadline_time()),
        });

    let mut events: Vec<Event> = classes.chain(deadlines).collect();
    events.sort_by_key(|e| minute_of_day(e.time()));
    events
}

pub fn today_events(
    courses: &[Course],
    assignments: &[Assignment],
    now: DateTime<FixedOffset>,
) -> Vec<Event> {
    day_events(courses, assignments, now.date_naive(), now.offset())
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - TimeDelta::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven days of the Monday-start week containing `now`, each mapped to
/// its events.
pub fn week_events(
    courses: &[Course],
    assignments: &[Assignment],
    now: DateTime<FixedOffset>,
) -> BTreeMap<NaiveDate, Vec<Event>> {
    let monday = week_start(now.date_naive());
    monday
        .iter_days()
        .take(7)
        .map(|day| (day, day_events(courses, assignments, day, now.offset())))
        .collect()
}

/// Open assignments due in `[now, now + horizon_days)`, soonest first.
/// A horizon past the representable range runs to the end of time.
pub fn upcoming_window(
    assignments: &[Assignment],
    now: DateTime<FixedOffset>,
    horizon_days: i64,
    limit: usize,
) -> Vec<Assignment> {
    let start = now.with_timezone(&Utc);
    let end = TimeDelta::try_days(horizon_days)
        .and_then(|horizon| start.checked_add_signed(horizon))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut upcoming: Vec<Assignment> = assignments
        .iter()
        .filter(|a| !a.is_completed() && a.due_date >= start && a.due_date < end)
        .cloned()
        .collect();
    upcoming.sort_by_key(|a| a.due_date);
    upcoming.truncate(limit);
    upcoming
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Today,
    Tomorrow,
    Date(NaiveDate),
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueLabel::Today => f.write_str("Today"),
            DueLabel::Tomorrow => f.write_str("Tomorrow"),
            DueLabel::Date(date) => write!(f, "{}", date.format("%b %d")),
        }
    }
}

impl Serialize for DueLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Calendar-day comparison, not a rolling 24-hour window.
pub fn due_date_label(due: DateTime<Utc>, now: DateTime<FixedOffset>) -> DueLabel {
    let due_day = due.with_timezone(now.offset()).date_naive();
    let today = now.date_naive();

    if due_day == today {
        DueLabel::Today
    } else if today.succ_opt() == Some(due_day) {
        DueLabel::Tomorrow
    } else {
        DueLabel::Date(due_day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Done,
    Overdue,
    Today,
    Tomorrow,
    Later,
}

pub fn due_urgency(assignment: &Assignment, now: DateTime<FixedOffset>) -> Urgency {
    if assignment.is_completed() {
        return Urgency::Done;
    }
    if assignment.due_date < now.with_timezone(&Utc) {
        return Urgency::Overdue;
    }
    match due_date_label(assignment.due_date, now) {
        DueLabel::Today => Urgency::Today,
        DueLabel::Tomorrow => Urgency::Tomorrow,
        DueLabel::Date(_) => Urgency::Later,
    }
}

pub fn next_class_label(course: &Course, now: DateTime<FixedOffset>) -> String {
    if let Some(slot) = course.slots_on(now.weekday()).next() {
        if slot.start_time > now.time() {
            return format!("Today at {}", slot.start_time.format("%H:%M"));
        }
    }

    match course.schedule.first() {
        Some(slot) => format!(
            "{} {}",
            weekday_name::full_name(slot.day_of_week),
            slot.start_time.format("%H:%M")
        ),
        None => "No schedule".to_string(),
    }
}

/// `"9:05 AM"`, `"12:00 PM"`, `"12:30 AM"`.
pub fn format_12h(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour {
        0 => 12,
        13.. => hour - 12,
        _ => hour,
    };
    format!("{}:{:02} {}", display_hour, time.minute(), period)
}
