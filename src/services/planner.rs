use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::dashboard::{self, DashboardStats, ScheduleStats, TrendFeed};
use crate::grades::{self, GradeBand, GradeReport, LetterGrade};
use crate::models::course::weekday_name;
use crate::models::{Assignment, AssignmentFilter, Course, CourseRef, Grade};
use crate::schedule::{self, DueLabel, Event, Urgency};
use crate::store::Store;

/// A course as listed in the catalog, with its derived display fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCard {
    #[serde(flatten)]
    pub course: Course,
    pub next_class: String,
    pub letter: LetterGrade,
    pub band: GradeBand,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRow {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub course: CourseRef,
    pub due_label: DueLabel,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DaySchedule>,
}

/// Read-only queries over a store snapshot at a given reference instant.
pub struct PlannerService {
    store: Arc<Store>,
    trends: Arc<dyn TrendFeed>,
}

impl PlannerService {
    pub fn new(store: Arc<Store>, trends: Arc<dyn TrendFeed>) -> Self {
        Self { store, trends }
    }

    pub async fn courses(&self, now: DateTime<FixedOffset>) -> Vec<CourseCard> {
        let courses = self.store.list_courses().await;
        courses
            .into_iter()
            .map(|course| {
                let next_class = schedule::next_class_label(&course, now);
                let letter = grades::letter_grade(course.current_grade);
                let band = grades::grade_band(course.current_grade);
                CourseCard { course, next_class, letter, band }
            })
            .collect()
    }

    pub async fn assignments(
        &self,
        filter: &AssignmentFilter,
        now: DateTime<FixedOffset>,
    ) -> Vec<AssignmentRow> {
        let (courses, assignments) =
            tokio::join!(self.store.list_courses(), self.store.list_assignments());
        let rows: Vec<AssignmentRow> = assignments
            .into_iter()
            .filter(|a| filter.matches(a))
            .map(|a| assignment_row(&courses, a, now))
            .collect();
        debug!("assignment listing: {} rows for {:?}", rows.len(), filter);
        rows
    }

    pub async fn upcoming(
        &self,
        now: DateTime<FixedOffset>,
        horizon_days: i64,
        limit: usize,
    ) -> Vec<AssignmentRow> {
        let (courses, assignments) =
            tokio::join!(self.store.list_courses(), self.store.list_assignments());
        schedule::upcoming_window(&assignments, now, horizon_days, limit)
            .into_iter()
            .map(|a| assignment_row(&courses, a, now))
            .collect()
    }

    pub async fn grades(&self) -> Vec<Grade> {
        self.store.list_grades().await
    }

    pub async fn grade_report(&self) -> GradeReport {
        let (courses, grades) = tokio::join!(self.store.list_courses(), self.store.list_grades());
        grades::grade_report(&courses, &grades)
    }

    pub async fn today(&self, now: DateTime<FixedOffset>) -> DaySchedule {
        let (courses, assignments) =
            tokio::join!(self.store.list_courses(), self.store.list_assignments());
        let date = now.date_naive();
        day_schedule(date, schedule::today_events(&courses, &assignments, now))
    }

    pub async fn week(&self, now: DateTime<FixedOffset>) -> WeekView {
        let (courses, assignments) =
            tokio::join!(self.store.list_courses(), self.store.list_assignments());
        let days: Vec<DaySchedule> = schedule::week_events(&courses, &assignments, now)
            .into_iter()
            .map(|(date, events)| day_schedule(date, events))
            .collect();

        let start = schedule::week_start(now.date_naive());
        let end = days.last().map_or(start, |d| d.date);
        WeekView { start, end, days }
    }

    pub async fn schedule_stats(&self) -> ScheduleStats {
        let (courses, assignments) =
            tokio::join!(self.store.list_courses(), self.store.list_assignments());
        dashboard::schedule_stats(&courses, &assignments)
    }

    pub async fn dashboard(&self, now: DateTime<FixedOffset>) -> DashboardStats {
        let (courses, assignments, grades) = tokio::join!(
            self.store.list_courses(),
            self.store.list_assignments(),
            self.store.list_grades()
        );

        // A broken feed only costs the trend arrows.
        let trends = match self.trends.trends(now).await {
            Ok(trends) => trends,
            Err(e) => {
                warn!("trend feed unavailable: {}", e);
                None
            }
        };

        let stats = dashboard::dashboard_stats(&courses, &assignments, &grades, now, trends);
        debug!("dashboard stats at {}: {:?}", now, stats);
        stats
    }
}

fn assignment_row(courses: &[Course], assignment: Assignment, now: DateTime<FixedOffset>) -> AssignmentRow {
    AssignmentRow {
        course: CourseRef::resolve(courses, assignment.course_id),
        due_label: schedule::due_date_label(assignment.due_date, now),
        urgency: schedule::due_urgency(&assignment, now),
        assignment,
    }
}

fn day_schedule(date: NaiveDate, events: Vec<Event>) -> DaySchedule {
    use chrono::Datelike;

    DaySchedule {
        date,
        weekday: weekday_name::full_name(date.weekday()),
        events,
    }
}
