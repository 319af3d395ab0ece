use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::grades::course_grade;
use crate::models::{Assignment, AssignmentStatus, Course, Grade};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_courses: usize,
    pub pending_count: usize,
    pub completed_this_week: usize,
    pub average_grade: u32,
    pub trends: Option<DashboardTrends>,
}

/// Period-over-period deltas, in percent. Only ever sourced from a
/// [`TrendFeed`]; a missing field means the feed has no history for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTrends {
    pub total_courses: Option<i32>,
    pub pending_count: Option<i32>,
    pub completed_this_week: Option<i32>,
    pub average_grade: Option<i32>,
}

/// Source of historical snapshots for dashboard trends.
#[async_trait]
pub trait TrendFeed: Send + Sync {
    async fn trends(&self, now: DateTime<FixedOffset>) -> Result<Option<DashboardTrends>, AppError>;
}

pub struct NoopTrendFeed;

#[async_trait]
impl TrendFeed for NoopTrendFeed {
    async fn trends(&self, _now: DateTime<FixedOffset>) -> Result<Option<DashboardTrends>, AppError> {
        Ok(None)
    }
}

pub fn pending_count(assignments: &[Assignment]) -> usize {
    assignments.iter().filter(|a| !a.is_completed()).count()
}

/// Completed assignments whose last update (or due date, when never updated)
/// is no older than seven days before `now`.
pub fn completed_this_week(assignments: &[Assignment], now: DateTime<FixedOffset>) -> usize {
    let week_ago = now.with_timezone(&Utc) - TimeDelta::days(7);
    assignments
        .iter()
        .filter(|a| a.is_completed() && a.updated_at.unwrap_or(a.due_date) >= week_ago)
        .count()
}

/// Rounded mean of the graded courses' percentages; 0 when none are graded.
pub fn average_grade(courses: &[Course], grades: &[Grade]) -> u32 {
    let graded: Vec<u32> = courses
        .iter()
        .map(|c| course_grade(grades, c.id))
        .filter(|g| *g > 0)
        .collect();

    if graded.is_empty() {
        return 0;
    }
    let total: u32 = graded.iter().sum();
    (f64::from(total) / graded.len() as f64).round() as u32
}

pub fn dashboard_stats(
    courses: &[Course],
    assignments: &[Assignment],
    grades: &[Grade],
    now: DateTime<FixedOffset>,
    trends: Option<DashboardTrends>,
) -> DashboardStats {
    DashboardStats {
        total_courses: courses.len(),
        pending_count: pending_count(assignments),
        completed_this_week: completed_this_week(assignments, now),
        average_grade: average_grade(courses, grades),
        trends,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total_courses: usize,
    pub pending: usize,
    pub completed: usize,
    pub completion_rate: u32,
    pub has_scheduled_events: bool,
}

pub fn schedule_stats(courses: &[Course], assignments: &[Assignment]) -> ScheduleStats {
    let completed = assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::Completed)
        .count();
    let pending = assignments.len() - completed;
    let completion_rate =
        (completed as f64 / assignments.len().max(1) as f64 * 100.0).round() as u32;

    ScheduleStats {
        total_courses: courses.len(),
        pending,
        completed,
        completion_rate,
        has_scheduled_events: courses.iter().any(|c| !c.schedule.is_empty()) || pending > 0,
    }
}
