use axum::Json;
use axum::extract::Query;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use chrono::{DateTime, FixedOffset, Local};
use serde::Deserialize;

use crate::dashboard::{DashboardStats, ScheduleStats};
use crate::error::AppError;
use crate::grades::GradeReport;
use crate::models::*;
use crate::schedule::{DEFAULT_HORIZON_DAYS, DEFAULT_UPCOMING_LIMIT, MAX_HORIZON_DAYS};
use crate::services::{AssignmentRow, CourseCard, DaySchedule, WeekView};
use crate::state::AppState;

#[derive(Deserialize)]
struct AtParams {
    at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignmentListParams {
    status: Option<AssignmentStatus>,
    course_id: Option<u32>,
    priority: Option<Priority>,
    at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpcomingParams {
    at: Option<String>,
    horizon_days: Option<i64>,
    limit: Option<usize>,
}

/// Read-only query API. There are deliberately no mutation routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses))
        .route("/assignments", get(list_assignments))
        .route("/assignments/upcoming", get(upcoming_assignments))
        .route("/grades", get(list_grades))
        .route("/grades/report", get(grade_report))
        .route("/schedule/today", get(today_schedule))
        .route("/schedule/week", get(week_schedule))
        .route("/schedule/stats", get(schedule_stats))
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

/// Reference instant for time-dependent queries: `at` when given, else now.
fn reference_instant(at: Option<&str>) -> Result<DateTime<FixedOffset>, AppError> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map_err(|e| AppError::BadRequest(format!("invalid `at` {raw:?}: {e}"))),
        None => Ok(Local::now().fixed_offset()),
    }
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<AtParams>,
) -> Result<Json<Vec<CourseCard>>, AppError> {
    let now = reference_instant(params.at.as_deref())?;
    Ok(Json(state.planner().courses(now).await))
}

async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<AssignmentListParams>,
) -> Result<Json<Vec<AssignmentRow>>, AppError> {
    let now = reference_instant(params.at.as_deref())?;
    let filter = AssignmentFilter {
        status: params.status,
        course_id: params.course_id,
        priority: params.priority,
    };
    Ok(Json(state.planner().assignments(&filter, now).await))
}

async fn upcoming_assignments(
    State(state): State<AppState>,
    Query(params): Query<UpcomingParams>,
) -> Result<Json<Vec<AssignmentRow>>, AppError> {
    let now = reference_instant(params.at.as_deref())?;
    let horizon_days = params.horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS);
    if !(0..=MAX_HORIZON_DAYS).contains(&horizon_days) {
        return Err(AppError::BadRequest(format!(
            "horizonDays must be between 0 and {MAX_HORIZON_DAYS}, got {horizon_days}"
        )));
    }
    let limit = params.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);
    Ok(Json(state.planner().upcoming(now, horizon_days, limit).await))
}

async fn list_grades(State(state): State<AppState>) -> Result<Json<Vec<Grade>>, AppError> {
    Ok(Json(state.planner().grades().await))
}

async fn grade_report(State(state): State<AppState>) -> Result<Json<GradeReport>, AppError> {
    Ok(Json(state.planner().grade_report().await))
}

async fn today_schedule(
    State(state): State<AppState>,
    Query(params): Query<AtParams>,
) -> Result<Json<DaySchedule>, AppError> {
    let now = reference_instant(params.at.as_deref())?;
    Ok(Json(state.planner().today(now).await))
}

async fn week_schedule(
    State(state): State<AppState>,
    Query(params): Query<AtParams>,
) -> Result<Json<WeekView>, AppError> {
    let now = reference_instant(params.at.as_deref())?;
    Ok(Json(state.planner().week(now).await))
}

async fn schedule_stats(State(state): State<AppState>) -> Result<Json<ScheduleStats>, AppError> {
    Ok(Json(state.planner().schedule_stats().await))
}

async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<AtParams>,
) -> Result<Json<DashboardStats>, AppError> {
    let now = reference_instant(params.at.as_deref())?;
    Ok(Json(state.planner().dashboard(now).await))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_reference_instant_keeps_its_offset() {
        let now = reference_instant(Some("2026-10-19T08:30:00-04:00")).unwrap();
        assert_eq!(now.offset().local_minus_utc(), -4 * 3600);
    }

    #[test]
    fn malformed_reference_instant_is_bad_request() {
        assert!(matches!(reference_instant(Some("yesterday")), Err(AppError::BadRequest(_))));
    }
}
