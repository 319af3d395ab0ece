use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignmentStatus {
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: u32,
    pub title: String,
    pub course_id: u32,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignmentRequest {
    pub title: String,
    pub course_id: u32,
    pub due_date: DateTime<Utc>,
    pub priority: Priority,
    pub status: AssignmentStatus,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub course_id: Option<u32>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub status: Option<AssignmentStatus>,
    pub description: Option<Option<String>>,
}

impl Assignment {
    pub fn from_request(id: u32, req: NewAssignmentRequest) -> Self {
        Self {
            id,
            title: req.title,
            course_id: req.course_id,
            due_date: req.due_date,
            priority: req.priority,
            status: req.status,
            description: req.description,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, req: UpdateAssignmentRequest, now: DateTime<Utc>) {
        if let Some(title) = req.title {
            self.title = title;
        }
        if let Some(course_id) = req.course_id {
            self.course_id = course_id;
        }
        if let Some(due_date) = req.due_date {
            self.due_date = due_date;
        }
        if let Some(priority) = req.priority {
            self.priority = priority;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        if let Some(description) = req.description {
            self.description = description;
        }
        self.updated_at = Some(now);
    }

    pub fn is_completed(&self) -> bool {
        self.status == AssignmentStatus::Completed
    }
}

/// Conjunctive filter for the assignment listing. `None` matches anything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentFilter {
    pub status: Option<AssignmentStatus>,
    pub course_id: Option<u32>,
    pub priority: Option<Priority>,
}

impl AssignmentFilter {
    pub fn matches(&self, assignment: &Assignment) -> bool {
        self.status.is_none_or(|s| assignment.status == s)
            && self.course_id.is_none_or(|c| assignment.course_id == c)
            && self.priority.is_none_or(|p| assignment.priority == p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Assignment {
        Assignment::from_request(
            7,
            NewAssignmentRequest {
                title: "Problem set 4".to_string(),
                course_id: 2,
                due_date: Utc.with_ymd_and_hms(2026, 10, 21, 23, 0, 0).unwrap(),
                priority: Priority::High,
                status: AssignmentStatus::Todo,
                description: None,
            },
        )
    }

    #[test]
    fn status_uses_kebab_case() {
        let json = serde_json::to_string(&AssignmentStatus::InProgress).unwrap();
        assert_eq!(json, r#""in-progress""#);
        let parsed: AssignmentStatus = serde_json::from_str(r#""completed""#).unwrap();
        assert_eq!(parsed, AssignmentStatus::Completed);
    }

    #[test]
    fn any_status_transition_is_allowed() {
        let now = Utc.with_ymd_and_hms(2026, 10, 20, 12, 0, 0).unwrap();
        let mut a = sample();
        a.apply(UpdateAssignmentRequest { status: Some(AssignmentStatus::Completed), ..Default::default() }, now);
        a.apply(UpdateAssignmentRequest { status: Some(AssignmentStatus::Todo), ..Default::default() }, now);
        assert_eq!(a.status, AssignmentStatus::Todo);
        assert_eq!(a.updated_at, Some(now));
    }

    #[test]
    fn filter_is_conjunctive() {
        let a = sample();
        assert!(AssignmentFilter::default().matches(&a));
        assert!(AssignmentFilter { course_id: Some(2), priority: Some(Priority::High), ..Default::default() }.matches(&a));
        assert!(!AssignmentFilter { course_id: Some(2), priority: Some(Priority::Low), ..Default::default() }.matches(&a));
        assert!(!AssignmentFilter { status: Some(AssignmentStatus::Completed), ..Default::default() }.matches(&a));
    }
}
