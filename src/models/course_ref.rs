use serde::Serialize;

use super::Course;

pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// A course foreign key as seen by derived views. Dangling ids stay
/// representable instead of turning into errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CourseRef {
    Resolved { id: u32, name: String, color: String },
    Unresolved { id: u32 },
}

impl CourseRef {
    pub fn resolve(courses: &[Course], id: u32) -> Self {
        match courses.iter().find(|c| c.id == id) {
            Some(course) => Self::from(course),
            None => CourseRef::Unresolved { id },
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            CourseRef::Resolved { id, .. } | CourseRef::Unresolved { id } => *id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CourseRef::Resolved { name, .. } => name,
            CourseRef::Unresolved { .. } => UNKNOWN_COURSE,
        }
    }
}

impl From<&Course> for CourseRef {
    fn from(course: &Course) -> Self {
        CourseRef::Resolved {
            id: course.id,
            name: course.name.clone(),
            color: course.color.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCourseRequest;

    #[test]
    fn dangling_id_falls_back_to_unknown_label() {
        let courses = vec![Course::from_request(
            1,
            NewCourseRequest {
                name: "Organic Chemistry".to_string(),
                instructor: "Dr. Hale".to_string(),
                location: None,
                credits: 4,
                color: "#059669".to_string(),
                semester: "Fall 2026".to_string(),
                schedule: Vec::new(),
            },
        )];

        let found = CourseRef::resolve(&courses, 1);
        assert_eq!(found.label(), "Organic Chemistry");

        let missing = CourseRef::resolve(&courses, 99);
        assert_eq!(missing, CourseRef::Unresolved { id: 99 });
        assert_eq!(missing.label(), UNKNOWN_COURSE);
        assert_eq!(missing.id(), 99);
    }
}
