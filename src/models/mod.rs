pub mod assignment;
pub mod course;
pub mod course_ref;
pub mod grade;

pub use assignment::{
    Assignment, AssignmentFilter, AssignmentStatus, NewAssignmentRequest, Priority,
    UpdateAssignmentRequest,
};
pub use course::{Course, NewCourseRequest, ScheduleSlot, UpdateCourseRequest, minute_of_day};
pub use course_ref::CourseRef;
pub use grade::{Grade, GradeCategory, NewGradeRequest, UpdateGradeRequest};
