pub mod planner;

pub use planner::{AssignmentRow, CourseCard, DaySchedule, PlannerService, WeekView};
