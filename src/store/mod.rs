//! In-memory entity store for courses, assignments and grades.
//!
//! Every call waits out a simulated network latency first. Reads hand back
//! copies; nothing a caller does to a returned record reaches the store.

pub mod latency;
pub mod seed;
pub mod table;

pub use latency::Latency;
pub use seed::Seed;
pub use table::{Record, Table};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::AppError;
use crate::grades::course_grade;
use crate::models::{
    Assignment, Course, Grade, NewAssignmentRequest, NewCourseRequest, NewGradeRequest,
    UpdateAssignmentRequest, UpdateCourseRequest, UpdateGradeRequest,
};

pub struct Store {
    courses: RwLock<Table<Course>>,
    assignments: RwLock<Table<Assignment>>,
    grades: RwLock<Table<Grade>>,
    latency: Latency,
}

impl Store {
    pub fn new(latency: Latency) -> Self {
        Self {
            courses: RwLock::new(Table::empty()),
            assignments: RwLock::new(Table::empty()),
            grades: RwLock::new(Table::empty()),
            latency,
        }
    }

    /// Fails when a seeded table repeats an id.
    pub fn from_seed(seed: Seed, latency: Latency) -> Result<Self, AppError> {
        let mut courses = Table::new(seed.courses)?;
        let grades = Table::new(seed.grades)?;
        courses.for_each_mut(|c| c.current_grade = course_grade(grades.rows(), c.id));

        Ok(Self {
            courses: RwLock::new(courses),
            assignments: RwLock::new(Table::new(seed.assignments)?),
            grades: RwLock::new(grades),
            latency,
        })
    }

    // Courses

    pub async fn list_courses(&self) -> Vec<Course> {
        self.latency.wait().await;
        self.courses.read().await.all()
    }

    pub async fn get_course(&self, id: u32) -> Result<Course, AppError> {
        self.latency.wait().await;
        self.courses.read().await.get(id)
    }

    pub async fn create_course(&self, req: NewCourseRequest) -> Result<Course, AppError> {
        self.latency.wait().await;
        let grades = self.grades.read().await.all();
        let course = self.courses.write().await.insert_with(|id| {
            let mut course = Course::from_request(id, req);
            course.current_grade = course_grade(&grades, id);
            course
        })?;
        debug!("created course {} ({})", course.id, course.name);
        Ok(course)
    }

    pub async fn update_course(&self, id: u32, req: UpdateCourseRequest) -> Result<Course, AppError> {
        self.latency.wait().await;
        let course = self.courses.write().await.update_with(id, |c| c.apply(req))?;
        debug!("updated course {}", id);
        Ok(course)
    }

    /// Assignments and grades pointing at the course are left in place and
    /// show up as unresolved references afterwards.
    pub async fn delete_course(&self, id: u32) -> Result<bool, AppError> {
        self.latency.wait().await;
        self.courses.write().await.remove(id)?;
        debug!("deleted course {}", id);
        Ok(true)
    }

    // Assignments

    pub async fn list_assignments(&self) -> Vec<Assignment> {
        self.latency.wait().await;
        self.assignments.read().await.all()
    }

    pub async fn get_assignment(&self, id: u32) -> Result<Assignment, AppError> {
        self.latency.wait().await;
        self.assignments.read().await.get(id)
    }

    pub async fn create_assignment(&self, req: NewAssignmentRequest) -> Result<Assignment, AppError> {
        self.latency.wait().await;
        let assignment = self
            .assignments
            .write()
            .await
            .insert_with(|id| Assignment::from_request(id, req))?;
        debug!("created assignment {} ({})", assignment.id, assignment.title);
        Ok(assignment)
    }

    pub async fn update_assignment(
        &self,
        id: u32,
        req: UpdateAssignmentRequest,
    ) -> Result<Assignment, AppError> {
        self.latency.wait().await;
        let now = Utc::now();
        let assignment = self
            .assignments
            .write()
            .await
            .update_with(id, |a| a.apply(req, now))?;
        debug!("updated assignment {} (status {:?})", id, assignment.status);
        Ok(assignment)
    }

    pub async fn delete_assignment(&self, id: u32) -> Result<bool, AppError> {
        self.latency.wait().await;
        self.assignments.write().await.remove(id)?;
        debug!("deleted assignment {}", id);
        Ok(true)
    }

    // Grades

    pub async fn list_grades(&self) -> Vec<Grade> {
        self.latency.wait().await;
        self.grades.read().await.all()
    }

    pub async fn get_grade(&self, id: u32) -> Result<Grade, AppError> {
        self.latency.wait().await;
        self.grades.read().await.get(id)
    }

    pub async fn grades_for_course(&self, course_id: u32) -> Vec<Grade> {
        self.latency.wait().await;
        self.grades
            .read()
            .await
            .rows()
            .iter()
            .filter(|g| g.course_id == course_id)
            .cloned()
            .collect()
    }

    pub async fn create_grade(&self, req: NewGradeRequest) -> Result<Grade, AppError> {
        self.latency.wait().await;
        let mut grades = self.grades.write().await;
        let grade = grades.insert_with(|id| Grade::from_request(id, req))?;
        debug!("created grade {} for course {}", grade.id, grade.course_id);
        self.refresh_current_grades(grades.rows(), &[grade.course_id]).await;
        Ok(grade)
    }

    pub async fn update_grade(&self, id: u32, req: UpdateGradeRequest) -> Result<Grade, AppError> {
        self.latency.wait().await;
        let mut grades = self.grades.write().await;
        let previous_course = grades.get(id)?.course_id;
        let grade = grades.update_with(id, |g| g.apply(req))?;
        debug!("updated grade {}", id);
        self.refresh_current_grades(grades.rows(), &[previous_course, grade.course_id])
            .await;
        Ok(grade)
    }

    pub async fn delete_grade(&self, id: u32) -> Result<bool, AppError> {
        self.latency.wait().await;
        let mut grades = self.grades.write().await;
        let removed = grades.remove(id)?;
        debug!("deleted grade {}", id);
        self.refresh_current_grades(grades.rows(), &[removed.course_id]).await;
        Ok(true)
    }

    /// Callers hold the grades lock; lock order is always grades, then courses.
    async fn refresh_current_grades(&self, grades: &[Grade], course_ids: &[u32]) {
        let mut courses = self.courses.write().await;
        courses.for_each_mut(|c| {
            if course_ids.contains(&c.id) {
                c.current_grade = course_grade(grades, c.id);
            }
        });
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}
