use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeCategory {
    Assignment,
    Exam,
    Quiz,
    Project,
    Participation,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: u32,
    pub course_id: u32,
    /// Free-text label; not linked to an assignment record.
    pub assignment_name: String,
    pub score: f64,
    /// Relative weight, not normalized to 100.
    pub weight: f64,
    pub category: GradeCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGradeRequest {
    pub course_id: u32,
    pub assignment_name: String,
    pub score: f64,
    pub weight: f64,
    pub category: GradeCategory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGradeRequest {
    pub course_id: Option<u32>,
    pub assignment_name: Option<String>,
    pub score: Option<f64>,
    pub weight: Option<f64>,
    pub category: Option<GradeCategory>,
}

impl Grade {
    pub fn from_request(id: u32, req: NewGradeRequest) -> Self {
        Self {
            id,
            course_id: req.course_id,
            assignment_name: req.assignment_name,
            score: req.score,
            weight: req.weight,
            category: req.category,
        }
    }

    pub fn apply(&mut self, req: UpdateGradeRequest) {
        if let Some(course_id) = req.course_id {
            self.course_id = course_id;
        }
        if let Some(name) = req.assignment_name {
            self.assignment_name = name;
        }
        if let Some(score) = req.score {
            self.score = score;
        }
        if let Some(weight) = req.weight {
            self.weight = weight;
        }
        if let Some(category) = req.category {
            self.category = category;
        }
    }
}
