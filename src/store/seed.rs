use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{Assignment, Course, Grade};

/// Initial contents of the store, usually loaded from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub grades: Vec<Grade>,
}

impl Seed {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = Seed::from_json(r#"{ "grades": [] }"#).unwrap();
        assert!(seed.courses.is_empty());
        assert!(seed.assignments.is_empty());
    }

    #[test]
    fn malformed_json_is_a_seed_error() {
        assert!(matches!(Seed::from_json("{ nope"), Err(AppError::Seed(_))));
    }

    #[test]
    fn bundled_seed_parses() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seed.json");
        let seed = Seed::from_path(path).unwrap();
        assert!(!seed.courses.is_empty());
        assert!(!seed.assignments.is_empty());
        assert!(!seed.grades.is_empty());
    }
}
