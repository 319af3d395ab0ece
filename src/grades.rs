use std::fmt;

use serde::{Serialize, Serializer};

use crate::models::{Course, Grade};

/// Weighted percentage for one course, rounded to the nearest integer.
///
/// Returns 0 when the course has no usable grades. Weights are relative;
/// grades whose weight is not a positive finite number are skipped, so a
/// set whose weights total zero also yields 0 instead of NaN.
pub fn course_grade(grades: &[Grade], course_id: u32) -> u32 {
    let mut weighted_sum = 0.0_f64;
    let mut weighted_denom = 0.0_f64;

    for g in grades.iter().filter(|g| g.course_id == course_id) {
        if !(g.weight.is_finite() && g.weight > 0.0) || !g.score.is_finite() {
            continue;
        }
        weighted_sum += g.score * g.weight;
        weighted_denom += g.weight;
    }

    if weighted_denom > 0.0 {
        (weighted_sum / weighted_denom).round().clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterGrade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
    /// No grade recorded yet. Distinct from `F`.
    NotAvailable,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
            LetterGrade::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LetterGrade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

pub fn letter_grade(percentage: u32) -> LetterGrade {
    match percentage {
        0 => LetterGrade::NotAvailable,
        97.. => LetterGrade::APlus,
        93..=96 => LetterGrade::A,
        90..=92 => LetterGrade::AMinus,
        87..=89 => LetterGrade::BPlus,
        83..=86 => LetterGrade::B,
        80..=82 => LetterGrade::BMinus,
        77..=79 => LetterGrade::CPlus,
        73..=76 => LetterGrade::C,
        70..=72 => LetterGrade::CMinus,
        67..=69 => LetterGrade::DPlus,
        65..=66 => LetterGrade::D,
        _ => LetterGrade::F,
    }
}

/// 4.0-scale points. A+ earns no bonus over A.
pub fn gpa_points(percentage: u32) -> f64 {
    match percentage {
        93.. => 4.0,
        90..=92 => 3.7,
        87..=89 => 3.3,
        83..=86 => 3.0,
        80..=82 => 2.7,
        77..=79 => 2.3,
        73..=76 => 2.0,
        70..=72 => 1.7,
        67..=69 => 1.3,
        65..=66 => 1.0,
        _ => 0.0,
    }
}

/// Credit-weighted GPA over the courses that have a grade; 0 means N/A.
pub fn overall_gpa(courses: &[Course], grades: &[Grade]) -> f64 {
    let mut points = 0.0_f64;
    let mut credits = 0_u32;

    for course in courses {
        let grade = course_grade(grades, course.id);
        if grade == 0 {
            continue;
        }
        points += gpa_points(grade) * f64::from(course.credits);
        credits += course.credits;
    }

    if credits > 0 {
        points / f64::from(credits)
    } else {
        0.0
    }
}

/// Colour band used when presenting a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBand {
    Excellent,
    Good,
    Fair,
    Poor,
    None,
}

pub fn grade_band(percentage: u32) -> GradeBand {
    match percentage {
        0 => GradeBand::None,
        90.. => GradeBand::Excellent,
        80..=89 => GradeBand::Good,
        70..=79 => GradeBand::Fair,
        _ => GradeBand::Poor,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseGradeSummary {
    pub course_id: u32,
    pub name: String,
    pub credits: u32,
    pub percentage: u32,
    pub letter: LetterGrade,
    pub band: GradeBand,
    pub grades: Vec<Grade>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeReport {
    pub courses: Vec<CourseGradeSummary>,
    pub overall_gpa: f64,
}

pub fn grade_report(courses: &[Course], grades: &[Grade]) -> GradeReport {
    let summaries = courses
        .iter()
        .map(|course| {
            let percentage = course_grade(grades, course.id);
            CourseGradeSummary {
                course_id: course.id,
                name: course.name.clone(),
                credits: course.credits,
                percentage,
                letter: letter_grade(percentage),
                band: grade_band(percentage),
                grades: grades.iter().filter(|g| g.course_id == course.id).cloned().collect(),
            }
        })
        .collect();

    GradeReport {
        courses: summaries,
        overall_gpa: overall_gpa(courses, grades),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GradeCategory, NewCourseRequest};

    fn grade(id: u32, course_id: u32, score: f64, weight: f64) -> Grade {
        Grade {
            id,
            course_id,
            assignment_name: format!("item {id}"),
            score,
            weight,
            category: GradeCategory::Assignment,
        }
    }

    fn course(id: u32, credits: u32) -> Course {
        Course::from_request(
            id,
            NewCourseRequest {
                name: format!("Course {id}"),
                instructor: "Staff".to_string(),
                location: None,
                credits,
                color: "#6b7280".to_string(),
                semester: "Fall 2026".to_string(),
                schedule: Vec::new(),
            },
        )
    }

    #[test]
    fn no_grades_yields_zero() {
        let grades = vec![grade(1, 2, 88.0, 10.0)];
        assert_eq!(course_grade(&grades, 1), 0);
        assert_eq!(course_grade(&[], 1), 0);
    }

    #[test]
    fn weights_are_relative() {
        // (90*1 + 60*3) / 4 = 67.5 -> 68
        let grades = vec![grade(1, 1, 90.0, 1.0), grade(2, 1, 60.0, 3.0)];
        assert_eq!(course_grade(&grades, 1), 68);

        let scaled = vec![grade(1, 1, 90.0, 25.0), grade(2, 1, 60.0, 75.0)];
        assert_eq!(course_grade(&scaled, 1), 68);
    }

    #[test]
    fn zero_total_weight_yields_zero() {
        let grades = vec![grade(1, 1, 95.0, 0.0), grade(2, 1, 80.0, 0.0)];
        assert_eq!(course_grade(&grades, 1), 0);
    }

    #[test]
    fn zero_weight_entries_do_not_dilute() {
        let grades = vec![grade(1, 1, 95.0, 0.0), grade(2, 1, 80.0, 20.0)];
        assert_eq!(course_grade(&grades, 1), 80);
    }

    #[test]
    fn result_stays_in_percentage_range() {
        let sets: Vec<Vec<Grade>> = vec![
            vec![grade(1, 1, 100.0, 3.0), grade(2, 1, 100.0, 0.5)],
            vec![grade(1, 1, 0.0, 3.0), grade(2, 1, 0.5, 7.0)],
            vec![grade(1, 1, 45.5, 1.0), grade(2, 1, 99.9, 100.0), grade(3, 1, 12.0, 4.0)],
        ];
        for set in &sets {
            assert!(course_grade(set, 1) <= 100);
        }
    }

    #[test]
    fn letter_table() {
        assert_eq!(letter_grade(100), LetterGrade::APlus);
        assert_eq!(letter_grade(97), LetterGrade::APlus);
        assert_eq!(letter_grade(93), LetterGrade::A);
        assert_eq!(letter_grade(90), LetterGrade::AMinus);
        assert_eq!(letter_grade(85), LetterGrade::B);
        assert_eq!(letter_grade(66), LetterGrade::D);
        assert_eq!(letter_grade(64), LetterGrade::F);
        assert_eq!(letter_grade(1), LetterGrade::F);
        assert_eq!(letter_grade(0), LetterGrade::NotAvailable);
        assert_eq!(letter_grade(0).to_string(), "N/A");
    }

    #[test]
    fn letter_serializes_as_display_string() {
        let json = serde_json::to_string(&letter_grade(88)).unwrap();
        assert_eq!(json, r#""B+""#);
    }

    #[test]
    fn gpa_table_has_no_a_plus_bonus() {
        assert_eq!(gpa_points(100), 4.0);
        assert_eq!(gpa_points(93), 4.0);
        assert_eq!(gpa_points(92), 3.7);
        assert_eq!(gpa_points(83), 3.0);
        assert_eq!(gpa_points(65), 1.0);
        assert_eq!(gpa_points(64), 0.0);
    }

    #[test]
    fn overall_gpa_is_credit_weighted() {
        let courses = vec![course(1, 4), course(2, 2), course(3, 3)];
        let grades = vec![grade(1, 1, 93.0, 1.0), grade(2, 2, 83.0, 1.0)];
        let gpa = overall_gpa(&courses, &grades);
        assert!((gpa - 22.0 / 6.0).abs() < 1e-9);
        assert_eq!(format!("{gpa:.3}"), "3.667");
    }

    #[test]
    fn overall_gpa_without_grades_is_zero() {
        let courses = vec![course(1, 4)];
        assert_eq!(overall_gpa(&courses, &[]), 0.0);
        assert_eq!(overall_gpa(&[], &[]), 0.0);
    }

    #[test]
    fn report_lists_every_course() {
        let courses = vec![course(1, 4), course(2, 2)];
        let grades = vec![grade(1, 1, 91.0, 1.0), grade(2, 9, 50.0, 1.0)];
        let report = grade_report(&courses, &grades);

        assert_eq!(report.courses.len(), 2);
        assert_eq!(report.courses[0].letter, LetterGrade::AMinus);
        assert_eq!(report.courses[0].band, GradeBand::Excellent);
        assert_eq!(report.courses[0].grades.len(), 1);
        assert_eq!(report.courses[1].letter, LetterGrade::NotAvailable);
        assert_eq!(report.courses[1].band, GradeBand::None);
        assert!((report.overall_gpa - 3.7).abs() < 1e-9);
    }
}
