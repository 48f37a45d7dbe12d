//! Score to grade bucketing

use crate::{Grade, ScoreGrade};
use serde::{Deserialize, Serialize};

/// Map a 0-100 score to its grade and badge color.
///
/// Callers clamp out-of-range values (see [`crate::MetricScore::new`]).
pub fn score_grade(score: f64) -> ScoreGrade {
    let grade = Grade::from_score(score);
    ScoreGrade {
        grade,
        color: grade.color(),
    }
}

/// Three-tone coloring used by the overview score cards.
///
/// Independent of [`score_grade`]: a 55 is yellow here but an F there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTone {
    Green,
    Yellow,
    Red,
}

pub fn score_tone(score: f64) -> ScoreTone {
    if score >= 90.0 {
        ScoreTone::Green
    } else if score >= 50.0 {
        ScoreTone::Yellow
    } else {
        ScoreTone::Red
    }
}

/// Short description shown under a grade
pub fn grade_description(grade: Grade) -> &'static str {
    match grade {
        Grade::A => "Excellent - the page is fast and well optimized",
        Grade::B => "Good - solid performance with room for improvement",
        Grade::C => "Fair - noticeable slowdowns worth addressing",
        Grade::D => "Poor - significant performance problems",
        Grade::F => "Failing - performance needs major work",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GradeColor;

    #[test]
    fn test_grade_boundaries_inclusive_lower() {
        assert_eq!(score_grade(100.0).grade, Grade::A);
        assert_eq!(score_grade(90.0).grade, Grade::A);
        assert_eq!(score_grade(89.999).grade, Grade::B);
        assert_eq!(score_grade(80.0).grade, Grade::B);
        assert_eq!(score_grade(79.999).grade, Grade::C);
        assert_eq!(score_grade(70.0).grade, Grade::C);
        assert_eq!(score_grade(69.9).grade, Grade::D);
        assert_eq!(score_grade(60.0).grade, Grade::D);
        assert_eq!(score_grade(59.99).grade, Grade::F);
        assert_eq!(score_grade(0.0).grade, Grade::F);
    }

    #[test]
    fn test_grade_is_monotonic_over_boundary_values() {
        let scores = [100.0, 90.0, 89.999, 80.0, 79.999, 70.0, 60.0, 0.0];
        let grades: Vec<Grade> = scores.iter().map(|s| score_grade(*s).grade).collect();
        // Grade derives Ord with A < B < ... < F, so worse grades compare greater
        for pair in grades.windows(2) {
            assert!(pair[0] <= pair[1], "{:?} should not be worse than {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_color_covaries_with_grade() {
        assert_eq!(score_grade(95.0).color, GradeColor::Green);
        assert_eq!(score_grade(85.0).color, GradeColor::Yellow);
        assert_eq!(score_grade(75.0).color, GradeColor::Orange);
        assert_eq!(score_grade(65.0).color, GradeColor::Red);
        assert_eq!(score_grade(10.0).color, GradeColor::Red);
    }

    #[test]
    fn test_tone_is_separate_scheme() {
        assert_eq!(score_tone(90.0), ScoreTone::Green);
        assert_eq!(score_tone(55.0), ScoreTone::Yellow);
        assert_eq!(score_grade(55.0).grade, Grade::F);
        assert_eq!(score_tone(49.0), ScoreTone::Red);
    }

    #[test]
    fn test_nan_score_is_failing() {
        assert_eq!(score_grade(f64::NAN).grade, Grade::F);
    }
}
