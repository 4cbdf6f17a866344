//! Conversion to the submission-system schema
//!
//! The downstream submission system reads `assignment_spec.json` in its own
//! snake_case shape. Conversion is a pure function of the assignment: no
//! clock, no randomness, input order preserved, source left untouched.

use crate::assignment::{Assignment, Problem, Subsection, SubmissionType};
use serde::{Deserialize, Serialize};

/// Submission element for typed answers
pub const ANSWER_AS_TEXT: &str = "Answer as text";
/// Submission element for uploaded pages
pub const ANSWER_AS_IMAGE: &str = "Answer as image";
/// Submission element for AI-use reflections
pub const AI_REFLECTIVE: &str = "AI Reflective";

/// Converted assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecAssignment {
    pub assignment_title: String,
    pub course_code: String,
    /// Omitted when the assignment has no preamble
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    pub total_points: u32,
    pub problems: Vec<SpecProblem>,
}

/// Converted problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecProblem {
    pub problem_statement: String,
    /// Sum of the converted subsections' points
    pub points: u32,
    pub subsections: Vec<SpecSubsection>,
}

/// Converted subsection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecSubsection {
    pub subsection_statement: String,
    pub points: u32,
    pub submission_elements: Vec<String>,
    pub max_images_allowed: u32,
}

/// Join a name and description into one statement.
///
/// Both present: `name + "\n\n" + description`; otherwise whichever is
/// non-empty; neither: empty string.
pub fn join_statement(name: &str, description: &str) -> String {
    match (name.is_empty(), description.is_empty()) {
        (false, false) => format!("{}\n\n{}", name, description),
        (false, true) => name.to_string(),
        (true, false) => description.to_string(),
        (true, true) => String::new(),
    }
}

/// External submission element for a submission type.
///
/// Code answers are typed, file uploads are collected as images, and any
/// label this version does not recognise falls back to a text answer.
pub fn submission_elements(submission_type: &SubmissionType) -> Vec<String> {
    let element = match submission_type {
        SubmissionType::Text => ANSWER_AS_TEXT,
        SubmissionType::Image => ANSWER_AS_IMAGE,
        SubmissionType::AiReflective => AI_REFLECTIVE,
        SubmissionType::Code => ANSWER_AS_TEXT,
        SubmissionType::FileUpload => ANSWER_AS_IMAGE,
        SubmissionType::ExternalGrader | SubmissionType::Other(_) => ANSWER_AS_TEXT,
    };
    vec![element.to_string()]
}

/// Convert one subsection
pub fn convert_subsection(sub: &Subsection) -> SpecSubsection {
    SpecSubsection {
        subsection_statement: join_statement(&sub.name, &sub.description),
        points: sub.points,
        submission_elements: submission_elements(&sub.submission_type),
        max_images_allowed: sub.effective_max_images(),
    }
}

/// Convert one problem; its points are summed from the converted subsections
pub fn convert_problem(problem: &Problem) -> SpecProblem {
    let subsections: Vec<SpecSubsection> =
        problem.subsections.iter().map(convert_subsection).collect();
    let points = subsections.iter().map(|s| s.points).sum();

    SpecProblem {
        problem_statement: join_statement(&problem.name, &problem.description),
        points,
        subsections,
    }
}

/// Convert a whole assignment
pub fn convert(assignment: &Assignment) -> SpecAssignment {
    let problems: Vec<SpecProblem> = assignment.problems.iter().map(convert_problem).collect();
    let total_points = problems.iter().map(|p| p.points).sum();

    SpecAssignment {
        assignment_title: assignment.title.clone(),
        course_code: assignment.course_code.clone(),
        preamble: Some(assignment.preamble.clone()).filter(|p| !p.is_empty()),
        total_points,
        problems,
    }
}
