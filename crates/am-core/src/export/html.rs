//! Static HTML rendering
//!
//! One self-contained page with embedded styling. Math markup is left as
//! written; the page loads a client-side typesetting script that renders it
//! when the document is opened.

use super::bundle::HTML_ENTRY;
use super::exporter::Exporter;
use crate::assignment::{subsection_letter, Assignment};
use crate::config::DEFAULT_MATH_SCRIPT_URL;
use crate::error::Result;
use serde::Serialize;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "assignment.html";
const TEMPLATE: &str = include_str!("../../templates/assignment.html");

#[derive(Debug, Serialize)]
struct HtmlView<'a> {
    course_code: &'a str,
    title: &'a str,
    due_date: String,
    due_time: String,
    preamble: &'a str,
    math_script_url: &'a str,
    problems: Vec<ProblemView<'a>>,
}

#[derive(Debug, Serialize)]
struct ProblemView<'a> {
    number: usize,
    name: &'a str,
    description: &'a str,
    subsections: Vec<SubsectionView<'a>>,
}

#[derive(Debug, Serialize)]
struct SubsectionView<'a> {
    letter: String,
    name: &'a str,
    description: &'a str,
    points: u32,
    submission_type: &'a str,
    /// Only set for image answers
    max_images: Option<u32>,
}

impl<'a> HtmlView<'a> {
    fn new(assignment: &'a Assignment, math_script_url: &'a str) -> Self {
        let problems = assignment
            .problems
            .iter()
            .enumerate()
            .map(|(i, problem)| ProblemView {
                number: i + 1,
                name: &problem.name,
                description: &problem.description,
                subsections: problem
                    .subsections
                    .iter()
                    .enumerate()
                    .map(|(j, sub)| SubsectionView {
                        letter: subsection_letter(j).to_string(),
                        name: &sub.name,
                        description: &sub.description,
                        points: sub.points,
                        submission_type: sub.submission_type.label(),
                        max_images: sub
                            .max_images
                            .filter(|n| *n > 0 && sub.submission_type.is_image()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            course_code: &assignment.course_code,
            title: &assignment.title,
            due_date: assignment.due_date_label(),
            due_time: assignment.due_time_label(),
            preamble: &assignment.preamble,
            math_script_url,
            problems,
        }
    }
}

/// Renders assignments as HTML
pub struct HtmlExporter {
    math_script_url: String,
}

impl HtmlExporter {
    pub fn new(math_script_url: impl Into<String>) -> Self {
        Self {
            math_script_url: math_script_url.into(),
        }
    }

    /// Render to an HTML string
    pub fn render(&self, assignment: &Assignment) -> Result<String> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)?;

        let view = HtmlView::new(assignment, &self.math_script_url);
        let context = Context::from_serialize(&view)?;

        Ok(tera.render(TEMPLATE_NAME, &context)?)
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new(DEFAULT_MATH_SCRIPT_URL)
    }
}

impl Exporter for HtmlExporter {
    fn export(&self, assignment: &Assignment) -> Result<Vec<u8>> {
        Ok(self.render(assignment)?.into_bytes())
    }

    fn format_name(&self) -> &str {
        "html"
    }

    fn file_name(&self) -> &str {
        HTML_ENTRY
    }
}
