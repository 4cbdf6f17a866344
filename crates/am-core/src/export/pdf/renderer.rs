//! Assignment document layout
//!
//! The first page carries the identification line, the course and title,
//! the due date and the preamble. After that every subsection gets its own
//! pages, one per expected image for image answers: nothing is ever shared
//! between two subsections.

use super::layout::{Font, Page, PageCursor, PageGeometry, TextStyle};
use super::writer::PdfWriter;
use crate::assignment::{subsection_letter, Assignment, Problem, Subsection};
use crate::config::Config;
use crate::error::Result;
use crate::export::bundle::{STUDENT_PDF_ENTRY, TEMPLATE_PDF_ENTRY};
use crate::export::exporter::Exporter;
use tracing::debug;

/// Maximum characters of the problem description preview
const PREVIEW_CHARS: usize = 100;

/// Preview is only drawn while the cursor is above this line
const PREVIEW_LIMIT_Y: f32 = 50.0;

/// Answer boxes smaller than this are not drawn
const MIN_BOX_HEIGHT: f32 = 20.0;

/// Label of a non-image answer box
pub const ANSWER_REGION_LABEL: &str = "Answer Region";

const TITLE_STYLE: TextStyle = TextStyle::new(Font::TimesBold, 18.0);
const DUE_STYLE: TextStyle = TextStyle::new(Font::TimesRoman, 12.0);
const PREAMBLE_STYLE: TextStyle = TextStyle::new(Font::TimesItalic, 11.0);
const PROBLEM_STYLE: TextStyle = TextStyle::new(Font::TimesBold, 14.0);
const PREVIEW_STYLE: TextStyle = TextStyle::new(Font::TimesRoman, 10.0).with_gray(100);
const SUBSECTION_STYLE: TextStyle = TextStyle::new(Font::TimesBold, 12.0);
const DESCRIPTION_STYLE: TextStyle = TextStyle::new(Font::TimesRoman, 11.0);
const TAG_STYLE: TextStyle = TextStyle::new(Font::Courier, 9.0).with_gray(100);
const BOX_LABEL_STYLE: TextStyle = TextStyle::new(Font::Courier, 8.0).with_gray(150);
const BOX_GRAY: u8 = 200;

/// Which copy of the document to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Informational copy: content and submission tags only
    Student,
    /// Fillable copy: adds a bounded answer box on every subsection page
    Template,
}

/// Laid-out document
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub title: String,
    pub pages: Vec<Page>,
}

/// Lays out assignments as pages
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    mode: RenderMode,
    geometry: PageGeometry,
}

impl DocumentRenderer {
    pub fn new(mode: RenderMode, geometry: PageGeometry) -> Self {
        Self { mode, geometry }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Lay out the whole assignment
    pub fn layout(&self, assignment: &Assignment) -> RenderedDocument {
        let mut cursor = PageCursor::new(self.geometry);

        self.cover_page(&mut cursor, assignment);

        for (p_index, problem) in assignment.problems.iter().enumerate() {
            for (s_index, sub) in problem.subsections.iter().enumerate() {
                let page_count = sub.page_count();
                for page in 0..page_count {
                    self.subsection_page(&mut cursor, problem, p_index, sub, s_index, page, page_count);
                }
            }
        }

        let pages = cursor.finish();
        debug!("Laid out {} pages ({:?})", pages.len(), self.mode);

        RenderedDocument {
            title: heading(assignment),
            pages,
        }
    }

    fn cover_page(&self, cursor: &mut PageCursor, assignment: &Assignment) {
        let margin = self.geometry.margin;
        cursor.new_page();

        cursor.set_style(TITLE_STYLE);
        cursor.text(&heading(assignment), margin);
        cursor.advance(10.0);

        cursor.set_style(DUE_STYLE);
        cursor.text(
            &format!(
                "Due: {} at {}",
                assignment.due_date_label(),
                assignment.due_time_label()
            ),
            margin,
        );
        cursor.advance(20.0);

        if !assignment.preamble.is_empty() {
            cursor.set_style(PREAMBLE_STYLE);
            cursor.wrapped_text(&assignment.preamble, margin, self.geometry.content_width(), 6.0);
            cursor.advance(10.0);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn subsection_page(
        &self,
        cursor: &mut PageCursor,
        problem: &Problem,
        p_index: usize,
        sub: &Subsection,
        s_index: usize,
        page: u32,
        page_count: u32,
    ) {
        let margin = self.geometry.margin;
        let indent = margin + 5.0;
        let inner_width = self.geometry.content_width() - 5.0;

        cursor.new_page();

        cursor.set_style(PROBLEM_STYLE);
        cursor.text(&format!("Problem {}: {}", p_index + 1, problem.name), margin);
        cursor.advance(7.0);

        if !problem.description.is_empty() && cursor.y() < PREVIEW_LIMIT_Y {
            cursor.set_style(PREVIEW_STYLE);
            cursor.text(&preview(&problem.description), margin);
            cursor.advance(8.0);
        }

        let mut title = format!(
            "({}) [{} pts] {}",
            subsection_letter(s_index),
            sub.points,
            sub.name
        );
        if page_count > 1 {
            title.push_str(&format!(" (Page {} of {})", page + 1, page_count));
        }
        cursor.set_style(SUBSECTION_STYLE);
        cursor.text(&title, indent);
        cursor.advance(6.0);

        if !sub.description.is_empty() {
            cursor.set_style(DESCRIPTION_STYLE);
            cursor.wrapped_text(&sub.description, indent, inner_width, 5.0);
            cursor.advance(5.0);
        }

        cursor.set_style(TAG_STYLE);
        cursor.text(&format!("[Submission: {}]", sub.submission_type), indent);
        cursor.advance(5.0);

        if self.mode == RenderMode::Template {
            let top = cursor.y();
            let box_height = cursor.remaining_height();
            if box_height > MIN_BOX_HEIGHT {
                cursor.rect(indent, top, inner_width, box_height, BOX_GRAY);

                let label = if sub.submission_type.is_image() {
                    format!("Attach Image {} Here", page + 1)
                } else {
                    ANSWER_REGION_LABEL.to_string()
                };
                cursor.set_style(BOX_LABEL_STYLE);
                cursor.text_at(&label, margin + 7.0, top + 5.0);
            }
        }
    }
}

/// `"{course}: {title}"`
fn heading(assignment: &Assignment) -> String {
    format!("{}: {}", assignment.course_code, assignment.title)
}

/// One-line preview of a problem description
fn preview(description: &str) -> String {
    let collapsed = description.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > PREVIEW_CHARS {
        let cut: String = collapsed.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        collapsed
    }
}

/// PDF exporter for either document mode
pub struct PdfExporter {
    renderer: DocumentRenderer,
    compress: bool,
}

impl PdfExporter {
    pub fn new(mode: RenderMode, config: &Config) -> Self {
        Self {
            renderer: DocumentRenderer::new(mode, PageGeometry::from_config(&config.document)),
            compress: config.export.compress_pdf_streams,
        }
    }
}

impl Exporter for PdfExporter {
    fn export(&self, assignment: &Assignment) -> Result<Vec<u8>> {
        let document = self.renderer.layout(assignment);
        PdfWriter::new(*self.renderer.geometry())
            .with_compression(self.compress)
            .with_title(document.title)
            .write(&document.pages)
    }

    fn format_name(&self) -> &str {
        match self.renderer.mode() {
            RenderMode::Student => "pdf",
            RenderMode::Template => "template",
        }
    }

    fn file_name(&self) -> &str {
        match self.renderer.mode() {
            RenderMode::Student => STUDENT_PDF_ENTRY,
            RenderMode::Template => TEMPLATE_PDF_ENTRY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::SubmissionType;
    use crate::export::pdf::layout::{DrawOp, HEADER_TEXT};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sub(name: &str, ty: SubmissionType, max_images: Option<u32>) -> Subsection {
        Subsection {
            name: name.to_string(),
            description: format!("Describe {}", name),
            points: 2,
            submission_type: ty,
            max_images,
            ..Subsection::new()
        }
    }

    fn assignment_with(subsections: Vec<Subsection>) -> Assignment {
        let mut a = Assignment::new("ENG6", "Lab 3");
        a.due_date = NaiveDate::from_ymd_opt(2025, 3, 14);
        a.problems = vec![Problem {
            name: "Motion".to_string(),
            description: "Analyse the motion.".to_string(),
            subsections,
            ..Problem::new()
        }];
        a
    }

    fn layout(mode: RenderMode, a: &Assignment) -> Vec<Page> {
        DocumentRenderer::new(mode, PageGeometry::default()).layout(a).pages
    }

    #[test]
    fn test_cover_page() {
        let mut a = assignment_with(vec![]);
        a.preamble = "Be concise.".to_string();
        let pages = layout(RenderMode::Student, &a);

        assert_eq!(pages.len(), 1);
        let texts: Vec<_> = pages[0].texts().collect();
        assert_eq!(
            texts,
            vec![
                HEADER_TEXT,
                "ENG6: Lab 3",
                "Due: 2025-03-14 at 23:59",
                "Be concise.",
            ]
        );
    }

    #[test]
    fn test_image_subsection_fans_out() {
        let a = assignment_with(vec![sub("Plot", SubmissionType::Image, Some(3))]);
        let pages = layout(RenderMode::Student, &a);

        assert_eq!(pages.len(), 4);
        for (i, page) in pages[1..].iter().enumerate() {
            assert!(page.contains(&format!("(a) [2 pts] Plot (Page {} of 3)", i + 1)));
            assert!(page.contains("Problem 1: Motion"));
            assert_eq!(page.texts().next(), Some(HEADER_TEXT));
        }
    }

    #[test]
    fn test_subsections_never_share_a_page() {
        let a = assignment_with(vec![
            sub("First", SubmissionType::Text, None),
            sub("Second", SubmissionType::Text, None),
        ]);
        let pages = layout(RenderMode::Student, &a);

        assert_eq!(pages.len(), 3);
        assert!(pages[1].contains("(a) [2 pts] First"));
        assert!(!pages[1].contains("Second"));
        assert!(pages[2].contains("(b) [2 pts] Second"));
        assert!(!pages[2].contains("(Page"));
    }

    #[test]
    fn test_max_images_ignored_for_non_image() {
        let a = assignment_with(vec![sub("Essay", SubmissionType::FileUpload, Some(4))]);
        assert_eq!(layout(RenderMode::Student, &a).len(), 2);
    }

    #[test]
    fn test_submission_tag() {
        let a = assignment_with(vec![sub("Reflect", SubmissionType::AiReflective, None)]);
        let pages = layout(RenderMode::Student, &a);
        assert!(pages[1].contains("[Submission: AI Reflective]"));
    }

    #[test]
    fn test_student_mode_has_no_boxes() {
        let a = assignment_with(vec![sub("Plot", SubmissionType::Image, Some(2))]);
        let pages = layout(RenderMode::Student, &a);
        assert!(pages.iter().all(|p| p.rects().count() == 0));
        assert!(!pages.iter().any(|p| p.contains("Attach Image")));
    }

    #[test]
    fn test_template_mode_boxes() {
        let a = assignment_with(vec![
            sub("Plot", SubmissionType::Image, Some(2)),
            sub("Explain", SubmissionType::Text, None),
        ]);
        let pages = layout(RenderMode::Template, &a);

        assert_eq!(pages.len(), 4);
        assert!(pages[1].contains("Attach Image 1 Here"));
        assert!(pages[2].contains("Attach Image 2 Here"));
        assert!(pages[3].contains(ANSWER_REGION_LABEL));

        for page in &pages[1..] {
            let rects: Vec<_> = page.rects().collect();
            assert_eq!(rects.len(), 1);
            if let DrawOp::Rect { y, height, .. } = rects[0] {
                assert!((y + height - (297.0 - 20.0)).abs() < 0.01);
            }
        }
        assert_eq!(pages[0].rects().count(), 0);
    }

    #[test]
    fn test_template_box_skipped_when_page_is_full() {
        let mut long = sub("Long", SubmissionType::Text, None);
        // Leaves less than the minimum box height below the tag line
        long.description = "line\n".repeat(39);
        let a = assignment_with(vec![long]);
        let pages = layout(RenderMode::Template, &a);

        assert!(pages.iter().all(|p| p.rects().count() == 0));
    }

    #[test]
    fn test_preamble_overflow_repeats_header() {
        let mut a = assignment_with(vec![sub("Q", SubmissionType::Text, None)]);
        a.preamble = "Paragraph of instructions.\n".repeat(60);
        let pages = layout(RenderMode::Student, &a);

        // Cover spills onto a second page, then one subsection page
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].texts().next(), Some(HEADER_TEXT));
        assert!(pages[1].contains("Paragraph of instructions."));
        assert!(pages[2].contains("(a) [2 pts] Q"));
    }

    #[test]
    fn test_description_overflow_continues_subsection() {
        let mut long = sub("Long", SubmissionType::Text, None);
        long.description = (1..=80).map(|i| format!("step {}\n", i)).collect();
        let a = assignment_with(vec![long, sub("Next", SubmissionType::Text, None)]);
        let pages = layout(RenderMode::Template, &a);

        // cover, description page, continuation, next subsection
        assert_eq!(pages.len(), 4);

        assert!(pages[1].contains("(a) [2 pts] Long"));
        assert!(pages[1].texts().any(|t| t == "step 1"));
        assert!(!pages[1].contains("[Submission:"));
        assert_eq!(pages[1].rects().count(), 0);

        let continued = &pages[2];
        assert_eq!(continued.texts().next(), Some(HEADER_TEXT));
        assert!(continued.texts().any(|t| t == "step 80"));
        assert!(continued.contains("[Submission: Text]"));
        assert_eq!(continued.rects().count(), 1);
        assert!(!continued.contains("Next"));

        assert_eq!(pages[3].texts().next(), Some(HEADER_TEXT));
        assert!(pages[3].contains("(b) [2 pts] Next"));
        assert_eq!(pages[3].rects().count(), 1);
    }

    #[test]
    fn test_description_preview_is_truncated() {
        let mut a = assignment_with(vec![sub("Q", SubmissionType::Text, None)]);
        a.problems[0].description = format!("{}\n\nsecond paragraph", "x".repeat(120));
        let pages = layout(RenderMode::Student, &a);

        let expected = format!("{}...", "x".repeat(100));
        assert!(pages[1].texts().any(|t| t == expected));
    }

    #[test]
    fn test_degenerate_assignment() {
        let mut a = Assignment::new("", "");
        a.due_date = None;
        a.due_time = None;
        a.problems = vec![Problem {
            subsections: vec![],
            ..Problem::new()
        }];
        let pages = layout(RenderMode::Template, &a);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("Due:  at "));
    }

    #[test]
    fn test_layout_does_not_mutate() {
        let a = assignment_with(vec![sub("Plot", SubmissionType::Image, Some(2))]);
        let before = a.clone();
        layout(RenderMode::Template, &a);
        assert_eq!(a, before);
    }

    #[test]
    fn test_pdf_exporter_output() {
        let mut config = Config::default();
        config.export.compress_pdf_streams = false;
        let a = assignment_with(vec![sub("Plot", SubmissionType::Image, Some(3))]);

        let exporter = PdfExporter::new(RenderMode::Template, &config);
        assert_eq!(exporter.format_name(), "template");
        assert_eq!(exporter.file_name(), "template.pdf");

        let bytes = exporter.export(&a).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-"));
        assert!(text.contains("/Count 4"));
        assert!(text.contains("\\(Page 3 of 3\\)"));
    }
}
