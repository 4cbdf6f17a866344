//! Assignment data model
//!
//! Strict ownership tree: an [`Assignment`] owns its [`Problem`]s, each
//! problem owns its [`Subsection`]s. Point totals above the subsection level
//! are always derived, never stored.

use crate::types::{now_millis, AssignmentId, ProblemId, SubsectionId, Timestamp};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declared medium a student uses to answer a subsection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SubmissionType {
    /// Free-form text answer
    #[default]
    Text,
    /// One or more scanned/photographed pages
    Image,
    /// AI-use reflection
    AiReflective,
    /// Answer checked by an external auto-grader
    ExternalGrader,
    /// Source code
    Code,
    /// Arbitrary file attachment
    FileUpload,
    /// A label this version does not know about, kept verbatim
    Other(String),
}

impl SubmissionType {
    /// All known submission types, in editor order
    pub const KNOWN: [SubmissionType; 6] = [
        SubmissionType::Text,
        SubmissionType::Image,
        SubmissionType::AiReflective,
        SubmissionType::ExternalGrader,
        SubmissionType::Code,
        SubmissionType::FileUpload,
    ];

    /// Stored label (as written in assignment JSON)
    pub fn label(&self) -> &str {
        match self {
            SubmissionType::Text => "Text",
            SubmissionType::Image => "Image",
            SubmissionType::AiReflective => "AI Reflective",
            SubmissionType::ExternalGrader => "MatlabGrader",
            SubmissionType::Code => "Code",
            SubmissionType::FileUpload => "File Upload",
            SubmissionType::Other(label) => label,
        }
    }

    /// Parse a stored label; unknown labels become [`SubmissionType::Other`]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Text" => SubmissionType::Text,
            "Image" => SubmissionType::Image,
            "AI Reflective" => SubmissionType::AiReflective,
            "MatlabGrader" => SubmissionType::ExternalGrader,
            "Code" => SubmissionType::Code,
            "File Upload" => SubmissionType::FileUpload,
            other => SubmissionType::Other(other.to_string()),
        }
    }

    /// Whether this is the image type
    pub fn is_image(&self) -> bool {
        matches!(self, SubmissionType::Image)
    }
}

impl fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SubmissionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SubmissionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(SubmissionType::from_label(&label))
    }
}

/// Direction for adjacent-swap reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Towards index 0
    Up,
    /// Towards the end
    Down,
}

/// The smallest gradable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    #[serde(default)]
    pub id: SubsectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub submission_type: SubmissionType,
    /// Only meaningful for image submissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_images: Option<u32>,
    /// Submission-type specific payload, not interpreted by export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl Subsection {
    /// Create an empty text subsection
    pub fn new() -> Self {
        Self {
            id: SubsectionId::generate(),
            name: String::new(),
            description: String::new(),
            points: 0,
            submission_type: SubmissionType::Text,
            max_images: Some(1),
            config: None,
        }
    }

    /// Declared image count, treating absent or zero as 1
    pub fn effective_max_images(&self) -> u32 {
        self.max_images.filter(|n| *n > 0).unwrap_or(1)
    }

    /// Number of answer pages this subsection occupies in a document
    pub fn page_count(&self) -> u32 {
        if self.submission_type.is_image() {
            self.effective_max_images()
        } else {
            1
        }
    }
}

impl Default for Subsection {
    fn default() -> Self {
        Self::new()
    }
}

/// One graded unit within an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default)]
    pub id: ProblemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

impl Problem {
    /// Create a problem seeded with one empty subsection
    pub fn new() -> Self {
        Self {
            id: ProblemId::generate(),
            name: String::new(),
            description: String::new(),
            subsections: vec![Subsection::new()],
        }
    }

    /// Sum of subsection points
    pub fn total_points(&self) -> u32 {
        self.subsections.iter().map(|s| s.points).sum()
    }

    /// Append an empty subsection and return it
    pub fn add_subsection(&mut self) -> &mut Subsection {
        self.subsections.push(Subsection::new());
        let last = self.subsections.len() - 1;
        &mut self.subsections[last]
    }

    /// Remove the subsection at `index`
    pub fn remove_subsection(&mut self, index: usize) -> Option<Subsection> {
        if index < self.subsections.len() {
            Some(self.subsections.remove(index))
        } else {
            None
        }
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-level assignment document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, with = "due_time_format")]
    pub due_time: Option<NaiveTime>,
    /// Free text, may contain `$...$` / `$$...$$` math markup
    #[serde(default)]
    pub preamble: String,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl Assignment {
    /// Create a blank draft with one seeded problem, due at 23:59
    pub fn new(course_code: impl Into<String>, title: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: AssignmentId::generate(),
            course_code: course_code.into(),
            title: title.into(),
            due_date: None,
            due_time: NaiveTime::from_hms_opt(23, 59, 0),
            preamble: String::new(),
            problems: vec![Problem::new()],
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of all subsection points across all problems
    pub fn total_points(&self) -> u32 {
        self.problems.iter().map(Problem::total_points).sum()
    }

    /// Due date as displayed and stored (`YYYY-MM-DD`, or empty)
    pub fn due_date_label(&self) -> String {
        self.due_date
            .map(|d| d.format(due_date_format::FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Due time as displayed and stored (`HH:MM`, or empty)
    pub fn due_time_label(&self) -> String {
        self.due_time.map(due_time_format::label).unwrap_or_default()
    }

    /// Append an empty problem and return it
    pub fn add_problem(&mut self) -> &mut Problem {
        self.problems.push(Problem::new());
        let last = self.problems.len() - 1;
        &mut self.problems[last]
    }

    /// Remove the problem at `index`
    pub fn remove_problem(&mut self, index: usize) -> Option<Problem> {
        if index < self.problems.len() {
            Some(self.problems.remove(index))
        } else {
            None
        }
    }

    /// Swap the problem at `index` with its neighbour.
    ///
    /// Moving the first problem up, the last problem down, or an index out
    /// of range leaves the order untouched and returns `false`.
    pub fn move_problem(&mut self, index: usize, direction: MoveDirection) -> bool {
        let len = self.problems.len();
        if index >= len {
            return false;
        }
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < len => index + 1,
            _ => return false,
        };
        self.problems.swap(index, target);
        true
    }

    /// Replace every id in the tree with a freshly generated one
    pub fn regenerate_ids(&mut self) {
        self.id = AssignmentId::generate();
        for problem in &mut self.problems {
            problem.id = ProblemId::generate();
            for sub in &mut problem.subsections {
                sub.id = SubsectionId::generate();
            }
        }
    }
}

/// Lettered label for a zero-based subsection index (`a`, `b`, `c`, ...)
pub fn subsection_letter(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| i.checked_add('a' as u32))
        .and_then(char::from_u32)
        .unwrap_or('?')
}

/// `YYYY-MM-DD`; the empty string stands for "not set"
mod due_date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.date_naive()))
            .map_err(|_| serde::de::Error::custom(format!("invalid due date: {}", raw)))
    }
}

/// `HH:MM` (seconds kept only when non-zero); empty means "not set"
mod due_time_format {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn label(time: NaiveTime) -> String {
        if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        }
    }

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_str(&label(*t)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid due time: {}", raw)))
    }
}
